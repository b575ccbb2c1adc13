//! Sending composed mail through a provider.

use crate::error::Result;
use crate::sender::MailSender;
use easymail_mime::Mail;
use easymail_smtp::TransportConfig;

/// Sends [`Mail`] on behalf of a [`MailSender`].
#[derive(Debug, Clone)]
pub struct MailServer {
    sender: MailSender,
    config: TransportConfig,
}

impl MailServer {
    /// Creates a server for the sender's provider (port 587, STARTTLS).
    #[must_use]
    pub fn new(sender: MailSender) -> Self {
        let config = sender.transport_config();
        Self { sender, config }
    }

    /// Creates a server with an explicit transport configuration.
    #[must_use]
    pub const fn with_config(sender: MailSender, config: TransportConfig) -> Self {
        Self { sender, config }
    }

    /// Returns the sending account.
    #[must_use]
    pub const fn sender(&self) -> &MailSender {
        &self.sender
    }

    /// Returns the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Serializes `mail` and submits it.
    ///
    /// The envelope sender is the account's address. The envelope
    /// recipients are the mail's To, Cc and Bcc addresses.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] if submission fails.
    pub async fn send_mail(&self, mail: &Mail) -> Result<()> {
        let recipients = mail.recipients();
        tracing::debug!(
            provider = %self.sender.provider,
            host = %self.config.host,
            recipients = recipients.len(),
            attachments = mail.attachments().len(),
            "Sending mail"
        );

        let message = mail.to_bytes();
        easymail_smtp::send(
            &self.config,
            &self.sender.credentials(),
            &self.sender.email,
            recipients.as_slice(),
            &message,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    #[test]
    fn test_new_uses_provider_host() {
        let server = MailServer::new(MailSender::new("me@outlook.com", "pw", Provider::Outlook));
        assert_eq!(server.config().host, "smtp.live.com");
        assert_eq!(server.config().port, 587);
        assert_eq!(server.sender().email, "me@outlook.com");
    }

    #[test]
    fn test_with_config_overrides() {
        let sender = MailSender::new("me@gmail.com", "pw", Provider::Gmail);
        let config = TransportConfig::new("127.0.0.1").with_port(2525);
        let server = MailServer::with_config(sender, config);
        assert_eq!(server.config().host, "127.0.0.1");
        assert_eq!(server.config().port, 2525);
    }
}
