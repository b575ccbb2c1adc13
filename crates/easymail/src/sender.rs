//! Sending account.

use crate::provider::Provider;
use easymail_smtp::{Credentials, TransportConfig};
use std::fmt;

/// Account used to send mail: address, password and provider.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailSender {
    /// Sender address, also used as the login name.
    pub email: String,
    /// Password or app-specific password.
    pub password: String,
    /// Provider hosting the account.
    pub provider: Provider,
}

impl MailSender {
    /// Creates a new sender.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, provider: Provider) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            provider,
        }
    }

    /// Returns the PLAIN credentials for this account.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.email, &self.password)
    }

    /// Returns the transport configuration for the provider's submission
    /// server with STARTTLS.
    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new(self.provider.host()).with_port(self.provider.port())
    }
}

impl fmt::Debug for MailSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSender")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("provider", &self.provider)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easymail_smtp::Security;

    #[test]
    fn test_transport_config() {
        let sender = MailSender::new("me@yahoo.com", "pw", Provider::Yahoo);
        let config = sender.transport_config();
        assert_eq!(config.host, "smtp.mail.yahoo.com");
        assert_eq!(config.port, 587);
        assert_eq!(config.security, Security::StartTls);
    }

    #[test]
    fn test_credentials() {
        let sender = MailSender::new("me@gmail.com", "pw", Provider::Gmail);
        let credentials = sender.credentials();
        assert_eq!(credentials.username, "me@gmail.com");
        assert_eq!(credentials.password, "pw");
    }

    #[test]
    fn test_debug_redacts_password() {
        let sender = MailSender::new("me@gmail.com", "hunter2", Provider::Gmail);
        let debug = format!("{sender:?}");
        assert!(debug.contains("me@gmail.com"));
        assert!(!debug.contains("hunter2"));
    }
}
