//! One-shot message submission.
//!
//! [`send`] opens a connection, authenticates with PLAIN, submits one
//! message and quits. It performs no retries, pooling or timeouts; wrap it
//! in `tokio::time::timeout` or spawn it on a task as needed.

use crate::connection::{Client, ServerInfo, SmtpConnection, connect, connect_tls};
use crate::error::{Error, Result};
use crate::types::{Address, AuthMechanism};
use std::fmt;
use std::net::IpAddr;

/// Standard message submission port (RFC 6409).
pub const SUBMISSION_PORT: u16 = 587;

/// Implicit TLS submission port (RFC 8314).
pub const SUBMISSIONS_PORT: u16 = 465;

/// Connection security mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Security {
    /// Never encrypt. Credentials are only sent to loopback hosts.
    None,
    /// Connect in plain text and upgrade with STARTTLS when offered.
    #[default]
    StartTls,
    /// Implicit TLS from the first byte.
    Tls,
}

impl Security {
    /// Returns the conventional port for this mode.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Tls => SUBMISSIONS_PORT,
            Self::StartTls | Self::None => SUBMISSION_PORT,
        }
    }
}

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportConfig {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Security mode.
    pub security: Security,
    /// Name announced in EHLO/HELO.
    pub client_hostname: String,
}

impl TransportConfig {
    /// Creates a configuration for the submission port with STARTTLS.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let security = Security::default();
        Self {
            host: host.into(),
            port: security.default_port(),
            security,
            client_hostname: "localhost".to_string(),
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the security mode.
    #[must_use]
    pub const fn with_security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    /// Sets the name announced in EHLO/HELO.
    #[must_use]
    pub fn with_client_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.client_hostname = hostname.into();
        self
    }

    /// Returns true if the host refers to the local machine.
    #[must_use]
    pub fn is_loopback(&self) -> bool {
        self.host.eq_ignore_ascii_case("localhost")
            || self
                .host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .is_ok_and(|ip| ip.to_canonical().is_loopback())
    }
}

/// Username and password for PLAIN authentication.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Credentials {
    /// Username (usually the email address).
    pub username: String,
    /// Password or app-specific secret.
    pub password: String,
}

impl Credentials {
    /// Creates new credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Submits `message` to the server in `config`.
///
/// `from` is the envelope sender and `recipients` the envelope recipients
/// (usually To, Cc and Bcc together). `message` must already be a complete
/// RFC 5322 message.
///
/// # Errors
///
/// - [`Error::NoRecipients`] / [`Error::InvalidAddress`] before connecting
/// - [`Error::Io`] / [`Error::Tls`] on connection failure
/// - [`Error::InsecureAuth`] when credentials would cross an unencrypted
///   non-loopback connection
/// - [`Error::NotSupported`] when the server offers no AUTH or no PLAIN
/// - [`Error::AuthFailed`] when the credentials are rejected
/// - [`Error::MessageTooLarge`] when the server's SIZE limit is exceeded
/// - [`Error::SmtpError`] when any other command is rejected
pub async fn send<S: AsRef<str>>(
    config: &TransportConfig,
    credentials: &Credentials,
    from: &str,
    recipients: &[S],
    message: &[u8],
) -> Result<()> {
    if recipients.is_empty() {
        return Err(Error::NoRecipients);
    }
    let from = Address::new(from)?;
    let recipients = recipients
        .iter()
        .map(|r| Address::new(r.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let stream = match config.security {
        Security::Tls => connect_tls(&config.host, config.port).await?,
        Security::StartTls | Security::None => connect(&config.host, config.port).await?,
    };

    let mut client = Client::from_stream(stream)
        .await?
        .hello(&config.client_hostname)
        .await?;

    if config.security == Security::StartTls && client.server_info().supports_starttls() {
        client = client
            .starttls(&config.host, &config.client_hostname)
            .await?;
    }

    check_auth_allowed(config, client.server_info(), client.is_encrypted())?;
    let client = client
        .auth_plain(&credentials.username, &credentials.password)
        .await?;

    if let Some(limit) = client.server_info().max_message_size() {
        if message.len() > limit {
            return Err(Error::MessageTooLarge {
                size: message.len(),
                limit,
            });
        }
    }

    let mut recipients = recipients.into_iter();
    let client = client.mail_from(from).await?;
    let first = recipients.next().ok_or(Error::NoRecipients)?;
    let mut client = client.rcpt_to(first).await?;
    for recipient in recipients {
        client = client.rcpt_to(recipient).await?;
    }

    let client = client.data().await?.send_message(message).await?;
    tracing::info!(
        host = %config.host,
        size = message.len(),
        "Message accepted for delivery"
    );

    client.quit().await
}

/// Decides whether PLAIN credentials may be sent on this connection.
fn check_auth_allowed(
    config: &TransportConfig,
    server: &ServerInfo,
    encrypted: bool,
) -> Result<()> {
    if !encrypted && !config.is_loopback() {
        return Err(Error::InsecureAuth(config.host.clone()));
    }
    if !server.supports_auth() {
        return Err(Error::NotSupported("AUTH".into()));
    }
    if !server.auth_mechanisms().contains(&AuthMechanism::Plain) {
        return Err(Error::NotSupported("AUTH PLAIN".into()));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Extension;

    fn server_with(lines: &[&str]) -> ServerInfo {
        ServerInfo {
            hostname: "smtp.example.com".to_string(),
            extensions: lines.iter().map(|l| Extension::parse(l)).collect(),
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = TransportConfig::new("smtp.example.com");
        assert_eq!(config.port, SUBMISSION_PORT);
        assert_eq!(config.port, Security::StartTls.default_port());
        assert_eq!(config.security, Security::StartTls);
        assert_eq!(config.client_hostname, "localhost");
    }

    #[test]
    fn test_config_builders() {
        let config = TransportConfig::new("smtp.example.com")
            .with_port(SUBMISSIONS_PORT)
            .with_security(Security::Tls)
            .with_client_hostname("client.example.com");
        assert_eq!(config.port, 465);
        assert_eq!(config.security, Security::Tls);
        assert_eq!(config.client_hostname, "client.example.com");
    }

    #[test]
    fn test_security_default_port() {
        assert_eq!(Security::None.default_port(), SUBMISSION_PORT);
        assert_eq!(Security::StartTls.default_port(), SUBMISSION_PORT);
        assert_eq!(Security::Tls.default_port(), SUBMISSIONS_PORT);
    }

    #[test]
    fn test_auth_refused_over_plaintext_to_remote_host() {
        let server = server_with(&["AUTH PLAIN"]);
        let remote = TransportConfig::new("smtp.example.com");

        let err = check_auth_allowed(&remote, &server, false).unwrap_err();
        assert!(matches!(err, Error::InsecureAuth(ref host) if host == "smtp.example.com"));
        assert!(check_auth_allowed(&remote, &server, true).is_ok());
        assert!(check_auth_allowed(&TransportConfig::new("localhost"), &server, false).is_ok());
    }

    #[test]
    fn test_auth_requires_plain_mechanism() {
        let config = TransportConfig::new("smtp.example.com");

        let err = check_auth_allowed(&config, &server_with(&["8BITMIME"]), true).unwrap_err();
        assert!(matches!(err, Error::NotSupported(ref what) if what == "AUTH"));

        let err = check_auth_allowed(&config, &server_with(&["AUTH LOGIN"]), true).unwrap_err();
        assert!(matches!(err, Error::NotSupported(ref what) if what == "AUTH PLAIN"));
    }

    #[test]
    fn test_is_loopback() {
        assert!(TransportConfig::new("localhost").is_loopback());
        assert!(TransportConfig::new("127.0.0.1").is_loopback());
        assert!(TransportConfig::new("[::1]").is_loopback());
        assert!(TransportConfig::new("::1").is_loopback());
        assert!(TransportConfig::new("::ffff:127.0.0.1").is_loopback());
        assert!(!TransportConfig::new("smtp.gmail.com").is_loopback());
        assert!(!TransportConfig::new("10.0.0.1").is_loopback());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("user@example.com", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("user@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_send_rejects_empty_recipients() {
        let config = TransportConfig::new("localhost");
        let credentials = Credentials::new("u", "p");
        let result =
            tokio_test::block_on(send::<&str>(&config, &credentials, "s@x.com", &[], b"x"));
        assert!(matches!(result, Err(Error::NoRecipients)));
    }

    #[test]
    fn test_send_rejects_invalid_addresses_before_connecting() {
        // Port 9 is never contacted: validation fails first.
        let config = TransportConfig::new("localhost").with_port(9);
        let credentials = Credentials::new("u", "p");

        let result = tokio_test::block_on(send(
            &config,
            &credentials,
            "not-an-address",
            &["r@x.com"],
            b"x",
        ));
        assert!(matches!(result, Err(Error::InvalidAddress(_))));

        let result = tokio_test::block_on(send(
            &config,
            &credentials,
            "s@x.com",
            &["r@x.com", "bad"],
            b"x",
        ));
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }
}
