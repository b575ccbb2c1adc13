//! SMTP connection management with type-state pattern.

mod client;
mod stream;

pub use client::{
    Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded, SmtpConnection,
};
pub use stream::{SmtpStream, connect, connect_tls};

use crate::types::{AuthMechanism, Extension};
use std::collections::HashSet;

/// Server capabilities from EHLO response.
#[derive(Debug, Clone, Default)]
pub struct ServerInfo {
    /// Server hostname from greeting.
    pub hostname: String,
    /// Supported extensions.
    pub extensions: HashSet<Extension>,
}

impl ServerInfo {
    /// Checks if the server supports an extension.
    #[must_use]
    pub fn supports(&self, ext: &Extension) -> bool {
        self.extensions.contains(ext)
    }

    /// Checks if STARTTLS is supported.
    #[must_use]
    pub fn supports_starttls(&self) -> bool {
        self.supports(&Extension::StartTls)
    }

    /// Checks if the server advertised AUTH at all.
    #[must_use]
    pub fn supports_auth(&self) -> bool {
        self.extensions
            .iter()
            .any(|ext| matches!(ext, Extension::Auth(_)))
    }

    /// Returns the maximum message size, if advertised and non-zero.
    #[must_use]
    pub fn max_message_size(&self) -> Option<usize> {
        self.extensions.iter().find_map(|ext| match ext {
            Extension::Size(Some(size)) if *size > 0 => Some(*size),
            _ => None,
        })
    }

    /// Returns supported authentication mechanisms.
    #[must_use]
    pub fn auth_mechanisms(&self) -> Vec<AuthMechanism> {
        self.extensions
            .iter()
            .find_map(|ext| match ext {
                Extension::Auth(mechanisms) => Some(mechanisms.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(lines: &[&str]) -> ServerInfo {
        ServerInfo {
            hostname: "smtp.example.com".to_string(),
            extensions: lines.iter().map(|l| Extension::parse(l)).collect(),
        }
    }

    #[test]
    fn test_capabilities() {
        let server = info(&["STARTTLS", "AUTH PLAIN LOGIN", "SIZE 1000", "8BITMIME"]);
        assert!(server.supports_starttls());
        assert!(server.supports_auth());
        assert_eq!(server.max_message_size(), Some(1000));
        assert_eq!(
            server.auth_mechanisms(),
            vec![AuthMechanism::Plain, AuthMechanism::Login]
        );
    }

    #[test]
    fn test_no_capabilities() {
        let server = info(&["SIZE 0"]);
        assert!(!server.supports_starttls());
        assert!(!server.supports_auth());
        assert_eq!(server.max_message_size(), None);
        assert!(server.auth_mechanisms().is_empty());
    }
}
