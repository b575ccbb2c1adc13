//! Error types for SMTP submission.

use crate::types::ReplyCode;
use std::io;

/// Result type alias for SMTP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// SMTP error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error, including connection failures.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// TLS error.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// Server rejected a command.
    #[error("SMTP error {code}: {message}")]
    SmtpError {
        /// Reply code (e.g., 550).
        code: u16,
        /// Error message from server.
        message: String,
    },

    /// Server rejected the credentials.
    #[error("Authentication failed ({code}): {message}")]
    AuthFailed {
        /// Reply code (usually 535).
        code: u16,
        /// Error message from server.
        message: String,
    },

    /// Protocol error (unexpected or malformed response).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// No envelope recipients were given.
    #[error("No recipients specified")]
    NoRecipients,

    /// Refusing to send credentials over an unencrypted connection.
    #[error("Refusing PLAIN authentication over an unencrypted connection to {0}")]
    InsecureAuth(String),

    /// Message too large.
    #[error("Message exceeds size limit: {size} > {limit} bytes")]
    MessageTooLarge {
        /// Message size.
        size: usize,
        /// Limit advertised by the server.
        limit: usize,
    },

    /// Feature not supported by server.
    #[error("Server does not support {0}")]
    NotSupported(String),
}

impl Error {
    /// Creates an SMTP error from a reply code and message.
    #[must_use]
    pub fn smtp_error(code: u16, message: impl Into<String>) -> Self {
        Self::SmtpError {
            code,
            message: message.into(),
        }
    }

    /// Returns the server reply code, if the error carries one.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::SmtpError { code, .. } | Self::AuthFailed { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if this is a permanent error (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        match self.code() {
            Some(code) => ReplyCode::new(code).is_permanent(),
            None => false,
        }
    }

    /// Returns true if this is a transient error (4xx).
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self.code() {
            Some(code) => ReplyCode::new(code).is_transient(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let err = Error::smtp_error(550, "No such user");
        assert_eq!(err.code(), Some(550));
        assert!(err.is_permanent());
        assert!(!err.is_transient());

        let err = Error::smtp_error(451, "Try later");
        assert!(err.is_transient());

        let err = Error::AuthFailed {
            code: 535,
            message: "Bad credentials".into(),
        };
        assert!(err.is_permanent());

        assert_eq!(Error::NoRecipients.code(), None);
        assert!(!Error::NoRecipients.is_permanent());
    }

    #[test]
    fn test_display() {
        let err = Error::MessageTooLarge {
            size: 20,
            limit: 10,
        };
        assert_eq!(err.to_string(), "Message exceeds size limit: 20 > 10 bytes");
    }
}
