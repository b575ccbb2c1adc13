//! Error types for the easymail facade.

/// Result type alias for easymail operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from composing or sending mail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Loading or parsing message content failed.
    #[error(transparent)]
    Content(#[from] easymail_mime::Error),

    /// Submitting the message failed.
    #[error(transparent)]
    Transport(#[from] easymail_smtp::Error),

    /// Provider name is not in the lookup table.
    #[error("Unknown mail provider: {0}")]
    UnknownProvider(String),
}

impl Error {
    /// Returns true if the server rejected the message or credentials
    /// permanently (5xx).
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_permanent(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport() {
        let err: Error = easymail_smtp::Error::smtp_error(550, "No such user").into();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_permanent());
        assert_eq!(err.to_string(), "SMTP error 550: No such user");
    }

    #[test]
    fn test_from_content() {
        let err: Error = easymail_mime::Error::MissingFileName("/".into()).into();
        assert!(matches!(err, Error::Content(_)));
        assert!(!err.is_permanent());
    }

    #[test]
    fn test_unknown_provider_display() {
        let err = Error::UnknownProvider("hotmail2".into());
        assert_eq!(err.to_string(), "Unknown mail provider: hotmail2");
    }
}
