//! Server replies.

use std::fmt;

/// A complete, possibly multi-line, server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Three-digit code shared by every line.
    pub code: ReplyCode,
    /// Text of each line, without the code and separator.
    pub message: Vec<String>,
}

impl Reply {
    /// Creates a new reply.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(code: ReplyCode, message: Vec<String>) -> Self {
        Self { code, message }
    }

    /// Returns true for a 2xx reply.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Returns the text of all lines joined by a space, suitable for
    /// one-line error messages.
    #[must_use]
    pub fn message_text(&self) -> String {
        self.message
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Reply code (RFC 5321 §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// 220 greeting.
    pub const SERVICE_READY: Self = Self(220);
    /// 221 reply to QUIT.
    pub const CLOSING: Self = Self(221);
    /// 354 go-ahead after DATA.
    pub const START_DATA: Self = Self(354);

    /// Wraps a numeric code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// 2xx.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self.0, 200..=299)
    }

    /// 4xx: the command may succeed if retried later.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self.0, 400..=499)
    }

    /// 5xx: retrying the same command will fail again.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        matches!(self.0, 500..=599)
    }
}

impl fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_classes() {
        assert!(ReplyCode::new(250).is_success());
        assert!(ReplyCode::CLOSING.is_success());
        assert!(!ReplyCode::START_DATA.is_success());
        assert!(!ReplyCode::START_DATA.is_transient());
        assert!(ReplyCode::new(451).is_transient());
        assert!(ReplyCode::new(535).is_permanent());
        assert!(!ReplyCode::new(421).is_permanent());
        assert!(!ReplyCode::new(600).is_permanent());
    }

    #[test]
    fn test_display() {
        assert_eq!(ReplyCode::new(250).to_string(), "250");
    }

    #[test]
    fn test_message_text_joins_lines() {
        let reply = Reply::new(
            ReplyCode::new(550),
            vec!["5.1.1 The email account".to_string(), "does not exist".to_string()],
        );
        assert_eq!(reply.message_text(), "5.1.1 The email account does not exist");
        assert!(!reply.is_success());
        assert_eq!(Reply::new(ReplyCode::START_DATA, vec![String::new()]).message_text(), "");
    }
}
