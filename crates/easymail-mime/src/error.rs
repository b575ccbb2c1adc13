//! Error types for message content and MIME operations.

use std::path::PathBuf;

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A content file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A content file does not have the expected extension.
    #[error("Unexpected file extension for {}: expected {expected}", path.display())]
    InvalidExtension {
        /// Offending path.
        path: PathBuf,
        /// Human-readable list of accepted extensions.
        expected: &'static str,
    },

    /// The path has no final component to use as an attachment name.
    #[error("Path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),

    /// A text file is not valid UTF-8.
    #[error("File is not valid UTF-8: {}", path.display())]
    InvalidUtf8 {
        /// Offending path.
        path: PathBuf,
    },

    /// Invalid content type.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Base64 decode error.
    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// Missing boundary in multipart message.
    #[error("Missing boundary in multipart message")]
    MissingBoundary,

    /// Invalid multipart structure.
    #[error("Invalid multipart structure: {0}")]
    InvalidMultipart(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Returns true if this error came from loading content from disk.
    #[must_use]
    pub const fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::Io { .. }
                | Self::InvalidExtension { .. }
                | Self::MissingFileName(_)
                | Self::InvalidUtf8 { .. }
        )
    }
}
