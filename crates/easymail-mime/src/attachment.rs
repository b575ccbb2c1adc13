//! File attachments.

use crate::error::{Error, Result};
use std::path::Path;

/// A named attachment with its raw content already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// File name presented to the recipient.
    pub filename: String,
    /// Raw content.
    pub content: Vec<u8>,
}

impl Attachment {
    /// Creates an attachment from in-memory content.
    #[must_use]
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Loads an attachment from disk, named after the path's final component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingFileName`] if the path has no file name and
    /// [`Error::Io`] if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .ok_or_else(|| Error::MissingFileName(path.to_path_buf()))?
            .to_string_lossy()
            .into_owned();

        let content = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(filename = %filename, size = content.len(), "Loaded attachment");
        Ok(Self { filename, content })
    }

    /// Returns the content size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_new() {
        let attachment = Attachment::new("note.txt", b"abc".to_vec());
        assert_eq!(attachment.filename, "note.txt");
        assert_eq!(attachment.size(), 3);
    }

    #[test]
    fn test_from_file_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.bin");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0, 159, 146, 150]).unwrap();

        let attachment = Attachment::from_file(&path).unwrap();
        assert_eq!(attachment.filename, "report.bin");
        assert_eq!(attachment.content, vec![0, 159, 146, 150]);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Attachment::from_file(dir.path().join("absent.pdf")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.is_content_error());
    }

    #[test]
    fn test_from_file_without_name() {
        let err = Attachment::from_file("..").unwrap_err();
        assert!(matches!(err, Error::MissingFileName(_)));
    }
}
