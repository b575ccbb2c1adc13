//! Ordered header collection.

use std::fmt;

/// Structural headers generated by the serializer.
///
/// Custom headers with one of these names (compared case-insensitively) are
/// never written; the generated value always wins.
pub const RESERVED_HEADERS: [&str; 7] = [
    "From",
    "To",
    "Subject",
    "Cc",
    "Bcc",
    "MIME-Version",
    "Content-Type",
];

/// Recommended maximum header line length, excluding CRLF (RFC 5322 §2.1.1).
pub const MAX_HEADER_LINE_LENGTH: usize = 78;

/// Returns true if `name` is a valid header field name: one or more
/// printable ASCII characters other than `:` (RFC 5322 §2.2).
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| (33..=126).contains(&b) && b != b':')
}

/// Returns true if `name` is one of [`RESERVED_HEADERS`].
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// Collection of email headers in insertion order.
///
/// Names are matched ASCII case-insensitively. Each name holds one value:
/// setting an existing name replaces the value in place and keeps the
/// original spelling and position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header value, replacing any existing value for the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Gets the value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if a header with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parses a header block.
    ///
    /// Parsing stops at the first empty line. Folded continuation lines
    /// (starting with space or tab) are unfolded by removing the line break
    /// and keeping the leading whitespace. Values are trimmed. Lines without
    /// a colon are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut headers = Self::new();
        let mut current: Option<(String, String)> = None;

        for line in text.lines() {
            if line.is_empty() {
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(line.trim_end());
                }
                continue;
            }

            if let Some((name, value)) = current.take() {
                headers.set(name, value.trim());
            }

            if let Some((name, value)) = line.split_once(':') {
                current = Some((name.trim().to_string(), value.trim().to_string()));
            }
        }

        if let Some((name, value)) = current {
            headers.set(name, value.trim());
        }

        headers
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Writes each header as `Name: value\r\n`, folded at spaces.
impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write_folded(f, name, value)?;
        }
        Ok(())
    }
}

/// Writes one header, inserting CRLF before a space wherever the line would
/// otherwise exceed [`MAX_HEADER_LINE_LENGTH`]. The first word moves to its
/// own line only if it fits there; a longer word is never split.
fn write_folded(f: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    write!(f, "{name}:")?;
    let mut line_len = name.len() + 1;

    for (i, word) in value.split(' ').enumerate() {
        let overflows = line_len + 1 + word.len() > MAX_HEADER_LINE_LENGTH;
        let fits_alone = 1 + word.len() <= MAX_HEADER_LINE_LENGTH;
        if !word.is_empty() && overflows && (i > 0 || fits_alone) {
            f.write_str("\r\n")?;
            line_len = 0;
        }
        write!(f, " {word}")?;
        line_len += 1 + word.len();
    }

    f.write_str("\r\n")
}
