//! Reader for serialized messages.
//!
//! Splits the output of [`MessageBuilder`](crate::MessageBuilder) (or any
//! similarly shaped single-level message) back into headers and parts so it
//! can be inspected before it is sent.

use crate::content_type::ContentType;
use crate::encoding::{decode_base64, decode_rfc2047};
use crate::error::{Error, Result};
use crate::header::Headers;
use std::fmt;

/// Transfer encoding types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII.
    SevenBit,
    /// 8-bit text.
    EightBit,
    /// Base64 encoding.
    Base64,
    /// Binary (no encoding).
    Binary,
}

impl TransferEncoding {
    /// Parses transfer encoding from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "8bit" => Self::EightBit,
            "base64" => Self::Base64,
            "binary" => Self::Binary,
            _ => Self::SevenBit,
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevenBit => write!(f, "7bit"),
            Self::EightBit => write!(f, "8bit"),
            Self::Base64 => write!(f, "base64"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Part body as transmitted.
    pub body: Vec<u8>,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub const fn new(headers: Headers, body: Vec<u8>) -> Self {
        Self { headers, body }
    }

    /// Gets the content type, defaulting to `text/plain; charset=utf-8`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content type header is invalid.
    pub fn content_type(&self) -> Result<ContentType> {
        self.headers
            .get("Content-Type")
            .map_or_else(|| Ok(ContentType::text_plain()), ContentType::parse)
    }

    /// Gets the transfer encoding.
    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        self.headers
            .get("Content-Transfer-Encoding")
            .map_or(TransferEncoding::SevenBit, TransferEncoding::parse)
    }

    /// Returns the `filename` parameter of an attachment part.
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        let disposition = self.headers.get("Content-Disposition")?;
        let (_, rest) = disposition.split_once("filename=")?;
        let rest = rest.trim();

        let Some(quoted) = rest.strip_prefix('"') else {
            return Some(rest.split(';').next().unwrap_or_default().trim().to_string());
        };

        let mut name = String::new();
        let mut chars = quoted.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => name.extend(chars.next()),
                '"' => break,
                _ => name.push(c),
            }
        }
        Some(name)
    }

    /// Returns true if this part is an attachment.
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.headers
            .get("Content-Disposition")
            .is_some_and(|d| d.trim_start().to_lowercase().starts_with("attachment"))
    }

    /// Decodes the body according to the transfer encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails.
    pub fn decode_body(&self) -> Result<Vec<u8>> {
        match self.transfer_encoding() {
            TransferEncoding::Base64 => decode_base64(&String::from_utf8_lossy(&self.body)),
            _ => Ok(self.body.clone()),
        }
    }

    /// Gets the decoded body as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or the body is not UTF-8.
    pub fn body_text(&self) -> Result<String> {
        let decoded = self.decode_body()?;
        String::from_utf8(decoded).map_err(|e| Error::Parse(format!("Body is not UTF-8: {e}")))
    }
}

/// A serialized message split into headers and body.
#[derive(Debug, Clone)]
pub struct ParsedMessage {
    /// Top-level headers.
    pub headers: Headers,
    /// Body for single-part messages.
    pub body: Option<Vec<u8>>,
    /// Parts of a multipart message (empty for single-part messages).
    pub parts: Vec<Part>,
}

impl ParsedMessage {
    /// Parses a serialized message.
    ///
    /// # Errors
    ///
    /// Returns an error if the header/body separator is missing, the content
    /// type is invalid, or a multipart body is malformed.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let (header_block, body) = split_head(raw)?;
        let headers = Headers::parse(&String::from_utf8_lossy(header_block));

        let content_type = headers
            .get("Content-Type")
            .map_or_else(|| Ok(ContentType::text_plain()), ContentType::parse)?;

        if !content_type.is_multipart() {
            return Ok(Self {
                headers,
                body: Some(body.to_vec()),
                parts: Vec::new(),
            });
        }

        let boundary = content_type.boundary().ok_or(Error::MissingBoundary)?;
        let parts = split_parts(body, boundary)?
            .into_iter()
            .map(|raw_part| {
                let (head, part_body) = split_head(raw_part)?;
                Ok(Part::new(
                    Headers::parse(&String::from_utf8_lossy(head)),
                    part_body.to_vec(),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            headers,
            body: None,
            parts,
        })
    }

    /// Checks if this is a multipart message.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.body.is_none()
    }

    /// Gets the Subject header as written on the wire.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.headers.get("Subject")
    }

    /// Gets the Subject header with RFC 2047 encoded words decoded.
    ///
    /// A subject whose encoded words are malformed is returned as written.
    #[must_use]
    pub fn decoded_subject(&self) -> Option<String> {
        self.subject()
            .map(|subject| decode_rfc2047(subject).unwrap_or_else(|_| subject.to_string()))
    }

    /// Returns the attachment parts.
    pub fn attachments(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(|p| p.is_attachment())
    }

    /// Returns the message text: the body of a single-part message or the
    /// first non-attachment part of a multipart one.
    ///
    /// # Errors
    ///
    /// Returns an error if no text is present or decoding fails.
    pub fn body_text(&self) -> Result<String> {
        if let Some(body) = &self.body {
            return String::from_utf8(body.clone())
                .map_err(|e| Error::Parse(format!("Body is not UTF-8: {e}")));
        }

        self.parts
            .iter()
            .find(|p| !p.is_attachment())
            .ok_or_else(|| Error::Parse("No body part found".to_string()))?
            .body_text()
    }
}

/// Splits at the first blank line (`\r\n\r\n`).
fn split_head(raw: &[u8]) -> Result<(&[u8], &[u8])> {
    if raw.starts_with(b"\r\n") {
        return Ok((&[], &raw[2..]));
    }
    let pos = find(raw, b"\r\n\r\n")
        .ok_or_else(|| Error::Parse("Missing blank line after headers".to_string()))?;
    Ok((&raw[..pos + 2], &raw[pos + 4..]))
}

/// Splits a multipart body into raw parts (RFC 2046 §5.1.1).
fn split_parts<'a>(body: &'a [u8], boundary: &str) -> Result<Vec<&'a [u8]>> {
    let open = format!("--{boundary}\r\n");
    let delimiter = format!("\r\n--{boundary}");

    let mut rest = if let Some(stripped) = body.strip_prefix(open.as_bytes()) {
        stripped
    } else {
        let pos = find(body, format!("\r\n{open}").as_bytes())
            .ok_or_else(|| Error::InvalidMultipart("Missing opening delimiter".to_string()))?;
        &body[pos + 2 + open.len()..]
    };

    let mut parts = Vec::new();
    loop {
        let pos = find(rest, delimiter.as_bytes())
            .ok_or_else(|| Error::InvalidMultipart("Missing closing delimiter".to_string()))?;
        parts.push(&rest[..pos]);
        rest = &rest[pos + delimiter.len()..];

        if rest.starts_with(b"--") {
            return Ok(parts);
        }
        rest = rest
            .strip_prefix(b"\r\n")
            .ok_or_else(|| Error::InvalidMultipart("Malformed delimiter line".to_string()))?;
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_encoding_parse() {
        assert_eq!(TransferEncoding::parse("7bit"), TransferEncoding::SevenBit);
        assert_eq!(TransferEncoding::parse(" BASE64 "), TransferEncoding::Base64);
        assert_eq!(TransferEncoding::parse("8bit"), TransferEncoding::EightBit);
        assert_eq!(TransferEncoding::Base64.to_string(), "base64");
    }

    #[test]
    fn test_parse_single_part() {
        let raw = b"From: s@x.com\r\nSubject: Hi\r\n\r\nHello\r\nWorld";
        let message = ParsedMessage::parse(raw).unwrap();
        assert!(!message.is_multipart());
        assert_eq!(message.subject(), Some("Hi"));
        assert_eq!(message.body_text().unwrap(), "Hello\r\nWorld");
    }

    #[test]
    fn test_decoded_subject() {
        let raw = b"Subject: =?utf-8?B?R3LDvMOfZQ==?=\r\n =?utf-8?Q?_aus_K=C3=B6ln?=\r\n\r\nBody";
        let message = ParsedMessage::parse(raw).unwrap();
        assert_eq!(message.decoded_subject().as_deref(), Some("Grüße aus Köln"));

        let broken = ParsedMessage::parse(b"Subject: =?utf-8?B?***?=\r\n\r\n").unwrap();
        assert_eq!(broken.decoded_subject().as_deref(), Some("=?utf-8?B?***?="));
    }

    #[test]
    fn test_parse_multipart() {
        let raw = concat!(
            "Content-Type: multipart/mixed; boundary=XYZ\r\n",
            "\r\n",
            "--XYZ\r\n",
            "Content-Type: text/plain; charset=utf-8\r\n",
            "\r\n",
            "Hello\r\n",
            "--XYZ\r\n",
            "Content-Type: application/octet-stream\r\n",
            "Content-Transfer-Encoding: base64\r\n",
            "Content-Disposition: attachment; filename=\"a \\\"b\\\".txt\"\r\n",
            "\r\n",
            "YWJj\r\n",
            "--XYZ--\r\n"
        );

        let message = ParsedMessage::parse(raw.as_bytes()).unwrap();
        assert!(message.is_multipart());
        assert_eq!(message.parts.len(), 2);
        assert_eq!(message.body_text().unwrap(), "Hello");

        let attachment = message.attachments().next().unwrap();
        assert_eq!(attachment.filename().as_deref(), Some("a \"b\".txt"));
        assert_eq!(attachment.decode_body().unwrap(), b"abc");
    }

    #[test]
    fn test_parse_missing_separator() {
        assert!(ParsedMessage::parse(b"From: s@x.com\r\n").is_err());
    }

    #[test]
    fn test_parse_missing_boundary() {
        let raw = b"Content-Type: multipart/mixed\r\n\r\n--x\r\n";
        assert!(matches!(
            ParsedMessage::parse(raw),
            Err(Error::MissingBoundary)
        ));
    }

    #[test]
    fn test_parse_unterminated_multipart() {
        let raw = b"Content-Type: multipart/mixed; boundary=B\r\n\r\n--B\r\n\r\nbody";
        assert!(matches!(
            ParsedMessage::parse(raw),
            Err(Error::InvalidMultipart(_))
        ));
    }

    #[test]
    fn test_unquoted_filename() {
        let mut headers = Headers::new();
        headers.set("Content-Disposition", "attachment; filename=plain.txt; size=3");
        let part = Part::new(headers, Vec::new());
        assert!(part.is_attachment());
        assert_eq!(part.filename().as_deref(), Some("plain.txt"));
    }
}
