//! MIME serialization of a [`Mail`].
//!
//! A mail without attachments becomes a single-part `text/plain` or
//! `text/html` message whose body follows the header block verbatim. A mail
//! with attachments becomes `multipart/mixed`:
//!
//! ```text
//! From: s@x.com
//! To: r@x.com
//! Subject: Hi
//! MIME-Version: 1.0
//! Content-Type: multipart/mixed; boundary=B
//!
//! --B
//! Content-Type: text/plain; charset=utf-8
//!
//! Hello
//! --B
//! Content-Type: application/octet-stream
//! Content-Transfer-Encoding: base64
//! Content-Disposition: attachment; filename="note.txt"
//!
//! YWJj
//! --B--
//! ```
//!
//! Every line ends in CRLF.

use crate::attachment::Attachment;
use crate::content_type::ContentType;
use crate::encoding::{encode_base64_wrapped, encode_rfc2047, generate_boundary};
use crate::header::{Headers, is_reserved, is_valid_name};
use crate::mail::Mail;
use std::fmt::Write as _;

const CRLF: &str = "\r\n";

/// Serializes a [`Mail`] into RFC 5322 bytes.
///
/// The builder borrows the mail and never mutates it. Unless a boundary is
/// pinned with [`MessageBuilder::boundary`], every [`build`](Self::build)
/// call generates a fresh one.
#[derive(Debug, Clone)]
pub struct MessageBuilder<'a> {
    mail: &'a Mail,
    boundary: Option<String>,
}

impl<'a> MessageBuilder<'a> {
    /// Creates a builder for `mail`.
    #[must_use]
    pub const fn new(mail: &'a Mail) -> Self {
        Self {
            mail,
            boundary: None,
        }
    }

    /// Pins the multipart boundary instead of generating one per build.
    ///
    /// The caller must choose a token that cannot occur in the body.
    #[must_use]
    pub fn boundary(mut self, boundary: impl Into<String>) -> Self {
        self.boundary = Some(boundary.into());
        self
    }

    /// Builds the top-level header block in emission order.
    ///
    /// Custom headers follow the structural ones. Custom headers whose
    /// names are reserved are dropped so the generated value wins, as are
    /// names that are not valid field names. CR and LF are removed from every
    /// value so no caller input can start a new header line. A non-ASCII
    /// subject is written as RFC 2047 encoded words.
    #[must_use]
    pub fn headers(&self, content_type: &ContentType) -> Headers {
        let mail = self.mail;
        let mut headers = Headers::new();

        headers.set("From", single_line(mail.from()));
        headers.set("To", address_list(mail.to()));
        headers.set("Subject", encode_rfc2047(&single_line(mail.subject())));
        if !mail.cc().is_empty() {
            headers.set("Cc", address_list(mail.cc()));
        }
        if !mail.bcc().is_empty() {
            headers.set("Bcc", address_list(mail.bcc()));
        }
        headers.set("MIME-Version", "1.0");
        headers.set("Content-Type", content_type.to_string());

        for (name, value) in mail.headers() {
            if is_reserved(name) {
                tracing::debug!(header = name, "Skipping reserved custom header");
                continue;
            }
            if !is_valid_name(name) {
                tracing::debug!(header = name, "Skipping malformed custom header name");
                continue;
            }
            headers.set(name, single_line(value));
        }

        headers
    }

    /// Serializes the mail.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let mail = self.mail;
        let body_type = ContentType::for_body(mail.is_html());

        if !mail.has_attachments() {
            let mut out = self.headers(&body_type).to_string();
            out.push_str(CRLF);
            out.push_str(mail.body());
            return out.into_bytes();
        }

        let boundary = self.boundary.clone().unwrap_or_else(generate_boundary);
        let mut out = self
            .headers(&ContentType::multipart_mixed(boundary.as_str()))
            .to_string();
        out.push_str(CRLF);

        // The CRLF before each delimiter belongs to the delimiter (RFC 2046
        // §5.1.1), so part bodies are reproduced exactly.
        let _ = write!(out, "--{boundary}{CRLF}");
        let _ = write!(out, "Content-Type: {body_type}{CRLF}{CRLF}");
        out.push_str(mail.body());

        for attachment in mail.attachments() {
            let _ = write!(out, "{CRLF}--{boundary}{CRLF}");
            write_attachment(&mut out, attachment);
        }

        let _ = write!(out, "{CRLF}--{boundary}--{CRLF}");

        tracing::debug!(
            attachments = mail.attachments().len(),
            size = out.len(),
            "Serialized multipart message"
        );
        out.into_bytes()
    }
}

fn write_attachment(out: &mut String, attachment: &Attachment) {
    let filename = quote_filename(&attachment.filename);
    let _ = write!(out, "Content-Type: {}{CRLF}", ContentType::octet_stream());
    let _ = write!(out, "Content-Transfer-Encoding: base64{CRLF}");
    let _ = write!(
        out,
        "Content-Disposition: attachment; filename=\"{filename}\"{CRLF}{CRLF}"
    );
    out.push_str(&encode_base64_wrapped(&attachment.content));
}

/// Removes CR and LF so a value cannot break out of its header line.
fn single_line(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

fn address_list(addresses: &[String]) -> String {
    addresses
        .iter()
        .map(|address| single_line(address))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escapes `"` and `\` for use inside a quoted-string.
fn quote_filename(filename: &str) -> String {
    let mut quoted = String::with_capacity(filename.len());
    for c in filename.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        // Header values must stay on one line.
        if matches!(c, '\r' | '\n') {
            continue;
        }
        quoted.push(c);
    }
    quoted
}
