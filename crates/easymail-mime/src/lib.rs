//! # easymail-mime
//!
//! Mail message model and MIME serializer.
//!
//! ## Features
//!
//! - **Message model**: sender, ordered recipients, subject, text or HTML
//!   body, custom headers and attachments
//! - **Serialization**: RFC 5322 output, `multipart/mixed` with Base64
//!   attachments when needed, CRLF line endings throughout
//! - **Content loading**: attachments and HTML bodies from disk
//! - **Inspection**: split a serialized message back into its parts
//!
//! ## Quick Start
//!
//! ```ignore
//! use easymail_mime::{Attachment, Mail};
//!
//! let mut mail = Mail::new("s@x.com", ["r@x.com"], "Hi", "Hello", false);
//! mail.add_cc("c@x.com");
//! mail.add_header("X-Mailer", "easymail");
//! mail.add_attachment(Attachment::new("note.txt", b"abc".to_vec()));
//! mail.attach_file("report.pdf")?;
//!
//! let bytes = mail.to_bytes();
//! ```
//!
//! ## Header precedence
//!
//! `From`, `To`, `Subject`, `Cc`, `Bcc`, `MIME-Version` and `Content-Type`
//! are always generated from the mail's fields. A custom header with one of
//! those names is kept on the [`Mail`] but never serialized.
//!
//! ## Boundaries
//!
//! Each [`MessageBuilder::build`] call draws a new random boundary, so two
//! serializations of the same mail differ only in that token. Pin it with
//! [`MessageBuilder::boundary`] for reproducible output:
//!
//! ```ignore
//! let bytes = mail.builder().boundary("fixed-boundary-for-tests").build();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod attachment;
mod builder;
mod content_type;
mod error;
mod header;
mod mail;
mod parsed;

pub mod encoding;

pub use attachment::Attachment;
pub use builder::MessageBuilder;
pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::{
    Headers, MAX_HEADER_LINE_LENGTH, RESERVED_HEADERS, is_reserved, is_valid_name,
};
pub use mail::Mail;
pub use parsed::{ParsedMessage, Part, TransferEncoding};
