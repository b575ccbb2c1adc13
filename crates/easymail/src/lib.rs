//! # easymail
//!
//! Compose email messages and send them through a well-known provider.
//!
//! This crate ties together:
//! - [`easymail_mime`]: the [`Mail`] model and its MIME serializer
//! - [`easymail_smtp`]: the SMTP submission client
//!
//! ## Quick Start
//!
//! ```ignore
//! use easymail::{Mail, MailSender, MailServer, Provider};
//!
//! #[tokio::main]
//! async fn main() -> easymail::Result<()> {
//!     let mut mail = Mail::new("me@gmail.com", ["you@example.com"], "Hi", "Hello", false);
//!     mail.add_cc("boss@example.com");
//!     mail.attach_file("report.pdf")?;
//!
//!     let sender = MailSender::new("me@gmail.com", "app-password", Provider::Gmail);
//!     MailServer::new(sender).send_mail(&mail).await
//! }
//! ```
//!
//! Cc and Bcc recipients are part of the SMTP envelope. Bcc addresses are
//! also written into the message headers, so strip them before sending if
//! other recipients must not see them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod provider;
mod sender;
mod server;

pub use error::{Error, Result};
pub use provider::Provider;
pub use sender::MailSender;
pub use server::MailServer;

pub use easymail_mime::{Attachment, Mail, MessageBuilder, ParsedMessage};
pub use easymail_smtp::{Credentials, Security, TransportConfig};

pub use easymail_mime;
pub use easymail_smtp;
