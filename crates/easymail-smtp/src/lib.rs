//! # easymail-smtp
//!
//! Minimal async SMTP submission client.
//!
//! The high-level entry point is [`send`], which performs one complete
//! submission: connect, greet, optionally upgrade with STARTTLS,
//! authenticate with PLAIN, transfer the message and quit.
//!
//! ## Quick Start
//!
//! ```ignore
//! use easymail_smtp::{Credentials, TransportConfig, send};
//!
//! #[tokio::main]
//! async fn main() -> easymail_smtp::Result<()> {
//!     let config = TransportConfig::new("smtp.gmail.com");
//!     let credentials = Credentials::new("me@gmail.com", "app-password");
//!
//!     let message = b"Subject: Hi\r\n\r\nHello!\r\n";
//!     send(&config, &credentials, "me@gmail.com", &["you@example.com"], message).await
//! }
//! ```
//!
//! ## Connection States
//!
//! The lower-level [`Client`] uses the type-state pattern so that commands
//! can only be issued in a valid order:
//!
//! ```text
//! Connected ── auth_plain() ──→ Authenticated ── mail_from() ──→ MailTransaction
//!                                     ↑                                │
//!                               send_message()                      rcpt_to()
//!                                     │                                ↓
//!                                   Data ←──── data() ──────── RecipientAdded
//! ```
//!
//! ## Security
//!
//! Credentials are never sent over an unencrypted connection unless the
//! server is on the loopback interface. With the default
//! [`Security::StartTls`] the connection is upgraded whenever the server
//! offers STARTTLS.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod parser;
mod transport;
pub mod types;

pub use connection::{
    Authenticated, Client, Connected, Data, MailTransaction, RecipientAdded, ServerInfo,
    SmtpConnection,
};
pub use error::{Error, Result};
pub use transport::{
    Credentials, SUBMISSION_PORT, SUBMISSIONS_PORT, Security, TransportConfig, send,
};
pub use types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
