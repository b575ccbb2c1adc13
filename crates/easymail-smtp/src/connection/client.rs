//! Type-state SMTP client.

use super::{ServerInfo, SmtpStream};
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_last_reply_line, parse_reply};
use crate::types::{Address, AuthMechanism, Extension, Reply, ReplyCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashSet;
use std::marker::PhantomData;

/// Type-state marker for connected state.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker for authenticated state.
#[derive(Debug)]
pub struct Authenticated;

/// Type-state marker for mail transaction started.
#[derive(Debug)]
pub struct MailTransaction;

/// Type-state marker for recipient added.
#[derive(Debug)]
pub struct RecipientAdded;

/// Type-state marker for data mode.
#[derive(Debug)]
pub struct Data;

/// SMTP client with type-state pattern.
#[derive(Debug)]
pub struct Client<State> {
    stream: SmtpStream,
    server_info: ServerInfo,
    _state: PhantomData<State>,
}

/// Connection trait for all states.
pub trait SmtpConnection {
    /// Returns the server information.
    fn server_info(&self) -> &ServerInfo;

    /// Returns true if the connection is TLS-encrypted.
    fn is_encrypted(&self) -> bool;
}

impl<S> SmtpConnection for Client<S> {
    fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    fn is_encrypted(&self) -> bool {
        self.stream.is_encrypted()
    }
}

impl Client<Connected> {
    /// Creates a client from a stream and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or if the server returns an error.
    pub async fn from_stream(mut stream: SmtpStream) -> Result<Self> {
        let greeting = read_reply(&mut stream).await?;
        if greeting.code != ReplyCode::SERVICE_READY {
            return Err(reject(&greeting));
        }

        let hostname = greeting
            .message
            .first()
            .and_then(|msg| msg.split_whitespace().next())
            .unwrap_or("unknown")
            .to_string();
        tracing::debug!(server = %hostname, "Received SMTP greeting");

        Ok(Self {
            stream,
            server_info: ServerInfo {
                hostname,
                extensions: HashSet::new(),
            },
            _state: PhantomData,
        })
    }

    /// Sends EHLO and discovers server capabilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the EHLO command fails.
    pub async fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        let reply = self
            .send_command(Command::Ehlo {
                hostname: client_hostname.to_string(),
            })
            .await?;

        if !reply.is_success() {
            return Err(reject(&reply));
        }

        self.server_info.extensions = parse_extensions(&reply);
        Ok(self)
    }

    /// Greets the server with EHLO, falling back to HELO if EHLO is rejected.
    ///
    /// After a HELO greeting no extensions are known.
    ///
    /// # Errors
    ///
    /// Returns an error if both greetings fail.
    pub async fn hello(mut self, client_hostname: &str) -> Result<Self> {
        let reply = self
            .send_command(Command::Ehlo {
                hostname: client_hostname.to_string(),
            })
            .await?;

        if reply.is_success() {
            self.server_info.extensions = parse_extensions(&reply);
            return Ok(self);
        }

        tracing::debug!(code = %reply.code, "EHLO rejected, falling back to HELO");
        let reply = self
            .send_command(Command::Helo {
                hostname: client_hostname.to_string(),
            })
            .await?;

        if !reply.is_success() {
            return Err(reject(&reply));
        }

        self.server_info.extensions.clear();
        Ok(self)
    }

    /// Upgrades the connection to TLS using STARTTLS and greets again.
    ///
    /// # Errors
    ///
    /// Returns an error if STARTTLS is not supported or if the upgrade fails.
    pub async fn starttls(mut self, server_hostname: &str, client_hostname: &str) -> Result<Self> {
        if !self.server_info.supports_starttls() {
            return Err(Error::NotSupported("STARTTLS".into()));
        }

        let reply = self.send_command(Command::StartTls).await?;
        if !reply.is_success() {
            return Err(reject(&reply));
        }

        self.stream = self.stream.upgrade_to_tls(server_hostname).await?;
        tracing::debug!(server = server_hostname, "Upgraded connection to TLS");

        // Capabilities learned before the upgrade must be discarded.
        self.server_info.extensions.clear();
        self.ehlo(client_hostname).await
    }

    /// Authenticates using the PLAIN mechanism with an initial response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthFailed`] if the server rejects the credentials.
    pub async fn auth_plain(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<Authenticated>> {
        let credentials = format!("\0{username}\0{password}");

        let reply = self
            .send_command(Command::Auth {
                mechanism: AuthMechanism::Plain,
                initial_response: Some(STANDARD.encode(credentials.as_bytes())),
            })
            .await?;

        if !reply.is_success() {
            tracing::warn!(code = %reply.code, "SMTP authentication rejected");
            return Err(Error::AuthFailed {
                code: reply.code.as_u16(),
                message: reply.message_text(),
            });
        }

        Ok(self.transition())
    }
}

impl Client<Authenticated> {
    /// Starts a mail transaction.
    ///
    /// Declares `BODY=8BITMIME` when the server supports it.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub async fn mail_from(mut self, from: Address) -> Result<Client<MailTransaction>> {
        let body = self
            .server_info
            .supports(&Extension::EightBitMime)
            .then_some("8BITMIME");

        let reply = self.send_command(Command::MailFrom { from, body }).await?;
        if !reply.is_success() {
            return Err(reject(&reply));
        }

        Ok(self.transition())
    }
}

impl Client<MailTransaction> {
    /// Adds the first recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Client<RecipientAdded>> {
        let reply = self.send_command(Command::RcptTo { to }).await?;
        if !reply.is_success() {
            return Err(reject(&reply));
        }

        Ok(self.transition())
    }
}

impl Client<RecipientAdded> {
    /// Adds another recipient to the transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Self> {
        let reply = self.send_command(Command::RcptTo { to }).await?;
        if !reply.is_success() {
            return Err(reject(&reply));
        }

        Ok(self)
    }

    /// Begins sending message data.
    ///
    /// # Errors
    ///
    /// Returns an error if the DATA command fails.
    pub async fn data(mut self) -> Result<Client<Data>> {
        let reply = self.send_command(Command::Data).await?;
        if reply.code != ReplyCode::START_DATA {
            return Err(reject(&reply));
        }

        Ok(self.transition())
    }
}

impl Client<Data> {
    /// Sends the message content and completes the transaction.
    ///
    /// Line endings are normalized to CRLF, lines starting with `.` are
    /// dot-stuffed and the terminating `.` line is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if sending the message fails or server rejects it.
    pub async fn send_message(mut self, message: &[u8]) -> Result<Client<Authenticated>> {
        self.stream.write_all(&encode_data(message)).await?;

        let reply = read_reply(&mut self.stream).await?;
        if !reply.is_success() {
            return Err(reject(&reply));
        }

        Ok(self.transition())
    }
}

// Common implementation for all states
impl<S> Client<S> {
    fn transition<T>(self) -> Client<T> {
        Client {
            stream: self.stream,
            server_info: self.server_info,
            _state: PhantomData,
        }
    }

    async fn send_command(&mut self, cmd: Command) -> Result<Reply> {
        tracing::debug!(command = cmd.verb(), "Sending SMTP command");
        self.stream.write_all(&cmd.serialize()).await?;
        let reply = read_reply(&mut self.stream).await?;
        tracing::debug!(command = cmd.verb(), code = %reply.code, "Received SMTP reply");
        Ok(reply)
    }

    /// Sends QUIT and closes the connection (available in any state).
    ///
    /// # Errors
    ///
    /// Returns an error if the QUIT command fails.
    pub async fn quit(mut self) -> Result<()> {
        let reply = self.send_command(Command::Quit).await?;

        if !reply.is_success() && reply.code != ReplyCode::CLOSING {
            return Err(reject(&reply));
        }

        Ok(())
    }
}

async fn read_reply(stream: &mut SmtpStream) -> Result<Reply> {
    let mut lines = Vec::new();
    loop {
        let line = stream.read_line().await?;
        if line.is_empty() {
            continue;
        }

        let is_last = is_last_reply_line(&line);
        lines.push(line);

        if is_last {
            break;
        }
    }

    parse_reply(&lines)
}

/// Extensions from an EHLO reply. The first line repeats the greeting.
fn parse_extensions(reply: &Reply) -> HashSet<Extension> {
    reply
        .message
        .iter()
        .skip(1)
        .map(|line| Extension::parse(line))
        .collect()
}

fn reject(reply: &Reply) -> Error {
    tracing::warn!(code = %reply.code, message = %reply.message_text(), "SMTP command rejected");
    Error::smtp_error(reply.code.as_u16(), reply.message_text())
}

/// Prepares message content for the DATA phase (RFC 5321 §4.5.2).
fn encode_data(message: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(message.len() + message.len() / 64 + 5);

    let content = message.strip_suffix(b"\n").unwrap_or(message);
    if !content.is_empty() || !message.is_empty() {
        for line in content.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.first() == Some(&b'.') {
                out.push(b'.');
            }
            out.extend_from_slice(line);
            out.extend_from_slice(b"\r\n");
        }
    }

    out.extend_from_slice(b".\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extensions_skips_greeting_line() {
        let reply = Reply::new(
            ReplyCode::new(250),
            vec![
                "mock.local greets you".to_string(),
                "AUTH PLAIN".to_string(),
                "8BITMIME".to_string(),
            ],
        );
        let extensions = parse_extensions(&reply);

        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains(&Extension::Auth(vec![AuthMechanism::Plain])));
        assert!(extensions.contains(&Extension::EightBitMime));

        let greeting_only = Reply::new(ReplyCode::new(250), vec!["mock.local".to_string()]);
        assert!(parse_extensions(&greeting_only).is_empty());
    }

    #[test]
    fn test_encode_data_appends_terminator() {
        assert_eq!(encode_data(b"Hello"), b"Hello\r\n.\r\n");
    }

    #[test]
    fn test_encode_data_normalizes_line_endings() {
        assert_eq!(encode_data(b"a\nb\r\nc"), b"a\r\nb\r\nc\r\n.\r\n");
    }

    #[test]
    fn test_encode_data_no_extra_blank_line() {
        assert_eq!(encode_data(b"Hello\r\n"), b"Hello\r\n.\r\n");
        assert_eq!(encode_data(b"Hello\r\n\r\n"), b"Hello\r\n\r\n.\r\n");
    }

    #[test]
    fn test_encode_data_dot_stuffing() {
        assert_eq!(
            encode_data(b".hidden\r\n..two\r\nok."),
            b"..hidden\r\n...two\r\nok.\r\n.\r\n"
        );
    }

    #[test]
    fn test_encode_data_empty() {
        assert_eq!(encode_data(b""), b".\r\n");
    }
}
