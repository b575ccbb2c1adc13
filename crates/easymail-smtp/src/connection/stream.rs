//! Low-level SMTP stream handling.

use crate::error::{Error, Result};
use rustls::pki_types::ServerName;
use std::io;
use std::sync::{Arc, OnceLock};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio_rustls::{
    TlsConnector,
    rustls::{ClientConfig, RootCertStore},
};

/// SMTP stream (TCP or TLS).
#[derive(Debug)]
pub enum SmtpStream {
    /// Plain TCP connection.
    Tcp(BufReader<TcpStream>),
    /// TLS-encrypted connection.
    Tls(Box<BufReader<tokio_rustls::client::TlsStream<TcpStream>>>),
}

impl SmtpStream {
    /// Returns true if the stream is TLS-encrypted.
    #[must_use]
    pub const fn is_encrypted(&self) -> bool {
        matches!(self, Self::Tls(_))
    }

    /// Reads a line from the stream, without its line ending.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the server closed the
    /// connection.
    pub async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = match self {
            Self::Tcp(reader) => reader.read_line(&mut line).await?,
            Self::Tls(reader) => reader.read_line(&mut line).await?,
        };
        if read == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Server closed the connection",
            )));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Writes data to the stream and flushes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn write_all(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Self::Tcp(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
            Self::Tls(reader) => {
                reader.get_mut().write_all(data).await?;
                reader.get_mut().flush().await?;
            }
        }
        Ok(())
    }

    /// Upgrades a TCP stream to TLS.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is already encrypted or the TLS
    /// handshake fails.
    pub async fn upgrade_to_tls(self, hostname: &str) -> Result<Self> {
        let tcp_stream = match self {
            Self::Tcp(reader) => reader.into_inner(),
            Self::Tls(_) => return Err(Error::Protocol("Already using TLS".into())),
        };

        tls_handshake(hostname, tcp_stream).await
    }
}

/// Connects to an SMTP server over plain TCP.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn connect(hostname: &str, port: u16) -> Result<SmtpStream> {
    tracing::debug!(host = hostname, port, "Connecting to SMTP server");
    let stream = TcpStream::connect((hostname, port)).await?;
    Ok(SmtpStream::Tcp(BufReader::new(stream)))
}

/// Connects to an SMTP server over TLS (implicit TLS, usually port 465).
///
/// # Errors
///
/// Returns an error if the connection or TLS handshake fails.
pub async fn connect_tls(hostname: &str, port: u16) -> Result<SmtpStream> {
    tracing::debug!(host = hostname, port, "Connecting to SMTP server over TLS");
    let tcp_stream = TcpStream::connect((hostname, port)).await?;
    tls_handshake(hostname, tcp_stream).await
}

async fn tls_handshake(hostname: &str, tcp_stream: TcpStream) -> Result<SmtpStream> {
    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|_| Error::Protocol(format!("Invalid hostname: {hostname}")))?;

    let tls_stream = create_tls_connector()
        .connect(server_name, tcp_stream)
        .await
        .map_err(tls_error)?;
    Ok(SmtpStream::Tls(Box::new(BufReader::new(tls_stream))))
}

/// Maps a handshake failure to [`Error::Tls`] when rustls rejected the peer.
///
/// tokio-rustls reports rustls failures as `InvalidData` I/O errors wrapping
/// the `rustls::Error`. Anything else stays a transport I/O error.
fn tls_error(err: io::Error) -> Error {
    match err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>())
    {
        Some(tls) => Error::Tls(tls.clone()),
        None => Error::Io(err),
    }
}

/// Returns a TLS connector trusting the webpki root certificates.
///
/// The client configuration is built once per process.
fn create_tls_connector() -> TlsConnector {
    static CONFIG: OnceLock<Arc<ClientConfig>> = OnceLock::new();

    let config = CONFIG.get_or_init(|| {
        let root_store = RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        Arc::new(
            ClientConfig::builder()
                .with_root_certificates(root_store)
                .with_no_client_auth(),
        )
    });

    TlsConnector::from(Arc::clone(config))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[test]
    fn test_tls_error_unwraps_rustls_failures() {
        let wrapped = io::Error::new(
            io::ErrorKind::InvalidData,
            rustls::Error::General("handshake rejected".into()),
        );
        assert!(matches!(
            tls_error(wrapped),
            Error::Tls(rustls::Error::General(message)) if message == "handshake rejected"
        ));

        let reset = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
        match tls_error(reset) {
            Error::Io(err) => assert_eq!(err.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handshake_with_plaintext_peer_is_tls_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"this is not tls\r\n").await.unwrap();
            let mut sink = Vec::new();
            let _ = tokio::io::AsyncReadExt::read_to_end(&mut socket, &mut sink).await;
        });

        let err = connect_tls("127.0.0.1", port).await.unwrap_err();
        assert!(matches!(err, Error::Tls(_)), "got {err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_read_line_strips_crlf_and_reports_eof() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.write_all(b"220 ready\r\n250 ok\n").await.unwrap();
        });

        let mut stream = connect("127.0.0.1", port).await.unwrap();
        assert!(!stream.is_encrypted());
        server.await.unwrap();

        assert_eq!(stream.read_line().await.unwrap(), "220 ready");
        assert_eq!(stream.read_line().await.unwrap(), "250 ok");
        match stream.read_line().await {
            Err(Error::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected EOF, got {other:?}"),
        }
    }
}
