//! End-to-end tests: compose a mail, send it to a local scripted SMTP
//! server and inspect what arrived.

use easymail::{
    Attachment, Error, Mail, MailSender, MailServer, ParsedMessage, Provider, Security,
    TransportConfig,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Commands and un-stuffed DATA received by the server.
#[derive(Debug, Default)]
struct Received {
    commands: Vec<String>,
    message: Vec<u8>,
}

async fn spawn_server(rcpt_reply: &'static str) -> (u16, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let (read, mut write) = socket.into_split();
        let mut reader = BufReader::new(read);
        let mut received = Received::default();

        write.write_all(b"220 mock.local ESMTP\r\n").await.unwrap();

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                break;
            }
            let command = line.trim_end().to_string();
            let verb = command.get(..4).unwrap_or_default().to_uppercase();
            let reply = match verb.as_str() {
                "EHLO" => "250-mock.local\r\n250-AUTH PLAIN\r\n250 8BITMIME\r\n",
                "AUTH" | "MAIL" => "250 OK\r\n",
                "RCPT" => rcpt_reply,
                "DATA" => {
                    write.write_all(b"354 Go ahead\r\n").await.unwrap();
                    loop {
                        line.clear();
                        if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                            return received;
                        }
                        if line == ".\r\n" {
                            break;
                        }
                        let data_line = line.strip_prefix('.').unwrap_or(&line);
                        received.message.extend_from_slice(data_line.as_bytes());
                    }
                    "250 Queued\r\n"
                }
                "QUIT" => {
                    received.commands.push(command);
                    let _ = write.write_all(b"221 Bye\r\n").await;
                    break;
                }
                _ => "502 Unknown\r\n",
            };
            received.commands.push(command);
            if write.write_all(reply.as_bytes()).await.is_err() {
                break;
            }
        }

        received
    });

    (port, handle)
}

fn local_server(port: u16) -> MailServer {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let sender = MailSender::new("me@example.com", "secret", Provider::Gmail);
    let config = TransportConfig::new("127.0.0.1")
        .with_port(port)
        .with_security(Security::None);
    MailServer::with_config(sender, config)
}

#[tokio::test]
async fn test_send_mail_with_attachment() -> anyhow::Result<()> {
    let (port, server) = spawn_server("250 OK\r\n").await;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("report.csv");
    std::fs::write(&path, "id,value\n1,42\n")?;

    let mut mail = Mail::new(
        "me@example.com",
        ["a@example.com"],
        "Report",
        ".starts with a dot\r\nsecond line",
        false,
    );
    mail.add_cc("c@example.com");
    mail.add_bcc("b@example.com");
    mail.attach_file(&path)?;
    mail.add_attachment(Attachment::new("raw.bin", vec![0u8, 1, 2, 255]));

    local_server(port).send_mail(&mail).await?;

    let received = server.await?;
    let rcpts: Vec<&str> = received
        .commands
        .iter()
        .filter(|c| c.starts_with("RCPT"))
        .map(String::as_str)
        .collect();
    assert_eq!(
        rcpts,
        vec![
            "RCPT TO:<a@example.com>",
            "RCPT TO:<c@example.com>",
            "RCPT TO:<b@example.com>"
        ]
    );
    assert_eq!(received.commands[2], "MAIL FROM:<me@example.com> BODY=8BITMIME");
    assert_eq!(received.commands.last().map(String::as_str), Some("QUIT"));

    let parsed = ParsedMessage::parse(&received.message)?;
    assert!(parsed.is_multipart());
    assert_eq!(parsed.subject(), Some("Report"));

    let body = parsed.body_text()?;
    assert_eq!(body, ".starts with a dot\r\nsecond line");

    let attachments: Vec<_> = parsed.attachments().collect();
    assert_eq!(attachments.len(), 2);
    assert_eq!(attachments[0].filename().as_deref(), Some("report.csv"));
    assert_eq!(attachments[0].decode_body()?, b"id,value\n1,42\n");
    assert_eq!(attachments[1].filename().as_deref(), Some("raw.bin"));
    assert_eq!(attachments[1].decode_body()?, vec![0u8, 1, 2, 255]);

    Ok(())
}

#[tokio::test]
async fn test_send_mail_rejected_recipient() {
    let (port, server) = spawn_server("550 5.1.1 Unknown user\r\n").await;
    let mail = Mail::new("me@example.com", ["nobody@example.com"], "Hi", "Hello", false);

    let err = local_server(port).send_mail(&mail).await.unwrap_err();
    assert!(err.is_permanent());
    assert!(matches!(
        err,
        Error::Transport(easymail::easymail_smtp::Error::SmtpError { code: 550, .. })
    ));

    let received = server.await.unwrap();
    assert!(received.message.is_empty());
}

#[tokio::test]
async fn test_send_mail_without_recipients() {
    let mail = Mail::new("me@example.com", Vec::<String>::new(), "Hi", "Hello", false);
    // Nothing listens on port 9; the empty envelope is rejected first.
    let err = local_server(9).send_mail(&mail).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(easymail::easymail_smtp::Error::NoRecipients)
    ));
}
