#![allow(clippy::doc_markdown)]
//! Example: send a message through a provider
//!
//! ## Running
//!
//! ```bash
//! export EASYMAIL_EMAIL="me@gmail.com"
//! export EASYMAIL_PASSWORD="app-password"
//! export EASYMAIL_PROVIDER="gmail"            # gmail, yahoo or outlook
//! export EASYMAIL_RECIPIENTS="a@example.com,b@example.com"
//! export EASYMAIL_ATTACHMENT="./report.pdf"   # optional
//! RUST_LOG=easymail=debug,easymail_smtp=debug \
//!     cargo run --package easymail --example send_mail
//! ```

use anyhow::Context;
use easymail::{Mail, MailSender, MailServer, Provider};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let email = env::var("EASYMAIL_EMAIL").context("EASYMAIL_EMAIL is not set")?;
    let password = env::var("EASYMAIL_PASSWORD").context("EASYMAIL_PASSWORD is not set")?;
    let provider: Provider = env::var("EASYMAIL_PROVIDER")
        .unwrap_or_else(|_| "gmail".to_string())
        .parse()?;
    let recipients = env::var("EASYMAIL_RECIPIENTS").context("EASYMAIL_RECIPIENTS is not set")?;

    let mut mail = Mail::new(
        &email,
        recipients.split(',').map(str::trim).filter(|r| !r.is_empty()),
        "Hello from easymail",
        "<h1>Hello</h1><p>This message was sent by the easymail example.</p>",
        true,
    );
    mail.add_header("X-Mailer", "easymail");

    if let Ok(path) = env::var("EASYMAIL_ATTACHMENT") {
        mail.attach_file(&path)
            .with_context(|| format!("attaching {path}"))?;
    }

    let server = MailServer::new(MailSender::new(email, password, provider));
    println!(
        "Sending to {} recipient(s) via {}:{}",
        mail.recipients().len(),
        server.config().host,
        server.config().port
    );

    server.send_mail(&mail).await?;
    println!("Sent.");
    Ok(())
}
