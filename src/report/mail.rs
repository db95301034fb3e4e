use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;
use tracing::info;

use crate::config::MailConfig;

const BODY_TEXT: &str =
    "Attached is the database suspension report for this pass.\n\
     Units marked excluded are currently withheld from new provisioning.\n";

/// Mail the exported report as a CSV attachment.
///
/// A delivery failure is the caller's to log; it never rolls back the
/// admission-flag changes the pass already applied.
pub(crate) async fn send_report(cfg: &MailConfig, report_path: &Path) -> Result<()> {
    let from: Mailbox = cfg
        .sender
        .parse()
        .with_context(|| format!("Invalid sender address: {}", cfg.sender))?;

    let mut builder = Message::builder().from(from).subject(cfg.subject.clone());
    for recipient in &cfg.recipients {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("Invalid recipient address: {recipient}"))?;
        builder = builder.to(to);
    }

    let csv_bytes = tokio::fs::read(report_path)
        .await
        .with_context(|| format!("Failed to read report file {}", report_path.display()))?;
    let attachment_name = report_path
        .file_name()
        .map_or_else(|| REPORT_FALLBACK_NAME.to_string(), |n| n.to_string_lossy().to_string());

    let email = builder.multipart(
        MultiPart::mixed()
            .singlepart(SinglePart::plain(BODY_TEXT.to_string()))
            .singlepart(
                Attachment::new(attachment_name)
                    .body(csv_bytes, ContentType::parse("text/csv; charset=utf-8")?),
            ),
    )?;

    let mut transport = if cfg.starttls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.server)
            .with_context(|| format!("Invalid SMTP server: {}", cfg.server))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&cfg.server)
    };
    transport = transport.port(cfg.port);
    if let (Some(user), Some(password)) = (&cfg.user, &cfg.password) {
        transport = transport.credentials(Credentials::new(user.clone(), password.clone()));
    }

    transport
        .build()
        .send(email)
        .await
        .with_context(|| format!("SMTP send via {}:{} failed", cfg.server, cfg.port))?;

    info!("Report mailed to {} recipient(s)", cfg.recipients.len());
    Ok(())
}

const REPORT_FALLBACK_NAME: &str = "report.csv";
