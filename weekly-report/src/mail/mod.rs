//! Report delivery over SMTP using lettre.

mod error;

pub use error::MailError;

use crate::config::SmtpSettings;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::future::Future;
use tracing::{info, info_span, Instrument};

/// Port that selects implicit TLS instead of STARTTLS.
const IMPLICIT_TLS_PORT: u16 = 465;

/// A fully rendered report ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReport {
    /// Single recipient address.
    pub recipient: String,

    pub subject: String,

    /// Plain-text body with CRLF line endings.
    pub body: String,
}

/// Something that can deliver a rendered report.
pub trait MailTransport {
    /// Sends `report`.
    fn send(&self, report: &OutgoingReport) -> impl Future<Output = Result<(), MailError>> + Send;
}

/// Builds the plain-text message for `report`.
///
/// # Errors
///
/// Returns [`MailError`] if the recipient is not a valid address or the
/// message cannot be assembled.
pub fn build_message(sender: &Mailbox, report: &OutgoingReport) -> Result<Message, MailError> {
    let recipient = parse_mailbox(&report.recipient)?;

    Ok(Message::builder()
        .from(sender.clone())
        .to(recipient)
        .subject(report.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(report.body.clone())?)
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse()
        .map_err(|source| MailError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

/// SMTP delivery using the `[smtp]` settings.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Creates a mailer. No connection is made until [`MailTransport::send`].
    ///
    /// Port 465 uses implicit TLS, any other port STARTTLS.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the sender address or host is invalid.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let sender = parse_mailbox(settings.sender())?;

        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
        };

        let transport = builder
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }
}

impl MailTransport for SmtpMailer {
    async fn send(&self, report: &OutgoingReport) -> Result<(), MailError> {
        let span = info_span!("send_report", recipient = %report.recipient);

        async {
            let message = build_message(&self.sender, report)?;
            let response = self.transport.send(message).await?;
            info!(code = %response.code(), "Report sent");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
