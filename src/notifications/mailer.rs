// Outbound mail transports

use lettre::message::header::ContentType;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use serde::Serialize;
use std::sync::Mutex;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail webhook rejected message with status {status}")]
    Rejected { status: u16 },

    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mailer unavailable: {0}")]
    Unavailable(String),
}

/// A fully rendered message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

/// Delivery seam; implementations block, so async callers run them on the blocking pool
pub trait Mailer: Send + Sync {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;

    fn name(&self) -> &'static str;
}

/// Writes messages to the log instead of delivering them
#[derive(Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        log::info!(
            "Mail to {} from {}: {}",
            email.to.join(", "),
            email.from,
            email.subject
        );
        log::debug!("Mail body:\n{}", email.text);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// POSTs each message as JSON to a mail relay endpoint
pub struct WebhookMailer {
    client: reqwest::blocking::Client,
    url: String,
    token: Option<String>,
}

impl WebhookMailer {
    pub fn new(url: &str, token: Option<String>, timeout: Duration) -> Result<Self, MailError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            token,
        })
    }
}

impl Mailer for WebhookMailer {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let mut request = self.client.post(&self.url).json(email);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected {
                status: status.as_u16(),
            });
        }

        log::debug!("Mail '{}' accepted by {}", email.subject, self.url);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Connection settings for an SMTP relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Implicit TLS from the first byte (usually port 465); otherwise STARTTLS when offered
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub timeout: Duration,
}

/// Delivers messages through an SMTP relay
pub struct SmtpMailer {
    transport: SmtpTransport,
    relay: String,
}

impl SmtpMailer {
    /// Configure the transport; no connection is made until the first send
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let builder = if settings.secure {
            SmtpTransport::relay(&settings.host)?
        } else {
            let tls = TlsParameters::new(settings.host.clone())?;
            SmtpTransport::builder_dangerous(settings.host.as_str()).tls(Tls::Opportunistic(tls))
        };

        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let (Some(username), Some(password)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            relay: format!("{}:{}", settings.host, settings.port),
        })
    }

    fn build_message(email: &OutboundEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(email.from.parse::<Mailbox>()?)
            .subject(email.subject.clone());
        for to in &email.to {
            builder = builder.to(to.parse::<Mailbox>()?);
        }
        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(reply_to.parse::<Mailbox>()?);
        }

        let message = match &email.html {
            Some(html) => builder.multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                html.clone(),
            ))?,
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(email.text.clone())?,
        };
        Ok(message)
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = Self::build_message(email)?;
        self.transport.send(&message)?;
        log::debug!("Mail '{}' accepted by {}", email.subject, self.relay);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}

/// Keeps sent messages in memory
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.sent
            .lock()
            .map_err(|e| MailError::Unavailable(format!("Lock error: {}", e)))?
            .push(email.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Send each message, logging failures; returns how many were delivered
pub fn deliver_all(mailer: &dyn Mailer, emails: &[OutboundEmail]) -> usize {
    let mut delivered = 0;
    for email in emails {
        match mailer.send(email) {
            Ok(()) => delivered += 1,
            Err(e) => log::error!(
                "Failed to send '{}' via {} mailer: {}",
                email.subject,
                mailer.name(),
                e
            ),
        }
    }
    delivered
}
