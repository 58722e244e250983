use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{error, info};

use crate::audit;
use crate::config;
use crate::domain::Setting;
use crate::response::ServiceResponse;
use crate::store::{EntityStore, StoreError};

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Email setting {0} not configured")]
    NotConfigured(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error(transparent)]
    Message(#[from] lettre::error::Error),
}

/// Outbound mail configuration. Sender address and credential live in the
/// settings collection; they are loaded once at startup rather than fetched
/// per request, so a missing key is a configuration error, not a transient
/// fault.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub sender: String,
    pub credential: String,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender_name: String,
}

impl MailerConfig {
    pub async fn load<S: EntityStore<Setting>>(store: &S) -> Result<Self, MailerError> {
        let sender = lookup(store, "EMAIL_ADDRESS").await?;
        let credential = lookup(store, "EMAIL_PASSWORD").await?;

        let mail = &config::config().mail;
        Ok(Self {
            sender,
            credential,
            smtp_host: mail.smtp_host.clone(),
            smtp_port: mail.smtp_port,
            sender_name: mail.sender_name.clone(),
        })
    }
}

async fn lookup<S: EntityStore<Setting>>(
    store: &S,
    name: &'static str,
) -> Result<String, MailerError> {
    let mut matches = store
        .get_by_filter(move |setting: &Setting| setting.name == name)
        .await?;
    match matches.pop() {
        Some(setting) if !setting.value.is_empty() => Ok(setting.value),
        _ => Err(MailerError::NotConfigured(name)),
    }
}

/// SMTP mail transport. Failures are reported through the envelope and to
/// the audit sink; a broken mailer never fails anything but the email call
/// itself.
pub struct Mailer {
    config: MailerConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    pub fn new(config: MailerConfig) -> Result<Self, MailerError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.sender.clone(),
                config.credential.clone(),
            ))
            .build();
        Ok(Self { config, transport })
    }

    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> ServiceResponse<bool> {
        let recipient: Mailbox = match to.parse() {
            Ok(mailbox) => mailbox,
            Err(err) => {
                return ServiceResponse::error(format!("Invalid recipient address: {}", err), 400)
            }
        };

        let message = match self.build_message(recipient, subject, body, is_html) {
            Ok(message) => message,
            Err(err) => {
                error!("Failed to build email message: {}", err);
                return ServiceResponse::error("Error sending email", 500);
            }
        };

        match self.transport.send(message).await {
            Ok(_) => {
                audit::emit("EmailSent", "Email sent via SMTP");
                ServiceResponse::ok_with_message(true, "Email sent successfully")
            }
            Err(err) => {
                error!("SMTP send failed: {}", err);
                audit::emit("EmailError", "Error sending email via SMTP");
                ServiceResponse::error("Error sending email via SMTP", 500)
            }
        }
    }

    fn build_message(
        &self,
        recipient: Mailbox,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Result<Message, MailerError> {
        let from: Mailbox =
            format!("{} <{}>", self.config.sender_name, self.config.sender).parse()?;
        let content_type = if is_html {
            ContentType::TEXT_HTML
        } else {
            ContentType::TEXT_PLAIN
        };
        Ok(Message::builder()
            .from(from)
            .to(recipient)
            .subject(subject)
            .header(content_type)
            .body(body.to_string())?)
    }
}

static MAILER: OnceLock<Mailer> = OnceLock::new();

/// Load mail settings and build the process-wide mailer. A missing setting
/// leaves the mailer disabled; the finance API keeps serving.
pub async fn init<S: EntityStore<Setting>>(store: &S) {
    match MailerConfig::load(store).await {
        Ok(config) => match Mailer::new(config) {
            Ok(mailer) => {
                info!("Mailer configured, sender: {}", mailer.config.sender);
                let _ = MAILER.set(mailer);
            }
            Err(err) => error!("Failed to initialize mailer: {}", err),
        },
        Err(err) => error!("Email settings not loaded: {}", err),
    }
}

pub fn mailer() -> Option<&'static Mailer> {
    MAILER.get()
}
