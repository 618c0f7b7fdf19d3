//! Mail transports
//!
//! `SmtpMailer` delivers through an SMTP relay with lettre; `LogMailer`
//! only logs messages and is used when `mail.enabled = false`.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::application::ports::{MailMessage, Mailer};
use crate::config::MailConfig;
use crate::domain::{DomainError, DomainResult};
use crate::shared::errors::InfraError;

/// Implicit-TLS SMTP port; every other port upgrades with STARTTLS
const SMTPS_PORT: u16 = 465;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, InfraError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| InfraError::Mail(format!("Invalid sender '{}': {}", config.from, e)))?;

        let builder = if !config.tls {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        } else if config.port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| InfraError::Mail(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| InfraError::Mail(e.to_string()))?
        };

        let mut builder = builder.port(config.port);
        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> DomainResult<()> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| DomainError::Mail(format!("Invalid recipient '{}': {}", message.to, e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| DomainError::Mail(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| DomainError::Mail(e.to_string()))?;

        debug!(to = %message.to, subject = %message.subject, "Mail sent");
        Ok(())
    }
}

/// Logs instead of sending
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> DomainResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "📧 Mail delivery disabled, message logged"
        );
        Ok(())
    }
}

/// Pick the transport for the `mail` config section.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, InfraError> {
    if !config.enabled {
        info!("📧 Mail delivery disabled");
        return Ok(Arc::new(LogMailer));
    }
    let mailer = SmtpMailer::new(config)?;
    info!(host = %config.host, port = config.port, tls = config.tls, "📧 SMTP mailer configured");
    Ok(Arc::new(mailer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_mail_is_logged() {
        let mailer = build_mailer(&MailConfig::default()).unwrap();
        mailer
            .send(MailMessage::new("a@example.com", "Hi", "Body"))
            .await
            .unwrap();
    }

    #[test]
    fn invalid_sender_is_rejected() {
        let config = MailConfig {
            enabled: true,
            from: "not an address".into(),
            ..MailConfig::default()
        };
        assert!(matches!(SmtpMailer::new(&config), Err(InfraError::Mail(_))));
    }

    #[tokio::test]
    async fn invalid_recipient_is_a_mail_error() {
        let config = MailConfig {
            enabled: true,
            tls: false,
            host: "127.0.0.1".into(),
            port: 2525,
            ..MailConfig::default()
        };
        let mailer = SmtpMailer::new(&config).unwrap();
        let err = mailer
            .send(MailMessage::new("nope", "Hi", "Body"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Mail(_)));
    }
}
