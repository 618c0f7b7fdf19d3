//! Outgoing e-mail port
//!
//! Services compose [`MailMessage`]s; the transport (SMTP or log-only) is
//! chosen at startup from the `mail` config section.

use async_trait::async_trait;

use crate::domain::DomainResult;

/// A plain-text e-mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message; transport failures map to `DomainError::Mail`.
    async fn send(&self, message: MailMessage) -> DomainResult<()>;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::DomainError;

    /// Keeps every message in memory; optionally fails every send.
    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<MailMessage>>,
        pub fail: bool,
    }

    impl RecordingMailer {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn messages(&self) -> Vec<MailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: MailMessage) -> DomainResult<()> {
            if self.fail {
                return Err(DomainError::Mail("connection refused".into()));
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }
}
