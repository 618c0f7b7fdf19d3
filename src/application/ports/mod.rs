//! Outbound ports implemented by the infrastructure layer

pub mod mailer;

pub use mailer::{MailMessage, Mailer};
