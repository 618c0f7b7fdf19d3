//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod mail;
pub mod uploads;

pub use database::{init_database, DatabaseConfig};
pub use mail::{build_mailer, LogMailer, SmtpMailer};
pub use uploads::{ImageStore, UploadPolicy};
