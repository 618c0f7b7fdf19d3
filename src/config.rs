//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/propshare/config.toml` by default,
//! or the path in `PROPSHARE_CONFIG`). Every section has defaults, so a
//! missing key never prevents startup. Mail transport and upload limits
//! can additionally be overridden from the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("propshare")
        .join("config.toml")
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub mail: MailConfig,
    pub upload: UploadConfig,
    pub reminders: ReminderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight work on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// SeaORM connection URL, e.g. `sqlite://./propshare.db?mode=rwc`
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./propshare.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        self.url.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Default administrator created on first start
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@propshare.local".to_string(),
            password: "admin12345".to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
        }
    }
}

/// SMTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    /// When false, outgoing mail is only logged
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub tls: bool,
    pub from: String,
    /// Recipient of contact / maintenance ticket notifications
    pub support_address: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            tls: true,
            from: "PropShare <no-reply@propshare.local>".to_string(),
            support_address: "support@propshare.local".to_string(),
        }
    }
}

/// Property image upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub dir: PathBuf,
    /// Maximum size of a single file in bytes
    pub max_file_size: usize,
    /// Lower-case extensions without the dot
    pub allowed_extensions: Vec<String>,
    /// Maximum number of images stored per property
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            max_file_size: 5 * 1024 * 1024,
            allowed_extensions: vec![
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
                "webp".to_string(),
            ],
            max_files: 10,
        }
    }
}

/// Booking reminder scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    /// Remind guests this many days before check-in
    pub days_before: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3600,
            days_before: 3,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file and apply environment overrides.
    ///
    /// A missing file yields the defaults (plus overrides).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.security.jwt_secret = secret;
        }

        if let Some(host) = lookup("MAIL_HOST") {
            self.mail.host = host;
            self.mail.enabled = true;
        }
        if let Some(port) = lookup("MAIL_PORT").and_then(|v| v.parse().ok()) {
            self.mail.port = port;
        }
        if let Some(username) = lookup("MAIL_USERNAME") {
            self.mail.username = username;
        }
        if let Some(password) = lookup("MAIL_PASSWORD") {
            self.mail.password = password;
        }
        if let Some(from) = lookup("MAIL_FROM") {
            self.mail.from = from;
        }

        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.upload.dir = PathBuf::from(dir);
        }
        if let Some(size) = lookup("UPLOAD_MAX_FILE_SIZE").and_then(|v| v.parse().ok()) {
            self.upload.max_file_size = size;
        }
        if let Some(exts) = lookup("UPLOAD_ALLOWED_EXTENSIONS") {
            self.upload.allowed_extensions = exts
                .split(',')
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(count) = lookup("UPLOAD_MAX_FILES").and_then(|v| v.parse().ok()) {
            self.upload.max_files = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.logging.level, "info");
        assert!(!cfg.mail.enabled);
        assert_eq!(cfg.reminders.days_before, 3);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let raw = r#"
            [server]
            api_port = 9100

            [upload]
            max_files = 3
        "#;
        let cfg = AppConfig::from_toml(raw).unwrap();
        assert_eq!(cfg.server.api_port, 9100);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.upload.max_files, 3);
        assert_eq!(cfg.upload.max_file_size, 5 * 1024 * 1024);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\napi_port = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_mail_and_upload() {
        let env: HashMap<&str, &str> = [
            ("MAIL_HOST", "smtp.example.com"),
            ("MAIL_PORT", "2525"),
            ("MAIL_USERNAME", "mailer"),
            ("UPLOAD_ALLOWED_EXTENSIONS", "PNG, .jpg,,gif"),
            ("UPLOAD_MAX_FILE_SIZE", "1024"),
            ("UPLOAD_MAX_FILES", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert!(cfg.mail.enabled);
        assert_eq!(cfg.mail.host, "smtp.example.com");
        assert_eq!(cfg.mail.port, 2525);
        assert_eq!(cfg.mail.username, "mailer");
        assert_eq!(cfg.upload.allowed_extensions, vec!["png", "jpg", "gif"]);
        assert_eq!(cfg.upload.max_file_size, 1024);
        // unparsable values are ignored
        assert_eq!(cfg.upload.max_files, 10);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("propshare-config-does-not-exist.toml");
        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.server.shutdown_timeout, 30);
    }
}
