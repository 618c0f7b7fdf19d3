//! PropShare CLI server
//!
//! ```sh
//! # Run with default config (~/.config/propshare/config.toml)
//! propshare-service
//!
//! # Custom config path
//! propshare-service --config /etc/propshare/config.toml
//!
//! # Validate config without starting
//! propshare-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use propshare::config::AppConfig;
use propshare::server::{init_tracing, ServerHandle, ServerOptions};

/// PropShare administrative back end.
#[derive(Parser, Debug)]
#[command(
    name = "propshare-service",
    version,
    about = "Administrative REST API for shared-property ownership",
    long_about = "PropShare: owners, properties, holidays, bookings and support \
                  tickets behind one REST API.\n\n\
                  Default config: ~/.config/propshare/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PROPSHARE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Skip seeding roles and the default admin user.
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(propshare::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    if cli.check {
        if let Some(e) = load_error {
            eprintln!("❌ Invalid configuration in {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.connection_url());
        println!("   Upload dir  : {}", config.upload.dir.display());
        println!("   Mail        : {}", if config.mail.enabled { config.mail.host.as_str() } else { "log only" });
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;

    Ok(())
}
