//! Freight quote service - CLI server
//!
//! ```sh
//! # Default config (~/.config/freight-quote/config.toml)
//! freight-quote
//!
//! # Custom config, port override
//! freight-quote --config /etc/freight-quote/config.toml --api-port 9000
//!
//! # Write a default config file, then validate it
//! freight-quote --init-config
//! freight-quote --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use freight_quote::config::AppConfig;
use freight_quote::server::{describe, init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "freight-quote",
    version,
    about = "B2B freight quoting REST API",
    long_about = "Freight requests, carrier proposals, rate tables and instant quotes.\n\n\
                  Default config: ~/.config/freight-quote/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML)
    #[arg(short, long, env = "FREIGHT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup
    #[arg(long)]
    no_migrate: bool,

    /// Skip creating the default admin user
    #[arg(long)]
    no_admin: bool,

    /// Write a default configuration file to the config path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(freight_quote::default_config_path);

    if cli.init_config {
        if config_path.exists() {
            eprintln!("Refusing to overwrite {}", config_path.display());
            std::process::exit(1);
        }
        AppConfig::default().save(&config_path)?;
        println!("Default configuration written to {}", config_path.display());
        return Ok(());
    }

    let loaded = AppConfig::load(&config_path);
    let mut config = match &loaded {
        Ok(cfg) => cfg.clone(),
        Err(_) => AppConfig::default(),
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);

    match loaded {
        Ok(_) => info!("Configuration loaded from {}", config_path.display()),
        Err(e) if cli.check => {
            error!("Invalid configuration {}: {}", config_path.display(), e);
            std::process::exit(1);
        }
        Err(e) => error!(
            "Failed to load config from {}: {}. Using defaults.",
            config_path.display(),
            e
        ),
    }

    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   {}", describe(&config));
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;
    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
