//! Taskboard - CLI Server
//!
//! Headless REST service for users, projects and tasks, suitable for
//! deployment as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/taskboard/config.toml)
//! taskboard-service
//!
//! # Custom config path
//! taskboard-service --config /etc/taskboard/config.toml
//!
//! # Override the listen address
//! taskboard-service --host 127.0.0.1 --port 8080
//!
//! # Validate config without starting
//! taskboard-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use taskboard::config::{AppConfig, CONFIG_ENV};
use taskboard::server::{init_tracing, ServerHandle, ServerOptions};

/// Taskboard REST service.
#[derive(Parser, Debug)]
#[command(
    name = "taskboard-service",
    version,
    about = "Task tracking REST service",
    long_about = "Taskboard: REST API for users (with profile avatars), projects and tasks.\n\n\
                  Default config: ~/.config/taskboard/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Override the listen host.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(taskboard::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) if cli.check => {
            eprintln!("Configuration is invalid: {}", e);
            eprintln!("   Config file : {}", config_path.display());
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    // ── Apply CLI overrides ───────────────────────────────────
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // ── Config validation mode ────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.listen_address());
        println!("   Database    : {}", config.database.connection_url());
        println!("   Media root  : {}", config.media.root.display());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Start server ──────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e);
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
