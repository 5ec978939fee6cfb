//! Bookshelf CLI server
//!
//! Runs the reading tracker and pricing calculator API as a standalone
//! process, systemd service, or container entrypoint.
//!
//! ```sh
//! # Run with default config (~/.config/bookshelf/config.toml)
//! bookshelf-service
//!
//! # Custom config path
//! bookshelf-service --config /etc/bookshelf/config.toml
//!
//! # Override the listen port
//! bookshelf-service --port 8081
//!
//! # Validate config without starting
//! bookshelf-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use bookshelf::config::AppConfig;
use bookshelf::server::{init_tracing, ServerHandle};

/// Bookshelf: reading tracker and subscription pricing calculator.
#[derive(Parser, Debug)]
#[command(
    name = "bookshelf-service",
    version,
    about = "Reading tracker and subscription pricing calculator API",
    long_about = "Bookshelf REST API server with Swagger UI at /docs.\n\n\
                  Default config: ~/.config/bookshelf/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BOOKSHELF_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(bookshelf::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    // --check must fail loudly on a broken file
    if cli.check {
        if let Some(e) = load_error {
            eprintln!("❌ Configuration is invalid: {}", e);
            std::process::exit(1);
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        let pricing = config.pricing_service()?;
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}", config.listen_address());
        println!("   Log level   : {} ({})", config.logging.level, config.logging.format);
        println!("   Currency    : {}", pricing.currency());
        println!("   Tiers       : {}", pricing.tiers().len());
        println!("   Demo books  : {}", config.books.seed_demo_data);
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

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(config).await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
