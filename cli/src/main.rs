//! VoltPort — CLI Server
//!
//! Headless EV-charging-port reservation service suitable for deployment
//! as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/voltport/config.toml)
//! voltport
//!
//! # Custom config path
//! voltport --config /etc/voltport/config.toml
//!
//! # Override the API port
//! voltport --api-port 8080
//!
//! # Validate config without starting
//! voltport --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use voltport::config::AppConfig;
use voltport::server::{init_tracing, ServerHandle, ServerOptions};

/// VoltPort — reservation server for EV charging ports.
#[derive(Parser, Debug)]
#[command(
    name = "voltport",
    version,
    about = "EV charging port reservation service",
    long_about = "VoltPort — REST API server for booking EV charging ports \
                  by date and hourly time slot.\n\n\
                  Default config: ~/.config/voltport/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "VOLTPORT_CONFIG")]
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

    /// Skip creating the bootstrap admin user.
    #[arg(long)]
    no_admin: bool,
}

/// Fold CLI flags into the loaded configuration.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(port) = cli.api_port {
        config.server.api_port = port;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(voltport::default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Overrides must land before the subscriber is installed,
    // otherwise --log-level is a no-op
    apply_overrides(&mut config, &cli);
    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
        }
    }
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
    }
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!(
            "   API address : {}:{}",
            config.server.api_host, config.server.api_port
        );
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        create_default_admin: !cli.no_admin,
    })
    .await?;

    // Install OS signal handlers (SIGTERM, SIGINT)
    handle.install_signal_handler();

    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    // Wait for shutdown signal, then clean up
    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_land_in_config_before_tracing_starts() {
        let cli = Cli::parse_from(["voltport", "--api-port", "9090", "--log-level", "debug"]);
        let mut config = AppConfig::default();

        apply_overrides(&mut config, &cli);

        assert_eq!(config.server.api_port, 9090);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn absent_flags_leave_config_untouched() {
        let cli = Cli::parse_from(["voltport"]);
        let mut config = AppConfig::default();
        let default_port = config.server.api_port;

        apply_overrides(&mut config, &cli);

        assert_eq!(config.server.api_port, default_port);
        assert_eq!(config.logging.level, "info");
    }
}
