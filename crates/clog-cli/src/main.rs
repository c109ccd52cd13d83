//! clog CLI
//!
//! Thin wrapper around clog-core for emitting and inspecting log output
//! from the command line.
//!
//! ## Usage
//!
//! ```bash
//! # Emit one info line through the console logger
//! clog emit "service started"
//!
//! # Emit a warning tagged with a service and trace id
//! clog emit --level warn --service billing --trace-id req-42 "card declined"
//!
//! # List level names in severity order
//! clog levels
//!
//! # Validate a JSON logging config
//! clog check-config logging.json
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clog_core::{ConsoleBackend, Level, LogContext, LoggerConfig, LoggingConfig, CONSOLE};

/// clog - pluggable leveled logging
#[derive(Parser)]
#[command(name = "clog")]
#[command(version = "0.1.0")]
#[command(about = "clog - pluggable leveled logging")]
struct Cli {
    /// Increase internal diagnostics verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one line through the console logger
    Emit {
        /// Level of the message: debug, info, warn or fatal
        #[arg(short, long, default_value = "info")]
        level: String,

        /// Console threshold; lines below it are dropped
        #[arg(short, long, default_value = "debug")]
        threshold: String,

        /// Service name printed in the line
        #[arg(short, long, default_value = "")]
        service: String,

        /// Trace id printed in the line
        #[arg(long)]
        trace_id: Option<String>,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,

        /// Message text
        message: String,
    },

    /// List level names in severity order
    Levels,

    /// Parse a JSON logging config and show the effective settings
    CheckConfig {
        /// Path to the JSON file
        path: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout belongs to the console logger
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn emit(
    level: Level,
    threshold: &str,
    service: String,
    trace_id: Option<String>,
    color: bool,
    message: &str,
) -> Result<()> {
    tracing::debug!(level = %level, threshold = %threshold, color, "Emitting one line");

    // Swap the auto console for one with the requested color setting
    clog_core::unregister_logger(CONSOLE)?;
    clog_core::register_logger(CONSOLE, Arc::new(ConsoleBackend::new().with_color(color)))?;
    clog_core::init_logger(
        CONSOLE,
        Some(&LoggerConfig::new(threshold).with_service(service)),
    )?;

    // Kept as text so ids like "007" print exactly as given
    let ctx = trace_id.map(LogContext::with_trace_id).unwrap_or_default();

    match level {
        Level::Debug => clog_core::debug!(ctx: &ctx, "{}", message),
        Level::Info => clog_core::info!(ctx: &ctx, "{}", message),
        Level::Warn => clog_core::warn!(ctx: &ctx, "{}", message),
        Level::Fatal => clog_core::fatal!(ctx: &ctx, "{}", message),
        Level::None => anyhow::bail!("'none' is a threshold, not a message level"),
    }

    clog_core::shutdown();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Emit {
            level,
            threshold,
            service,
            trace_id,
            no_color,
            message,
        } => {
            let level: Level = level
                .parse()
                .with_context(|| format!("Invalid message level '{}'", level))?;
            emit(level, &threshold, service, trace_id, !no_color, &message)?;
        }

        Commands::Levels => {
            for level in Level::ALL {
                println!("{} ({})", level.name(), level as u8);
            }
        }

        Commands::CheckConfig { path } => {
            let config = LoggingConfig::from_json_file(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::debug!(
                path = %path.display(),
                loggers = config.loggers.len(),
                "Loaded config"
            );

            if config.loggers.is_empty() {
                println!("No loggers configured.");
            }
            for (name, logger) in &config.loggers {
                println!("{}:", name);
                println!("  Level: {}", logger.effective_level().name());
                println!("  Service: {}", logger.service);
                println!("  Skip: {}", logger.skip);
            }
        }
    }

    Ok(())
}
