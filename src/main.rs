//! Command line driver for the Glicko-2 rating engine
//!
//! Reads one rating period (a player and the games they played), applies it
//! and prints the committed rating. Without an input file it replays the
//! worked example from Glickman's Glicko-2 paper.

use anyhow::{Context, Result};
use clap::Parser;
use glicko_rating::config::AppConfig;
use glicko_rating::types::{GameRecord, RatingPeriod, RatingSnapshot};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Glicko Rating - apply one Glicko-2 rating period
#[derive(Parser)]
#[command(
    name = "glicko-rating",
    version,
    about = "Apply one Glicko-2 rating period and print the updated rating",
    long_about = "Reads a JSON rating period describing a player and the games they played, \
                 updates the player's Glicko-2 rating, deviation and volatility, and prints the \
                 committed result. A period without games decays the player's deviation."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Rating period input
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to a JSON rating period; defaults to Glickman's example"
    )]
    input: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Print the result as JSON
    #[arg(long, help = "Print the committed rating as a JSON snapshot")]
    json: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and input, then exit")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    glicko_rating::config::validate_config(&config)?;
    Ok(config)
}

/// The example period from Glickman's "Example of the Glicko-2 system"
fn reference_period() -> RatingPeriod {
    let opponent = |rating, deviation| RatingSnapshot {
        rating,
        deviation,
        volatility: 0.06,
    };

    RatingPeriod {
        player: opponent(1500.0, 200.0),
        games: vec![
            GameRecord {
                opponent: opponent(1400.0, 30.0),
                score: 1.0,
            },
            GameRecord {
                opponent: opponent(1550.0, 100.0),
                score: 0.0,
            },
            GameRecord {
                opponent: opponent(1700.0, 300.0),
                score: 0.0,
            },
        ],
    }
}

fn load_period(args: &Args) -> Result<RatingPeriod> {
    match &args.input {
        Some(path) => {
            info!("Loading rating period from: {}", path.display());
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid rating period in {}", path.display()))
        }
        None => {
            info!("No input given, using Glickman's reference period");
            Ok(reference_period())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!(?config, "{} configured", config.service.name);

    let period = load_period(&args)?;
    info!("Rating period with {} game(s)", period.games.len());

    if args.dry_run {
        info!("Configuration and input validation successful");
        return Ok(());
    }

    let rating = match period.evaluate(config.glicko) {
        Ok(rating) => rating,
        Err(e) => {
            error!("Failed to apply rating period: {}", e);
            std::process::exit(1);
        }
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&RatingSnapshot::from(&rating))?
        );
    } else {
        println!("{}", rating);
    }

    Ok(())
}
