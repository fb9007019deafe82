//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod branches;
mod init;
mod locate;
mod seed;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use novacrest::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "novacrest")]
#[command(about = "Storefront backend with nearest-branch assignment")]
#[command(version)]
pub struct Cli {
    /// Target directory or database file (overrides config file).
    /// Can be a directory containing novacrest.db or a .db file directly.
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the HTTP API server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default from config, 127.0.0.1:5000)
        #[arg(long, short)]
        bind: Option<String>,
    },

    /// Insert the starter categories, products and blog posts
    Seed,

    /// List the pharmacy branches
    Branches {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the nearest branch for a coordinate or an address
    Locate {
        /// Latitude in degrees
        #[arg(long, requires = "lon", conflicts_with = "address", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Street address to geocode
        #[arg(long, short, required_unless_present = "lat")]
        address: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        data: cli.target,
    };
    let (settings, config) = load_settings_with_options(options).await?;
    match config.source_path {
        Some(ref path) => tracing::debug!("Loaded config from {}", path.display()),
        None => tracing::debug!("No config file found, using defaults"),
    }
    tracing::debug!("Database: {}", settings.database_url());

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            serve::cmd_serve(&settings, &bind).await
        }
        Commands::Seed => seed::cmd_seed(&settings).await,
        Commands::Branches { json } => branches::cmd_branches(&settings, json),
        Commands::Locate {
            lat,
            lon,
            address,
            json,
        } => {
            let query = match (lat, lon, address) {
                (Some(lat), Some(lon), _) => locate::Query::Point(lat, lon),
                (_, _, Some(address)) => locate::Query::Address(address),
                _ => anyhow::bail!("Provide --lat and --lon, or --address"),
            };
            locate::cmd_locate(&settings, query, json).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("novacrest").chain(args.iter().copied()))
    }

    #[test]
    fn locate_accepts_coordinates_or_address() {
        let cli = parse(&["locate", "--lat", "6.6", "--lon", "3.35"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Locate {
                lat: Some(_),
                lon: Some(_),
                address: None,
                ..
            }
        ));

        let cli = parse(&["locate", "--address", "Allen Avenue, Ikeja"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Locate {
                address: Some(ref a),
                ..
            } if a == "Allen Avenue, Ikeja"
        ));
    }

    #[test]
    fn locate_rejects_partial_or_mixed_input() {
        assert!(parse(&["locate"]).is_err());
        assert!(parse(&["locate", "--lat", "6.6"]).is_err());
        assert!(parse(&["locate", "--lat", "6.6", "--lon", "3.3", "--address", "x"]).is_err());
    }

    #[test]
    fn locate_accepts_negative_degrees() {
        let cli = parse(&["locate", "--lat", "-33.86", "--lon", "151.2"]).unwrap();
        assert!(matches!(cli.command, Commands::Locate { lat: Some(l), .. } if l < 0.0));
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = parse(&["serve", "--bind", "8080", "-t", "/srv/shop", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.target, Some(PathBuf::from("/srv/shop")));
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "8080"));
    }
}
