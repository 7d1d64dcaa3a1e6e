//! Tagger CLI - fuse predictions from several image models into tags.
//!
//! # Usage
//!
//! ```bash
//! # Tag an image from two models' outputs
//! tagger tag photo.jpg --predictions predictions.json
//!
//! # Show its dominant colors
//! tagger palette photo.jpg -k 6
//!
//! # View configuration
//! tagger config show fusion
//!
//! # List the datasets in the taxonomy directory
//! tagger config taxonomies
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Tagger - fuse multi-model image predictions into ranked semantic tags.
#[derive(Parser, Debug)]
#[command(name = "tagger")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fuse two models' predictions for an image and print its tags
    Tag(cli::tag::TagArgs),

    /// Print the dominant colors of an image
    Palette(cli::palette::PaletteArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't up yet, so config warnings go straight to stderr.
    let config = match tagger_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `tagger config path`."
            );
            tagger_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Tagger v{}", tagger_core::VERSION);

    match cli.command {
        Commands::Tag(args) => cli::tag::execute(args, config).await,
        Commands::Palette(args) => cli::palette::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, config).await,
    }
}
