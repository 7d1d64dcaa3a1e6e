//! The `tagger config` command: inspect settings and the taxonomy directory.

use anyhow::Context;
use clap::{Args, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use tagger_core::taxonomy::load_dataset;
use tagger_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration, or one section of it
    Show {
        #[arg(value_enum)]
        section: Option<Section>,
    },

    /// Print the config file and taxonomy directory paths
    Path,

    /// List the datasets a predictions file can name
    Taxonomies,

    /// Write a config file with defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,

        /// Taxonomy directory to record (created if missing)
        #[arg(long)]
        taxonomy_dir: Option<PathBuf>,
    },
}

/// Top-level config sections.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Fusion,
    Palette,
    Tagging,
    Limits,
    Taxonomy,
    Output,
    Logging,
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs, config: Config) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { section } => {
            println!("{}", render(&config, section)?);
        }

        ConfigCommand::Path => {
            println!("config:   {}", Config::default_path().display());
            println!("taxonomy: {}", config.taxonomy_dir().display());
        }

        ConfigCommand::Taxonomies => {
            for (name, labels) in list_taxonomies(&config.taxonomy_dir()).await? {
                println!("{name}\t{labels} labels");
            }
        }

        ConfigCommand::Init {
            force,
            taxonomy_dir,
        } => {
            let path = Config::default_path();
            init(&path, force, taxonomy_dir).await?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// The whole config as TOML, or a single `[section]` table.
fn render(config: &Config, section: Option<Section>) -> anyhow::Result<String> {
    let Some(section) = section else {
        return Ok(config.to_toml()?);
    };

    let (name, body) = match section {
        Section::Fusion => ("fusion", toml::to_string_pretty(&config.fusion)),
        Section::Palette => ("palette", toml::to_string_pretty(&config.palette)),
        Section::Tagging => ("tagging", toml::to_string_pretty(&config.tagging)),
        Section::Limits => ("limits", toml::to_string_pretty(&config.limits)),
        Section::Taxonomy => ("taxonomy", toml::to_string_pretty(&config.taxonomy)),
        Section::Output => ("output", toml::to_string_pretty(&config.output)),
        Section::Logging => ("logging", toml::to_string_pretty(&config.logging)),
    };
    Ok(format!("[{name}]\n{}", body?))
}

/// Dataset names (file stems) in `dir` with their label counts, sorted by name.
///
/// Files that fail to parse are logged and left out.
async fn list_taxonomies(dir: &Path) -> anyhow::Result<Vec<(String, usize)>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read taxonomy directory {}", dir.display()))?;

    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let loaded = {
            let path = path.clone();
            tokio::task::spawn_blocking(move || load_dataset(&path)).await?
        };
        match loaded {
            Ok(dataset) => found.push((name, dataset.len())),
            Err(e) => tracing::warn!("Skipping taxonomy {}: {}", path.display(), e),
        }
    }

    found.sort();
    Ok(found)
}

/// Write a default config to `path`, recording and creating `taxonomy_dir`.
async fn init(path: &Path, force: bool, taxonomy_dir: Option<PathBuf>) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut config = Config::default();
    if let Some(dir) = taxonomy_dir {
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create taxonomy directory {}", dir.display()))?;
        config.taxonomy.dir = dir.to_string_lossy().into_owned();
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, config.to_toml()?).await?;

    tracing::info!(
        "Config file created at: {} (taxonomies in {})",
        path.display(),
        config.taxonomy.dir
    );
    Ok(())
}
