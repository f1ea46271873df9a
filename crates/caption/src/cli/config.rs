//! The `caption config` command for configuration management.

use caption_core::Config;
use clap::{Args, Subcommand};
use std::path::Path;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Save the predict endpoint to the config file
    SetEndpoint {
        /// Full URL, e.g. http://localhost:5000/predict
        url: String,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            let toml = config.to_toml()?;
            println!("{}", toml);
        }

        ConfigCommand::Path => {
            let path = Config::default_path();
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let config = Config::default();
            let toml = config.to_toml()?;
            std::fs::write(&path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::SetEndpoint { url } => {
            // Reject bad URLs before touching the file
            let config = Config::default().with_endpoint(&url)?;
            let path = Config::default_path();
            save_endpoint(&path, &config.backend.endpoint)?;
            println!("Endpoint set to {} in {}", config.backend.endpoint, path.display());
        }
    }

    Ok(())
}

/// Write `[backend] endpoint` into the config file, preserving existing comments.
pub fn save_endpoint(config_path: &Path, endpoint: &str) -> anyhow::Result<()> {
    let content = if config_path.exists() {
        std::fs::read_to_string(config_path)?
    } else {
        String::new()
    };

    let mut doc: toml_edit::DocumentMut = content.parse()?;

    if !doc.contains_key("backend") {
        doc["backend"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["backend"]["endpoint"] = toml_edit::value(endpoint);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, doc.to_string())?;

    tracing::info!("Endpoint saved to {}", config_path.display());
    Ok(())
}
