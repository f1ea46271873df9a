//! Caption CLI - upload an image to a captioning backend and show the caption.
//!
//! The backend is any service answering `POST /predict` with a JSON
//! `{"caption": "..."}`; by default `http://localhost:5000/predict`.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode (pick an image, preview, generate caption)
//! caption
//!
//! # Caption a single image
//! caption predict photo.jpg
//!
//! # Check that the backend is up
//! caption check
//!
//! # View configuration
//! caption config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Caption - upload images to a captioning backend.
#[derive(Parser, Debug)]
#[command(name = "caption")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Predict endpoint for this run (overrides the config file)
    #[arg(long, global = true, env = "CAPTION_ENDPOINT")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload one image and print its caption
    Predict(cli::predict::PredictArgs),

    /// Check whether the predict backend is reachable
    Check,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match caption_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `caption config path`."
            );
            caption_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Caption v{}", caption_core::VERSION);

    let config = match cli.endpoint.as_deref() {
        Some(endpoint) => config.with_endpoint(endpoint)?,
        None => config,
    };

    match cli.command {
        Some(Commands::Predict(args)) => cli::predict::execute(args, &config).await,
        Some(Commands::Check) => cli::check::execute(&config).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None => {
            if console::Term::stderr().is_term() {
                cli::interactive::run(&config).await
            } else {
                anyhow::bail!(
                    "No command given and not attached to a terminal.\n  \
                     Run `caption predict <IMAGE>` or `caption --help`."
                )
            }
        }
    }
}
