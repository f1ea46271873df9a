//! The `caption predict` command: select one image, submit it, print the caption.

use caption_core::{Config, SelectedImage, SubmitOutcome, UploadClient};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use super::view;

/// Arguments for the `predict` command.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Image file to caption
    #[arg(required = true)]
    pub image: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// The caption alone
    Text,
    /// A JSON record with file details and the caption
    Json,
}

/// Output record for `--format json`.
#[derive(Debug, Serialize)]
pub struct PredictRecord<'a> {
    pub file: &'a str,
    pub mime_type: &'a str,
    pub size_bytes: usize,
    pub caption: &'a str,
}

impl<'a> PredictRecord<'a> {
    pub fn new(image: &'a SelectedImage, caption: &'a str) -> Self {
        Self {
            file: image.file_name(),
            mime_type: image.mime_type(),
            size_bytes: image.len(),
            caption,
        }
    }
}

/// Execute the predict command.
pub async fn execute(args: PredictArgs, config: &Config) -> anyhow::Result<()> {
    let path = caption_core::config::expand_path(&args.image.to_string_lossy());
    let client = UploadClient::new(config);
    client.select_file(&path).await?;

    let spinner = view::spinner("Analyzing...");
    let outcome = client.submit().await;
    spinner.finish_and_clear();

    match outcome {
        SubmitOutcome::Captioned(caption) => {
            match args.format {
                OutputFormat::Text => println!("{caption}"),
                OutputFormat::Json => {
                    let session = client.snapshot();
                    let image = session
                        .image()
                        .ok_or_else(|| anyhow::anyhow!("Selection lost after submit"))?;
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&PredictRecord::new(image, &caption))?
                    );
                }
            }
            Ok(())
        }
        SubmitOutcome::Failed(e) => {
            view::print_view(&client.view());
            anyhow::bail!("{e}")
        }
        SubmitOutcome::NoImage | SubmitOutcome::AlreadyInFlight => {
            anyhow::bail!("No request was made for {}", path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_record_json() {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0u8; 8]);
        let image = SelectedImage::from_bytes("jump.png", bytes).unwrap();
        let record = PredictRecord::new(&image, "a person jumping");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["file"], "jump.png");
        assert_eq!(json["mime_type"], "image/png");
        assert_eq!(json["size_bytes"], 16);
        assert_eq!(json["caption"], "a person jumping");
    }
}
