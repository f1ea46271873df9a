//! Caption Core - embeddable image upload client for a captioning backend.
//!
//! The client lets a user pick an image, shows a local preview, posts the
//! image to a predict endpoint as a multipart form and keeps the returned
//! caption (or an error) in a session that front ends render.
//!
//! # Architecture
//!
//! ```text
//! pick file → SelectedImage + PreviewRef → Session → render() → View
//!                       │
//!                       └─ submit → PredictBackend (POST /predict) → caption
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use caption_core::{Config, SubmitOutcome, UploadClient};
//!
//! #[tokio::main]
//! async fn main() -> caption_core::Result<()> {
//!     let config = Config::load()?;
//!     let client = UploadClient::new(&config);
//!
//!     client.select_path("./image.jpg".as_ref())?;
//!     if let SubmitOutcome::Captioned(caption) = client.submit().await {
//!         println!("{caption}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod selection;
pub mod session;

// Re-exports for convenient access
pub use backend::{HttpPredictBackend, PredictBackend};
pub use client::{SubmitOutcome, UploadClient};
pub use config::{Config, DEFAULT_ENDPOINT};
pub use error::{CaptionError, ConfigError, Error, Result, SelectError};
pub use render::{render, Element, View};
pub use selection::{ImageLoader, PreviewGenerator, PreviewRef, SelectedImage};
pub use session::{Phase, Session};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
