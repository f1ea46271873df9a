//! The upload client: select an image, submit it, keep the session current.
//!
//! The session sits behind a mutex that is never held across an `.await`, so
//! a new image can be selected while a request is outstanding. The in-flight
//! check and the switch to `loading` happen under one lock acquisition, which
//! is what rules out a double submit.
//!
//! Selecting a new image does not cancel an outstanding request. When the
//! late response lands it still overwrites caption and loading state.
//! Dropping a `submit` future before it resolves fails the request instead
//! of leaving the session stuck in `loading`.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::backend::{HttpPredictBackend, PredictBackend};
use crate::config::Config;
use crate::error::{CaptionError, SelectError};
use crate::render::{render, View};
use crate::selection::{ImageLoader, PreviewGenerator, SelectedImage};
use crate::session::Session;

/// What a call to [`UploadClient::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend returned this caption
    Captioned(String),
    /// The request was made and failed
    Failed(CaptionError),
    /// Nothing selected; no request was made
    NoImage,
    /// A request is already outstanding; no request was made
    AlreadyInFlight,
}

impl SubmitOutcome {
    /// Whether this call put a request on the wire.
    pub fn sent_request(&self) -> bool {
        matches!(self, SubmitOutcome::Captioned(_) | SubmitOutcome::Failed(_))
    }
}

/// Drives one upload session against a predict backend.
pub struct UploadClient {
    backend: Box<dyn PredictBackend>,
    loader: ImageLoader,
    previews: PreviewGenerator,
    session: Mutex<Session>,
}

impl UploadClient {
    /// Create a client talking HTTP to the configured endpoint.
    pub fn new(config: &Config) -> Self {
        let backend = HttpPredictBackend::new(&config.backend, &config.limits);
        Self::with_backend(config, Box::new(backend))
    }

    /// Create a client over any backend implementation.
    pub fn with_backend(config: &Config, backend: Box<dyn PredictBackend>) -> Self {
        tracing::debug!(
            "Upload client using {} backend at {}",
            backend.name(),
            backend.endpoint()
        );
        Self {
            backend,
            loader: ImageLoader::new(config.limits.clone()),
            previews: PreviewGenerator::new(config.preview.clone()),
            session: Mutex::new(Session::new()),
        }
    }

    pub fn backend(&self) -> &dyn PredictBackend {
        self.backend.as_ref()
    }

    /// Select an image from disk.
    ///
    /// On error the session is unchanged.
    pub fn select_path(&self, path: &Path) -> Result<(), SelectError> {
        let image = self.loader.load(path)?;
        self.select(image);
        Ok(())
    }

    /// Select an image from disk without blocking the runtime.
    ///
    /// Reading and preview decoding run on the blocking pool.
    pub async fn select_file(&self, path: &Path) -> Result<(), SelectError> {
        let loader = self.loader.clone();
        let previews = self.previews.clone();
        let owned = path.to_path_buf();

        let (image, preview) = tokio::task::spawn_blocking(move || {
            let image = loader.load(&owned)?;
            let preview = previews.generate(&image);
            Ok::<_, SelectError>((image, preview))
        })
        .await
        .map_err(|e| SelectError::Read {
            path: path.to_path_buf(),
            message: format!("Task join error: {e}"),
        })??;

        tracing::debug!("Selected {} ({})", image.file_name(), image.mime_type());
        self.lock().select(image, preview);
        Ok(())
    }

    /// Select an already-loaded image, computing its preview.
    pub fn select(&self, image: SelectedImage) {
        // Preview work happens outside the lock
        let preview = self.previews.generate(&image);
        tracing::debug!("Selected {} ({})", image.file_name(), image.mime_type());
        self.lock().select(image, preview);
    }

    /// Submit the selected image for captioning.
    pub async fn submit(&self) -> SubmitOutcome {
        let image = {
            let mut session = self.lock();
            if session.is_loading() {
                tracing::debug!("Submit ignored: a request is already in flight");
                return SubmitOutcome::AlreadyInFlight;
            }
            let Some(image) = session.image().cloned() else {
                let err = CaptionError::NoImageSelected;
                session.reject(err.user_message());
                return SubmitOutcome::NoImage;
            };
            session.begin_request();
            image
        };

        tracing::info!("Requesting caption for {}", image.file_name());
        let in_flight = InFlight::new(&self.session);
        let result = self.backend.predict(&image).await;
        in_flight.complete();

        let mut session = self.lock();
        match result {
            Ok(caption) => {
                tracing::info!("Caption: {caption}");
                session.finish_success(caption.clone());
                SubmitOutcome::Captioned(caption)
            }
            Err(e) => {
                tracing::warn!("Caption request for {} failed: {e}", image.file_name());
                session.finish_failure(e.user_message());
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.lock().clone()
    }

    /// Render the current session.
    pub fn view(&self) -> View {
        render(&self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        lock(&self.session)
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    // Session updates can't leave it half-written, so a poisoned lock is still usable
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the session failed if a submit future is dropped mid-request
/// (caller timeout, `select!`, aborted task), so `loading` is always cleared.
struct InFlight<'a> {
    session: Option<&'a Mutex<Session>>,
}

impl<'a> InFlight<'a> {
    fn new(session: &'a Mutex<Session>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// The response arrived; the caller applies it.
    fn complete(mut self) {
        self.session = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            let err = CaptionError::Cancelled;
            tracing::warn!("{err}");
            lock(session).finish_failure(err.user_message());
        }
    }
}
