//! The transient UI state of one upload session.
//!
//! Fields are private so every mutation goes through a method that keeps
//! the invariants:
//! - `loading` implies an empty caption and no error
//! - caption and error are mutually exclusive
//! - the preview always belongs to the current selection

use crate::selection::{PreviewRef, SelectedImage};

/// Where the session is in the select → submit → result cycle.
///
/// Derived from the session fields, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing selected yet
    Idle,
    /// An image is selected and can be submitted
    Ready,
    /// A predict request is outstanding
    Submitting,
    /// The last submission produced a caption
    Succeeded,
    /// The last submission (or submit attempt) failed
    Failed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Ready => write!(f, "ready"),
            Phase::Submitting => write!(f, "submitting"),
            Phase::Succeeded => write!(f, "succeeded"),
            Phase::Failed => write!(f, "failed"),
        }
    }
}

/// Client-side session state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Session {
    image: Option<SelectedImage>,
    preview: Option<PreviewRef>,
    caption: String,
    loading: bool,
    error: Option<String>,
}

impl Session {
    /// A fresh session with every field empty.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&SelectedImage> {
        self.image.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewRef> {
        self.preview.as_ref()
    }

    /// The last caption, empty when there is none.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit is enabled only with an image selected and nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.image.is_some() && !self.loading
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Submitting
        } else if self.error.is_some() {
            Phase::Failed
        } else if !self.caption.is_empty() {
            Phase::Succeeded
        } else if self.image.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }

    /// Replace the selection. The superseded preview is dropped here.
    pub(crate) fn select(&mut self, image: SelectedImage, preview: PreviewRef) {
        self.image = Some(image);
        self.preview = Some(preview);
        self.caption.clear();
        self.error = None;
    }

    /// Enter the submitting state.
    pub(crate) fn begin_request(&mut self) {
        self.loading = true;
        self.caption.clear();
        self.error = None;
    }

    pub(crate) fn finish_success(&mut self, caption: String) {
        self.loading = false;
        self.error = None;
        self.caption = caption;
    }

    pub(crate) fn finish_failure(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.caption.clear();
        self.error = Some(message.into());
    }

    /// Show a validation error without touching the request lifecycle.
    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        self.caption.clear();
        self.error = Some(message.into());
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        if self.loading {
            assert!(self.caption.is_empty(), "loading with a caption");
            assert!(self.error.is_none(), "loading with an error");
        }
        assert!(
            self.caption.is_empty() || self.error.is_none(),
            "caption and error both set"
        );
        assert_eq!(self.image.is_some(), self.preview.is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreviewConfig;
    use crate::selection::tests::png_bytes;
    use crate::selection::PreviewGenerator;

    fn selection(name: &str, w: u32, h: u32) -> (SelectedImage, PreviewRef) {
        let image = SelectedImage::from_bytes(name, png_bytes(w, h)).unwrap();
        let preview = PreviewGenerator::new(PreviewConfig::default()).generate(&image);
        (image, preview)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert!(!session.can_submit());
        assert!(session.caption().is_empty());
        session.check_invariants();
    }

    #[test]
    fn test_lifecycle_success() {
        let mut session = Session::new();
        let (image, preview) = selection("a.png", 10, 10);
        session.select(image, preview);
        assert_eq!(session.phase(), Phase::Ready);
        assert!(session.can_submit());

        session.begin_request();
        assert_eq!(session.phase(), Phase::Submitting);
        assert!(!session.can_submit());
        session.check_invariants();

        session.finish_success("a dog on grass".to_string());
        assert_eq!(session.phase(), Phase::Succeeded);
        assert_eq!(session.caption(), "a dog on grass");
        session.check_invariants();
    }

    #[test]
    fn test_lifecycle_failure_then_resubmit() {
        let mut session = Session::new();
        let (image, preview) = selection("a.png", 10, 10);
        session.select(image, preview);
        session.begin_request();
        session.finish_failure("offline");
        assert_eq!(session.phase(), Phase::Failed);
        assert_eq!(session.error(), Some("offline"));
        assert!(session.caption().is_empty());
        assert!(session.can_submit());

        session.begin_request();
        assert!(session.error().is_none());
        session.check_invariants();
    }

    #[test]
    fn test_select_clears_result_and_replaces_preview() {
        let mut session = Session::new();
        let (image, preview) = selection("a.png", 10, 10);
        session.select(image, preview);
        session.begin_request();
        session.finish_success("first".to_string());
        let first_preview = session.preview().cloned();

        let (image, preview) = selection("b.png", 30, 10);
        session.select(image, preview);
        assert!(session.caption().is_empty());
        assert!(session.error().is_none());
        assert_eq!(session.image().map(|i| i.file_name()), Some("b.png"));
        assert_ne!(session.preview().cloned(), first_preview);
        session.check_invariants();
    }

    #[test]
    fn test_reject_keeps_selection() {
        let mut session = Session::new();
        session.reject("pick something");
        assert_eq!(session.phase(), Phase::Failed);
        assert!(session.image().is_none());
        session.check_invariants();
    }
}
