//! Pure rendering of a session into a view tree.
//!
//! `render` has no side effects and reads nothing but the session, so any
//! front end (terminal, web, tests) can draw the same `View`.

use serde::Serialize;

use crate::session::Session;

pub const TITLE: &str = "AI Image Captioning";
pub const SUBTITLE: &str = "Upload an image to generate a description";
pub const IDLE_PLACEHOLDER: &str = "No image selected yet.";

/// One visual element of the page, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Heading {
        text: String,
    },
    Subtitle {
        text: String,
    },
    /// File picker trigger and the current selection
    UploadControl {
        label: String,
        file_name: Option<String>,
    },
    Preview {
        uri: String,
        width: Option<u32>,
        height: Option<u32>,
    },
    SubmitButton {
        label: String,
        disabled: bool,
    },
    Result {
        caption: String,
    },
    Error {
        message: String,
    },
    Placeholder {
        text: String,
    },
}

/// The rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub elements: Vec<Element>,
}

impl View {
    /// Caption shown in the result block, if any.
    pub fn caption(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            Element::Result { caption } => Some(caption.as_str()),
            _ => None,
        })
    }

    /// Message shown in the error block, if any.
    pub fn error(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            Element::Error { message } => Some(message.as_str()),
            _ => None,
        })
    }

    /// Label and disabled flag of the submit control.
    pub fn submit_button(&self) -> Option<(&str, bool)> {
        self.elements.iter().find_map(|e| match e {
            Element::SubmitButton { label, disabled } => Some((label.as_str(), *disabled)),
            _ => None,
        })
    }

    pub fn has_preview(&self) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, Element::Preview { .. }))
    }
}

/// Render a session.
pub fn render(session: &Session) -> View {
    let mut elements = vec![
        Element::Heading {
            text: TITLE.to_string(),
        },
        Element::Subtitle {
            text: SUBTITLE.to_string(),
        },
    ];

    let file_name = session.image().map(|i| i.file_name().to_string());
    elements.push(Element::UploadControl {
        label: if file_name.is_some() {
            "Change Image"
        } else {
            "Choose Image"
        }
        .to_string(),
        file_name,
    });

    if let Some(preview) = session.preview() {
        let (width, height) = preview.dimensions().unzip();
        elements.push(Element::Preview {
            uri: preview.uri().to_string(),
            width,
            height,
        });
    }

    elements.push(Element::SubmitButton {
        label: if session.is_loading() {
            "Analyzing..."
        } else {
            "Generate Caption"
        }
        .to_string(),
        disabled: !session.can_submit(),
    });

    if !session.caption().is_empty() {
        elements.push(Element::Result {
            caption: session.caption().to_string(),
        });
    }

    if let Some(message) = session.error() {
        elements.push(Element::Error {
            message: message.to_string(),
        });
    }

    if session.preview().is_none() && session.caption().is_empty() && session.error().is_none()
    {
        elements.push(Element::Placeholder {
            text: IDLE_PLACEHOLDER.to_string(),
        });
    }

    View { elements }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreviewConfig;
    use crate::selection::tests::png_bytes;
    use crate::selection::{PreviewGenerator, SelectedImage};

    fn selected_session() -> Session {
        let image = SelectedImage::from_bytes("dog.png", png_bytes(40, 20)).unwrap();
        let preview = PreviewGenerator::new(PreviewConfig::default()).generate(&image);
        let mut session = Session::new();
        session.select(image, preview);
        session
    }

    #[test]
    fn test_render_idle() {
        let view = render(&Session::new());
        assert_eq!(
            view.elements[2],
            Element::UploadControl {
                label: "Choose Image".to_string(),
                file_name: None
            }
        );
        assert_eq!(view.submit_button(), Some(("Generate Caption", true)));
        assert!(!view.has_preview());
        assert!(view
            .elements
            .contains(&Element::Placeholder {
                text: IDLE_PLACEHOLDER.to_string()
            }));
    }

    #[test]
    fn test_render_ready() {
        let view = render(&selected_session());
        assert_eq!(
            view.elements[2],
            Element::UploadControl {
                label: "Change Image".to_string(),
                file_name: Some("dog.png".to_string())
            }
        );
        assert!(view.has_preview());
        assert_eq!(view.submit_button(), Some(("Generate Caption", false)));
        assert_eq!(view.caption(), None);
        assert_eq!(view.error(), None);
    }

    #[test]
    fn test_render_loading() {
        let mut session = selected_session();
        session.begin_request();
        let view = render(&session);
        assert_eq!(view.submit_button(), Some(("Analyzing...", true)));
        assert_eq!(view.caption(), None);
        assert_eq!(view.error(), None);
    }

    #[test]
    fn test_render_caption_exactly() {
        let mut session = selected_session();
        session.begin_request();
        session.finish_success("a person jumping".to_string());
        let view = render(&session);
        assert_eq!(view.caption(), Some("a person jumping"));
        assert_eq!(view.error(), None);
    }

    #[test]
    fn test_render_error() {
        let mut session = selected_session();
        session.begin_request();
        session.finish_failure("backend down");
        let view = render(&session);
        assert_eq!(view.error(), Some("backend down"));
        assert_eq!(view.caption(), None);
        assert_eq!(view.submit_button(), Some(("Generate Caption", false)));
    }

    #[test]
    fn test_render_is_pure() {
        let session = selected_session();
        assert_eq!(render(&session), render(&session));
    }

    #[test]
    fn test_view_serializes_with_kind_tag() {
        let json = serde_json::to_value(render(&Session::new())).unwrap();
        assert_eq!(json["elements"][0]["kind"], "heading");
        assert_eq!(json["elements"][0]["text"], TITLE);
    }
}
