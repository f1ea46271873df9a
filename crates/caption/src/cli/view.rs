//! Terminal drawing of a rendered `View`.
//!
//! Everything goes to stderr so stdout stays clean for captions and JSON.

use caption_core::{Element, View};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Format a view as terminal lines, without styling.
pub fn lines(view: &View) -> Vec<String> {
    view.elements
        .iter()
        .map(|element| match element {
            Element::Heading { text } => text.clone(),
            Element::Subtitle { text } => text.clone(),
            Element::UploadControl { label, file_name } => match file_name {
                Some(name) => format!("[{label}] {name}"),
                None => format!("[{label}]"),
            },
            Element::Preview { uri, width, height } => {
                let size = match (width, height) {
                    (Some(w), Some(h)) => format!("{w}x{h}"),
                    _ => "unknown size".to_string(),
                };
                let kind = uri
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .unwrap_or("unknown");
                format!("Preview: {size} {kind} ({} KB)", uri.len().div_ceil(1024))
            }
            Element::SubmitButton { label, disabled } => {
                if *disabled {
                    format!("({label})")
                } else {
                    format!("[{label}]")
                }
            }
            Element::Result { caption } => format!("Result: {caption}"),
            Element::Error { message } => message.clone(),
            Element::Placeholder { text } => text.clone(),
        })
        .collect()
}

/// Draw a view with styling.
pub fn print_view(view: &View) {
    let cyan = Style::new().for_stderr().cyan().bold();
    let dim = Style::new().for_stderr().dim();
    let green = Style::new().for_stderr().green();
    let red = Style::new().for_stderr().red();

    eprintln!();
    for (element, line) in view.elements.iter().zip(lines(view)) {
        let styled = match element {
            Element::Heading { .. } => cyan.apply_to(line),
            Element::Subtitle { .. } | Element::Placeholder { .. } => dim.apply_to(line),
            Element::SubmitButton { disabled: true, .. } => dim.apply_to(line),
            Element::Result { .. } => green.apply_to(line),
            Element::Error { .. } => red.apply_to(format!("✗ {line}")),
            _ => Style::new().for_stderr().apply_to(line),
        };
        eprintln!("  {styled}");
    }
    eprintln!();
}

/// Spinner shown while a request is outstanding.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use caption_core::{render, Session};

    #[test]
    fn test_idle_lines() {
        let lines = lines(&render(&Session::new()));
        assert_eq!(lines[0], "AI Image Captioning");
        assert!(lines.contains(&"[Choose Image]".to_string()));
        assert!(lines.contains(&"(Generate Caption)".to_string()));
        assert!(lines.contains(&"No image selected yet.".to_string()));
    }

    #[test]
    fn test_preview_line() {
        let view = View {
            elements: vec![Element::Preview {
                uri: "data:image/webp;base64,AAAA".to_string(),
                width: Some(256),
                height: Some(128),
            }],
        };
        assert_eq!(lines(&view), vec!["Preview: 256x128 image/webp (1 KB)"]);
    }

    #[test]
    fn test_result_and_error_lines() {
        let view = View {
            elements: vec![
                Element::Result {
                    caption: "a person jumping".to_string(),
                },
                Element::Error {
                    message: "offline".to_string(),
                },
            ],
        };
        assert_eq!(lines(&view), vec!["Result: a person jumping", "offline"]);
    }
}
