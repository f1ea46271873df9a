//! Interactive mode: the terminal version of the upload page.
//!
//! Bare `caption` on a TTY shows the rendered session after every action and
//! a menu to choose an image, generate its caption, show the session or check
//! the backend. A caption request runs in the background, so the menu stays
//! usable (and a new image can be chosen) while it is outstanding.

pub mod theme;

use std::sync::Arc;

use caption_core::config::expand_path;
use caption_core::{Config, Session, SubmitOutcome, UploadClient};
use console::Style;
use dialoguer::{Input, Select};
use tokio::task::JoinHandle;

use super::view;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Menu actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ChooseImage,
    Generate,
    ShowSession,
    CheckBackend,
    Exit,
}

const ACTIONS: [Action; 5] = [
    Action::ChooseImage,
    Action::Generate,
    Action::ShowSession,
    Action::CheckBackend,
    Action::Exit,
];

/// Menu labels, mirroring the page's button labels for this session.
fn menu_items(session: &Session) -> Vec<&'static str> {
    ACTIONS
        .iter()
        .map(|action| match action {
            Action::ChooseImage if session.image().is_some() => "Change image",
            Action::ChooseImage => "Choose image",
            Action::Generate if session.is_loading() => "Analyzing...",
            Action::Generate => "Generate caption",
            Action::ShowSession => "Show session",
            Action::CheckBackend => "Check backend",
            Action::Exit => "Exit",
        })
        .collect()
}

fn position(action: Action) -> usize {
    ACTIONS.iter().position(|a| *a == action).unwrap_or(0)
}

/// Default cursor position: generate once an image is picked, refresh while
/// a request is out.
fn default_action(session: &Session) -> usize {
    if session.is_loading() {
        position(Action::ShowSession)
    } else if session.can_submit() && session.caption().is_empty() && session.error().is_none() {
        position(Action::Generate)
    } else {
        position(Action::ChooseImage)
    }
}

/// Session summary for "Show session".
fn session_lines(session: &Session) -> Vec<String> {
    let mut lines = vec![format!("State:   {}", session.phase())];
    match session.image() {
        Some(image) => lines.push(format!(
            "Image:   {} ({}, {} bytes)",
            image.file_name(),
            image.mime_type(),
            image.len()
        )),
        None => lines.push("Image:   none".to_string()),
    }
    if let Some((w, h)) = session.preview().and_then(|p| p.dimensions()) {
        lines.push(format!("Preview: {w}x{h}"));
    }
    if !session.caption().is_empty() {
        lines.push(format!("Caption: {}", session.caption()));
    }
    if let Some(error) = session.error() {
        lines.push(format!("Error:   {error}"));
    }
    lines
}

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let client = Arc::new(UploadClient::new(config));
    theme::print_banner(client.backend().endpoint());

    let theme = theme::caption_theme();
    let mut pending: Option<JoinHandle<SubmitOutcome>> = None;

    loop {
        report_finished(&mut pending).await;
        view::print_view(&client.view());

        let session = client.snapshot();
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&menu_items(&session))
            .default(default_action(&session))
            .interact_opt()?;

        match selection.and_then(|i| ACTIONS.get(i).copied()) {
            Some(Action::ChooseImage) => choose_image(&client, &theme).await?,
            Some(Action::Generate) => {
                if pending.as_ref().is_some_and(|task| !task.is_finished()) {
                    let dim = Style::new().for_stderr().dim();
                    eprintln!("  {}", dim.apply_to("Still analyzing the current image."));
                } else if let Some(task) = generate(&client).await {
                    pending = Some(task);
                }
            }
            Some(Action::ShowSession) => {
                for line in session_lines(&client.snapshot()) {
                    eprintln!("  {line}");
                }
            }
            Some(Action::CheckBackend) => {
                super::check::report(client.backend()).await;
            }
            Some(Action::Exit) | None => break, // Exit or Ctrl+C / Esc
        }
    }

    if let Some(task) = pending {
        task.abort();
    }
    Ok(())
}

/// Prompt for an image path until one loads or the user backs out.
async fn choose_image(
    client: &UploadClient,
    theme: &dialoguer::theme::ColorfulTheme,
) -> anyhow::Result<()> {
    loop {
        let Some(raw_path) = handle_interrupt(
            Input::<String>::with_theme(theme)
                .with_prompt("Path to image")
                .interact_text(),
        )?
        else {
            return Ok(());
        };

        match client.select_file(&expand_path(&raw_path)).await {
            Ok(()) => return Ok(()),
            Err(e) => {
                let warn = Style::new().for_stderr().yellow();
                eprintln!("  {}", warn.apply_to(e.to_string()));
            }
        }
    }
}

/// Start a submit for the current selection.
///
/// With nothing selected the submit only records the validation error, so it
/// runs inline and no task is returned.
async fn generate(client: &Arc<UploadClient>) -> Option<JoinHandle<SubmitOutcome>> {
    if client.snapshot().image().is_none() {
        client.submit().await;
        return None;
    }

    let client = Arc::clone(client);
    Some(tokio::spawn(async move { client.submit().await }))
}

/// Collect a finished background submit, if any.
async fn report_finished(pending: &mut Option<JoinHandle<SubmitOutcome>>) {
    if !pending.as_ref().is_some_and(|task| task.is_finished()) {
        return;
    }
    let Some(task) = pending.take() else {
        return;
    };

    match task.await {
        // Keep the caption on stdout so it can be copied or piped
        Ok(SubmitOutcome::Captioned(caption)) => println!("{caption}"),
        Ok(_) => {}
        Err(e) => tracing::warn!("Caption task ended abnormally: {e}"),
    }
}
