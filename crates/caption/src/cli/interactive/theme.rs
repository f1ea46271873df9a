//! Custom dialoguer theme and banner for interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` configured with Caption's colors.
///
/// - Prompt prefix: cyan `?`
/// - Active item indicator: cyan `▸`
/// - Success prefix: green `✓`
/// - Error prefix: red `✗`
pub fn caption_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().cyan(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().cyan(),
        active_item_style: Style::new().for_stderr().cyan(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the banner to stderr with the version and the active endpoint.
pub fn print_banner(endpoint: &str) {
    let version_line = format!("Caption v{}", caption_core::VERSION);
    let endpoint_line = format!("→ {endpoint}");

    let inner_width = version_line
        .chars()
        .count()
        .max(endpoint_line.chars().count())
        + 4;

    let cyan = Style::new().for_stderr().cyan();

    eprintln!();
    eprintln!("{}", cyan.apply_to(format!("  ╔{:═<inner_width$}╗", "")));
    eprintln!(
        "{}",
        cyan.apply_to(format!("  ║{version_line:^inner_width$}║"))
    );
    eprintln!(
        "{}",
        cyan.apply_to(format!("  ║{endpoint_line:^inner_width$}║"))
    );
    eprintln!("{}", cyan.apply_to(format!("  ╚{:═<inner_width$}╝", "")));
}
