//! The `caption check` command: probe the predict backend.

use caption_core::{Config, HttpPredictBackend, PredictBackend};
use console::Style;

/// Execute the check command.
pub async fn execute(config: &Config) -> anyhow::Result<()> {
    let backend = HttpPredictBackend::new(&config.backend, &config.limits);

    if !report(&backend).await {
        anyhow::bail!("Predict backend is not running at {}", backend.endpoint());
    }
    Ok(())
}

/// Probe the backend and print the result. Returns whether it answered.
pub async fn report(backend: &dyn PredictBackend) -> bool {
    let available = backend.is_available().await;
    if available {
        let green = Style::new().for_stderr().green();
        eprintln!(
            "  {} Backend reachable at {}",
            green.apply_to("✓"),
            backend.endpoint()
        );
    } else {
        let red = Style::new().for_stderr().red();
        eprintln!(
            "  {} Backend not reachable at {}",
            red.apply_to("✗"),
            backend.endpoint()
        );
    }
    available
}
