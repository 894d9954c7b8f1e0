//! Audio command - analyze a recorded conversation file

use anyhow::{Context, Result};
use console::{style, Term};
use convoscope_core::audio::mime_for_path;
use convoscope_core::{run_audio_analysis, AnalysisClient, Config};
use std::path::Path;

use super::output;

pub async fn run(
    config: &Config,
    path: &str,
    raw: bool,
    output_path: Option<&str>,
    clipboard: bool,
) -> Result<()> {
    let term = Term::stdout();
    let file_path = Path::new(path);

    if !file_path.exists() {
        anyhow::bail!("File not found: {}", path);
    }

    let mime_type = mime_for_path(file_path)
        .ok_or_else(|| anyhow::anyhow!("Unrecognized audio extension: {}", path))?;

    term.write_line(&format!(
        "{} Loading audio file: {}",
        style("📁").cyan(),
        path
    ))?;

    let audio = tokio::fs::read(file_path)
        .await
        .with_context(|| format!("Failed to read audio file: {}", path))?;

    if audio.is_empty() {
        anyhow::bail!("Audio file is empty: {}", path);
    }

    term.write_line(&format!(
        "  Media type: {}, {} bytes",
        mime_type,
        audio.len()
    ))?;

    term.write_line(&format!(
        "{} Analyzing with {}...",
        style("⚙").cyan(),
        config.model.display_name()
    ))?;

    let client = AnalysisClient::new(config);
    let outcome = run_audio_analysis(&client, &audio, mime_type).await?;

    output::deliver(&term, config, &outcome, raw, output_path, clipboard)
}
