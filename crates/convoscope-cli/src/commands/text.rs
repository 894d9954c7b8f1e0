//! Text command - analyze a written transcript

use anyhow::{Context, Result};
use console::{style, Term};
use convoscope_core::{run_text_analysis, AnalysisClient, Config};
use std::io::Read;
use std::path::Path;

use super::output;

pub async fn run(
    config: &Config,
    path: Option<&str>,
    raw: bool,
    output_path: Option<&str>,
    clipboard: bool,
) -> Result<()> {
    let term = Term::stdout();

    let conversation = match path {
        Some(path) => {
            if !Path::new(path).exists() {
                anyhow::bail!("File not found: {}", path);
            }

            term.write_line(&format!(
                "{} Loading transcript: {}",
                style("📁").cyan(),
                path
            ))?;

            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read transcript: {}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read transcript from stdin")?;
            buf
        }
    };

    if conversation.trim().is_empty() {
        anyhow::bail!("Transcript is empty, nothing to analyze");
    }

    term.write_line(&format!(
        "{} Analyzing {} characters with {}...",
        style("⚙").cyan(),
        conversation.chars().count(),
        config.model.display_name()
    ))?;

    let client = AnalysisClient::new(config);
    let outcome = run_text_analysis(&client, &conversation).await?;

    output::deliver(&term, config, &outcome, raw, output_path, clipboard)
}
