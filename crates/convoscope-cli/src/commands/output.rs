//! Shared result delivery: stdout, file, clipboard

use anyhow::{Context, Result};
use arboard::Clipboard;
use console::{style, Term};
use convoscope_core::{AnalysisOutcome, Config};

pub fn deliver(
    term: &Term,
    config: &Config,
    outcome: &AnalysisOutcome,
    raw: bool,
    output: Option<&str>,
    clipboard: bool,
) -> Result<()> {
    let content = if raw {
        &outcome.report_text
    } else {
        &outcome.html
    };

    if let Some(path) = output {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path))?;
        term.write_line(&format!("{} Wrote {}", style("✓").green(), path))?;
    } else {
        term.write_line("")?;
        if raw {
            term.write_line(&format!("{}", style("Raw report:").bold()))?;
        } else {
            term.write_line(&format!("{}", style("Report fragment:").bold()))?;
        }
        term.write_line(content)?;
        term.write_line("")?;
    }

    // Show timings
    term.write_line(&format!(
        "{} Request: {}ms | Format: {}ms | Total: {}ms",
        style("⏱").dim(),
        outcome.timings.request_ms,
        outcome.timings.format_ms,
        outcome.timings.total_ms
    ))?;

    // Copy to clipboard if requested
    if clipboard || config.auto_clipboard {
        let mut cb = Clipboard::new()?;
        cb.set_text(content)?;
        term.write_line(&format!("{} Copied to clipboard", style("📋").green()))?;
    }

    Ok(())
}
