//! Models command - list available models

use anyhow::Result;
use console::{style, Term};
use convoscope_core::config::AnalysisModel;
use convoscope_core::Config;

pub fn list(config: &Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("Available Models").bold()))?;
    term.write_line("")?;

    let models = [
        (AnalysisModel::Gemini25Flash, "Fast, multimodal (default)"),
        (AnalysisModel::Gemini25Pro, "Slower, stronger reasoning"),
    ];

    for (model, desc) in &models {
        let selected = if *model == config.model {
            style("●").green()
        } else {
            style("○").dim()
        };

        term.write_line(&format!(
            "  {} {:18} {:18} {}",
            selected,
            model.display_name(),
            style(model.api_name()).dim(),
            desc
        ))?;
    }

    if let AnalysisModel::Custom(name) = &config.model {
        term.write_line(&format!(
            "  {} {:18} {}",
            style("●").green(),
            name,
            style("custom model id").dim()
        ))?;
    }

    term.write_line("")?;
    term.write_line(&format!(
        "Run {} to switch models",
        style("convoscope config set-model <name>").cyan()
    ))?;

    Ok(())
}
