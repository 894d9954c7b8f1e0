//! Config command - manage configuration

use anyhow::Result;
use console::{style, Term};
use convoscope_core::config::AnalysisModel;
use convoscope_core::Config;

pub fn show(config: &Config) -> Result<()> {
    let term = Term::stdout();

    term.write_line(&format!("{}", style("Convoscope Configuration").bold()))?;
    term.write_line("")?;

    term.write_line(&format!(
        "Analysis model:   {}",
        style(config.model.display_name()).cyan()
    ))?;
    term.write_line(&format!(
        "  API name:       {}",
        style(config.model.api_name()).dim()
    ))?;
    term.write_line(&format!(
        "Auto clipboard:   {}",
        style(config.auto_clipboard).cyan()
    ))?;

    term.write_line("")?;
    term.write_line(&format!("{}", style("Request Options:").dim()))?;
    term.write_line(&format!(
        "  Temperature:    {}",
        describe(config.request.temperature)
    ))?;
    term.write_line(&format!(
        "  Max tokens:     {}",
        describe(config.request.max_output_tokens)
    ))?;

    Ok(())
}

fn describe<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "service default".to_string(),
    }
}

pub fn set_model(config: &mut Config, model: &str) -> Result<()> {
    let term = Term::stdout();

    let selected = AnalysisModel::from_name(model);
    if let AnalysisModel::Custom(name) = &selected {
        term.write_line(&format!(
            "{} Unknown model '{}', passing it through to the API as-is",
            style("ℹ").blue(),
            name
        ))?;
    }

    config.model = selected.clone();
    config.save(None)?;

    term.write_line(&format!(
        "{} Analysis model set to: {}",
        style("✓").green(),
        selected.display_name()
    ))?;

    Ok(())
}

pub fn show_path() -> Result<()> {
    let term = Term::stdout();
    let config_path = Config::default_config_path()?;

    term.write_line(&format!("Config file: {:?}", config_path))?;

    if config_path.exists() {
        term.write_line(&format!("{} File exists", style("✓").green()))?;
    } else {
        term.write_line(&format!(
            "{} File does not exist (using defaults)",
            style("ℹ").blue()
        ))?;
    }

    Ok(())
}
