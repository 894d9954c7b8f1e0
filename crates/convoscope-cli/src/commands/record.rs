//! Record command - capture a conversation from the microphone

use anyhow::{Context, Result};
use console::{style, Term};
use convoscope_core::audio::AudioCapture;
use convoscope_core::{run_audio_analysis, AnalysisClient, Config};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::output;

pub async fn run(
    config: &Config,
    save: Option<&str>,
    raw: bool,
    output_path: Option<&str>,
    clipboard: bool,
) -> Result<()> {
    let term = Term::stdout();

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut capture = AudioCapture::new()?;

    term.write_line(&format!(
        "{} Recording... (press {} to stop)",
        style("🎙").green(),
        style("Ctrl+C").cyan()
    ))?;

    capture.start()?;

    // Show recording indicator
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")?,
    );

    // Wait for Ctrl+C
    let started = std::time::Instant::now();
    while running.load(Ordering::SeqCst) {
        if let Some(err) = capture.try_error() {
            pb.finish_and_clear();
            anyhow::bail!("Audio capture error: {}", err);
        }
        pb.set_message(format!(
            "Recording {}",
            format_elapsed(started.elapsed().as_secs())
        ));
        pb.tick();
        std::thread::sleep(std::time::Duration::from_millis(100));
    }

    pb.finish_and_clear();

    // Stop capture and get audio
    let recording = capture.stop();

    term.write_line(&format!(
        "{} Captured {:.1}s of audio ({} samples)",
        style("✓").green(),
        recording.duration_secs(),
        recording.samples.len()
    ))?;

    if recording.is_empty() {
        term.write_line(&format!("{} No audio captured", style("⚠").yellow()))?;
        return Ok(());
    }

    let wav = recording.to_wav_bytes()?;

    if let Some(path) = save {
        std::fs::write(path, &wav)
            .with_context(|| format!("Failed to save recording: {}", path))?;
        term.write_line(&format!(
            "{} Saved recording to {}",
            style("💾").green(),
            path
        ))?;
    }

    term.write_line(&format!(
        "{} Analyzing with {}...",
        style("⚙").cyan(),
        config.model.display_name()
    ))?;

    let client = AnalysisClient::new(config);
    let outcome = run_audio_analysis(&client, &wav, "audio/wav").await?;

    output::deliver(&term, config, &outcome, raw, output_path, clipboard)
}

fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(600), "10:00");
        assert_eq!(format_elapsed(3599), "59:59");
    }
}
