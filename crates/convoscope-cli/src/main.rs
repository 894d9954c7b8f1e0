//! Convoscope CLI - Conversation analysis with Gemini

use anyhow::Result;
use clap::{Parser, Subcommand};
use convoscope_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "convoscope")]
#[command(version)]
#[command(about = "Analyze conversations with Gemini and render styled reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Verbose output (show timings and debug info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a written transcript (reads stdin when no file is given)
    Text {
        /// Path to a transcript file
        path: Option<String>,

        /// Print the raw report instead of the styled HTML fragment
        #[arg(long)]
        raw: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Copy the result to the clipboard
        #[arg(short = 'c', long)]
        clipboard: bool,
    },

    /// Analyze a recorded conversation from an audio file
    Audio {
        /// Path to audio file (wav, mp3, m4a, ogg, flac, ...)
        path: String,

        /// Print the raw report instead of the styled HTML fragment
        #[arg(long)]
        raw: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Copy the result to the clipboard
        #[arg(short = 'c', long)]
        clipboard: bool,
    },

    /// Record from the microphone and analyze (press Ctrl+C to stop)
    Record {
        /// Also save the recording as a WAV file
        #[arg(long)]
        save: Option<String>,

        /// Print the raw report instead of the styled HTML fragment
        #[arg(long)]
        raw: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Copy the result to the clipboard
        #[arg(short = 'c', long)]
        clipboard: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List available models
    Models,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set the analysis model
    SetModel {
        /// Model name (gemini-2.5-flash, gemini-2.5-pro, or a custom id)
        model: String,
    },

    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Text {
            path,
            raw,
            output,
            clipboard,
        } => {
            commands::text::run(&config, path.as_deref(), raw, output.as_deref(), clipboard).await
        }

        Commands::Audio {
            path,
            raw,
            output,
            clipboard,
        } => commands::audio::run(&config, &path, raw, output.as_deref(), clipboard).await,

        Commands::Record {
            save,
            raw,
            output,
            clipboard,
        } => {
            commands::record::run(&config, save.as_deref(), raw, output.as_deref(), clipboard).await
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::SetModel { model } => commands::config::set_model(&mut config, &model),
            ConfigAction::Path => commands::config::show_path(),
        },

        Commands::Models => commands::models::list(&config),
    }
}
