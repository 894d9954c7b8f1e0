//! Convoscope Core - Conversation analysis pipeline
//!
//! This library provides the core functionality for:
//! - Conversation analysis via the Gemini API (text and recorded audio)
//! - Rendering analysis reports as styled HTML fragments
//! - Microphone capture and in-memory WAV encoding
//! - TOML configuration with model selection and prompt overrides

pub mod audio;
pub mod config;
pub mod gemini;
pub mod report;

mod analysis;

pub use analysis::{run_audio_analysis, run_text_analysis, AnalysisOutcome, AnalysisTimings};
pub use config::{
    env_vars, AnalysisKind, AnalysisModel, Config, CredentialProvider, EnvCredentials,
    RequestOptions, StaticCredentials,
};
pub use gemini::{AnalysisClient, AnalysisError, ServiceError};

/// Analyze a text conversation and return the rendered report
///
/// This is the main entry point for the library.
pub async fn analyze_conversation(
    conversation: &str,
    config: &Config,
) -> Result<AnalysisOutcome, AnalysisError> {
    let client = AnalysisClient::new(config);
    run_text_analysis(&client, conversation).await
}
