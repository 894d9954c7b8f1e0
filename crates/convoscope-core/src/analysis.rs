//! Analysis orchestration: request the report, then render it

use std::time::Instant;

use crate::gemini::{AnalysisClient, AnalysisError};
use crate::report;

/// Result from a completed analysis
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Raw report text as returned by the model
    pub report_text: String,
    /// Styled HTML fragment rendered from the report
    pub html: String,
    /// Processing timings
    pub timings: AnalysisTimings,
}

/// Processing time breakdown
#[derive(Debug, Clone, Default)]
pub struct AnalysisTimings {
    pub request_ms: u64,
    pub format_ms: u64,
    pub total_ms: u64,
}

/// Analyze a text conversation and render the report
pub async fn run_text_analysis(
    client: &AnalysisClient,
    conversation: &str,
) -> Result<AnalysisOutcome, AnalysisError> {
    let start = Instant::now();

    tracing::debug!("Analyzing {} characters of conversation", conversation.len());
    let t1 = Instant::now();
    let report_text = client.analyze_text(conversation).await?;
    let request_ms = t1.elapsed().as_millis() as u64;

    let t2 = Instant::now();
    let html = report::format_report(&report_text);
    let format_ms = t2.elapsed().as_millis() as u64;

    let total_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Analysis complete in {}ms (request: {}ms, format: {}ms)",
        total_ms,
        request_ms,
        format_ms
    );

    Ok(AnalysisOutcome {
        report_text,
        html,
        timings: AnalysisTimings {
            request_ms,
            format_ms,
            total_ms,
        },
    })
}

/// Analyze an encoded audio recording and render the report
pub async fn run_audio_analysis(
    client: &AnalysisClient,
    audio: &[u8],
    mime_type: &str,
) -> Result<AnalysisOutcome, AnalysisError> {
    let start = Instant::now();

    tracing::debug!("Analyzing {} bytes of {} audio", audio.len(), mime_type);
    let t1 = Instant::now();
    let report_text = client.analyze_audio(audio, mime_type).await?;
    let request_ms = t1.elapsed().as_millis() as u64;

    let t2 = Instant::now();
    let html = report::format_report(&report_text);
    let format_ms = t2.elapsed().as_millis() as u64;

    let total_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Analysis complete in {}ms (request: {}ms, format: {}ms)",
        total_ms,
        request_ms,
        format_ms
    );

    Ok(AnalysisOutcome {
        report_text,
        html,
        timings: AnalysisTimings {
            request_ms,
            format_ms,
            total_ms,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, StaticCredentials};

    fn offline_client() -> AnalysisClient {
        AnalysisClient::with_credentials(&Config::default(), Box::new(StaticCredentials(None)))
    }

    #[tokio::test]
    async fn test_text_analysis_surfaces_credential_error() {
        let err = run_text_analysis(&offline_client(), "甲: 你好")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_audio_analysis_surfaces_credential_error() {
        let err = run_audio_analysis(&offline_client(), &[0u8; 8], "audio/wav")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingApiKey));
    }
}
