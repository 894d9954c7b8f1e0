//! Client for the conversation analysis operations

use base64::{engine::general_purpose, Engine as _};

use crate::config::{
    env_vars, AnalysisKind, Config, CredentialProvider, EnvCredentials, RequestOptions,
};

use super::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};

/// Failure behind an analysis error, kept for logs and diagnostics
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("request transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("prompt blocked by the service: {reason}")]
    Blocked { reason: String },

    #[error("no analysis text in the response")]
    EmptyResponse,
}

/// Analysis failure as reported to the caller
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No credential available; raised before any request is issued
    #[error("{} environment variable not set.", env_vars::GEMINI_API_KEY)]
    MissingApiKey,

    #[error("Failed to get analysis from the AI model. Please check your connection and API key.")]
    TextAnalysisFailed {
        #[source]
        source: ServiceError,
    },

    #[error("Failed to get analysis from the AI model. The audio file might be too large or in an unsupported format.")]
    AudioAnalysisFailed {
        #[source]
        source: ServiceError,
    },
}

fn generation_config_from(options: &RequestOptions) -> Option<GenerationConfig> {
    if options.temperature.is_none() && options.max_output_tokens.is_none() {
        return None;
    }
    Some(GenerationConfig {
        temperature: options.temperature,
        max_output_tokens: options.max_output_tokens,
    })
}

/// Client for the two analysis operations
///
/// Holds no credential itself; the provider is consulted on every call, so
/// a missing key fails before any request is built.
pub struct AnalysisClient {
    http: reqwest::Client,
    model: String,
    generation_config: Option<GenerationConfig>,
    credentials: Box<dyn CredentialProvider>,
    text_instruction: String,
    audio_instruction: String,
}

impl AnalysisClient {
    /// Create a client using process environment credentials
    pub fn new(config: &Config) -> Self {
        Self::with_credentials(config, Box::new(EnvCredentials))
    }

    /// Create a client with an explicit credential source
    pub fn with_credentials(config: &Config, credentials: Box<dyn CredentialProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            model: config.model.api_name().to_string(),
            generation_config: generation_config_from(&config.request),
            credentials,
            text_instruction: config.instruction_for(AnalysisKind::Text),
            audio_instruction: config.instruction_for(AnalysisKind::Audio),
        }
    }

    /// Analyze a text conversation and return the raw report
    pub async fn analyze_text(&self, conversation: &str) -> Result<String, AnalysisError> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or(AnalysisError::MissingApiKey)?;

        let request = GenerateContentRequest {
            contents: vec![Content::text(conversation)],
            system_instruction: Some(Content::text(self.text_instruction.clone())),
            generation_config: self.generation_config.clone(),
        };

        self.generate(&api_key, &request).await.map_err(|source| {
            tracing::error!("Text analysis failed: {}", source);
            AnalysisError::TextAnalysisFailed { source }
        })
    }

    /// Analyze a recorded conversation and return the raw report
    ///
    /// # Arguments
    /// * `audio` - complete encoded audio file contents
    /// * `mime_type` - media type of the encoding (e.g. "audio/wav")
    pub async fn analyze_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
    ) -> Result<String, AnalysisError> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or(AnalysisError::MissingApiKey)?;

        let encoded = general_purpose::STANDARD.encode(audio);
        tracing::debug!(
            "Encoded {} audio bytes ({}) for upload",
            audio.len(),
            mime_type
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: self.audio_instruction.clone(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: encoded,
                        },
                    },
                ],
            }],
            system_instruction: None,
            generation_config: self.generation_config.clone(),
        };

        self.generate(&api_key, &request).await.map_err(|source| {
            tracing::error!("Audio analysis failed: {}", source);
            AnalysisError::AudioAnalysisFailed { source }
        })
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, ServiceError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, api_key
        );

        tracing::debug!("POST generateContent (model: {})", self.model);

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Api { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;

        if let Some(feedback) = response.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(ServiceError::Blocked { reason });
            }
        }

        if let Some(usage) = &response.usage_metadata {
            tracing::debug!(
                "Token usage: prompt={:?} candidates={:?} total={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count,
                usage.total_token_count
            );
        }

        let parts = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .ok_or(ServiceError::EmptyResponse)?;

        let text: String = parts.into_iter().filter_map(|part| part.text).collect();
        if text.is_empty() {
            return Err(ServiceError::EmptyResponse);
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticCredentials;

    fn offline_client() -> AnalysisClient {
        AnalysisClient::with_credentials(&Config::default(), Box::new(StaticCredentials(None)))
    }

    // ========================================================================
    // Credential checks happen before any network activity
    // ========================================================================

    #[tokio::test]
    async fn test_text_analysis_without_key_fails_fast() {
        let err = offline_client().analyze_text("甲: 哈囉").await.unwrap_err();
        assert!(matches!(err, AnalysisError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_audio_analysis_without_key_fails_fast() {
        let err = offline_client()
            .analyze_audio(&[0u8; 16], "audio/wav")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MissingApiKey));
    }

    // ========================================================================
    // Error messages
    // ========================================================================

    #[test]
    fn test_missing_key_names_the_variable() {
        assert_eq!(
            AnalysisError::MissingApiKey.to_string(),
            "GEMINI_API_KEY environment variable not set."
        );
    }

    #[test]
    fn test_text_failure_message() {
        let err = AnalysisError::TextAnalysisFailed {
            source: ServiceError::EmptyResponse,
        };
        assert_eq!(
            err.to_string(),
            "Failed to get analysis from the AI model. Please check your connection and API key."
        );
    }

    #[test]
    fn test_audio_failure_message() {
        let err = AnalysisError::AudioAnalysisFailed {
            source: ServiceError::EmptyResponse,
        };
        assert_eq!(
            err.to_string(),
            "Failed to get analysis from the AI model. The audio file might be too large or in an unsupported format."
        );
    }

    #[test]
    fn test_service_error_carries_details() {
        let err = ServiceError::Api {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            body: "quota exceeded".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("429"));
        assert!(rendered.contains("quota exceeded"));

        let blocked = ServiceError::Blocked {
            reason: "SAFETY".to_string(),
        };
        assert!(blocked.to_string().contains("SAFETY"));
    }

    // ========================================================================
    // Generation config
    // ========================================================================

    #[test]
    fn test_generation_config_only_built_when_options_set() {
        assert!(generation_config_from(&RequestOptions::default()).is_none());

        let options = RequestOptions {
            temperature: Some(0.5),
            max_output_tokens: None,
        };
        let config = generation_config_from(&options).unwrap();
        assert_eq!(config.temperature, Some(0.5));
        assert!(config.max_output_tokens.is_none());
    }
}
