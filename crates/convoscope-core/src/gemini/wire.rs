//! Request and response shapes for the generateContent endpoint
//!
//! Request fields serialize in snake_case, which the API accepts alongside
//! camelCase. Response fields arrive camelCase and are renamed on the way in.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    /// Content holding a single text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
    #[serde(rename = "promptFeedback")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    pub prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    pub candidates_token_count: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    pub total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("甲: 你好\n乙: 你好")],
            system_instruction: Some(Content::text("你是一個分析師")),
            generation_config: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "甲: 你好\n乙: 你好");
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "你是一個分析師");
        assert!(json.get("generation_config").is_none());
    }

    #[test]
    fn test_audio_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: "分析這段錄音".to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: "audio/wav".to_string(),
                            data: "UklGRg==".to_string(),
                        },
                    },
                ],
            }],
            system_instruction: None,
            generation_config: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts[0]["text"], "分析這段錄音");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "audio/wav");
        assert_eq!(parts[1]["inline_data"]["data"], "UklGRg==");
        // Untagged parts serialize flat, with no enum wrapper
        assert!(parts[1].get("InlineData").is_none());
    }

    #[test]
    fn test_generation_config_omits_unset_fields() {
        let request = GenerateContentRequest {
            contents: vec![Content::text("hi")],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.5),
                max_output_tokens: None,
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["generation_config"]["temperature"], 0.5);
        assert!(json["generation_config"].get("max_output_tokens").is_none());
    }

    #[test]
    fn test_response_parses_camel_case() {
        let body = r####"{
            "candidates": [{
                "content": { "parts": [{ "text": "### 1. 雙方情緒反應" }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 20,
                "totalTokenCount": 30
            }
        }"####;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let candidates = response.candidates.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].finish_reason.as_deref(), Some("STOP"));
        let parts = candidates[0].content.as_ref().unwrap().parts.as_ref().unwrap();
        assert_eq!(parts[0].text.as_deref(), Some("### 1. 雙方情緒反應"));
        assert_eq!(response.usage_metadata.unwrap().total_token_count, Some(30));
    }

    #[test]
    fn test_response_parses_block_feedback() {
        let body = r#"{ "promptFeedback": { "blockReason": "SAFETY" } }"#;

        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(response.candidates.is_none());
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }
}
