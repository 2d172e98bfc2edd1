use serde::{Deserialize, Serialize};

use crate::converters::gemini::{GeminiContent, GeminiGenerationConfig, GeminiPart};

/// The model is asked for JSON text so browser callers can `JSON.parse` the content.
pub const RESPONSE_MIME_TYPE: &str = "application/json";
pub const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

impl GeminiRequest {
    /// Single-turn request carrying `prompt` as the only text part.
    pub fn from_prompt(prompt: &str) -> Self {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: None,
                parts: vec![GeminiPart::from_text(prompt)],
            }],
            generation_config: Some(GeminiGenerationConfig {
                response_mime_type: Some(RESPONSE_MIME_TYPE.to_string()),
                temperature: Some(TEMPERATURE),
            }),
        }
    }
}
