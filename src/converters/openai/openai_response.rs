use serde::{Deserialize, Serialize};

use crate::converters::gemini::GeminiResponse;
use crate::converters::openai::{OpenAIChoice, OpenAIResponseMessage};

pub const GEMINI_PROVIDER: &str = "gemini";

/// OpenAI-like envelope returned to callers, so front ends written against
/// chat completions can read `choices[0].message.content` unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAIResponse {
    pub choices: Vec<OpenAIChoice>,
    pub provider: String,
    pub model: String,
}

impl OpenAIResponse {
    pub fn from_gemini(gemini_resp: &GeminiResponse, model: &str) -> Self {
        OpenAIResponse {
            choices: vec![OpenAIChoice {
                message: OpenAIResponseMessage { content: gemini_resp.text() },
            }],
            provider: GEMINI_PROVIDER.to_string(),
            model: model.to_string(),
        }
    }
}
