use crate::converters::gemini::GeminiContent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

impl GeminiCandidate {
    pub fn from_value_lossy(value: &Value) -> Self {
        GeminiCandidate {
            content: value.get("content").map(GeminiContent::from_value_lossy),
            finish_reason: value.get("finishReason").and_then(Value::as_str).map(str::to_string),
        }
    }
}
