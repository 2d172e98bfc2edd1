use crate::converters::gemini::GeminiPart;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>, // "user" or "model"
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Keeps whatever parts are present; a non-array `parts` reads as no parts.
    pub fn from_value_lossy(value: &Value) -> Self {
        GeminiContent {
            role: value.get("role").and_then(Value::as_str).map(str::to_string),
            parts: value
                .get("parts")
                .and_then(Value::as_array)
                .map(|parts| parts.iter().map(GeminiPart::from_value).collect())
                .unwrap_or_default(),
        }
    }

    pub fn text(&self) -> String {
        self.parts.iter().map(GeminiPart::text).collect()
    }
}
