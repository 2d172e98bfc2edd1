use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text { text: String },
    // inlineData, functionCall and anything else carry no text for the relay
    Other(Value),
}

impl GeminiPart {
    pub fn from_text(text: impl Into<String>) -> Self {
        GeminiPart::Text { text: text.into() }
    }

    /// Only a string `text` counts; `{"text": 5}` and `{"text": null}` carry no text.
    pub fn from_value(value: &Value) -> Self {
        match value.get("text").and_then(Value::as_str) {
            Some(text) => GeminiPart::from_text(text),
            None => GeminiPart::Other(value.clone()),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            GeminiPart::Text { text } => text,
            GeminiPart::Other(_) => "",
        }
    }
}
