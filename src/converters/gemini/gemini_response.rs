use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::converters::gemini::GeminiCandidate;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(rename = "modelVersion")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(rename = "responseId")]
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GeminiResponse {
    /// Reads each field on its own, so a badly typed field only loses itself.
    pub fn from_value_lossy(value: &Value) -> Self {
        let string_field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        GeminiResponse {
            candidates: value
                .get("candidates")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(GeminiCandidate::from_value_lossy).collect())
                .unwrap_or_default(),
            model_version: string_field("modelVersion"),
            response_id: string_field("responseId"),
        }
    }

    /// Text parts of the first candidate joined in order, without separator.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.text())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_concatenates_parts_of_first_candidate() {
        let resp = GeminiResponse::from_value_lossy(&json!({
            "candidates": [
                {
                    "content": { "role": "model", "parts": [{ "text": "foo" }, { "text": "bar" }] },
                    "finishReason": "STOP",
                    "index": 0
                },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ],
            "modelVersion": "gemini-2.5-pro"
        }));
        assert_eq!(resp.text(), "foobar");
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_text_skips_parts_without_text() {
        let resp = GeminiResponse::from_value_lossy(&json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "a" },
                    { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                    { "text": null },
                    { "text": 5 },
                    { "text": "b" }
                ] }
            }]
        }));
        assert_eq!(resp.text(), "ab");
    }

    #[test]
    fn test_text_missing_fields_is_empty() {
        assert_eq!(GeminiResponse::from_value_lossy(&json!({})).text(), "");
        assert_eq!(GeminiResponse::from_value_lossy(&json!({ "candidates": [] })).text(), "");
        assert_eq!(GeminiResponse::from_value_lossy(&json!({ "candidates": [{}] })).text(), "");
        assert_eq!(
            GeminiResponse::from_value_lossy(&json!({ "candidates": [{ "content": {} }] })).text(),
            ""
        );
    }

    #[test]
    fn test_unexpected_shape_is_empty() {
        assert_eq!(GeminiResponse::from_value_lossy(&json!({ "candidates": "nope" })).text(), "");
        assert_eq!(GeminiResponse::from_value_lossy(&json!([1, 2, 3])).text(), "");
    }

    #[test]
    fn test_badly_typed_metadata_keeps_text() {
        let resp = GeminiResponse::from_value_lossy(&json!({
            "candidates": [{ "content": { "parts": [{ "text": "answer" }] }, "finishReason": "STOP" }],
            "modelVersion": 7
        }));
        assert_eq!(resp.text(), "answer");
        assert_eq!(resp.model_version, None);

        let resp = GeminiResponse::from_value_lossy(&json!({
            "candidates": [
                { "content": { "role": 1, "parts": [{ "text": "first" }] }, "finishReason": 3 },
                { "content": "malformed sibling" }
            ],
            "responseId": ["x"]
        }));
        assert_eq!(resp.text(), "first");
        assert_eq!(resp.candidates[0].finish_reason, None);
    }

    #[test]
    fn test_non_array_parts_is_empty() {
        let resp = GeminiResponse::from_value_lossy(&json!({
            "candidates": [{ "content": { "parts": "text" } }, 5]
        }));
        assert_eq!(resp.text(), "");
        assert_eq!(resp.candidates.len(), 2);
    }
}
