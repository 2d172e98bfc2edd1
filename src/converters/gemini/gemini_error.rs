use serde_json::Value;

/// `error.message` of a Google API error body, when it is a non-empty string.
pub fn upstream_error_message(body: &Value) -> Option<&str> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upstream_error_message() {
        let body = json!({ "error": { "code": 429, "message": "rate limited", "status": "RESOURCE_EXHAUSTED" } });
        assert_eq!(upstream_error_message(&body), Some("rate limited"));
    }

    #[test]
    fn test_upstream_error_message_missing_or_blank() {
        assert_eq!(upstream_error_message(&json!({})), None);
        assert_eq!(upstream_error_message(&json!({ "error": { "message": "" } })), None);
        assert_eq!(upstream_error_message(&json!({ "error": { "message": 42 } })), None);
        assert_eq!(upstream_error_message(&json!({ "error": "boom" })), None);
    }
}
