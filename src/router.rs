use crate::config::{Config, RelayConfig};
use crate::converters::gemini::{GeminiRequest, GeminiResponse, upstream_error_message};
use crate::converters::openai::OpenAIResponse;
use crate::error::RelayError;
use crate::llm_client::LlmClient;
use crate::request_id::{RequestId, inject_request_id};
use axum::{
    Extension, Json, Router,
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use bytes::Bytes;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

pub const UPSTREAM_ERROR_FALLBACK: &str = "Upstream error";

/// Per-endpoint state: the injected model/credential plus the shared upstream client.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub config: Arc<RelayConfig>,
    pub llm_client: Arc<LlmClient>,
}

#[axum_macros::debug_handler]
pub async fn analyze(
    State(state): State<RelayState>,
    request_id: Option<Extension<RequestId>>,
    method: Method,
    body: Bytes,
) -> Response {
    let request_id = request_id.map(|Extension(id)| id);
    match relay(&state, &method, &body, request_id.as_ref()).await {
        Ok(resp) => resp,
        Err(e) => {
            match &e {
                RelayError::MethodNotAllowed | RelayError::InvalidBody(_) | RelayError::MissingPrompt => {
                    debug!("Rejected request: {}", e)
                }
                RelayError::MissingApiKey => error!("Refusing request: {}", e),
                RelayError::Upstream { status, .. } => warn!("Upstream failed with status {}: {}", status, e),
                RelayError::Transport(_) => error!("Failed to reach upstream: {}", e),
            }
            e.into_response()
        }
    }
}

/// Validates the inbound request, calls `generateContent` once and wraps the answer.
pub async fn relay(
    state: &RelayState,
    method: &Method,
    body: &[u8],
    request_id: Option<&RequestId>,
) -> Result<Response, RelayError> {
    if *method == Method::OPTIONS {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    if *method != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let prompt = extract_prompt(body)?;

    let api_key = state
        .config
        .api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(RelayError::MissingApiKey)?;

    let model = state.config.model_id.as_str();
    let gemini_req = GeminiRequest::from_prompt(&prompt);
    let response = state
        .llm_client
        .generate_content(&gemini_req, model, api_key, request_id)
        .await?;

    let status = response.status();
    let data = read_upstream_json(response).await;

    if !status.is_success() {
        let message = upstream_error_message(&data)
            .unwrap_or(UPSTREAM_ERROR_FALLBACK)
            .to_string();
        return Err(RelayError::Upstream { status, message, body: data });
    }

    let gemini_resp = GeminiResponse::from_value_lossy(&data);
    debug!(
        "Gemini response id {:?}, model version {:?}, finish reason {:?}",
        gemini_resp.response_id,
        gemini_resp.model_version,
        gemini_resp.candidates.first().and_then(|c| c.finish_reason.as_deref())
    );
    let openai_resp = OpenAIResponse::from_gemini(&gemini_resp, model);
    info!(
        "Relayed {} candidate(s) from {}, {} chars of text",
        gemini_resp.candidates.len(),
        model,
        openai_resp.choices[0].message.content.len()
    );
    Ok((StatusCode::OK, Json(openai_resp)).into_response())
}

/// Upstream bodies that cannot be read or parsed count as `{}`.
async fn read_upstream_json(response: reqwest::Response) -> Value {
    let raw = match response.bytes().await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to read upstream body ({}), treating it as empty", e);
            return json!({});
        }
    };
    serde_json::from_slice(&raw).unwrap_or_else(|e| {
        warn!("Upstream body is not JSON ({}), treating it as empty", e);
        json!({})
    })
}

/// Only a zero-length body reads as `{}`; only a non-empty string counts as a prompt.
fn extract_prompt(body: &[u8]) -> Result<String, RelayError> {
    let parsed: Value = if body.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(body).map_err(RelayError::InvalidBody)?
    };

    match parsed.get("prompt").and_then(Value::as_str) {
        Some(prompt) if !prompt.is_empty() => Ok(prompt.to_string()),
        _ => Err(RelayError::MissingPrompt),
    }
}

/// The CORS layer answers pre-flights itself with `200`; callers expect `204`.
async fn preflight_no_content(req: Request, next: Next) -> Response {
    let is_preflight = *req.method() == Method::OPTIONS;
    let mut resp = next.run(req).await;
    if is_preflight && resp.status() == StatusCode::OK {
        *resp.status_mut() = StatusCode::NO_CONTENT;
    }
    resp
}

pub fn build_router(config: &Config, api_key: Option<String>, llm_client: Arc<LlmClient>) -> Router {
    let mut app = Router::new().route("/health", get(|| async { "OK" }));

    for endpoint in &config.endpoints {
        let state = RelayState {
            config: Arc::new(RelayConfig::for_endpoint(endpoint, api_key.clone())),
            llm_client: llm_client.clone(),
        };
        info!("Serving {} with model {}", endpoint.path, endpoint.model);
        app = app.route(&endpoint.path, any(analyze).with_state(state));
    }

    if config.cors {
        app = app
            .layer(CorsLayer::permissive())
            .layer(axum::middleware::from_fn(preflight_no_content));
    }

    app.layer(axum::middleware::from_fn(inject_request_id))
}
