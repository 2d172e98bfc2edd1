use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;

use crate::config::API_KEY_ENV;
use crate::models::{ErrorDetail, ErrorResponse};

pub const ALLOWED_METHODS: &str = "OPTIONS, POST";

/// Every way a relay request can end without a generated answer.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Only POST allowed")]
    MethodNotAllowed,

    #[error("Invalid JSON body")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Missing prompt")]
    MissingPrompt,

    #[error("{} not set", API_KEY_ENV)]
    MissingApiKey,

    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        body: Value,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::InvalidBody(_) | RelayError::MissingPrompt => StatusCode::BAD_REQUEST,
            RelayError::MissingApiKey | RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream { status, .. } => *status,
        }
    }

    fn transport_name(err: &reqwest::Error) -> &'static str {
        if err.is_timeout() {
            "TimeoutError"
        } else if err.is_connect() {
            "ConnectError"
        } else {
            "RequestError"
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        let mut resp = ErrorResponse::message(self.to_string());
        match self {
            RelayError::InvalidBody(e) => resp.error.details = Some(e.to_string()),
            RelayError::Upstream { status, body, .. } => {
                resp.error.status = Some(status.as_u16());
                resp.details = Some(body.clone());
            }
            RelayError::Transport(e) => {
                resp.error = ErrorDetail {
                    message: e.to_string(),
                    name: Some(Self::transport_name(e).to_string()),
                    ..Default::default()
                };
            }
            RelayError::MethodNotAllowed | RelayError::MissingPrompt | RelayError::MissingApiKey => {}
        }
        resp
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(self.to_error_response())).into_response();
        if let RelayError::MethodNotAllowed = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        }
        response
    }
}
