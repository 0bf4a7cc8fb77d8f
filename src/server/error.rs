use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::evaluate::EvalError;
use crate::gateway::GatewayError;
use crate::input::InputError;

pub const MISSING_FIELDS_MESSAGE: &str = "text と word が必要です。";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(#[from] InputError),

    #[error("LLM content could not be parsed")]
    UpstreamParse { raw: String },

    #[error("upstream failure: {0}")]
    Upstream(#[from] GatewayError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<EvalError> for ApiError {
    fn from(value: EvalError) -> Self {
        match value {
            EvalError::Gateway(e) => ApiError::Upstream(e),
            EvalError::Parse(e) => ApiError::UpstreamParse { raw: e.raw },
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamParse { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Upstream(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(e) => {
                tracing::debug!(error = %e, "rejected request");
                json!({ "error": MISSING_FIELDS_MESSAGE })
            }
            ApiError::UpstreamParse { raw } => {
                tracing::warn!(raw_len = raw.len(), "LLM returned unparseable content");
                json!({ "error": "llm_parse_error", "raw": raw })
            }
            ApiError::Upstream(_) | ApiError::Internal(_) => {
                tracing::error!(error = %self, "evaluation failed");
                json!({ "error": "internal_error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
