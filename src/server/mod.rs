use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::evaluate::Evaluator;
use crate::gateway::LlmGateway;
use crate::input::{EvalRequest, InputError};
use crate::model::verdict::Verdict;

pub mod error;

pub use error::ApiError;

pub fn router<G: LlmGateway + 'static>(evaluator: Arc<Evaluator<G>>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/eval", post(eval::<G>))
        .fallback(not_found)
        .layer(middleware::from_fn(catch_panic))
        .layer(middleware::from_fn(cors))
        .with_state(evaluator)
}

pub async fn serve<G: LlmGateway + 'static>(
    evaluator: Arc<Evaluator<G>>,
    bind: &str,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(evaluator))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("shutdown requested");
        })
        .await?;
    Ok(())
}

async fn liveness() -> &'static str {
    "OK"
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not_found" }))).into_response()
}

async fn eval<G: LlmGateway>(
    State(evaluator): State<Arc<Evaluator<G>>>,
    body: Result<Json<EvalRequest>, JsonRejection>,
) -> Result<Json<Verdict>, ApiError> {
    let Json(request) = body.map_err(|e| InputError::MalformedBody(e.body_text()))?;
    let submission = request.validate()?;
    let output = evaluator.evaluate(&submission).await?;
    Ok(Json(output.verdict))
}

/// Runs the inner service on its own task so a panic while handling a
/// request becomes a 500 instead of a dropped connection.
async fn catch_panic(request: Request, next: Next) -> Response {
    match tokio::spawn(next.run(request)).await {
        Ok(response) => response,
        Err(e) if e.is_panic() => {
            ApiError::Internal("request handler panicked".to_string()).into_response()
        }
        Err(e) => ApiError::Internal(e.to_string()).into_response(),
    }
}

/// Every origin is allowed; preflights are answered here without routing.
async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }
    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
}

#[cfg(test)]
#[path = "../../tests/src_inline/server/mod.rs"]
mod tests;
