//! Boundary to the scoring LLM.
//!
//! The gateway only moves text: it sends the rubric prompt and hands back the
//! raw message content. Interpreting that content is the pipeline's job.

use thiserror::Error;

use crate::input::Submission;

mod openai;
pub mod prompt;

pub use openai::{LlmConfig, OpenAiGateway};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing API key: {env_var} not set")]
    MissingApiKey { env_var: String },

    #[error("LLM request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("LLM call timed out after {0}s")]
    Timeout(u64),

    #[error("unexpected LLM response envelope: {0}")]
    Envelope(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

pub trait LlmGateway: Send + Sync {
    /// Returns the raw content of the model's reply.
    fn complete(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = GatewayResult<String>> + Send;
}
