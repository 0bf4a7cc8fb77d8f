use serde::Deserialize;
use thiserror::Error;

pub mod judgement;
pub mod text;

pub use judgement::{JudgementError, RawJudgement};
pub use text::TextProfile;

/// Body of `POST /api/eval`. Older clients send the description as `desc`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvalRequest {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default, alias = "desc")]
    pub text: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub word: String,
    pub text: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}

impl EvalRequest {
    pub fn validate(self) -> Result<Submission, InputError> {
        let text = non_empty(self.text).ok_or(InputError::MissingField("text"))?;
        let word = non_empty(self.word).ok_or(InputError::MissingField("word"))?;
        Ok(Submission { word, text })
    }
}

impl Submission {
    pub fn profile(&self) -> TextProfile {
        TextProfile::measure(&self.text)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
