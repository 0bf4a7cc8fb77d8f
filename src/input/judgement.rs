use serde_json::{Map, Value};
use thiserror::Error;

/// Untrusted output of the LLM: raw score values are kept as JSON and only
/// interpreted by the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RawJudgement {
    pub nat: Value,
    pub cre: Value,
    pub comment: String,
    pub uninterpretable: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("LLM content is not a JSON object")]
pub struct JudgementError {
    pub raw: String,
}

impl RawJudgement {
    pub fn parse(content: &str) -> Result<Self, JudgementError> {
        let value: Value = serde_json::from_str(content).map_err(|_| JudgementError {
            raw: content.to_string(),
        })?;
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(JudgementError {
                raw: content.to_string(),
            }),
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let nat = map.remove("nat").unwrap_or(Value::Null);
        let cre = map.remove("cre").unwrap_or(Value::Null);
        let comment = match map.remove("comment") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let uninterpretable = matches!(map.get("uninterpretable"), Some(Value::Bool(true)));
        Self {
            nat,
            cre,
            comment,
            uninterpretable,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/judgement.rs"]
mod tests;
