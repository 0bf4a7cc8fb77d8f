use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::prompt::{SYSTEM_PROMPT, build_user_prompt};
use super::{GatewayError, GatewayResult, LlmGateway};
use crate::input::Submission;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 1.5,
            timeout_secs: 30,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl LlmConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Chat-completions client for OpenAI-compatible APIs.
pub struct OpenAiGateway {
    config: LlmConfig,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiGateway {
    pub fn new(config: LlmConfig, api_key: impl Into<String>) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            config,
            api_key: api_key.into(),
            client,
        })
    }

    pub fn from_env(config: LlmConfig) -> GatewayResult<Self> {
        let api_key = env::var(&config.api_key_env).map_err(|_| GatewayError::MissingApiKey {
            env_var: config.api_key_env.clone(),
        })?;
        Self::new(config, api_key)
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    pub fn request_body(&self, submission: &Submission) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(&submission.word, &submission.text),
                },
            ],
        }
    }
}

impl LlmGateway for OpenAiGateway {
    fn complete(
        &self,
        submission: &Submission,
    ) -> impl Future<Output = GatewayResult<String>> + Send {
        let body = self.request_body(submission);
        async move {
            let response = self
                .client
                .post(self.config.endpoint())
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let text = response.text().await?;
            if !status.is_success() {
                return Err(GatewayError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }
            extract_content(&text)
        }
    }
}

/// First choice's message content; an absent content reads as an empty object.
pub fn extract_content(envelope: &str) -> GatewayResult<String> {
    let resp: ChatResponse =
        serde_json::from_str(envelope).map_err(|e| GatewayError::Envelope(e.to_string()))?;
    Ok(resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_else(|| "{}".to_string()))
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    pub response_format: ResponseFormat,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/src_inline/gateway/openai.rs"]
mod tests;
