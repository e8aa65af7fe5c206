//! Asynchronous OpenAI client used as the summarization backend.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::summarizer::SummaryBackend;

/// Model used for review summarization.
pub const SUMMARY_MODEL: &str = "gpt-4o-mini";

/// Chat-completions client holding the API key.
#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("courserate/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }

    /// Construct from the `OPENAI_API_KEY` environment variable.
    ///
    /// Returns `None` when the variable is unset or blank; callers treat
    /// that as "capability not configured".
    pub fn from_env() -> Option<Self> {
        std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
    }

    /// Run a single system + user chat completion and return the content.
    pub async fn chat_completion(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: SUMMARY_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_content.to_string(),
                },
            ],
            temperature: 0.7,
            max_tokens: 200,
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .body(serde_json::to_string(&request)?)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .context("Failed to read error response body")?;
            return Err(anyhow!(
                "OpenAI Chat Completions API error: {} - {}",
                status,
                error_text
            ));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("Chat completion response contained no content"))
    }
}

#[async_trait]
impl SummaryBackend for OpenAiClient {
    async fn complete(&self, system_prompt: &str, user_content: &str) -> Result<String> {
        self.chat_completion(system_prompt, user_content).await
    }
}
