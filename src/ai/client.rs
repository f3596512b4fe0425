use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::settings::Credentials;
use crate::gateway::{ErrorField, ErrorShape, RemoteCallError, RemoteResult, execute};

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a professional video content analyst and copywriting \
assistant. You are good at analyzing video content, writing engaging copy and giving \
practical, valuable suggestions.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 2000;

const COMPLETION_ERRORS: ErrorShape = ErrorShape::new(ErrorField::Nested, "API request failed");

/// Seam between the assistant and whatever produces completions.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, credentials: &Credentials, prompt: &str) -> RemoteResult<String>;
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

/// OpenAI-compatible chat-completion client (DeepSeek by default)
#[derive(Clone)]
pub struct DeepSeekClient {
    client: Client,
    endpoint: String,
}

impl Default for DeepSeekClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl DeepSeekClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for DeepSeekClient {
    async fn complete(&self, credentials: &Credentials, prompt: &str) -> RemoteResult<String> {
        let body = CompletionRequest {
            model: &credentials.model,
            messages: [
                WireMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                WireMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(model = %credentials.model, chars = prompt.len(), "requesting completion");
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&credentials.api_key)
            .json(&body);
        let response: CompletionResponse = execute(request, COMPLETION_ERRORS).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| RemoteCallError::Decode("empty completion".to_string()))
    }
}
