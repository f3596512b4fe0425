/// AI assistant for vidlink
///
/// Chat and copywriting help backed by an OpenAI-compatible chat-completion
/// endpoint (DeepSeek by default).
///
/// # Architecture
///
/// - `settings` - persisted API key and model selection
/// - `client` - `CompletionBackend` trait and the DeepSeek HTTP client
/// - `assistant` - transcript, loading state and one-shot generation
/// - `prompts` - content-writing and analysis prompt templates
///
/// # Usage
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use vidlink::ai::{AiAssistant, AiSettings, DeepSeekClient};
/// use vidlink::storage::MemoryStorage;
///
/// # async fn example() {
/// let settings = Arc::new(AiSettings::load(Arc::new(MemoryStorage::new())));
/// settings.set_api_key("sk-...");
/// let assistant = AiAssistant::new(settings, Arc::new(DeepSeekClient::default()));
/// assistant.send_message("How can I improve my video title?").await;
/// # }
/// ```
mod assistant;
mod client;
pub mod prompts;
mod settings;

// Re-export main types
pub use assistant::AiAssistant;
pub use client::{CompletionBackend, DEFAULT_ENDPOINT, DeepSeekClient};
pub use prompts::{ContentKind, VideoBrief};
pub use settings::{AiSettings, Credentials, DEFAULT_MODEL, KNOWN_MODELS};
