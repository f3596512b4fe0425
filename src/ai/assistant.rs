use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::client::CompletionBackend;
use super::settings::AiSettings;
use crate::gateway::{RemoteCallError, RemoteResult};
use crate::types::ChatMessage;

const APOLOGY_PREFIX: &str = "Sorry, something went wrong while processing your request: ";

/// Conversation with the chat-completion backend.
///
/// The transcript is append-only; `clear_transcript` is the only way to
/// drop messages. Concurrent sends are not coalesced: each one appends its
/// own user message and reply.
pub struct AiAssistant {
    settings: Arc<AiSettings>,
    backend: Arc<dyn CompletionBackend>,
    messages: Mutex<Vec<ChatMessage>>,
    in_flight: AtomicUsize,
}

impl AiAssistant {
    pub fn new(settings: Arc<AiSettings>, backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            settings,
            backend,
            messages: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn settings(&self) -> &AiSettings {
        &self.settings
    }

    /// Send `content` as the next user turn.
    ///
    /// Returns `false` without touching the transcript when the content is
    /// blank or no API key is configured. Backend failures are recorded as
    /// an assistant apology rather than returned. The transcript keeps the
    /// trimmed text; the backend gets `content` as typed.
    ///
    /// Dropping the future before the reply arrives leaves the user message
    /// in place and no reply.
    pub async fn send_message(&self, content: &str) -> bool {
        let credentials = self.settings.credentials();
        if content.trim().is_empty() || !credentials.has_api_key() {
            return false;
        }

        self.lock().push(ChatMessage::user(content.trim()));
        let _in_flight = InFlight::enter(&self.in_flight);

        let reply = match self.backend.complete(&credentials, content).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(error = %err, "assistant reply failed");
                format!("{APOLOGY_PREFIX}{err}")
            }
        };

        self.lock().push(ChatMessage::assistant(reply));
        true
    }

    /// One-shot completion that is not recorded in the transcript.
    pub async fn generate_text(&self, prompt: &str) -> RemoteResult<String> {
        let credentials = self.settings.credentials();
        if !credentials.has_api_key() {
            return Err(RemoteCallError::validation("please set an API key first"));
        }
        if prompt.trim().is_empty() {
            return Err(RemoteCallError::validation("prompt is empty"));
        }

        self.backend
            .complete(&credentials, prompt)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "text generation failed"))
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn clear_transcript(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ChatMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Counts one request as in flight until dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
