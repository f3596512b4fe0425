//! Assistant transcript rules and the user-action handlers on `AppContext`

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use vidlink::ai::{AiAssistant, AiSettings, CompletionBackend, ContentKind, Credentials, VideoBrief};
use vidlink::api::{ParseResult, StreamOption};
use vidlink::storage::{MemoryStorage, Storage};
use vidlink::types::{Role, Severity};
use vidlink::{AppContext, Config, RemoteCallError, RemoteResult};

/// Scripted backend that records every prompt it receives.
#[derive(Default)]
struct ScriptedBackend {
    fail_with: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn replying() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_string()),
            ..Default::default()
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, _credentials: &Credentials, prompt: &str) -> RemoteResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.fail_with {
            Some(message) => Err(RemoteCallError::Validation(message.clone())),
            None => Ok(format!("echo: {prompt}")),
        }
    }
}

/// Backend that never answers within a test's lifetime.
struct StalledBackend;

#[async_trait]
impl CompletionBackend for StalledBackend {
    async fn complete(&self, _credentials: &Credentials, _prompt: &str) -> RemoteResult<String> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok("too late".to_string())
    }
}

fn assistant_with(backend: Arc<dyn CompletionBackend>, api_key: &str) -> AiAssistant {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let settings = Arc::new(AiSettings::load(storage));
    settings.set_api_key(api_key);
    AiAssistant::new(settings, backend)
}

fn context_with(backend: Arc<ScriptedBackend>) -> AppContext {
    AppContext::with_backend(Config::default(), Arc::new(MemoryStorage::new()), backend)
}

mod transcript_tests {
    use super::*;

    #[tokio::test]
    async fn reply_follows_user_message() {
        let backend = ScriptedBackend::replying();
        let assistant = assistant_with(backend.clone(), "sk-test");

        assert!(assistant.send_message("  how long should a title be?  ").await);

        let messages = assistant.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "how long should a title be?");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "echo: how long should a title be?");
        assert!(!assistant.is_loading());
        assert_eq!(backend.prompts().len(), 1);
    }

    #[tokio::test]
    async fn backend_receives_message_as_typed() {
        let backend = ScriptedBackend::replying();
        let assistant = assistant_with(backend.clone(), "sk-test");

        assistant.send_message("  indented question\n").await;

        assert_eq!(backend.prompts(), vec!["  indented question\n".to_string()]);
        assert_eq!(assistant.messages()[0].content, "indented question");
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_send_does_not_stay_loading() {
        let assistant = assistant_with(Arc::new(StalledBackend), "sk-test");

        let outcome =
            tokio::time::timeout(Duration::from_millis(10), assistant.send_message("hi")).await;

        assert!(outcome.is_err());
        assert!(!assistant.is_loading());
        assert_eq!(assistant.messages().len(), 1);
    }

    #[tokio::test]
    async fn failure_is_recorded_as_apology() {
        let assistant = assistant_with(ScriptedBackend::failing("quota exceeded"), "sk-test");

        assert!(assistant.send_message("hello").await);

        let messages = assistant.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].role, Role::Assistant);
        assert!(messages[1].content.starts_with("Sorry, something went wrong"));
        assert!(messages[1].content.ends_with("quota exceeded"));
    }

    #[tokio::test]
    async fn missing_key_leaves_transcript_untouched() {
        let backend = ScriptedBackend::replying();
        let assistant = assistant_with(backend.clone(), "   ");

        assert!(!assistant.send_message("hello").await);
        assert!(assistant.messages().is_empty());
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn blank_message_is_ignored() {
        let assistant = assistant_with(ScriptedBackend::replying(), "sk-test");

        assert!(!assistant.send_message(" \n ").await);
        assert!(assistant.messages().is_empty());
    }

    #[tokio::test]
    async fn generated_text_is_not_part_of_the_transcript() {
        let assistant = assistant_with(ScriptedBackend::replying(), "sk-test");

        let text = assistant.generate_text("write a title").await.unwrap();
        assert_eq!(text, "echo: write a title");
        assert!(assistant.messages().is_empty());
    }

    #[tokio::test]
    async fn generate_text_requires_a_key() {
        let assistant = assistant_with(ScriptedBackend::replying(), "");

        let err = assistant.generate_text("write a title").await.unwrap_err();
        assert!(matches!(err, RemoteCallError::Validation(_)));
        assert_eq!(err.to_string(), "please set an API key first");
    }

    #[tokio::test]
    async fn clearing_starts_a_new_conversation() {
        let assistant = assistant_with(ScriptedBackend::replying(), "sk-test");
        assistant.send_message("first").await;
        assistant.clear_transcript();
        assistant.send_message("second").await;

        let messages = assistant.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "second");
    }
}

mod action_tests {
    use super::*;

    fn sample_video() -> ParseResult {
        ParseResult {
            success: true,
            platform: "bilibili".into(),
            title: "Cat piano".into(),
            duration: 125.0,
            downloadable: true,
            ..Default::default()
        }
    }

    fn sample_stream() -> StreamOption {
        StreamOption {
            quality: "1080p".into(),
            format: "mp4".into(),
            url: "https://cdn/1080.mp4".into(),
            has_watermark: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_link_is_reported_as_warning() {
        let ctx = context_with(ScriptedBackend::replying());

        let err = ctx.parse_video("  ").await.unwrap_err();
        assert!(matches!(err, RemoteCallError::Validation(_)));

        let toasts = ctx.toasts().items();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Warning);
        assert_eq!(toasts[0].message, err.to_string());
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_as_error() {
        let config = Config {
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..Config::default()
        };
        let ctx = AppContext::with_backend(
            config,
            Arc::new(MemoryStorage::new()),
            ScriptedBackend::replying(),
        );

        let err = ctx.parse_video("https://youtu.be/x").await.unwrap_err();

        let toasts = ctx.toasts().items();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Danger);
        assert_eq!(toasts[0].message, err.to_string());
    }

    #[tokio::test]
    async fn recording_a_download_updates_history() {
        let ctx = context_with(ScriptedBackend::replying());

        let record = ctx.record_download(&sample_video(), &sample_stream());

        assert_eq!(record.title, "Cat piano");
        assert_eq!(record.quality, "1080p");
        assert_eq!(ctx.history().records(), vec![record]);
        assert_eq!(ctx.stats().total, 1);

        let toasts = ctx.toasts().items();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Success);
        assert!(toasts[0].message.contains("Cat piano_1080p.mp4"));
    }

    #[tokio::test]
    async fn opened_context_keeps_history_across_restarts() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ..Config::default()
        };

        let first = AppContext::open(config.clone());
        first.record_download(&sample_video(), &sample_stream());
        first.settings().set_api_key("sk-kept");
        drop(first);

        let reopened = AppContext::open(config);
        assert_eq!(reopened.history().len(), 1);
        assert_eq!(reopened.history().records()[0].title, "Cat piano");
        assert_eq!(reopened.settings().api_key(), "sk-kept");
    }

    #[tokio::test]
    async fn clearing_history_empties_stats() {
        let ctx = context_with(ScriptedBackend::replying());
        ctx.record_download(&sample_video(), &sample_stream());

        ctx.clear_history();

        assert!(ctx.history().is_empty());
        assert_eq!(ctx.stats().total, 0);
    }

    #[tokio::test]
    async fn asking_without_key_warns() {
        let backend = ScriptedBackend::replying();
        let ctx = context_with(backend.clone());

        assert!(!ctx.ask_assistant("hello").await);

        let toasts = ctx.toasts().items();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Warning);
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn content_prompt_mentions_the_video() {
        let backend = ScriptedBackend::replying();
        let ctx = context_with(backend.clone());
        ctx.settings().set_api_key("sk-test");

        let brief = VideoBrief::from(&sample_video());
        ctx.write_content(ContentKind::Tags, &brief).await.unwrap();

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Cat piano"));
        assert!(prompts[0].contains("bilibili"));
        assert!(ctx.toasts().is_empty());
    }

    #[tokio::test]
    async fn analysis_prompt_includes_duration() {
        let backend = ScriptedBackend::replying();
        let ctx = context_with(backend.clone());
        ctx.settings().set_api_key("sk-test");

        let brief = VideoBrief::from(&sample_video());
        ctx.analyze_video(&brief).await.unwrap();

        let prompts = backend.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("125 seconds"));
        assert!(ctx.assistant().messages().is_empty());
    }

    #[tokio::test]
    async fn failed_generation_is_reported_as_toast() {
        let ctx = context_with(ScriptedBackend::failing("model overloaded"));
        ctx.settings().set_api_key("sk-test");

        let brief = VideoBrief::from(&sample_video());
        let err = ctx.write_content(ContentKind::Title, &brief).await.unwrap_err();

        let toasts = ctx.toasts().items();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Danger);
        assert_eq!(toasts[0].message, err.to_string());
    }
}
