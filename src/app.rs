//! Application context and the user-action handlers.
//!
//! `AppContext` is built once at startup and handed to every consumer by
//! reference. Handlers talk to the backends, update the stores and report
//! user-facing outcomes through the toast queue.

use std::sync::Arc;

use crate::ai::{
    AiAssistant, AiSettings, CompletionBackend, ContentKind, DeepSeekClient, VideoBrief,
};
use crate::analytics::HistoryStats;
use crate::api::{ParseResult, ParserApi, Platform, StreamOption};
use crate::config::Config;
use crate::gateway::{RemoteCallError, RemoteResult};
use crate::history::HistoryStore;
use crate::storage::Storage;
use crate::toast::ToastQueue;
use crate::types::{DownloadSelection, HistoryRecord, now_rfc3339};

use crate::storage::FileStorage;

/// What the startup probes found out about the parsing backend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackendStatus {
    pub healthy: bool,
    pub platforms: Vec<Platform>,
}

impl BackendStatus {
    pub fn enabled_platforms(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter().filter(|platform| platform.enabled)
    }
}

pub struct AppContext {
    config: Config,
    parser: ParserApi,
    history: HistoryStore,
    toasts: ToastQueue,
    assistant: AiAssistant,
}

impl AppContext {
    /// Context backed by file storage in the configured data directory.
    pub fn open(config: Config) -> Self {
        let root = config
            .data_dir
            .clone()
            .unwrap_or_else(FileStorage::default_root);
        tracing::info!(root = %root.display(), "using file storage");
        Self::new(config, Arc::new(FileStorage::new(root)))
    }

    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let backend = Arc::new(DeepSeekClient::new(config.ai_endpoint.clone()));
        Self::with_backend(config, storage, backend)
    }

    pub fn with_backend(
        config: Config,
        storage: Arc<dyn Storage>,
        backend: Arc<dyn CompletionBackend>,
    ) -> Self {
        let settings = Arc::new(AiSettings::load(storage.clone()));
        Self {
            parser: ParserApi::new(config.api_base_url.clone()),
            history: HistoryStore::load(storage),
            toasts: ToastQueue::new(),
            assistant: AiAssistant::new(settings, backend),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser(&self) -> &ParserApi {
        &self.parser
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn assistant(&self) -> &AiAssistant {
        &self.assistant
    }

    pub fn settings(&self) -> &AiSettings {
        self.assistant.settings()
    }

    /// Probe health and the platform list concurrently. Failures are logged
    /// and leave the corresponding field at its default.
    pub async fn check_backend(&self) -> BackendStatus {
        let (health, platforms) = futures::join!(self.parser.health(), self.parser.platforms());

        let healthy = match health {
            Ok(status) => status.is_ok(),
            Err(err) => {
                tracing::warn!(error = %err, "parsing backend health check failed");
                false
            }
        };
        let platforms = match platforms {
            Ok(list) => list.platforms,
            Err(err) => {
                tracing::warn!(error = %err, "could not load supported platforms");
                Vec::new()
            }
        };

        BackendStatus { healthy, platforms }
    }

    /// Parse `url` through the backend. Every failure is also shown as a toast:
    /// a warning for input rejected locally, an error otherwise.
    pub async fn parse_video(&self, url: &str) -> RemoteResult<ParseResult> {
        match self.parser.parse_video(url).await {
            Ok(result) => {
                if !result.downloadable {
                    let reason = result
                        .reason
                        .clone()
                        .unwrap_or_else(|| "this video cannot be downloaded".to_string());
                    self.toasts.warning(reason);
                }
                Ok(result)
            }
            Err(err @ RemoteCallError::Validation(_)) => {
                self.toasts.warning(err.to_string());
                Err(err)
            }
            Err(err) => {
                self.toasts.error(err.to_string());
                Err(err)
            }
        }
    }

    /// Remember that `stream` of `video` was downloaded.
    pub fn record_download(&self, video: &ParseResult, stream: &StreamOption) -> HistoryRecord {
        let record = self.history.append(DownloadSelection {
            title: video.title.clone(),
            platform: video.platform.clone(),
            quality: stream.quality.clone(),
            format: stream.format.clone(),
            timestamp: now_rfc3339(),
        });
        self.toasts
            .success(format!("Started download: {}", download_file_name(video, stream)));
        record
    }

    pub fn clear_history(&self) {
        self.history.clear();
        self.toasts.info("Download history cleared");
    }

    pub fn stats(&self) -> HistoryStats {
        self.history.with_records(HistoryStats::from_records)
    }

    /// Send a chat message, nudging the user when no API key is set.
    pub async fn ask_assistant(&self, content: &str) -> bool {
        if content.trim().is_empty() {
            return false;
        }
        if !self.settings().credentials().has_api_key() {
            self.toasts.warning("Please set an API key first");
            return false;
        }
        self.assistant.send_message(content).await
    }

    pub async fn write_content(
        &self,
        kind: ContentKind,
        video: &VideoBrief,
    ) -> RemoteResult<String> {
        let prompt = crate::ai::prompts::content_prompt(kind, video);
        self.generate(&prompt).await
    }

    /// Ask for a structured analysis of `video`; the reply is expected to
    /// carry a JSON block.
    pub async fn analyze_video(&self, video: &VideoBrief) -> RemoteResult<String> {
        let prompt = crate::ai::prompts::analysis_prompt(video);
        self.generate(&prompt).await
    }

    async fn generate(&self, prompt: &str) -> RemoteResult<String> {
        self.assistant
            .generate_text(prompt)
            .await
            .inspect_err(|err| {
                self.toasts.error(err.to_string());
            })
    }
}

/// File name the browser download is offered under: `<title>_<quality>.<format>`.
pub fn download_file_name(video: &ParseResult, stream: &StreamOption) -> String {
    format!("{}_{}.{}", video.title, stream.quality, stream.format)
}

/// `H:MM:SS` for an hour or more, `M:SS` below that, `unknown` when not positive.
pub fn format_duration(seconds: f64) -> String {
    if seconds.is_nan() || seconds <= 0.0 {
        return "unknown".to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0.0), "unknown");
        assert_eq!(format_duration(-3.0), "unknown");
        assert_eq!(format_duration(f64::NAN), "unknown");
        assert_eq!(format_duration(59.9), "0:59");
        assert_eq!(format_duration(125.0), "2:05");
        assert_eq!(format_duration(3725.0), "1:02:05");
    }

    #[test]
    fn builds_download_file_name() {
        let video = ParseResult {
            title: "Cat piano".into(),
            ..Default::default()
        };
        let stream = StreamOption {
            quality: "1080p".into(),
            format: "mp4".into(),
            ..Default::default()
        };
        assert_eq!(download_file_name(&video, &stream), "Cat piano_1080p.mp4");
    }
}
