//! Client for the video parsing backend.

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::gateway::{ErrorField, ErrorShape, RemoteCallError, RemoteResult, execute};

const PARSE_ERRORS: ErrorShape = ErrorShape::new(ErrorField::Flat, "failed to parse video");
const PLATFORM_ERRORS: ErrorShape =
    ErrorShape::new(ErrorField::Flat, "failed to load platform list");
const HEALTH_ERRORS: ErrorShape = ErrorShape::new(ErrorField::Ignored, "health check failed");

/// The backend writes unset fields as `null`; read those as the default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One downloadable rendition of a parsed video.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamOption {
    #[serde(deserialize_with = "null_as_default")]
    pub quality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub has_watermark: bool,
    /// `size`, `duration` and anything else the backend reports per stream.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parse result as returned by `POST /api/parse`.
///
/// Missing or `null` fields fall back to their defaults and unknown fields
/// are kept in `extra`, so the payload reaches the caller as the backend
/// sent it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseResult {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: f64,
    pub cover: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub downloadable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub streams: Vec<StreamOption>,
    pub reason: Option<String>,
    pub disclaimer: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ParseResult {
    /// Streams the user may pick from; empty when the video is not downloadable.
    pub fn download_options(&self) -> &[StreamOption] {
        if self.downloadable {
            &self.streams
        } else {
            &[]
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformList {
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub platforms: Vec<Platform>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Serialize)]
struct ParseRequest<'a> {
    url: &'a str,
}

/// Custom client for the parsing backend
#[derive(Clone)]
pub struct ParserApi {
    client: Client,
    base_url: String,
}

impl ParserApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn parse_video(&self, url: &str) -> RemoteResult<ParseResult> {
        let url = url.trim();
        if url.is_empty() {
            return Err(RemoteCallError::validation("please enter a video link"));
        }

        tracing::info!(url, "parsing video url");
        let request = self
            .client
            .post(self.endpoint("/api/parse"))
            .json(&ParseRequest { url });
        execute(request, PARSE_ERRORS).await
    }

    pub async fn platforms(&self) -> RemoteResult<PlatformList> {
        let request = self.client.get(self.endpoint("/api/platforms"));
        execute(request, PLATFORM_ERRORS).await
    }

    pub async fn health(&self) -> RemoteResult<HealthStatus> {
        let request = self.client.get(self.endpoint("/health"));
        execute(request, HEALTH_ERRORS).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_result_keeps_unknown_fields() {
        let body = r#"{
            "success": true,
            "platform": "youtube",
            "title": "Demo",
            "duration": 61.5,
            "downloadable": true,
            "streams": [{"quality": "720p", "format": "mp4", "url": "https://cdn/x.mp4"}],
            "video_id": "abc123"
        }"#;
        let result: ParseResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.title, "Demo");
        assert_eq!(result.streams.len(), 1);
        assert!(!result.streams[0].has_watermark);
        assert_eq!(result.extra.get("video_id"), Some(&Value::from("abc123")));
    }

    #[test]
    fn null_fields_read_as_defaults() {
        let body = r#"{
            "success": false,
            "platform": null,
            "title": null,
            "duration": null,
            "cover": null,
            "downloadable": null,
            "streams": null,
            "reason": "No parser available for this platform"
        }"#;
        let result: ParseResult = serde_json::from_str(body).unwrap();

        assert!(!result.downloadable);
        assert!(result.streams.is_empty());
        assert_eq!(result.title, "");
        assert_eq!(result.reason.as_deref(), Some("No parser available for this platform"));
    }

    #[test]
    fn stream_keeps_size_and_duration() {
        let body = r#"{"quality": "720p", "format": "mp4", "url": "https://cdn/x.mp4",
            "has_watermark": null, "size": 1048576, "duration": 61.5}"#;
        let stream: StreamOption = serde_json::from_str(body).unwrap();

        assert!(!stream.has_watermark);
        assert_eq!(stream.extra.get("size"), Some(&Value::from(1048576)));
        assert_eq!(stream.extra.get("duration"), Some(&Value::from(61.5)));
    }

    #[test]
    fn undownloadable_result_offers_no_streams() {
        let result = ParseResult {
            downloadable: false,
            streams: vec![StreamOption::default()],
            reason: Some("members only".into()),
            ..Default::default()
        };
        assert!(result.download_options().is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ParserApi::new("http://localhost:8000/");
        assert_eq!(api.endpoint("/health"), "http://localhost:8000/health");
    }
}
