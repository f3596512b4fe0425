use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: now_rfc3339(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: now_rfc3339(),
        }
    }
}

/// Toast severity, named after the Bootstrap contextual classes the
/// view layer styles them with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Severity::Info => "Notice",
            Severity::Success => "Success",
            Severity::Warning => "Warning",
            Severity::Danger => "Error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}

/// What the user picked when they hit "download".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DownloadSelection {
    pub title: String,
    pub platform: String,
    pub quality: String,
    pub format: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub quality: String,
    pub format: String,
    pub timestamp: String,
}

impl HistoryRecord {
    pub fn from_selection(id: String, selection: DownloadSelection) -> Self {
        Self {
            id,
            title: selection.title,
            platform: selection.platform,
            quality: selection.quality,
            format: selection.format,
            timestamp: selection.timestamp,
        }
    }
}

/// Current UTC time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}
