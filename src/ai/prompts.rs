//! Prompt templates for the content-writing and analysis panels.

use serde_json::Value;

use crate::api::ParseResult;
use crate::types::HistoryRecord;

pub const PRESET_QUESTIONS: &[&str] = &[
    "How can I improve my video title?",
    "How should I write a video description?",
    "How do I pick the right tags?",
    "Who is the audience for this video?",
    "How can I get more views?",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentKind {
    Title,
    Description,
    Tags,
    Full,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Title,
        ContentKind::Description,
        ContentKind::Tags,
        ContentKind::Full,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Title => "Titles",
            ContentKind::Description => "Description",
            ContentKind::Tags => "Tags",
            ContentKind::Full => "Full copy",
        }
    }
}

/// The parts of a video the prompts talk about.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoBrief {
    pub title: String,
    pub platform: String,
    pub duration: Option<f64>,
    pub description: String,
}

impl From<&ParseResult> for VideoBrief {
    fn from(result: &ParseResult) -> Self {
        Self {
            title: result.title.clone(),
            platform: result.platform.clone(),
            duration: Some(result.duration),
            description: result
                .extra
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl From<&HistoryRecord> for VideoBrief {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            title: record.title.clone(),
            platform: record.platform.clone(),
            duration: None,
            description: String::new(),
        }
    }
}

pub fn content_prompt(kind: ContentKind, video: &VideoBrief) -> String {
    let target = if video.platform.is_empty() {
        "video platforms".to_string()
    } else {
        format!("{} users", video.platform)
    };
    let header = format!(
        "Video title: {}\nVideo description: {}",
        video.title, video.description
    );

    match kind {
        ContentKind::Title => format!(
            "Suggest 5 engaging titles for the following video.\n\n{header}\n\n\
             Requirements:\n1. At most 30 characters each\n2. Appeal to {target}\n\
             3. Strong click-through potential\n\nReturn only the 5 titles, one per line."
        ),
        ContentKind::Description => format!(
            "Write an engaging description for the following video.\n\n{header}\n\n\
             Requirements:\n1. At most 200 characters\n2. Highlight what makes the video worth watching\n\
             3. Match the style of {target}\n4. Include a few fitting emoji\n\n\
             Return only the description."
        ),
        ContentKind::Tags => format!(
            "Recommend 10 tags for the following video.\n\n{header}\n\n\
             Requirements:\n1. At most 10 characters each\n2. Cover the main topics of the video\n\
             3. Mix popular and long-tail keywords\n4. Follow the tagging conventions of {target}\n\n\
             Return only the 10 tags, separated by commas."
        ),
        ContentKind::Full => format!(
            "Write complete copy for the following video: titles, description and tags.\n\n{header}\n\n\
             Requirements:\n1. 3 title options, at most 30 characters each\n\
             2. One description of at most 200 characters\n3. 10 tags, at most 10 characters each\n\
             4. Match the style of {target}\n\n\
             Return JSON with the fields titles, description and tags."
        ),
    }
}

pub fn analysis_prompt(video: &VideoBrief) -> String {
    let duration = video
        .duration
        .map(|secs| format!("{secs:.0} seconds"))
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "Analyze the following video and write a detailed report.\n\n\
         Video title: {}\nPlatform: {}\nDuration: {}\nDescription: {}\n\n\
         Cover:\n1. Topic and category\n2. Target audience (age, gender, interests)\n\
         3. Quality and appeal\n4. Suggestions for title, description and tags\n\
         5. Reach and trend potential\n\nReturn the analysis as JSON covering all of the above.",
        video.title, video.platform, duration, video.description
    )
}

/// Parse the outermost `{...}` span of a model reply, if it is valid JSON.
pub fn extract_json_block(text: &str) -> Option<Value> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
