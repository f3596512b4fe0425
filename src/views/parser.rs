use crate::ai::VideoBrief;
use crate::api::{ParseResult, StreamOption};
use crate::app::{AppContext, format_duration};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::sync::Arc;

#[cfg(feature = "desktop")]
fn copy_to_clipboard(text: &str) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())
}

#[component]
pub fn ParserView(
    history_revision: Signal<u64>,
    current_video: Signal<Option<VideoBrief>>,
) -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    let mut url = use_signal(String::new);
    let loading = use_signal(|| false);
    let result = use_signal(|| Option::<ParseResult>::None);
    let error = use_signal(|| Option::<String>::None);

    let parse = {
        let ctx = ctx.clone();
        let mut loading = loading;
        let mut result = result;
        let mut error = error;
        let mut current_video = current_video;
        move || {
            if loading() {
                return;
            }
            let ctx = ctx.clone();
            let target = url();
            spawn(async move {
                loading.set(true);
                error.set(None);
                result.set(None);
                match ctx.parse_video(&target).await {
                    Ok(parsed) => {
                        current_video.set(Some(VideoBrief::from(&parsed)));
                        result.set(Some(parsed));
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
                loading.set(false);
            });
        }
    };
    let parse_on_enter = parse.clone();

    rsx! {
        div { class: "card",
            label { r#for: "video-url", "Video link" }
            div { class: "input-group",
                input {
                    id: "video-url",
                    r#type: "text",
                    value: "{url}",
                    placeholder: "Paste a video link...",
                    oninput: move |evt| url.set(evt.value()),
                    onkeyup: move |evt| {
                        if evt.key() == Key::Enter {
                            parse_on_enter();
                        }
                    },
                }
                button {
                    r#type: "button",
                    disabled: loading(),
                    onclick: move |_| parse(),
                    if loading() { "Parsing..." } else { "Parse" }
                }
            }
            p { class: "form-text", "Supports Bilibili, Douyin, YouTube and other major platforms" }

            if let Some(video) = result() {
                ParseResultCard { video, history_revision }
            }
            if let Some(message) = error() {
                div { class: "alert alert-danger", "{message}" }
            }
        }
    }
}

#[component]
fn ParseResultCard(video: ParseResult, history_revision: Signal<u64>) -> Element {
    let streams = video.download_options().to_vec();
    let duration = format_duration(video.duration);

    rsx! {
        div { class: "card video-result",
            h3 {
                span { class: "badge", "{video.platform}" }
                "{video.title}"
            }
            if let Some(cover) = video.cover.clone() {
                img { class: "cover", src: "{cover}", alt: "cover", width: "240" }
            }
            p { strong { "Duration: " } "{duration}" }

            if streams.is_empty() {
                div { class: "alert alert-warning",
                    {video.reason.clone().unwrap_or_else(|| "This video cannot be downloaded".to_string())}
                }
            } else {
                h4 { "Download options" }
                for stream in streams {
                    StreamRow { video: video.clone(), stream, history_revision }
                }
            }
            if let Some(disclaimer) = video.disclaimer.clone() {
                div { class: "alert alert-info", "{disclaimer}" }
            }
        }
    }
}

#[component]
fn StreamRow(video: ParseResult, stream: StreamOption, history_revision: Signal<u64>) -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    let watermark = if stream.has_watermark {
        "watermarked"
    } else {
        "no watermark"
    };

    let record = {
        let ctx = ctx.clone();
        let video = video.clone();
        let stream = stream.clone();
        let mut history_revision = history_revision;
        move |_: MouseEvent| {
            ctx.record_download(&video, &stream);
            history_revision += 1;
        }
    };

    rsx! {
        div { class: "stream-item",
            span { class: "badge", "{stream.quality}" }
            span { class: "badge", "{stream.format}" }
            span { class: "badge", "{watermark}" }
            a {
                href: "{stream.url}",
                target: "_blank",
                download: crate::app::download_file_name(&video, &stream),
                onclick: record,
                "Download"
            }
            {copy_link_button(stream.url.clone())}
        }
    }
}

#[cfg(feature = "desktop")]
fn copy_link_button(url: String) -> Element {
    rsx! { CopyLinkButton { url } }
}

/// No clipboard outside the desktop build.
#[cfg(not(feature = "desktop"))]
fn copy_link_button(_url: String) -> Element {
    rsx! {}
}

#[cfg(feature = "desktop")]
#[component]
fn CopyLinkButton(url: String) -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    rsx! {
        button {
            r#type: "button",
            onclick: move |_| match copy_to_clipboard(&url) {
                Ok(()) => {
                    ctx.toasts().success("Link copied");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "clipboard unavailable");
                    ctx.toasts().error("Could not copy the link");
                }
            },
            "Copy link"
        }
    }
}
