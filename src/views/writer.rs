use crate::ai::prompts::extract_json_block;
use crate::ai::{ContentKind, VideoBrief};
use crate::app::AppContext;
use crate::markdown::render_reply;
use dioxus::prelude::*;
use std::sync::Arc;

#[component]
pub fn WriterView(current_video: Signal<Option<VideoBrief>>) -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    let mut kind = use_signal(|| ContentKind::Title);
    let generating = use_signal(|| false);
    let output = use_signal(|| Option::<String>::None);
    let show_analysis = use_signal(|| false);

    let Some(video) = current_video() else {
        return rsx! {
            div { class: "card",
                h3 { "Copywriting" }
                p { class: "text-muted", "Parse a video or pick one from the history first." }
            }
        };
    };

    let generate = {
        let ctx = ctx.clone();
        let video = video.clone();
        let mut generating = generating;
        let mut output = output;
        let mut show_analysis = show_analysis;
        move |_: MouseEvent| {
            if generating() {
                return;
            }
            let ctx = ctx.clone();
            let video = video.clone();
            let selected = kind();
            spawn(async move {
                generating.set(true);
                if let Ok(text) = ctx.write_content(selected, &video).await {
                    show_analysis.set(false);
                    output.set(Some(text));
                }
                generating.set(false);
            });
        }
    };

    let analyze = {
        let ctx = ctx.clone();
        let video = video.clone();
        let mut generating = generating;
        let mut output = output;
        let mut show_analysis = show_analysis;
        move |_: MouseEvent| {
            if generating() {
                return;
            }
            let ctx = ctx.clone();
            let video = video.clone();
            spawn(async move {
                generating.set(true);
                if let Ok(text) = ctx.analyze_video(&video).await {
                    show_analysis.set(true);
                    output.set(Some(text));
                }
                generating.set(false);
            });
        }
    };

    let structured = show_analysis() || kind() == ContentKind::Full;
    let rendered = output().map(|text| match (structured, extract_json_block(&text)) {
        (true, Some(json)) => {
            let pretty = serde_json::to_string_pretty(&json).unwrap_or(text);
            render_reply(&format!("```json\n{pretty}\n```"))
        }
        _ => render_reply(&text),
    });

    rsx! {
        div { class: "card",
            h3 { "Copywriting" }
            p {
                span { class: "badge", "{video.platform}" }
                "{video.title}"
            }
            div { class: "kind-picker",
                for option in ContentKind::ALL {
                    button {
                        r#type: "button",
                        class: if kind() == option { "active" } else { "" },
                        onclick: move |_| kind.set(option),
                        "{option.label()}"
                    }
                }
            }
            button {
                r#type: "button",
                disabled: generating(),
                onclick: generate,
                if generating() { "Generating..." } else { "Generate" }
            }
            button {
                r#type: "button",
                disabled: generating(),
                onclick: analyze,
                "Analyze video"
            }
            if let Some(html) = rendered {
                div { class: "writer-output", dangerous_inner_html: "{html}" }
            }
        }
    }
}
