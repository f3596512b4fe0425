use crate::ai::KNOWN_MODELS;
use crate::ai::prompts::PRESET_QUESTIONS;
use crate::app::AppContext;
use crate::markdown::render_reply;
use crate::types::{ChatMessage, Role};
use dioxus::events::Key;
use dioxus::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const TRANSCRIPT_POLL_INTERVAL: Duration = Duration::from_millis(150);

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

fn format_message_timestamp(timestamp: &str) -> Option<String> {
    let mut datetime = OffsetDateTime::parse(timestamp, &Rfc3339).ok()?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[component]
pub fn AssistantView() -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    let mut input = use_signal(String::new);
    let mut show_key = use_signal(|| false);
    let mut api_key = use_signal(|| ctx.settings().api_key());
    let mut model = use_signal(|| ctx.settings().model());
    let mut messages = use_signal(Vec::<ChatMessage>::new);
    let mut loading = use_signal(|| false);

    let poll_ctx = ctx.clone();
    use_future(move || {
        let ctx = poll_ctx.clone();
        async move {
            loop {
                let assistant = ctx.assistant();
                let snapshot = assistant.messages();
                if *messages.peek() != snapshot {
                    messages.set(snapshot);
                }
                let busy = assistant.is_loading();
                if *loading.peek() != busy {
                    loading.set(busy);
                }
                tokio::time::sleep(TRANSCRIPT_POLL_INTERVAL).await;
            }
        }
    });

    let send = {
        let ctx = ctx.clone();
        move |text: String| {
            if text.trim().is_empty() || loading() {
                return;
            }
            let mut input = input;
            input.set(String::new());
            let ctx = ctx.clone();
            spawn(async move {
                ctx.ask_assistant(&text).await;
            });
        }
    };
    let send_on_enter = send.clone();
    let send_on_click = send.clone();

    let key_input_type = if show_key() { "text" } else { "password" };
    let settings_ctx = ctx.clone();
    let model_ctx = ctx.clone();
    let clear_ctx = ctx.clone();

    rsx! {
        div { class: "card",
            h3 { "AI Assistant" }
            div { class: "settings-section",
                label { r#for: "model-select", "Model" }
                select {
                    id: "model-select",
                    value: "{model}",
                    onchange: move |evt| {
                        let value = evt.value();
                        model_ctx.settings().set_model(value.clone());
                        model.set(value);
                    },
                    for (id, label) in KNOWN_MODELS.iter() {
                        option { value: "{id}", selected: model() == *id, "{label}" }
                    }
                }
            }
            div { class: "settings-section",
                label { r#for: "api-key", "API key" }
                input {
                    id: "api-key",
                    r#type: key_input_type,
                    value: "{api_key}",
                    placeholder: "DeepSeek API key",
                    oninput: move |evt| {
                        let value = evt.value();
                        settings_ctx.settings().set_api_key(value.clone());
                        api_key.set(value);
                    },
                }
                button {
                    r#type: "button",
                    onclick: move |_| show_key.set(!show_key()),
                    if show_key() { "Hide" } else { "Show" }
                }
                p { class: "form-text", "The key is stored on this device only." }
            }
        }
        div { class: "card chat-container",
            div { class: "chat-messages",
                for (index, message) in messages().into_iter().enumerate() {
                    ChatBubble { key: "{index}", message }
                }
                if loading() {
                    div { class: "chat-message assistant pending", "Thinking..." }
                }
            }
            div { class: "preset-questions",
                for question in PRESET_QUESTIONS.iter().copied() {
                    button {
                        r#type: "button",
                        disabled: loading() || api_key().trim().is_empty(),
                        onclick: {
                            let send = send.clone();
                            move |_: MouseEvent| send(question.to_string())
                        },
                        "{question}"
                    }
                }
            }
            div { class: "chat-input",
                input {
                    r#type: "text",
                    value: "{input}",
                    placeholder: "Ask about titles, descriptions, tags...",
                    oninput: move |evt| input.set(evt.value()),
                    onkeyup: move |evt| {
                        if evt.key() == Key::Enter {
                            send_on_enter(input());
                        }
                    },
                }
                button {
                    r#type: "button",
                    disabled: loading(),
                    onclick: move |_| send_on_click(input()),
                    "Send"
                }
                button {
                    r#type: "button",
                    disabled: messages().is_empty() || loading(),
                    onclick: move |_| clear_ctx.assistant().clear_transcript(),
                    "New conversation"
                }
            }
        }
    }
}

#[component]
fn ChatBubble(message: ChatMessage) -> Element {
    let (class, who) = match message.role {
        Role::User => ("chat-message user", "You"),
        Role::Assistant => ("chat-message assistant", "Assistant"),
    };
    let time = format_message_timestamp(&message.timestamp).unwrap_or_default();
    let body = match message.role {
        Role::User => None,
        Role::Assistant => Some(render_reply(&message.content)),
    };

    rsx! {
        div { class: class,
            div { class: "chat-meta",
                strong { "{who}" }
                span { class: "text-muted", " {time}" }
            }
            if let Some(html) = body {
                div { class: "chat-body", dangerous_inner_html: "{html}" }
            } else {
                div { class: "chat-body", "{message.content}" }
            }
        }
    }
}
