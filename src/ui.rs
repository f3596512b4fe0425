use crate::ai::VideoBrief;
use crate::app::AppContext;
use crate::types::{HistoryRecord, NotificationItem};
use crate::views::{AnalyticsView, AssistantView, HistoryView, ParserView, WriterView};
use dioxus::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const TOAST_POLL_INTERVAL: Duration = Duration::from_millis(100);

const APP_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #1d1f23; }
.header { background: #1d1f23; color: #fff; padding: 1.25rem 2rem; }
.header h1 { margin: 0; font-size: 1.4rem; }
.header .backend-status { font-size: 0.8rem; opacity: 0.8; }
.tabs { display: flex; gap: 0.25rem; padding: 0 2rem; border-bottom: 1px solid #d0d4da; background: #fff; }
.tab { padding: 0.75rem 1rem; cursor: pointer; border: none; background: none; border-bottom: 2px solid transparent; }
.tab.active { border-bottom-color: #0d6efd; color: #0d6efd; }
.tab-panel { display: none; padding: 1.5rem 2rem; }
.tab-panel.active { display: block; }
.card { background: #fff; border: 1px solid #d0d4da; border-radius: 6px; padding: 1rem; margin-bottom: 1rem; }
.badge { display: inline-block; padding: 0.1rem 0.5rem; border-radius: 4px; font-size: 0.75rem; margin-right: 0.25rem; background: #e9ecef; }
.alert { padding: 0.75rem 1rem; border-radius: 6px; margin-top: 1rem; }
.alert-danger { background: #f8d7da; }
.alert-warning { background: #fff3cd; }
.alert-info { background: #cff4fc; }
.toast-stack { position: fixed; top: 1rem; right: 1rem; display: flex; flex-direction: column; gap: 0.5rem; z-index: 10; }
.toast { min-width: 240px; padding: 0.75rem 1rem; border-radius: 6px; color: #fff; transition: opacity 0.3s; opacity: 1; cursor: pointer; }
.toast.hidden { opacity: 0; }
.toast-info { background: #0dcaf0; }
.toast-success { background: #198754; }
.toast-warning { background: #ffc107; color: #1d1f23; }
.toast-danger { background: #dc3545; }
.chat-messages { max-height: 420px; overflow-y: auto; }
.chat-message { margin: 0.5rem 0; }
.chat-message.user { text-align: right; }
"#;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AppTab {
    Parser,
    History,
    Analytics,
    Writer,
    Assistant,
}

impl AppTab {
    const ALL: [AppTab; 5] = [
        AppTab::Parser,
        AppTab::History,
        AppTab::Analytics,
        AppTab::Writer,
        AppTab::Assistant,
    ];

    fn label(self) -> &'static str {
        match self {
            AppTab::Parser => "Parse",
            AppTab::History => "History",
            AppTab::Analytics => "Analytics",
            AppTab::Writer => "Copywriting",
            AppTab::Assistant => "AI Assistant",
        }
    }
}

#[component]
pub fn App() -> Element {
    let mut active_tab = use_signal(|| AppTab::Parser);
    let mut current_video = use_signal(|| Option::<VideoBrief>::None);
    let history_revision = use_signal(|| 0u64);
    let backend_status = use_backend_status();

    let on_generate = move |record: HistoryRecord| {
        current_video.set(Some(VideoBrief::from(&record)));
        active_tab.set(AppTab::Writer);
    };

    rsx! {
        style { dangerous_inner_html: APP_CSS }
        div { class: "header",
            h1 { "Multi-platform video link parser" }
            span { class: "backend-status", "{backend_status}" }
        }
        TabNavigation { active_tab }
        div { class: "tab-panels",
            TabPanel {
                active_tab,
                tab: AppTab::Parser,
                children: rsx!( ParserView { history_revision, current_video } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::History,
                children: rsx!( HistoryView { history_revision, on_generate } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Analytics,
                children: rsx!( AnalyticsView { history_revision } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Writer,
                children: rsx!( WriterView { current_video } ),
            }
            TabPanel {
                active_tab,
                tab: AppTab::Assistant,
                children: rsx!( AssistantView {} ),
            }
        }
        ToastStack {}
    }
}

/// One-line summary of the parsing backend, filled in once the startup
/// probes finish.
fn use_backend_status() -> Signal<String> {
    let ctx = use_context::<Arc<AppContext>>();
    let mut status = use_signal(|| "Checking backend...".to_string());

    use_future(move || {
        let ctx = ctx.clone();
        async move {
            let probe = ctx.check_backend().await;
            let platforms = probe
                .enabled_platforms()
                .map(|platform| platform.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let summary = match (probe.healthy, platforms.is_empty()) {
                (true, false) => format!("Backend online · {platforms}"),
                (true, true) => "Backend online".to_string(),
                (false, _) => format!("Backend unreachable at {}", ctx.parser().base_url()),
            };
            status.set(summary);
        }
    });

    status
}

/// Panels stay mounted so their polling loops and inputs survive tab switches.
#[component]
fn TabPanel(active_tab: Signal<AppTab>, tab: AppTab, children: Element) -> Element {
    let shown = active_tab() == tab;
    rsx! {
        section {
            class: if shown { "tab-panel active" } else { "tab-panel" },
            hidden: !shown,
            {children}
        }
    }
}

#[component]
fn TabNavigation(active_tab: Signal<AppTab>) -> Element {
    let mut active_tab = active_tab;
    rsx! {
        nav { class: "tabs",
            for tab in AppTab::ALL {
                button {
                    r#type: "button",
                    class: if active_tab() == tab { "tab active" } else { "tab" },
                    onclick: move |_| active_tab.set(tab),
                    "{tab.label()}"
                }
            }
        }
    }
}

/// Mirrors the toast queue into a signal; the queue's own timers decide
/// when items fade and disappear.
#[component]
fn ToastStack() -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    let mut toasts = use_signal(Vec::<NotificationItem>::new);

    let poll_ctx = ctx.clone();
    use_future(move || {
        let ctx = poll_ctx.clone();
        async move {
            loop {
                let items = ctx.toasts().items();
                if *toasts.peek() != items {
                    toasts.set(items);
                }
                tokio::time::sleep(TOAST_POLL_INTERVAL).await;
            }
        }
    });

    rsx! {
        div { class: "toast-stack",
            for toast in toasts() {
                div {
                    key: "{toast.id}",
                    class: format_args!(
                        "toast toast-{} {}",
                        toast.severity.as_str(),
                        if toast.visible { "" } else { "hidden" }
                    ),
                    onclick: {
                        let ctx = ctx.clone();
                        let id = toast.id.clone();
                        move |_: MouseEvent| ctx.toasts().dismiss(&id)
                    },
                    strong { "{toast.severity.title()}: " }
                    "{toast.message}"
                }
            }
        }
    }
}
