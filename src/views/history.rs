use crate::app::AppContext;
use crate::history::MAX_HISTORY;
use crate::types::HistoryRecord;
use dioxus::prelude::*;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const HISTORY_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// Local-time rendering of a stored timestamp; the raw string if it does
/// not parse.
fn format_history_time(timestamp: &str) -> String {
    let Ok(mut datetime) = OffsetDateTime::parse(timestamp, &Rfc3339) else {
        return timestamp.to_string();
    };
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime
        .format(HISTORY_TIME_FORMAT)
        .unwrap_or_else(|_| timestamp.to_string())
}

#[component]
pub fn HistoryView(
    history_revision: Signal<u64>,
    on_generate: EventHandler<HistoryRecord>,
) -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    // Subscribe to history changes made elsewhere.
    let _ = history_revision();
    let records = ctx.history().records();
    let count = records.len();

    let clear = {
        let ctx = ctx.clone();
        let mut history_revision = history_revision;
        move |_: MouseEvent| {
            ctx.clear_history();
            history_revision += 1;
        }
    };

    rsx! {
        div { class: "card",
            div { class: "history-header",
                h3 { "Download history" }
                span { class: "text-muted", "{count} / {MAX_HISTORY}" }
                button {
                    r#type: "button",
                    disabled: records.is_empty(),
                    onclick: clear,
                    "Clear history"
                }
            }
            if records.is_empty() {
                p { class: "text-muted", "No downloads yet." }
            } else {
                table { class: "history-table",
                    thead {
                        tr {
                            th { "Title" }
                            th { "Platform" }
                            th { "Quality" }
                            th { "Format" }
                            th { "Time" }
                            th {}
                        }
                    }
                    tbody {
                        for record in records {
                            tr { key: "{record.id}",
                                td { "{record.title}" }
                                td { span { class: "badge", "{record.platform}" } }
                                td { "{record.quality}" }
                                td { "{record.format}" }
                                td { {format_history_time(&record.timestamp)} }
                                td {
                                    button {
                                        r#type: "button",
                                        onclick: move |_| on_generate.call(record.clone()),
                                        "Write copy"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
