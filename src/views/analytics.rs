use crate::analytics::HistoryStats;
use crate::app::AppContext;
use dioxus::prelude::*;
use std::sync::Arc;

#[component]
pub fn AnalyticsView(history_revision: Signal<u64>) -> Element {
    let ctx = use_context::<Arc<AppContext>>();
    let _ = history_revision();
    let stats = ctx.stats();

    if stats.total == 0 {
        return rsx! {
            div { class: "card",
                h3 { "Analytics" }
                p { class: "text-muted", "Download something to see statistics." }
            }
        };
    }

    let top = stats.top_platform().unwrap_or("unknown").to_string();
    rsx! {
        div { class: "card",
            h3 { "Analytics" }
            p { "Total downloads: " strong { "{stats.total}" } }
            p { "Most used platform: " strong { "{top}" } }
        }
        BreakdownTable { title: "By platform", rows: stats.by_platform.clone(), stats: stats.clone() }
        BreakdownTable { title: "By quality", rows: stats.by_quality.clone(), stats: stats.clone() }
        BreakdownTable { title: "By format", rows: stats.by_format.clone(), stats: stats.clone() }
        BreakdownTable { title: "By day", rows: stats.by_day.clone(), stats }
    }
}

#[component]
fn BreakdownTable(title: &'static str, rows: Vec<(String, usize)>, stats: HistoryStats) -> Element {
    rsx! {
        div { class: "card",
            h4 { "{title}" }
            table {
                tbody {
                    for (name, count) in rows {
                        tr { key: "{name}",
                            td { "{name}" }
                            td { "{count}" }
                            td { {format!("{:.1}%", stats.percent(count))} }
                        }
                    }
                }
            }
        }
    }
}
