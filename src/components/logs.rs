use dioxus::prelude::*;

use crate::services::LogEntry;

/// Bridge events and simulator stdio in one feed, newest first. Simulator
/// lines can be hidden when they get noisy.
#[component]
#[allow(non_snake_case)]
pub fn ActivityLog(logs: Signal<Vec<LogEntry>>) -> Element {
    let mut show_module_output = use_signal(|| true);
    let show_output = *show_module_output.read();
    let (entries, module_lines) = {
        let feed = logs.read();
        let module_lines = feed.iter().filter(|entry| entry.is_module_output()).count();
        let entries: Vec<LogEntry> = feed
            .iter()
            .filter(|entry| show_output || !entry.is_module_output())
            .cloned()
            .collect();
        (entries, module_lines)
    };
    let toggle_label = if show_output {
        format!("Hide simulator output ({module_lines})")
    } else {
        format!("Show simulator output ({module_lines})")
    };

    rsx! {
        div { class: "panel",
            div { class: "panel-heading",
                h2 { "Activity" }
                if module_lines > 0 {
                    button { class: "secondary compact",
                        onclick: move |_| show_module_output.toggle(),
                        "{toggle_label}"
                    }
                }
            }
            if entries.is_empty() {
                p { class: "helper", "Nothing yet." }
            } else {
                div { class: "log-feed",
                    for entry in entries.into_iter().rev() {
                        div {
                            class: format!(
                                "log-line {}{}",
                                entry.level.css_class(),
                                if entry.is_module_output() { " module" } else { "" },
                            ),
                            span { class: "ts", "{entry.time_label()}" }
                            if let Some(tag) = entry.source.tag() {
                                span { class: "source", "{tag}" }
                            }
                            span { "{entry.message}" }
                        }
                    }
                }
            }
        }
    }
}
