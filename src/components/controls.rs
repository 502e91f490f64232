use dioxus::prelude::*;

use crate::error::ExportError;
use crate::models::{LoadState, ShotField};
use crate::services::{ForwardOutcome, LogEntry, LogLevel, ParameterForwarder, push_log};

fn report_forward(
    logs: Signal<Vec<LogEntry>>,
    action: &str,
    forwarder: &ParameterForwarder,
    outcome: Result<ForwardOutcome, ExportError>,
) {
    match outcome {
        Ok(ForwardOutcome::Delivered) => push_log(
            logs,
            LogLevel::Success,
            format!("{action}: {}", forwarder.params()),
        ),
        Ok(ForwardOutcome::ModuleNotReady) => push_log(
            logs,
            LogLevel::Warning,
            "The simulator is not ready yet",
        ),
        Ok(ForwardOutcome::ShootUnavailable) => push_log(
            logs,
            LogLevel::Warning,
            "Parameters sent, but the simulator does not export _shootBall",
        ),
        Err(err) => push_log(logs, LogLevel::Error, format!("{action} failed: {err}")),
    }
}

#[component]
#[allow(non_snake_case)]
fn SliderRow(
    field: ShotField,
    value: f64,
    forwarder: Signal<ParameterForwarder>,
    logs: Signal<Vec<LogEntry>>,
) -> Element {
    let range = field.range();
    let mut binding = forwarder;
    rsx! {
        label { class: "slider",
            span { class: "slider-label", "{field.label()}" }
            input {
                r#type: "range",
                min: "{range.min}",
                max: "{range.max}",
                step: "{range.step}",
                value: "{value}",
                oninput: move |evt| {
                    if let Err(err) = binding.write().set_from_input(field, &evt.value()) {
                        push_log(logs, LogLevel::Warning, err.to_string());
                    }
                },
            }
            span { class: "slider-value", "{value}{field.unit()}" }
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ShotControls(
    forwarder: Signal<ParameterForwarder>,
    load_state: Signal<LoadState>,
    logs: Signal<Vec<LogEntry>>,
) -> Element {
    let params = forwarder.read().params();
    let ready = load_state.read().is_ready();

    rsx! {
        div { class: "panel",
            h2 { "Shot" }
            for field in ShotField::ALL {
                SliderRow {
                    key: "{field.label()}",
                    field,
                    value: params.get(field),
                    forwarder,
                    logs,
                }
            }
            div { class: "actions",
                button {
                    disabled: !ready,
                    onclick: move |_| {
                        let current = *forwarder.read();
                        let outcome = current.shoot(&load_state.read());
                        report_forward(logs, "Shot fired", &current, outcome);
                    },
                    "Shoot"
                }
                button { class: "secondary",
                    disabled: !ready,
                    onclick: move |_| {
                        let current = *forwarder.read();
                        let outcome = current.set_parameters(&load_state.read());
                        report_forward(logs, "Aim updated", &current, outcome);
                    },
                    "Aim only"
                }
            }
            if !ready {
                p { class: "helper", "Controls unlock once the simulator has loaded." }
            }
        }
    }
}
