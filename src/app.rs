use dioxus::prelude::*;

use crate::components::{ActivityLog, ModuleStatus, ShotControls, Stage};
use crate::error::BridgeError;
use crate::models::{BridgeConfig, LoadState};
use crate::services::{
    LoadedModule, LogEntry, LogLevel, ParameterForwarder, StartOutcome, push_log,
};
use crate::style::APP_STYLE;

#[component]
#[allow(non_snake_case)]
pub fn App() -> Element {
    let config = use_hook(page_config);
    let logs = use_signal(Vec::<LogEntry>::new);
    let load_state = use_signal(LoadState::default);
    let forwarder = use_signal(ParameterForwarder::default);
    let mut module_requested = use_signal(|| false);

    if !*module_requested.read() {
        module_requested.set(true);
        queue_module_load(load_state, logs, config.clone());
    }

    let state_label = load_state.read().label();
    let show_canvas = load_state.read().shows_canvas();
    rsx! {
        style { {APP_STYLE} }
        div { class: "app",
            header {
                div { class: "branding",
                    div { class: "title", "Tennis Emulator" }
                    div { class: "subtitle", "Aim, pick a pace, and launch the ball." }
                }
                span { class: format!("status-pill {state_label}"), "{state_label}" }
            }
            main {
                div { class: "content",
                    ModuleStatus { load_state, config: config.clone() }
                    Stage { config: config.clone(), visible: show_canvas }
                }
                div { class: "sidebar",
                    ShotControls { forwarder, load_state, logs }
                    ActivityLog { logs }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn page_config() -> BridgeConfig {
    crate::services::web_host::page_config()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_config() -> BridgeConfig {
    BridgeConfig::default()
}

#[cfg(target_arch = "wasm32")]
fn queue_module_load(
    state: Signal<LoadState>,
    logs: Signal<Vec<LogEntry>>,
    config: BridgeConfig,
) {
    use std::rc::Rc;

    use crate::services::{OutputSink, OutputStream, push_module_output, web_host::page_bridge};

    let output: OutputSink = Rc::new(move |stream: OutputStream, line: &str| {
        push_module_output(logs, stream, line)
    });
    let bridge = match page_bridge(config, output) {
        Ok(bridge) => bridge,
        Err(err) => {
            report_load(state, logs, Err(err));
            return;
        }
    };
    spawn(async move {
        let outcome = bridge.initialize().await;
        report_load(state, logs, outcome);
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn queue_module_load(
    state: Signal<LoadState>,
    logs: Signal<Vec<LogEntry>>,
    _config: BridgeConfig,
) {
    report_load(
        state,
        logs,
        Err(BridgeError::HostUnavailable(
            "the simulator only runs inside a browser".into(),
        )),
    );
}

fn report_load(
    mut state: Signal<LoadState>,
    logs: Signal<Vec<LogEntry>>,
    outcome: Result<LoadedModule, BridgeError>,
) {
    match outcome {
        Ok(LoadedModule { handle, start }) => {
            match start {
                StartOutcome::AutoRun => {
                    push_log(logs, LogLevel::Success, "Simulator loaded and running")
                }
                StartOutcome::Started => {
                    push_log(logs, LogLevel::Success, "Simulator loaded, entry point started")
                }
                StartOutcome::EntryPointMissing => push_log(
                    logs,
                    LogLevel::Warning,
                    "Simulator loaded, but it does not export _main and was not started",
                ),
                StartOutcome::EntryPointFailed(message) => push_log(
                    logs,
                    LogLevel::Error,
                    format!("Simulator loaded, but starting it failed: {message}"),
                ),
            }
            state.write().mark_ready(handle);
        }
        Err(err) => {
            push_log(logs, LogLevel::Error, format!("Failed to load the simulator: {err}"));
            state.write().mark_failed(err);
        }
    }
}
