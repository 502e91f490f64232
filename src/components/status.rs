use dioxus::prelude::*;

use crate::models::{BridgeConfig, LoadState, Remedy, StatusMessage};

#[component]
#[allow(non_snake_case)]
pub fn ModuleStatus(load_state: Signal<LoadState>, config: BridgeConfig) -> Element {
    let message = load_state.read().status_message(&config);
    match message {
        None => rsx! {},
        Some(StatusMessage::Loading) => rsx! {
            div { class: "panel",
                p { class: "helper", "Loading WebAssembly..." }
            }
        },
        Some(StatusMessage::Failed { error, remedy }) => {
            let hint = match remedy {
                Remedy::Rebuild {
                    artifacts,
                    asset_prefix,
                } => {
                    let artifacts = artifacts.join(", ");
                    rsx! {
                        p { class: "helper",
                            "Rebuild the simulator for the web target and copy "
                            code { "{artifacts}" }
                            " into "
                            code { "{asset_prefix}" }
                            ", then reload the page."
                        }
                    }
                }
                Remedy::Reload => rsx! {
                    p { class: "helper", "Reload the page to try again." }
                },
            };
            rsx! {
                div { class: "panel error-container",
                    p { class: "error", "{error}" }
                    {hint}
                }
            }
        }
    }
}
