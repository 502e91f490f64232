use dioxus::prelude::*;

use crate::models::BridgeConfig;

/// The canvas the simulator renders into. It stays in the document while
/// hidden so the bridge can find it during initialization.
#[component]
#[allow(non_snake_case)]
pub fn Stage(config: BridgeConfig, visible: bool) -> Element {
    let display = if visible { "display: block" } else { "display: none" };
    rsx! {
        div { class: "stage",
            canvas {
                id: "{config.canvas_id}",
                width: "{config.canvas_width}",
                height: "{config.canvas_height}",
                tabindex: "0",
                style: display,
                oncontextmenu: move |evt| evt.prevent_default(),
            }
        }
    }
}
