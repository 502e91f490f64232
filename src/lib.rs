use anyhow::{Result, anyhow};

pub mod app;
pub mod components;
pub mod error;
pub mod models;
pub mod services;
pub mod style;

pub use app::App;

pub fn init_logging() -> Result<()> {
    dioxus::logger::init(tracing::Level::INFO)
        .map_err(|err| anyhow!("failed to install the tracing subscriber: {err}"))
}

#[cfg(target_arch = "wasm32")]
pub fn launch_web() -> Result<()> {
    init_logging()?;
    dioxus::LaunchBuilder::web().launch(App);
    Ok(())
}
