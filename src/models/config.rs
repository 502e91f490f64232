use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Response headers the page must be served with so the simulator's
/// shared-memory build can run.
pub const CROSS_ORIGIN_ISOLATION_HEADERS: [(&str, &str); 2] = [
    ("Cross-Origin-Opener-Policy", "same-origin"),
    ("Cross-Origin-Embedder-Policy", "require-corp"),
];

/// Route the host bundle serves its own assets from.
pub const HOST_ASSET_ROUTE: &str = "/assets/";

/// Page global that may carry a JSON override of [`BridgeConfig`].
pub const CONFIG_GLOBAL: &str = "__TENNIS_EMULATOR_CONFIG__";

/// Where the simulator lives and how it is started.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    pub canvas_id: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub loader_script: String,
    pub factory_name: String,
    pub asset_prefix: String,
    pub no_initial_run: bool,
    pub settle_delay_ms: u64,
    pub output_prefix: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            canvas_id: "tennis-emulator-canvas".into(),
            canvas_width: 800,
            canvas_height: 600,
            loader_script: "/cpp/tennis_emulator.js".into(),
            factory_name: "createTennisEmulatorModule".into(),
            asset_prefix: "/cpp/".into(),
            no_initial_run: true,
            settle_delay_ms: 100,
            output_prefix: "[WASM]".into(),
        }
    }
}

impl BridgeConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: BridgeConfig =
            serde_json::from_str(raw).context("Failed to parse bridge configuration")?;
        config.validated()
    }

    /// Parses an optional override, falling back to defaults when it is absent
    /// or invalid.
    pub fn from_override(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Ignoring {CONFIG_GLOBAL}: {err:#}");
                Self::default()
            }
        }
    }

    pub fn validated(mut self) -> Result<Self> {
        for (name, value) in [
            ("canvas_id", &self.canvas_id),
            ("loader_script", &self.loader_script),
            ("factory_name", &self.factory_name),
            ("asset_prefix", &self.asset_prefix),
        ] {
            if value.trim().is_empty() {
                bail!("{name} must not be empty");
            }
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            bail!("canvas dimensions must be non-zero");
        }

        let mut prefix = self.asset_prefix.trim().to_string();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        if prefix == "/" || prefix == HOST_ASSET_ROUTE {
            bail!("asset_prefix {prefix:?} collides with the host application's routes");
        }
        self.asset_prefix = prefix;
        Ok(self)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// Maps a file the simulator asks for to its fetch path under `prefix`.
pub fn locate_file(prefix: &str, requested: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        requested.trim_start_matches('/')
    )
}
