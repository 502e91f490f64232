use crate::error::BridgeError;
use crate::models::BridgeConfig;
use crate::services::module::ModuleHandle;

/// Page-lifetime status of the simulation module.
///
/// Moves forward exactly once: `Loading -> Ready` or `Loading -> Failed`.
#[derive(Clone, Debug, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(ModuleHandle),
    Failed(BridgeError),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// The single not-ready gate used by every forwarding call.
    pub fn module(&self) -> Option<&ModuleHandle> {
        match self {
            LoadState::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    /// The canvas stays hidden until the module is up.
    pub fn shows_canvas(&self) -> bool {
        self.is_ready()
    }

    /// What the status panel shows; `None` once the simulator is running.
    pub fn status_message(&self, config: &BridgeConfig) -> Option<StatusMessage> {
        match self {
            LoadState::Loading => Some(StatusMessage::Loading),
            LoadState::Ready(_) => None,
            LoadState::Failed(err) => {
                let remedy = if err.needs_rebuild() {
                    Remedy::Rebuild {
                        artifacts: artifact_names(&config.loader_script),
                        asset_prefix: config.asset_prefix.clone(),
                    }
                } else {
                    Remedy::Reload
                };
                Some(StatusMessage::Failed {
                    error: format!("Error: {err}"),
                    remedy,
                })
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }

    /// Applies the init outcome. Returns `false` and leaves the state untouched
    /// when initialization was already settled.
    pub fn resolve(&mut self, outcome: Result<ModuleHandle, BridgeError>) -> bool {
        if !self.is_loading() {
            tracing::debug!(state = self.label(), "ignoring late module load outcome");
            return false;
        }
        *self = match outcome {
            Ok(handle) => LoadState::Ready(handle),
            Err(err) => LoadState::Failed(err),
        };
        true
    }

    pub fn mark_ready(&mut self, handle: ModuleHandle) -> bool {
        self.resolve(Ok(handle))
    }

    pub fn mark_failed(&mut self, err: BridgeError) -> bool {
        self.resolve(Err(err))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    Loading,
    Failed { error: String, remedy: Remedy },
}

/// What the user can do about a failed load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Remedy {
    /// Rebuild the simulator and copy these files under `asset_prefix`.
    Rebuild {
        artifacts: Vec<String>,
        asset_prefix: String,
    },
    Reload,
}

/// Companion files an Emscripten build drops next to its loader script.
fn artifact_names(loader_script: &str) -> Vec<String> {
    let file = loader_script.rsplit('/').next().unwrap_or(loader_script);
    let stem = file.strip_suffix(".js").unwrap_or(file);
    vec![file.to_string(), format!("{stem}.wasm"), format!("{stem}.data")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::FakeModule;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_loading_without_a_module() {
        let state = LoadState::default();
        assert!(state.is_loading());
        assert!(state.module().is_none());
        assert!(!state.shows_canvas());
        assert_eq!(
            state.status_message(&BridgeConfig::default()),
            Some(StatusMessage::Loading)
        );
    }

    #[test]
    fn loading_moves_to_ready_once() {
        let (module, _) = FakeModule::with_all_exports();
        let mut state = LoadState::default();
        assert!(state.mark_ready(module.handle()));
        assert!(state.is_ready());

        assert!(!state.mark_failed(BridgeError::InitRejected("late".into())));
        assert!(state.is_ready());
        assert!(state.module().is_some());
    }

    #[test]
    fn failed_never_reverts() {
        let (module, _) = FakeModule::with_all_exports();
        let mut state = LoadState::default();
        assert!(state.mark_failed(BridgeError::MissingFactory("factory".into())));
        assert!(!state.mark_ready(module.handle()));
        assert!(matches!(
            &state,
            LoadState::Failed(BridgeError::MissingFactory(name)) if name == "factory"
        ));
        assert!(state.module().is_none());
    }

    #[test]
    fn ready_shows_the_canvas_instead_of_a_status() {
        let (module, _) = FakeModule::with_all_exports();
        let mut state = LoadState::default();
        state.mark_ready(module.handle());

        assert!(state.shows_canvas());
        assert_eq!(state.status_message(&BridgeConfig::default()), None);
    }

    #[test]
    fn missing_factory_hides_the_canvas_and_asks_for_a_rebuild() {
        let mut state = LoadState::default();
        state.mark_failed(BridgeError::MissingFactory("createTennisEmulatorModule".into()));

        assert!(!state.shows_canvas());
        assert_eq!(
            state.status_message(&BridgeConfig::default()),
            Some(StatusMessage::Failed {
                error: "Error: Module factory `createTennisEmulatorModule` was not registered \
                        by the loader script"
                    .into(),
                remedy: Remedy::Rebuild {
                    artifacts: vec![
                        "tennis_emulator.js".into(),
                        "tennis_emulator.wasm".into(),
                        "tennis_emulator.data".into(),
                    ],
                    asset_prefix: "/cpp/".into(),
                },
            })
        );
    }

    #[test]
    fn missing_canvas_only_asks_for_a_reload() {
        let mut state = LoadState::default();
        state.mark_failed(BridgeError::MissingMountTarget("tennis-emulator-canvas".into()));

        assert!(!state.shows_canvas());
        let Some(StatusMessage::Failed { error, remedy }) =
            state.status_message(&BridgeConfig::default())
        else {
            panic!("failed state reports an error");
        };
        assert!(error.contains("#tennis-emulator-canvas"));
        assert_eq!(remedy, Remedy::Reload);
    }
}
