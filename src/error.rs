use thiserror::Error;

use crate::services::module::Export;

/// Reasons the simulation module could not be brought up.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("Browser host unavailable: {0}")]
    HostUnavailable(String),
    #[error("Drawing surface #{0} is not in the document")]
    MissingMountTarget(String),
    #[error("Failed to load module loader script {src}: {reason}")]
    ScriptLoad { src: String, reason: String },
    #[error("Module factory `{0}` was not registered by the loader script")]
    MissingFactory(String),
    #[error("Module initialization rejected: {0}")]
    InitRejected(String),
}

impl BridgeError {
    /// Failures caused by missing or broken module artifacts, where the fix is
    /// rebuilding the simulator and redeploying its files.
    pub fn needs_rebuild(&self) -> bool {
        matches!(
            self,
            BridgeError::ScriptLoad { .. }
                | BridgeError::MissingFactory(_)
                | BridgeError::InitRejected(_)
        )
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("Module export `{}` is missing", .0.symbol())]
    Missing(Export),
    #[error("Module export `{}` threw: {message}", .export.symbol())]
    Threw { export: Export, message: String },
}
