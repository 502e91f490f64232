pub mod bridge;
pub mod forwarder;
pub mod logging;
pub mod module;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(target_arch = "wasm32")]
pub mod web_host;

pub use bridge::{
    LoadedModule, ModuleBridge, ModuleHost, ModuleOptions, OutputSink, OutputStream, StartOutcome,
};
pub use forwarder::{ForwardOutcome, ParameterForwarder};
pub use logging::{LogEntry, LogLevel, LogSource, push_log, push_module_output};
pub use module::{Export, ModuleHandle, SimulationModule};
