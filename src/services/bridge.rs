use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, ExportError};
use crate::models::{BridgeConfig, CROSS_ORIGIN_ISOLATION_HEADERS, locate_file};
use crate::services::module::ModuleHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Receives every line the simulator prints.
pub type OutputSink = Rc<dyn Fn(OutputStream, &str)>;

/// Options handed to the module factory.
pub struct ModuleOptions<S> {
    pub canvas: S,
    pub no_initial_run: bool,
    pub asset_prefix: String,
    pub output: OutputSink,
}

impl<S> ModuleOptions<S> {
    /// Fetch path for a file the simulator asks for.
    pub fn locate_file(&self, requested: &str) -> String {
        locate_file(&self.asset_prefix, requested)
    }

    pub fn emit(&self, stream: OutputStream, line: &str) {
        (self.output)(stream, line);
    }
}

/// Everything the bridge needs from the page it runs in.
///
/// The browser implementation lives in `web_host`; it is the only code that
/// touches the DOM or the page's global scope. Clones must refer to the same
/// page.
pub trait ModuleHost: Clone + 'static {
    type Surface: Clone + 'static;
    type Factory;

    fn mount_target(&self, canvas_id: &str) -> Option<Self::Surface>;

    /// `None` when the host cannot tell.
    fn cross_origin_isolated(&self) -> Option<bool>;

    fn settle(&self, delay: Duration) -> LocalBoxFuture<'static, ()>;

    fn script_present(&self, src: &str) -> bool;

    fn inject_script(&self, src: &str) -> Result<(), BridgeError>;

    fn script_loaded(&self, src: &str) -> LocalBoxFuture<'static, Result<(), BridgeError>>;

    /// The one place a globally registered factory is looked up.
    fn lookup_factory(&self, name: &str) -> Option<Self::Factory>;

    fn instantiate(
        &self,
        factory: &Self::Factory,
        options: ModuleOptions<Self::Surface>,
    ) -> LocalBoxFuture<'static, Result<ModuleHandle, BridgeError>>;
}

/// How the module's entry point was handled after initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// The module ran its entry point during initialization.
    AutoRun,
    Started,
    EntryPointMissing,
    EntryPointFailed(String),
}

#[derive(Clone, Debug)]
pub struct LoadedModule {
    pub handle: ModuleHandle,
    pub start: StartOutcome,
}

type PendingLoad = Shared<LocalBoxFuture<'static, Result<LoadedModule, BridgeError>>>;

enum LoadSlot {
    Idle,
    Pending(PendingLoad),
    Loaded(LoadedModule),
}

pub struct ModuleBridge<H: ModuleHost> {
    host: H,
    config: BridgeConfig,
    output: Option<OutputSink>,
    slot: RefCell<LoadSlot>,
}

impl<H: ModuleHost> ModuleBridge<H> {
    pub fn new(host: H, config: BridgeConfig) -> Self {
        Self {
            host,
            config,
            output: None,
            slot: RefCell::new(LoadSlot::Idle),
        }
    }

    /// Also forwards module output to `sink`. Output always goes to `tracing`.
    pub fn with_output(mut self, sink: OutputSink) -> Self {
        self.output = Some(sink);
        self
    }

    pub fn loaded(&self) -> Option<LoadedModule> {
        match &*self.slot.borrow() {
            LoadSlot::Loaded(loaded) => Some(loaded.clone()),
            _ => None,
        }
    }

    /// Brings the simulator up once per bridge.
    ///
    /// Overlapping calls join the load already in flight, and a caller that is
    /// dropped halfway leaves the load for the next caller to finish. Later
    /// calls return the cached module without touching the page. A failed load
    /// is not cached.
    pub async fn initialize(&self) -> Result<LoadedModule, BridgeError> {
        let pending = {
            let mut slot = self.slot.borrow_mut();
            let joined = match &*slot {
                LoadSlot::Loaded(loaded) => {
                    tracing::debug!("simulation module already initialized");
                    return Ok(loaded.clone());
                }
                LoadSlot::Pending(load) => Some(load.clone()),
                LoadSlot::Idle => None,
            };
            match joined {
                Some(load) => {
                    tracing::debug!("joining simulation module load in flight");
                    load
                }
                None => {
                    let load = bring_up(self.host.clone(), self.config.clone(), self.output_sink())
                        .boxed_local()
                        .shared();
                    *slot = LoadSlot::Pending(load.clone());
                    load
                }
            }
        };

        let outcome = pending.clone().await;
        let mut slot = self.slot.borrow_mut();
        match &outcome {
            Ok(loaded) => *slot = LoadSlot::Loaded(loaded.clone()),
            Err(_) => {
                if matches!(&*slot, LoadSlot::Pending(load) if load.ptr_eq(&pending)) {
                    *slot = LoadSlot::Idle;
                }
            }
        }
        outcome
    }

    fn output_sink(&self) -> OutputSink {
        let prefix = self.config.output_prefix.clone();
        let forward = self.output.clone();
        Rc::new(move |stream: OutputStream, line: &str| {
            match stream {
                OutputStream::Stdout => tracing::info!(target: "wasm", "{prefix} {line}"),
                OutputStream::Stderr => tracing::error!(target: "wasm", "{prefix} {line}"),
            }
            if let Some(forward) = &forward {
                forward(stream, line);
            }
        })
    }
}

async fn bring_up<H: ModuleHost>(
    host: H,
    config: BridgeConfig,
    output: OutputSink,
) -> Result<LoadedModule, BridgeError> {
    host.settle(config.settle_delay()).await;

    let Some(canvas) = host.mount_target(&config.canvas_id) else {
        tracing::warn!(
            canvas = %config.canvas_id,
            "drawing surface not found, aborting module initialization"
        );
        return Err(BridgeError::MissingMountTarget(config.canvas_id.clone()));
    };

    if host.cross_origin_isolated() == Some(false) {
        let headers = CROSS_ORIGIN_ISOLATION_HEADERS
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!("page is not cross-origin isolated; serve it with {headers}");
    }

    load_script(&host, &config.loader_script).await?;

    let factory = host.lookup_factory(&config.factory_name).ok_or_else(|| {
        tracing::error!(factory = %config.factory_name, "module factory not registered");
        BridgeError::MissingFactory(config.factory_name.clone())
    })?;

    let options = ModuleOptions {
        canvas,
        no_initial_run: config.no_initial_run,
        asset_prefix: config.asset_prefix.clone(),
        output,
    };
    let handle = host
        .instantiate(&factory, options)
        .await
        .inspect_err(|err| tracing::error!("{err}"))?;
    tracing::info!("simulation module initialized");

    let start = if config.no_initial_run {
        start_entry_point(&handle)
    } else {
        StartOutcome::AutoRun
    };
    Ok(LoadedModule { handle, start })
}

async fn load_script<H: ModuleHost>(host: &H, src: &str) -> Result<(), BridgeError> {
    if host.script_present(src) {
        tracing::debug!(%src, "loader script already in the document");
    } else {
        host.inject_script(src)?;
        tracing::info!(%src, "loader script injected");
    }
    host.script_loaded(src)
        .await
        .inspect_err(|err| tracing::error!("{err}"))
}

fn start_entry_point(handle: &ModuleHandle) -> StartOutcome {
    match handle.run_entry_point() {
        Ok(()) => {
            tracing::info!("simulation entry point started");
            StartOutcome::Started
        }
        Err(ExportError::Missing(export)) => {
            tracing::warn!("{export} is not exported; module loaded but not started");
            StartOutcome::EntryPointMissing
        }
        Err(err) => {
            tracing::error!("{err}");
            StartOutcome::EntryPointFailed(err.to_string())
        }
    }
}
