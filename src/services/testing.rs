//! In-memory stand-ins for the page and the simulator, recording every call in
//! order.

use std::cell::RefCell;
use std::rc::Rc;
use std::task::Poll;
use std::time::Duration;

use futures::future::{self, LocalBoxFuture};

use crate::error::{BridgeError, ExportError};
use crate::services::bridge::{ModuleHost, ModuleOptions, OutputStream};
use crate::services::module::{Export, ModuleHandle, SimulationModule};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    Invoke { export: Export, args: Vec<f64> },
    Host(&'static str),
}

impl Call {
    pub(crate) fn new(export: Export, args: &[f64]) -> Self {
        Call::Invoke {
            export,
            args: args.to_vec(),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub(crate) fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub(crate) fn take(&self) -> Vec<Call> {
        self.0.take()
    }

    pub(crate) fn count(&self, export: Export) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::Invoke { export: e, .. } if *e == export))
            .count()
    }
}

pub(crate) struct FakeModule {
    log: CallLog,
    missing: Vec<Export>,
    throwing: Vec<(Export, String)>,
}

impl FakeModule {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            missing: Vec::new(),
            throwing: Vec::new(),
        }
    }

    pub(crate) fn with_all_exports() -> (Self, CallLog) {
        let log = CallLog::default();
        (Self::new(log.clone()), log)
    }

    pub(crate) fn without(mut self, export: Export) -> Self {
        self.missing.push(export);
        self
    }

    pub(crate) fn throwing(mut self, export: Export, message: &str) -> Self {
        self.throwing.push((export, message.to_string()));
        self
    }

    pub(crate) fn handle(self) -> ModuleHandle {
        ModuleHandle::new(self)
    }
}

impl SimulationModule for FakeModule {
    fn invoke(&self, export: Export, args: &[f64]) -> Result<(), ExportError> {
        if self.missing.contains(&export) {
            return Err(ExportError::Missing(export));
        }
        self.log.record(Call::new(export, args));
        match self.throwing.iter().find(|(e, _)| *e == export) {
            Some((_, message)) => Err(ExportError::Threw {
                export,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct FakePage {
    canvas_id: Option<String>,
    isolated: Option<bool>,
    scripts: Vec<String>,
    script_error: Option<String>,
    factory_registered: bool,
    rejection: Option<String>,
    missing: Vec<Export>,
    throwing: Vec<(Export, String)>,
    output: Vec<(OutputStream, String)>,
    slow_settle: bool,
    settle_delays: Vec<Duration>,
    factory_calls: usize,
    last_canvas: Option<String>,
    last_no_initial_run: Option<bool>,
    last_asset_prefix: Option<String>,
}

/// A page that shares its state across clones, so several bridges can be
/// mounted on the same document.
#[derive(Clone, Default)]
pub(crate) struct FakeHost {
    page: Rc<RefCell<FakePage>>,
    log: CallLog,
}

impl FakeHost {
    /// A page with the canvas mounted and a loader script that registers the
    /// factory.
    pub(crate) fn browser() -> Self {
        let host = Self::default();
        {
            let mut page = host.page.borrow_mut();
            page.canvas_id = Some("tennis-emulator-canvas".into());
            page.isolated = Some(true);
            page.factory_registered = true;
        }
        host
    }

    fn with_page(self, edit: impl FnOnce(&mut FakePage)) -> Self {
        edit(&mut self.page.borrow_mut());
        self
    }

    pub(crate) fn without_canvas(self) -> Self {
        self.with_page(|page| page.canvas_id = None)
    }

    pub(crate) fn without_factory(self) -> Self {
        self.with_page(|page| page.factory_registered = false)
    }

    /// Simulates a redeployed loader that now registers the factory.
    pub(crate) fn register_factory(&self) {
        self.page.borrow_mut().factory_registered = true;
    }

    /// The settle delay yields to the executor once before it elapses.
    pub(crate) fn slow_settle(self) -> Self {
        self.with_page(|page| page.slow_settle = true)
    }

    pub(crate) fn not_isolated(self) -> Self {
        self.with_page(|page| page.isolated = Some(false))
    }

    pub(crate) fn failing_script(self, reason: &str) -> Self {
        self.with_page(|page| page.script_error = Some(reason.to_string()))
    }

    pub(crate) fn rejecting(self, reason: &str) -> Self {
        self.with_page(|page| page.rejection = Some(reason.to_string()))
    }

    pub(crate) fn module_without(self, export: Export) -> Self {
        self.with_page(|page| page.missing.push(export))
    }

    pub(crate) fn module_throwing(self, export: Export, message: &str) -> Self {
        self.with_page(|page| page.throwing.push((export, message.to_string())))
    }

    pub(crate) fn emitting(self, stream: OutputStream, line: &str) -> Self {
        self.with_page(|page| page.output.push((stream, line.to_string())))
    }

    pub(crate) fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.page.borrow().scripts.clone()
    }

    pub(crate) fn settle_delays(&self) -> Vec<Duration> {
        self.page.borrow().settle_delays.clone()
    }

    pub(crate) fn factory_calls(&self) -> usize {
        self.page.borrow().factory_calls
    }

    pub(crate) fn last_canvas(&self) -> Option<String> {
        self.page.borrow().last_canvas.clone()
    }

    pub(crate) fn last_no_initial_run(&self) -> Option<bool> {
        self.page.borrow().last_no_initial_run
    }

    pub(crate) fn last_located(&self, requested: &str) -> Option<String> {
        let prefix = self.page.borrow().last_asset_prefix.clone()?;
        Some(crate::models::locate_file(&prefix, requested))
    }
}

impl ModuleHost for FakeHost {
    type Surface = String;
    type Factory = ();

    fn mount_target(&self, canvas_id: &str) -> Option<String> {
        self.page
            .borrow()
            .canvas_id
            .clone()
            .filter(|id| id == canvas_id)
    }

    fn cross_origin_isolated(&self) -> Option<bool> {
        self.page.borrow().isolated
    }

    fn settle(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let mut page = self.page.borrow_mut();
        page.settle_delays.push(delay);
        let mut yielded = !page.slow_settle;
        Box::pin(future::poll_fn(move |cx| {
            if yielded {
                return Poll::Ready(());
            }
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }))
    }

    fn script_present(&self, src: &str) -> bool {
        self.page.borrow().scripts.iter().any(|s| s == src)
    }

    fn inject_script(&self, src: &str) -> Result<(), BridgeError> {
        self.page.borrow_mut().scripts.push(src.to_string());
        Ok(())
    }

    fn script_loaded(&self, src: &str) -> LocalBoxFuture<'static, Result<(), BridgeError>> {
        let page = self.page.borrow();
        let outcome = match (&page.script_error, page.scripts.iter().any(|s| s == src)) {
            (Some(reason), _) => Err(reason.clone()),
            (None, false) => Err("script was never injected".to_string()),
            (None, true) => Ok(()),
        };
        let src = src.to_string();
        Box::pin(future::ready(
            outcome.map_err(|reason| BridgeError::ScriptLoad { src, reason }),
        ))
    }

    fn lookup_factory(&self, _name: &str) -> Option<()> {
        self.page.borrow().factory_registered.then_some(())
    }

    fn instantiate(
        &self,
        _factory: &(),
        options: ModuleOptions<String>,
    ) -> LocalBoxFuture<'static, Result<ModuleHandle, BridgeError>> {
        {
            let mut page = self.page.borrow_mut();
            page.factory_calls += 1;
            page.last_canvas = Some(options.canvas.clone());
            page.last_no_initial_run = Some(options.no_initial_run);
            page.last_asset_prefix = Some(options.asset_prefix.clone());
        }
        self.log.record(Call::Host("factory called"));

        let page = self.page.clone();
        let log = self.log.clone();
        Box::pin(async move {
            let (output, rejection, missing, throwing) = {
                let page = page.borrow();
                (
                    page.output.clone(),
                    page.rejection.clone(),
                    page.missing.clone(),
                    page.throwing.clone(),
                )
            };
            for (stream, line) in &output {
                options.emit(*stream, line);
            }
            if let Some(reason) = rejection {
                return Err(BridgeError::InitRejected(reason));
            }
            log.record(Call::Host("init resolved"));

            let mut module = FakeModule::new(log);
            for export in missing {
                module = module.without(export);
            }
            for (export, message) in throwing {
                module = module.throwing(export, &message);
            }
            Ok(module.handle())
        })
    }
}
