//! Browser side of the bridge: DOM lookups, the loader `<script>` tag, the
//! global factory and the Emscripten exports.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::LocalBoxFuture;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlCanvasElement, HtmlScriptElement, Window};

use crate::error::{BridgeError, ExportError};
use crate::models::config::CONFIG_GLOBAL;
use crate::models::BridgeConfig;
use crate::services::bridge::{ModuleBridge, ModuleHost, ModuleOptions, OutputSink, OutputStream};
use crate::services::module::{Export, ModuleHandle, SimulationModule};

const LOADER_ATTR: &str = "data-module-loader";
const STATE_ATTR: &str = "data-load-state";

thread_local! {
    static PAGE_BRIDGE: RefCell<Option<Rc<ModuleBridge<WebHost>>>> = const { RefCell::new(None) };
}

/// The bridge for this page, created on first use.
pub fn page_bridge(
    config: BridgeConfig,
    output: OutputSink,
) -> Result<Rc<ModuleBridge<WebHost>>, BridgeError> {
    PAGE_BRIDGE.with(|slot| {
        let existing = slot.borrow().clone();
        if let Some(bridge) = existing {
            return Ok(bridge);
        }
        let bridge = Rc::new(ModuleBridge::new(WebHost::new()?, config).with_output(output));
        *slot.borrow_mut() = Some(bridge.clone());
        Ok(bridge)
    })
}

/// Reads the optional configuration override the page may define.
pub fn page_config() -> BridgeConfig {
    let raw = WebHost::new()
        .ok()
        .and_then(|host| host.global_json(CONFIG_GLOBAL));
    BridgeConfig::from_override(raw.as_deref())
}

#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, BridgeError> {
        let window = web_sys::window()
            .ok_or_else(|| BridgeError::HostUnavailable("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| BridgeError::HostUnavailable("window has no document".into()))?;
        Ok(Self { window, document })
    }

    /// A page global as JSON text; strings are returned as-is.
    fn global_json(&self, name: &str) -> Option<String> {
        let value = Reflect::get(&self.window, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        value
            .as_string()
            .or_else(|| js_sys::JSON::stringify(&value).ok().map(String::from))
    }

    /// The loader tag injected for `src`, matched on its marker attribute
    /// rather than a selector so any path is found verbatim.
    fn find_script(&self, src: &str) -> Option<HtmlScriptElement> {
        let scripts = self.document.scripts();
        (0..scripts.length())
            .filter_map(|index| scripts.item(index))
            .find(|script| script.get_attribute(LOADER_ATTR).as_deref() == Some(src))?
            .dyn_into()
            .ok()
    }
}

impl ModuleHost for WebHost {
    type Surface = HtmlCanvasElement;
    type Factory = Function;

    fn mount_target(&self, canvas_id: &str) -> Option<HtmlCanvasElement> {
        self.document
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    fn cross_origin_isolated(&self) -> Option<bool> {
        Reflect::get(&self.window, &JsValue::from_str("crossOriginIsolated"))
            .ok()?
            .as_bool()
    }

    fn settle(&self, delay: Duration) -> LocalBoxFuture<'static, ()> {
        let window = self.window.clone();
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        Box::pin(async move {
            let promise = Promise::new(&mut |resolve, _reject| {
                if window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .is_err()
                {
                    let _ = resolve.call0(&JsValue::UNDEFINED);
                }
            });
            let _ = JsFuture::from(promise).await;
        })
    }

    fn script_present(&self, src: &str) -> bool {
        self.find_script(src).is_some()
    }

    fn inject_script(&self, src: &str) -> Result<(), BridgeError> {
        let failed = |err: JsValue| BridgeError::ScriptLoad {
            src: src.to_string(),
            reason: describe_js_error(&err),
        };
        let script: HtmlScriptElement = self
            .document
            .create_element("script")
            .map_err(failed)?
            .dyn_into()
            .map_err(|element| failed(element.into()))?;
        script.set_src(src);
        script.set_async(true);
        script.set_attribute(LOADER_ATTR, src).map_err(failed)?;
        script.set_attribute(STATE_ATTR, "loading").map_err(failed)?;

        // Record the outcome on the tag so later mounts can see it.
        for (event, state) in [("load", "loaded"), ("error", "error")] {
            let target = script.clone();
            let listener = Closure::<dyn FnMut()>::new(move || {
                let _ = target.set_attribute(STATE_ATTR, state);
            });
            script
                .add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
                .map_err(failed)?;
            listener.forget();
        }

        let body = self
            .document
            .body()
            .ok_or_else(|| BridgeError::HostUnavailable("document has no body".into()))?;
        body.append_child(&script).map_err(failed)?;
        Ok(())
    }

    fn script_loaded(&self, src: &str) -> LocalBoxFuture<'static, Result<(), BridgeError>> {
        let script = self.find_script(src);
        let src = src.to_string();
        Box::pin(async move {
            let failed = |reason: &str| BridgeError::ScriptLoad {
                src: src.clone(),
                reason: reason.to_string(),
            };
            let Some(script) = script else {
                return Err(failed("loader script is not in the document"));
            };
            match script.get_attribute(STATE_ATTR).as_deref() {
                Some("loaded") => return Ok(()),
                Some("error") => return Err(failed("network or parse error")),
                _ => {}
            }
            let promise = Promise::new(&mut |resolve, reject| {
                let _ = script.add_event_listener_with_callback("load", &resolve);
                let _ = script.add_event_listener_with_callback("error", &reject);
            });
            JsFuture::from(promise)
                .await
                .map(drop)
                .map_err(|_| failed("network or parse error"))
        })
    }

    fn lookup_factory(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.window, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn instantiate(
        &self,
        factory: &Function,
        options: ModuleOptions<HtmlCanvasElement>,
    ) -> LocalBoxFuture<'static, Result<ModuleHandle, BridgeError>> {
        let started = factory_options(options)
            .and_then(|config| factory.call1(&JsValue::UNDEFINED, &config));
        Box::pin(async move {
            let rejected = |err: JsValue| BridgeError::InitRejected(describe_js_error(&err));
            let pending = started.map_err(rejected)?;
            let instance = JsFuture::from(Promise::resolve(&pending))
                .await
                .map_err(rejected)?;
            Ok(ModuleHandle::new(EmscriptenModule { instance }))
        })
    }
}

/// Builds the object the Emscripten factory expects. The callbacks live for
/// the rest of the page.
fn factory_options(options: ModuleOptions<HtmlCanvasElement>) -> Result<JsValue, JsValue> {
    let config = Object::new();
    Reflect::set(&config, &"canvas".into(), options.canvas.as_ref())?;
    Reflect::set(
        &config,
        &"noInitialRun".into(),
        &JsValue::from_bool(options.no_initial_run),
    )?;

    let options = Rc::new(options);
    let resolver = options.clone();
    let locate = Closure::<dyn Fn(String) -> String>::new(move |path: String| {
        resolver.locate_file(&path)
    });
    Reflect::set(&config, &"locateFile".into(), &locate.into_js_value())?;

    for (key, stream) in [("print", OutputStream::Stdout), ("printErr", OutputStream::Stderr)] {
        let target = options.clone();
        let print = Closure::<dyn Fn(String)>::new(move |line: String| target.emit(stream, &line));
        Reflect::set(&config, &key.into(), &print.into_js_value())?;
    }
    Ok(config.into())
}

struct EmscriptenModule {
    instance: JsValue,
}

impl SimulationModule for EmscriptenModule {
    fn invoke(&self, export: Export, args: &[f64]) -> Result<(), ExportError> {
        let function = Reflect::get(&self.instance, &JsValue::from_str(export.symbol()))
            .ok()
            .and_then(|value| value.dyn_into::<Function>().ok())
            .ok_or(ExportError::Missing(export))?;
        let args: Array = args.iter().map(|&value| JsValue::from_f64(value)).collect();
        match function.apply(&self.instance, &args) {
            Ok(_) => Ok(()),
            // A main loop installed with emscripten_set_main_loop leaves `_main`
            // by throwing; the simulation keeps running.
            Err(err) if export == Export::EntryPoint && is_clean_exit(&err) => Ok(()),
            Err(err) => Err(ExportError::Threw {
                export,
                message: describe_js_error(&err),
            }),
        }
    }
}

fn is_clean_exit(err: &JsValue) -> bool {
    if err.as_string().as_deref() == Some("unwind") {
        return true;
    }
    let name = Reflect::get(err, &"name".into()).ok().and_then(|v| v.as_string());
    let status = Reflect::get(err, &"status".into()).ok().and_then(|v| v.as_f64());
    name.as_deref() == Some("ExitStatus") && status == Some(0.0)
}

fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
