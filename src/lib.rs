#![cfg(target_arch = "wasm32")]
use crate::core::{GestureBridge, ParamKey, ParamValue, Params, Scene, SceneChange};
use crate::input::PointerState;
use crate::webcam::{WebcamBackend, WebcamBridge};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod panel;
mod render;
mod webcam;

thread_local! {
    static HANDLE: RefCell<Option<SceneHandle>> = const { RefCell::new(None) };
}

/// Control over the running scene from the page.
#[wasm_bindgen]
#[derive(Clone)]
pub struct SceneHandle {
    running: Rc<Cell<bool>>,
    bridge: WebcamBridge,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Stop the frame loop and release the camera.
    pub fn stop(&self) {
        if self.running.replace(false) {
            log::info!("scene stopping");
        }
        self.bridge.borrow_mut().disable();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.running.get()
    }
}

/// Handle to the scene once it has started.
#[wasm_bindgen(js_name = sceneHandle)]
pub fn scene_handle() -> Option<SceneHandle> {
    HANDLE.with(|h| h.borrow().clone())
}

/// Apply a panel edit, then do the part of its effect that lives outside the scene.
fn handle_param_change(
    scene: &Rc<RefCell<Scene>>,
    bridge: &WebcamBridge,
    backend: &Rc<WebcamBackend>,
    key: ParamKey,
    value: ParamValue,
) {
    let change = scene.borrow_mut().apply(key, value);
    match change {
        Ok(SceneChange::SizeScale(v)) => bridge.borrow_mut().set_target_scale(v),
        Ok(SceneChange::GestureControl(true)) => webcam::enable(bridge.clone(), backend.clone()),
        Ok(SceneChange::GestureControl(false)) => bridge.borrow_mut().disable(),
        Ok(_) => {}
        Err(e) => log::warn!("[panel] {}", e),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("retro-tree starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, constants::CANVAS_ID)?;
    let video: web::HtmlVideoElement = dom::element_by_id(&document, constants::VIDEO_ID)?;
    let panel_root: web::HtmlElement = dom::element_by_id(&document, constants::PANEL_ID)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    events::wire_canvas_resize(&canvas);

    let scene = Rc::new(RefCell::new(Scene::new(
        Params::default(),
        StdRng::from_entropy(),
    )));
    {
        let s = scene.borrow();
        log::info!(
            "[scene] tree {}/{} snow {}/{}",
            s.tree().points().visible(),
            s.tree().points().capacity(),
            s.snow().flakes().visible(),
            s.snow().flakes().capacity()
        );
    }

    // nothing else holds the scene until the panel is wired
    let gpu = frame::init_gpu(&canvas, &scene.borrow()).await?;

    let bridge: WebcamBridge = Rc::new(RefCell::new(GestureBridge::new(
        scene.borrow().params().global_size,
    )));
    let backend = Rc::new(WebcamBackend::new(video));

    let pointer = Rc::new(RefCell::new(PointerState::default()));
    events::wire_pointer_tracking(pointer.clone());

    let on_change: panel::ChangeHandler = {
        let scene = scene.clone();
        let bridge = bridge.clone();
        Rc::new(move |key: ParamKey, value: ParamValue| {
            handle_param_change(&scene, &bridge, &backend, key, value)
        })
    };
    let (css_width, _) = dom::viewport_css_size();
    let panel = Rc::new(panel::Panel::build(
        &document,
        &panel_root,
        scene.borrow().params(),
        input::is_narrow_viewport(css_width),
        on_change,
    )?);

    let running = Rc::new(Cell::new(true));
    HANDLE.with(|h| {
        *h.borrow_mut() = Some(SceneHandle {
            running: running.clone(),
            bridge: bridge.clone(),
        })
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        scene, bridge, pointer, panel, canvas, gpu, running,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}
