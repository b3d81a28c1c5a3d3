use anyhow::Context;
use crate::core::{GestureFeed, Scene};
use crate::input::PointerState;
use crate::panel::Panel;
use crate::render;
use crate::webcam::WebcamBridge;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::fmt::Write;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub bridge: WebcamBridge,
    pub pointer: Rc<RefCell<PointerState>>,
    pub panel: Rc<Panel>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: render::GpuState<'a>,

    pub started: Instant,
    pub running: Rc<Cell<bool>>,
    status_text: String,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        scene: Rc<RefCell<Scene>>,
        bridge: WebcamBridge,
        pointer: Rc<RefCell<PointerState>>,
        panel: Rc<Panel>,
        canvas: web::HtmlCanvasElement,
        gpu: render::GpuState<'a>,
        running: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            scene,
            bridge,
            pointer,
            panel,
            canvas,
            gpu,
            started: Instant::now(),
            running,
            status_text: String::new(),
        }
    }

    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f32();
        let target_scale = {
            let bridge = self.bridge.borrow();
            self.status_text.clear();
            _ = write!(self.status_text, "{}", bridge.status());
            bridge.target_scale()
        };
        let pointer_ndc = self.pointer.borrow().ndc;
        let (width, height) = (self.canvas.width(), self.canvas.height());

        let mut scene = self.scene.borrow_mut();
        scene.set_viewport(width, height);
        scene.tick(
            elapsed,
            GestureFeed {
                target_scale,
                status: &self.status_text,
            },
            pointer_ndc,
        );
        let dirty = scene.take_dirty();

        self.gpu.resize_if_needed(width, height);
        if let Err(e) = self.gpu.render(&scene, dirty) {
            log::error!("render error: {:?}", e);
        }
        self.panel.sync(scene.params());
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &Scene,
) -> anyhow::Result<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    render::GpuState::new(leaked_canvas, scene)
        .await
        .context("WebGPU init")
}

/// Drive `frame` from requestAnimationFrame until `running` is cleared.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running = frame_ctx.borrow().running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            log::info!("frame loop stopped");
            // break the self-reference once the current call has returned
            let finished = tick_clone.borrow_mut().take();
            spawn_local(async move {
                drop(finished);
            });
            return;
        }
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
