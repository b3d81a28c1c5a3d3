use crate::dom;
use crate::input::{self, PointerState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the mouse over the whole window as NDC for the camera drift.
pub fn wire_pointer_tracking(pointer: Rc<RefCell<PointerState>>) {
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "mousemove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let (w, h) = dom::viewport_css_size();
        pointer.borrow_mut().ndc = input::client_to_ndc(
            ev.client_x() as f32,
            ev.client_y() as f32,
            w as f32,
            h as f32,
        );
    });
}

/// Keep the canvas backing store at CSS size times device pixel ratio.
pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let Some(window) = web::window() else {
        return;
    };
    let canvas = canvas.clone();
    dom::add_listener(&window, "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
    });
}
