use crate::input;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach a listener for the page lifetime.
pub fn add_listener(target: &web::EventTarget, event: &str, handler: impl FnMut(web::Event) + 'static) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = input::backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
}

/// Show or hide through the page's `hidden` class.
pub fn set_visible(el: &web::Element, visible: bool) {
    let cl = el.class_list();
    if visible {
        _ = cl.remove_1("hidden");
    } else {
        _ = cl.add_1("hidden");
    }
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{} has the wrong element type: {:?}", id, e))
}

pub fn create<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("<{}> cast failed: {:?}", tag, e))
}

#[inline]
pub fn viewport_css_size() -> (f64, f64) {
    web::window()
        .map(|w| {
            let px = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
            };
            (px(w.inner_width()), px(w.inner_height()))
        })
        .unwrap_or((0.0, 0.0))
}
