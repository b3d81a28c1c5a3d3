use crate::constants::{GESTURE_MODEL_URL, VISION_WASM_URL};
use crate::core::{
    CaptureStream, Detection, Detections, GestureBackend, GestureError, GestureRecognizer,
    LoopControl, SharedBridge,
};
use crate::dom;
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

fn js_err(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let f: Function = get(target, name)?.dyn_into()?;
    Reflect::apply(&f, target, args)
}

async fn await_promise(value: JsValue) -> Result<JsValue, JsValue> {
    JsFuture::from(value.dyn_into::<Promise>()?).await
}

/// Dynamic `import()`, so a CDN outage surfaces as an error instead of failing module instantiation.
async fn import_module(url: &str) -> Result<JsValue, JsValue> {
    let importer = Function::new_with_args("url", "return import(url)");
    await_promise(importer.call1(&JsValue::NULL, &JsValue::from_str(url))?).await
}

fn vision_bundle_url() -> String {
    format!("{}/vision_bundle.mjs", VISION_WASM_URL.trim_end_matches("/wasm"))
}

fn recognizer_options() -> Result<JsValue, JsValue> {
    let base = Object::new();
    Reflect::set(&base, &"modelAssetPath".into(), &GESTURE_MODEL_URL.into())?;
    Reflect::set(&base, &"delegate".into(), &"GPU".into())?;
    let opts = Object::new();
    Reflect::set(&opts, &"baseOptions".into(), &base)?;
    Reflect::set(&opts, &"runningMode".into(), &"VIDEO".into())?;
    Reflect::set(&opts, &"numHands".into(), &JsValue::from_f64(1.0))?;
    Ok(opts.into())
}

/// Top categories for the first hand of a `GestureRecognizerResult`.
fn parse_detections(results: &JsValue) -> Result<Detections, JsValue> {
    let mut out = Detections::new();
    let hands: Array = get(results, "gestures")?.dyn_into()?;
    if hands.length() == 0 {
        return Ok(out);
    }
    let categories: Array = hands.get(0).dyn_into()?;
    for category in categories.iter() {
        let label = get(&category, "categoryName")?.as_string().unwrap_or_default();
        let score = get(&category, "score")?.as_f64().unwrap_or(0.0) as f32;
        out.push(Detection { label, score });
    }
    Ok(out)
}

/// Live camera feed bound to the preview `<video>` element.
pub struct WebcamStream {
    video: web::HtmlVideoElement,
    stream: web::MediaStream,
}

impl CaptureStream for WebcamStream {
    fn frame_time(&self) -> Option<f64> {
        (self.video.ready_state() >= HAVE_CURRENT_DATA).then(|| self.video.current_time())
    }

    fn attach(&mut self) {
        self.video.set_src_object(Some(&self.stream));
        dom::set_visible(&self.video, true);
        if let Ok(p) = self.video.play() {
            // autoplay rejections are harmless; frames still arrive once playing
            spawn_local(async move {
                _ = JsFuture::from(p).await;
            });
        }
    }

    fn stop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
        // the preview element may already belong to a newer stream
        let owns_element = self
            .video
            .src_object()
            .is_some_and(|current| current == self.stream);
        if owns_element {
            self.video.set_src_object(None);
            dom::set_visible(&self.video, false);
        }
    }
}

/// MediaPipe `GestureRecognizer` in VIDEO mode.
pub struct MediaPipeRecognizer {
    inner: JsValue,
    recognize_fn: Function,
}

impl GestureRecognizer<WebcamStream> for MediaPipeRecognizer {
    fn recognize(&mut self, source: &WebcamStream, timestamp_ms: f64) -> Result<Detections, GestureError> {
        let results = self
            .recognize_fn
            .call2(&self.inner, &source.video, &JsValue::from_f64(timestamp_ms))
            .map_err(|e| GestureError::Recognize(js_err(e)))?;
        parse_detections(&results).map_err(|e| GestureError::Recognize(js_err(e)))
    }
}

pub struct WebcamBackend {
    video: web::HtmlVideoElement,
}

impl WebcamBackend {
    pub fn new(video: web::HtmlVideoElement) -> Self {
        dom::set_visible(&video, false);
        Self { video }
    }

    async fn load(&self) -> Result<MediaPipeRecognizer, JsValue> {
        let module = import_module(&vision_bundle_url()).await?;
        let resolver = get(&module, "FilesetResolver")?;
        let fileset = await_promise(call_method(
            &resolver,
            "forVisionTasks",
            &Array::of1(&VISION_WASM_URL.into()),
        )?)
        .await?;
        let class = get(&module, "GestureRecognizer")?;
        let inner = await_promise(call_method(
            &class,
            "createFromOptions",
            &Array::of2(&fileset, &recognizer_options()?),
        )?)
        .await?;
        let recognize_fn: Function = get(&inner, "recognizeForVideo")?.dyn_into()?;
        Ok(MediaPipeRecognizer {
            inner,
            recognize_fn,
        })
    }

    async fn open(&self) -> Result<WebcamStream, JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let devices = window.navigator().media_devices()?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&JsValue::TRUE);
        let promise = devices.get_user_media_with_constraints(&constraints)?;
        let stream: web::MediaStream = JsFuture::from(promise).await?.dyn_into()?;
        Ok(WebcamStream {
            video: self.video.clone(),
            stream,
        })
    }
}

impl GestureBackend for WebcamBackend {
    type Stream = WebcamStream;
    type Recognizer = MediaPipeRecognizer;

    async fn load_model(&self) -> Result<MediaPipeRecognizer, GestureError> {
        self.load()
            .await
            .map_err(|e| GestureError::ModelLoad(js_err(e)))
    }

    async fn open_camera(&self) -> Result<WebcamStream, GestureError> {
        self.open()
            .await
            .map_err(|e| GestureError::CameraDenied(js_err(e)))
    }
}

pub type WebcamBridge = SharedBridge<WebcamBackend>;

/// Enable hand control in the background and start predicting once the camera is live.
pub fn enable(bridge: WebcamBridge, backend: Rc<WebcamBackend>) {
    spawn_local(async move {
        if let Some(generation) = crate::core::gesture::enable(&bridge, backend.as_ref()).await {
            start_prediction_loop(bridge, generation);
        }
    });
}

/// Per-frame prediction, rescheduled only while its generation stays current.
pub fn start_prediction_loop(bridge: WebcamBridge, generation: u64) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = js_sys::Date::now();
        let control = bridge.borrow_mut().poll_frame(generation, now);
        match control {
            LoopControl::Continue => {
                if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
                    _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
                }
            }
            LoopControl::Stop => {
                log::info!("[gesture] prediction loop {} stopped", generation);
                // release the closure after this call has returned
                let finished = tick_clone.borrow_mut().take();
                spawn_local(async move {
                    drop(finished);
                });
            }
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
