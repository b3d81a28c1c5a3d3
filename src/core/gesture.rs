use super::constants::{GESTURE_CONFIDENCE_MIN, SCALE_EXPLODE, SCALE_NEUTRAL, SCALE_SHRINK};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Where hand control currently stands, as shown in the panel.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureStatus {
    Offline,
    LoadingModel,
    ModelReady,
    Active,
    Scanning,
    Detected(String),
    ErrorLoading,
    CameraDenied,
}

impl fmt::Display for GestureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureStatus::Offline => f.write_str("OFFLINE"),
            GestureStatus::LoadingModel => f.write_str("LOADING MODEL..."),
            GestureStatus::ModelReady => f.write_str("MODEL READY"),
            GestureStatus::Active => f.write_str("ACTIVE: SHOW HAND"),
            GestureStatus::Scanning => f.write_str("SCANNING..."),
            GestureStatus::Detected(label) => write!(f, "DETECTED: {}", label),
            GestureStatus::ErrorLoading => f.write_str("ERROR LOADING"),
            GestureStatus::CameraDenied => f.write_str("CAMERA DENIED"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureLabel {
    ClosedFist,
    OpenPalm,
    Other,
}

impl GestureLabel {
    pub fn from_category(name: &str) -> Self {
        match name {
            "Closed_Fist" => GestureLabel::ClosedFist,
            "Open_Palm" => GestureLabel::OpenPalm,
            _ => GestureLabel::Other,
        }
    }

    pub fn target_scale(&self) -> f32 {
        match self {
            GestureLabel::ClosedFist => SCALE_SHRINK,
            GestureLabel::OpenPalm => SCALE_EXPLODE,
            GestureLabel::Other => SCALE_NEUTRAL,
        }
    }
}

/// One ranked recognizer output.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub label: String,
    pub score: f32,
}

/// Best-first detections for the tracked hand.
pub type Detections = SmallVec<[Detection; 4]>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    #[error("gesture model failed to load: {0}")]
    ModelLoad(String),
    #[error("camera unavailable: {0}")]
    CameraDenied(String),
    #[error("recognition failed: {0}")]
    Recognize(String),
}

/// Video source opened for hand tracking.
pub trait CaptureStream {
    /// Timestamp of the frame currently presented, `None` until the first frame arrives.
    fn frame_time(&self) -> Option<f64>;
    /// Bind the stream to its preview output. Called only once the stream is accepted.
    fn attach(&mut self);
    /// Stop every underlying track and detach the source. Must release the device synchronously.
    fn stop(&mut self);
}

pub trait GestureRecognizer<S> {
    fn recognize(&mut self, source: &S, timestamp_ms: f64) -> Result<Detections, GestureError>;
}

/// The two asynchronous collaborators needed to turn hand control on.
#[allow(async_fn_in_trait)]
pub trait GestureBackend {
    type Stream: CaptureStream;
    type Recognizer: GestureRecognizer<Self::Stream>;

    async fn load_model(&self) -> Result<Self::Recognizer, GestureError>;
    async fn open_camera(&self) -> Result<Self::Stream, GestureError>;
}

/// Next step after the synchronous part of an enable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnableStep {
    LoadModel(u64),
    OpenCamera(u64),
    AlreadyActive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Map the best detection to a status and target scale.
///
/// No detection, or one at or below the confidence floor, counts as no hand.
pub fn classify(detections: &[Detection]) -> (GestureStatus, f32) {
    match detections.first() {
        Some(top) if top.score > GESTURE_CONFIDENCE_MIN => (
            GestureStatus::Detected(top.label.clone()),
            GestureLabel::from_category(&top.label).target_scale(),
        ),
        _ => (GestureStatus::Scanning, SCALE_NEUTRAL),
    }
}

/// State of webcam hand control.
///
/// Every enable gets a generation number; disabling bumps it, so a model
/// load, camera request or prediction loop started under an older
/// generation can tell it has been cancelled.
pub struct GestureBridge<R, S> {
    status: GestureStatus,
    enabled: bool,
    generation: u64,
    recognizer: Option<R>,
    stream: Option<S>,
    last_video_time: Option<f64>,
    target_scale: f32,
}

impl<R, S> GestureBridge<R, S>
where
    R: GestureRecognizer<S>,
    S: CaptureStream,
{
    pub fn new(initial_scale: f32) -> Self {
        Self {
            status: GestureStatus::Offline,
            enabled: false,
            generation: 0,
            recognizer: None,
            stream: None,
            last_video_time: None,
            target_scale: initial_scale.clamp(SCALE_SHRINK, SCALE_EXPLODE),
        }
    }

    #[inline]
    pub fn status(&self) -> &GestureStatus {
        &self.status
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn target_scale(&self) -> f32 {
        self.target_scale
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_capturing(&self) -> bool {
        self.stream.is_some()
    }

    #[inline]
    pub fn has_model(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Manual size edits become the new target so smoothing does not undo them.
    pub fn set_target_scale(&mut self, scale: f32) {
        self.target_scale = scale.clamp(SCALE_SHRINK, SCALE_EXPLODE);
    }

    #[inline]
    fn is_current(&self, generation: u64) -> bool {
        self.enabled && self.generation == generation
    }

    pub fn begin_enable(&mut self) -> EnableStep {
        self.enabled = true;
        if self.recognizer.is_none() {
            self.status = GestureStatus::LoadingModel;
            log::info!("[gesture] loading model");
            EnableStep::LoadModel(self.generation)
        } else if self.stream.is_some() {
            EnableStep::AlreadyActive
        } else {
            EnableStep::OpenCamera(self.generation)
        }
    }

    /// Record the model load outcome. Returns the camera step to take, if any.
    pub fn finish_model_load(
        &mut self,
        generation: u64,
        result: Result<R, GestureError>,
    ) -> Option<EnableStep> {
        match result {
            Ok(recognizer) => {
                // a model loaded under a cancelled enable is still a good model
                if self.recognizer.is_none() {
                    self.recognizer = Some(recognizer);
                }
                if !self.is_current(generation) {
                    return None;
                }
                self.status = GestureStatus::ModelReady;
                log::info!("[gesture] model ready");
                if self.stream.is_some() {
                    Some(EnableStep::AlreadyActive)
                } else {
                    Some(EnableStep::OpenCamera(generation))
                }
            }
            Err(e) => {
                log::error!("[gesture] {}", e);
                if self.is_current(generation) {
                    self.status = GestureStatus::ErrorLoading;
                }
                None
            }
        }
    }

    /// Record the camera request outcome. Returns the generation the
    /// prediction loop must run under, if one should start.
    pub fn finish_camera(&mut self, generation: u64, result: Result<S, GestureError>) -> Option<u64> {
        match result {
            Ok(mut stream) => {
                if !self.is_current(generation) || self.stream.is_some() {
                    stream.stop();
                    return None;
                }
                stream.attach();
                self.stream = Some(stream);
                self.last_video_time = None;
                self.status = GestureStatus::Active;
                log::info!("[gesture] camera active");
                Some(generation)
            }
            Err(e) => {
                log::warn!("[gesture] {}", e);
                if self.is_current(generation) {
                    self.status = GestureStatus::CameraDenied;
                }
                None
            }
        }
    }

    /// One iteration of the prediction loop.
    ///
    /// Runs inference only when the video has advanced to a new frame.
    /// Returns `Stop` once the loop's generation is no longer current, and
    /// the caller must not schedule another iteration then.
    pub fn poll_frame(&mut self, generation: u64, timestamp_ms: f64) -> LoopControl {
        if !self.is_current(generation) {
            return LoopControl::Stop;
        }
        let outcome = match (self.recognizer.as_mut(), self.stream.as_ref()) {
            (Some(recognizer), Some(stream)) => match stream.frame_time() {
                Some(t) if self.last_video_time != Some(t) => {
                    self.last_video_time = Some(t);
                    Some(recognizer.recognize(stream, timestamp_ms))
                }
                _ => None,
            },
            _ => return LoopControl::Stop,
        };
        match outcome {
            Some(Ok(detections)) => self.apply_detections(&detections),
            Some(Err(e)) => log::warn!("[gesture] {}", e),
            None => {}
        }
        if self.is_current(generation) {
            LoopControl::Continue
        } else {
            LoopControl::Stop
        }
    }

    pub fn apply_detections(&mut self, detections: &[Detection]) {
        let (status, target) = classify(detections);
        self.status = status;
        self.target_scale = target;
    }

    /// Turn hand control off: invalidate the loop, release the camera, go offline.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.generation = self.generation.wrapping_add(1);
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            log::info!("[gesture] camera released");
        }
        self.last_video_time = None;
        self.status = GestureStatus::Offline;
    }
}

pub type SharedBridge<B> = Rc<
    RefCell<GestureBridge<<B as GestureBackend>::Recognizer, <B as GestureBackend>::Stream>>,
>;

/// Run the enable sequence: load the model if needed, then open the camera.
///
/// No borrow of the bridge is held across an await. Returns the generation
/// the prediction loop must be started with, or `None` if no loop should run.
pub async fn enable<B: GestureBackend>(bridge: &SharedBridge<B>, backend: &B) -> Option<u64> {
    let step = bridge.borrow_mut().begin_enable();
    let generation = match step {
        EnableStep::AlreadyActive => return None,
        EnableStep::OpenCamera(g) => g,
        EnableStep::LoadModel(g) => {
            let result = backend.load_model().await;
            let next = bridge.borrow_mut().finish_model_load(g, result);
            match next {
                Some(EnableStep::OpenCamera(g)) => g,
                _ => return None,
            }
        }
    };
    let result = backend.open_camera().await;
    bridge.borrow_mut().finish_camera(generation, result)
}
