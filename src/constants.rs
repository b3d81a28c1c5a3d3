// Render tuning constants used by the web frontend.

// Exponential fog, matching the page background (#020502)
pub const FOG_SRGB: [u8; 3] = [0x02, 0x05, 0x02];
pub const FOG_DENSITY: f32 = 0.025;

// Tone mapping
pub const TONE_MAPPING_EXPOSURE: f32 = 1.1;

// Canvas clear behind the scene, linear RGB
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0006,
    g: 0.0015,
    b: 0.0006,
    a: 1.0,
};

// DOM ids the page provides
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "webcam-preview";
pub const PANEL_ID: &str = "panel";

// MediaPipe Tasks Vision assets
pub const VISION_WASM_URL: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.8/wasm";
pub const GESTURE_MODEL_URL: &str = "https://storage.googleapis.com/mediapipe-models/gesture_recognizer/gesture_recognizer/float16/1/gesture_recognizer.task";
