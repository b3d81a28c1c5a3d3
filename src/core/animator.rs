use super::camera::Camera;
use super::constants::*;
use super::params::Params;
use glam::{Mat4, Quat, Vec2, Vec3};

/// Exponential approach used for gesture-driven sizing.
#[inline]
pub fn smooth_toward(current: f32, target: f32, blend: f32) -> f32 {
    current + blend * (target - current)
}

#[inline]
pub fn star_pulse(time: f32) -> f32 {
    1.0 + (time * STAR_PULSE_FREQUENCY).sin() * STAR_PULSE_AMPLITUDE
}

/// What the gesture bridge contributes to a tick.
#[derive(Clone, Copy, Debug)]
pub struct GestureFeed<'a> {
    pub target_scale: f32,
    pub status: &'a str,
}

/// Per-frame motion state: time, tree yaw, size uniform, star transform, camera.
#[derive(Clone, Debug)]
pub struct Animator {
    pub camera: Camera,
    time: f32,
    tree_rotation: f32,
    size_scale: f32,
    star_rotation: f32,
    star_scale: f32,
}

impl Animator {
    pub fn new(size_scale: f32) -> Self {
        Self {
            camera: Camera::default(),
            time: 0.0,
            tree_rotation: 0.0,
            size_scale,
            star_rotation: 0.0,
            star_scale: 1.0,
        }
    }

    /// Advance everything except snow. `elapsed` is seconds since the scene started.
    pub fn tick(&mut self, elapsed: f32, params: &mut Params, gesture: GestureFeed, pointer_ndc: Vec2) {
        if params.enable_gesture_control {
            self.size_scale = smooth_toward(self.size_scale, gesture.target_scale, GESTURE_BLEND);
            params.mirror_global_size(self.size_scale);
        }
        params.set_gesture_status(gesture.status);

        self.tree_rotation += params.rotation_speed * ROTATION_STEP;
        self.time = elapsed;

        self.star_rotation = elapsed * STAR_SPIN;
        self.star_scale = star_pulse(elapsed);

        self.camera.drift_toward_pointer(pointer_ndc);
    }

    pub fn set_size_scale(&mut self, v: f32) {
        self.size_scale = v;
    }

    #[inline]
    pub fn size_scale(&self) -> f32 {
        self.size_scale
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn tree_rotation(&self) -> f32 {
        self.tree_rotation
    }

    #[inline]
    pub fn star_rotation(&self) -> f32 {
        self.star_rotation
    }

    #[inline]
    pub fn star_scale(&self) -> f32 {
        self.star_scale
    }

    pub fn tree_model(&self) -> Mat4 {
        Mat4::from_rotation_y(self.tree_rotation)
    }

    pub fn star_model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.star_scale),
            Quat::from_rotation_y(self.star_rotation),
            Vec3::new(0.0, STAR_HEIGHT, 0.0),
        )
    }
}
