use super::constants::{
    CAMERA_BASE_HEIGHT, CAMERA_DAMPING, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_LOOK_AT, CAMERA_NEAR,
    CAMERA_START, CAMERA_SWAY_X, CAMERA_SWAY_Y,
};
use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: CAMERA_START,
            target: Vec3::new(0.0, 1.5, 0.0),
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Ease toward the pointer-derived position and re-aim at the tree.
    pub fn drift_toward_pointer(&mut self, pointer_ndc: Vec2) {
        let goal_x = pointer_ndc.x * CAMERA_SWAY_X;
        let goal_y = pointer_ndc.y * CAMERA_SWAY_Y + CAMERA_BASE_HEIGHT;
        self.eye.x += (goal_x - self.eye.x) * CAMERA_DAMPING;
        self.eye.y += (goal_y - self.eye.y) * CAMERA_DAMPING;
        self.target = CAMERA_LOOK_AT;
    }
}
