use glam::Vec3;

// Scene layout and tuning constants shared by the core and the web frontend.

// Buffer capacities
pub const MAX_PARTICLES: usize = 15_000;
pub const MAX_SNOW: usize = 3_000;

// Tree volume: heights in [0, TREE_HEIGHT), radius tapers to zero at TREE_TAPER_HEIGHT
pub const TREE_HEIGHT: f32 = 5.0;
pub const TREE_TAPER_HEIGHT: f32 = 5.5;
pub const TREE_BASE_RADIUS: f32 = 2.5;
pub const TREE_Y_OFFSET: f32 = -2.5; // shifts the cone so its middle sits near the origin
pub const SPIRAL_TWIST_PER_HEIGHT: f32 = 4.0;
pub const SPIRAL_TWIST_PER_INDEX: f32 = 0.05;

// Kind split: u > LIGHT_CUTOFF is a light, u > ORNAMENT_CUTOFF an ornament
pub const LIGHT_CUTOFF: f32 = 0.92;
pub const ORNAMENT_CUTOFF: f32 = 0.84;

pub const TREE_BASE_SIZE: f32 = 0.04;
pub const ORNAMENT_BASE_SIZE: f32 = 0.08;
pub const LIGHT_BASE_SIZE: f32 = 0.12;
pub const SIZE_JITTER_MIN: f32 = 0.5; // size = base * (MIN + U[0,1))

// Snow box
pub const SNOW_HALF_EXTENT: f32 = 10.0;
pub const SNOW_FLOOR: f32 = -10.0;
pub const SNOW_RESPAWN_HEIGHT: f32 = 10.0;
pub const SNOW_FALL_MIN: f32 = 0.01; // per-frame downward speed lower bound
pub const SNOW_FALL_SPAN: f32 = 0.03;
pub const SNOW_DRIFT: f32 = 0.01; // horizontal drift spans [-DRIFT/2, DRIFT/2)

// Motion
pub const ROTATION_STEP: f32 = 0.05; // tree yaw per tick = rotationSpeed * ROTATION_STEP
pub const STAR_HEIGHT: f32 = 2.6;
pub const STAR_SPIN: f32 = 1.5; // radians per second
pub const STAR_PULSE_AMPLITUDE: f32 = 0.2;
pub const STAR_PULSE_FREQUENCY: f32 = 3.0;
pub const TWINKLE_AMPLITUDE: f32 = 0.3;

// Star geometry
pub const STAR_POINTS: usize = 5;
pub const STAR_OUTER_RADIUS: f32 = 0.25;
pub const STAR_INNER_RADIUS: f32 = 0.12;
pub const STAR_DEPTH: f32 = 0.05;
pub const STAR_GLOW_RADIUS: f32 = 0.5;

// Camera
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 2.0, 8.0);
pub const CAMERA_LOOK_AT: Vec3 = Vec3::new(0.0, 0.5, 0.0);
pub const CAMERA_BASE_HEIGHT: f32 = 2.0;
pub const CAMERA_SWAY_X: f32 = 2.0; // world units per unit of pointer NDC
pub const CAMERA_SWAY_Y: f32 = 1.0;
pub const CAMERA_DAMPING: f32 = 0.02;

// Gesture control
pub const GESTURE_CONFIDENCE_MIN: f32 = 0.5;
pub const GESTURE_BLEND: f32 = 0.1; // size += BLEND * (target - size) per tick
pub const SCALE_SHRINK: f32 = 0.0;
pub const SCALE_NEUTRAL: f32 = 1.0;
pub const SCALE_EXPLODE: f32 = 5.0;
