pub mod animator;
pub mod arena;
pub mod camera;
pub mod color;
pub mod constants;
pub mod gesture;
pub mod params;
pub mod particles;
pub mod scene;
pub mod snow;
pub mod star;

pub use animator::*;
pub use color::Rgb;
pub use constants::*;
pub use gesture::*;
pub use params::*;
pub use scene::*;

// Shaders bundled as string constants
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
