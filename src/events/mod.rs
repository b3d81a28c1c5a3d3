pub mod pointer;

pub use pointer::{wire_canvas_resize, wire_pointer_tracking};
