// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn centre_of_window_is_origin() {
    assert_eq!(client_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn corners_map_to_unit_square_with_y_up() {
    assert_eq!(client_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(client_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
}

#[test]
fn positions_outside_the_window_are_clamped() {
    let p = client_to_ndc(-50.0, 900.0, 800.0, 600.0);
    assert_eq!(p, Vec2::new(-1.0, -1.0));
}

#[test]
fn degenerate_window_gives_origin() {
    assert_eq!(client_to_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    assert_eq!(client_to_ndc(10.0, 10.0, 800.0, -1.0), Vec2::ZERO);
}

#[test]
fn pointer_state_defaults_to_centre() {
    assert_eq!(PointerState::default().ndc, Vec2::ZERO);
}

#[test]
fn backing_size_caps_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 1.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 3.0), (1600, 1200));
    assert_eq!(backing_size(800.0, 600.0, 0.5), (800, 600));
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
}

#[test]
fn narrow_viewports_collapse_the_panel() {
    assert!(is_narrow_viewport(375.0));
    assert!(is_narrow_viewport(767.9));
    assert!(!is_narrow_viewport(768.0));
    assert!(!is_narrow_viewport(1440.0));
}
