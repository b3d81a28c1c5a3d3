// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn kind_cutoffs_are_ordered() {
    assert!(0.0 < ORNAMENT_CUTOFF && ORNAMENT_CUTOFF < LIGHT_CUTOFF && LIGHT_CUTOFF < 1.0);
    assert!(TREE_BASE_SIZE < ORNAMENT_BASE_SIZE && ORNAMENT_BASE_SIZE < LIGHT_BASE_SIZE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn gesture_targets_are_ordered() {
    assert!(SCALE_SHRINK < SCALE_NEUTRAL && SCALE_NEUTRAL < SCALE_EXPLODE);
    assert!(GESTURE_BLEND > 0.0 && GESTURE_BLEND < 1.0);
    assert!(GESTURE_CONFIDENCE_MIN > 0.0 && GESTURE_CONFIDENCE_MIN < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tree_tapers_but_never_closes() {
    assert!(TREE_TAPER_HEIGHT > TREE_HEIGHT);
    assert!(TREE_BASE_RADIUS > 0.0);
    // the star sits above the top of the cone
    assert!(STAR_HEIGHT > TREE_HEIGHT + TREE_Y_OFFSET);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn snow_box_is_consistent() {
    assert_eq!(SNOW_FLOOR, -SNOW_HALF_EXTENT);
    assert_eq!(SNOW_RESPAWN_HEIGHT, SNOW_HALF_EXTENT);
    assert!(SNOW_FALL_MIN > 0.0 && SNOW_FALL_SPAN > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_tone_mapping() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_DAMPING > 0.0 && CAMERA_DAMPING < 1.0);
    assert!(FOG_DENSITY > 0.0);
    assert!(TONE_MAPPING_EXPOSURE > 0.0);
    assert_eq!(FOG_SRGB, [0x02, 0x05, 0x02]);
}

#[test]
fn asset_locations() {
    assert!(GESTURE_MODEL_URL.ends_with(".task"));
    assert!(VISION_WASM_URL.ends_with("/wasm"));
    for id in [CANVAS_ID, VIDEO_ID, PANEL_ID] {
        assert!(!id.is_empty());
    }
}
