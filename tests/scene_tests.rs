// Host-side tests for per-frame animation and scene-level parameter effects.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tree_core {
    pub mod animator {
        include!("../src/core/animator.rs");
    }
    pub mod arena {
        include!("../src/core/arena.rs");
    }
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod params {
        include!("../src/core/params.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
    pub mod snow {
        include!("../src/core/snow.rs");
    }
}

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::animator::*;
use tree_core::color::Rgb;
use tree_core::constants::*;
use tree_core::params::*;
use tree_core::particles::ParticleKind;
use tree_core::scene::*;

const OFFLINE: GestureFeed<'static> = GestureFeed {
    target_scale: 1.0,
    status: "OFFLINE",
};

fn small_scene(seed: u64) -> Scene {
    Scene::with_capacity(Params::default(), 500, 200, StdRng::seed_from_u64(seed))
}

#[test]
fn smoothing_converges_geometrically() {
    let mut anim = Animator::new(1.0);
    let mut params = Params {
        enable_gesture_control: true,
        ..Params::default()
    };
    let feed = GestureFeed {
        target_scale: 5.0,
        status: "DETECTED: Open_Palm",
    };
    for n in 1..=30 {
        anim.tick(n as f32 / 60.0, &mut params, feed, Vec2::ZERO);
        let expected = 5.0 - 4.0 * 0.9f32.powi(n);
        assert!((anim.size_scale() - expected).abs() < 1e-4, "tick {n}");
        assert_eq!(params.global_size, anim.size_scale());
    }
    assert_eq!(params.gesture_status, "DETECTED: Open_Palm");
}

#[test]
fn fist_drives_size_below_the_slider_floor() {
    let mut anim = Animator::new(1.0);
    let mut params = Params {
        enable_gesture_control: true,
        ..Params::default()
    };
    let feed = GestureFeed {
        target_scale: 0.0,
        status: "DETECTED: Closed_Fist",
    };
    for n in 0..100 {
        anim.tick(n as f32 / 60.0, &mut params, feed, Vec2::ZERO);
    }
    assert!(params.global_size < 0.01);
}

#[test]
fn size_holds_while_hand_control_is_off() {
    let mut anim = Animator::new(2.0);
    let mut params = Params::default();
    let feed = GestureFeed {
        target_scale: 5.0,
        status: "OFFLINE",
    };
    for n in 0..10 {
        anim.tick(n as f32, &mut params, feed, Vec2::ZERO);
    }
    assert_eq!(anim.size_scale(), 2.0);
    assert_eq!(params.global_size, 1.0);
}

#[test]
fn rotation_accumulates_per_tick() {
    let mut anim = Animator::new(1.0);
    let mut params = Params::default();
    for n in 0..10 {
        anim.tick(n as f32 / 60.0, &mut params, OFFLINE, Vec2::ZERO);
    }
    assert!((anim.tree_rotation() - 10.0 * 0.1 * ROTATION_STEP).abs() < 1e-6);

    params.rotation_speed = 0.0;
    let held = anim.tree_rotation();
    anim.tick(1.0, &mut params, OFFLINE, Vec2::ZERO);
    assert_eq!(anim.tree_rotation(), held);
}

#[test]
fn star_spins_and_pulses_with_time() {
    let mut anim = Animator::new(1.0);
    let mut params = Params::default();
    let t = 0.7;
    anim.tick(t, &mut params, OFFLINE, Vec2::ZERO);
    assert_eq!(anim.time(), t);
    assert!((anim.star_rotation() - 1.5 * t).abs() < 1e-6);
    assert!((anim.star_scale() - (1.0 + (3.0 * t).sin() * 0.2)).abs() < 1e-6);
    assert_eq!(star_pulse(0.0), 1.0);

    let origin = anim.star_model().transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(0.0, STAR_HEIGHT, 0.0)).length() < 1e-6);
}

#[test]
fn camera_eases_toward_pointer() {
    let mut anim = Animator::new(1.0);
    let mut params = Params::default();
    let pointer = Vec2::new(1.0, -1.0);

    anim.tick(0.0, &mut params, OFFLINE, pointer);
    assert!((anim.camera.eye.x - 0.04).abs() < 1e-6);
    assert!((anim.camera.eye.y - 1.98).abs() < 1e-6);
    assert_eq!(anim.camera.eye.z, 8.0);
    assert_eq!(anim.camera.target, Vec3::new(0.0, 0.5, 0.0));

    for _ in 0..2000 {
        anim.tick(0.0, &mut params, OFFLINE, pointer);
    }
    assert!((anim.camera.eye.x - 2.0).abs() < 1e-3);
    assert!((anim.camera.eye.y - 1.0).abs() < 1e-3);
}

#[test]
fn smooth_toward_steps_a_tenth_of_the_gap() {
    assert!((smooth_toward(1.0, 5.0, 0.1) - 1.4).abs() < 1e-6);
    assert_eq!(smooth_toward(3.0, 3.0, 0.1), 3.0);
}

#[test]
fn scene_starts_with_everything_dirty() {
    let mut scene = small_scene(1);
    assert_eq!(
        scene.take_dirty(),
        Dirty {
            tree_colors: true,
            star_color: true,
            bloom: true
        }
    );
    assert_eq!(scene.take_dirty(), Dirty::default());
}

#[test]
fn visible_counts_are_clamped_to_capacity() {
    let scene = small_scene(2);
    assert_eq!(scene.tree().points().visible(), 500);
    assert_eq!(scene.tree().points().capacity(), 500);
    assert_eq!(scene.snow().flakes().visible(), 200);
}

#[test]
fn density_edits_only_move_the_draw_range() {
    let mut scene = small_scene(3);
    let before = scene.tree().points().all().to_vec();
    assert_eq!(
        scene.apply(ParamKey::ParticleCount, ParamValue::Number(250.0)),
        Ok(SceneChange::TreeDrawRange(250))
    );
    assert_eq!(scene.tree().points().draw_range(), 0..250);
    assert_eq!(scene.tree().points().all(), &before[..]);

    scene
        .apply(ParamKey::SnowDensity, ParamValue::Number(0.0))
        .unwrap();
    assert_eq!(scene.snow().flakes().draw_range(), 0..0);
}

#[test]
fn light_color_recolors_lights_and_star() {
    let mut scene = small_scene(4);
    scene.take_dirty();
    let blue = Rgb::from_hex("#0000ff").unwrap();
    scene
        .apply(ParamKey::LightColor, ParamValue::Color(blue))
        .unwrap();
    let dirty = scene.take_dirty();
    assert!(dirty.tree_colors && dirty.star_color && !dirty.bloom);

    let tree = scene.tree();
    for (p, kind) in tree.points().all().iter().zip(tree.kinds()) {
        if *kind == ParticleKind::Light {
            assert_eq!(p.color, blue.to_array());
        } else {
            assert_ne!(p.color, blue.to_array());
        }
    }
}

#[test]
fn bloom_and_size_edits() {
    let mut scene = small_scene(5);
    scene.take_dirty();
    scene
        .apply(ParamKey::BloomThreshold, ParamValue::Number(0.2))
        .unwrap();
    assert!(scene.take_dirty().bloom);

    scene
        .apply(ParamKey::GlobalSize, ParamValue::Number(3.0))
        .unwrap();
    assert_eq!(scene.animator().size_scale(), 3.0);
}

#[test]
fn rejected_edit_leaves_scene_untouched() {
    let mut scene = small_scene(6);
    scene.take_dirty();
    let params = scene.params().clone();
    assert!(scene
        .apply(ParamKey::TreeColor, ParamValue::Number(1.0))
        .is_err());
    assert_eq!(scene.params(), &params);
    assert_eq!(scene.take_dirty(), Dirty::default());
}

#[test]
fn tick_moves_snow_and_mirrors_status() {
    let mut scene = small_scene(7);
    let before = scene.snow().flakes().all().to_vec();
    scene.tick(
        0.016,
        GestureFeed {
            target_scale: 1.0,
            status: "SCANNING...",
        },
        Vec2::ZERO,
    );
    assert_ne!(scene.snow().flakes().all(), &before[..]);
    assert_eq!(scene.params().gesture_status, "SCANNING...");
}

#[test]
fn viewport_sets_aspect() {
    let mut scene = small_scene(8);
    scene.set_viewport(1920, 1080);
    assert!((scene.animator().camera.aspect - 16.0 / 9.0).abs() < 1e-6);
    scene.set_viewport(0, 0);
    assert_eq!(scene.animator().camera.aspect, 1.0);
}

#[test]
fn same_seed_builds_the_same_scene() {
    let a = Scene::with_seed(Params::default(), 99);
    let b = Scene::with_seed(Params::default(), 99);
    assert_eq!(a.tree().points().all(), b.tree().points().all());
    assert_eq!(a.snow().flakes().all(), b.snow().flakes().all());
    assert_eq!(a.tree().points().capacity(), MAX_PARTICLES);
    assert_eq!(a.snow().flakes().capacity(), MAX_SNOW);
}
