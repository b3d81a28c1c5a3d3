// Host-side tests for the snow field.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tree_core {
    pub mod arena {
        include!("../src/core/arena.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod snow {
        include!("../src/core/snow.rs");
    }
}

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::constants::*;
use tree_core::snow::*;

fn field(capacity: usize, visible: usize) -> (SnowField, StdRng) {
    let mut rng = StdRng::seed_from_u64(21);
    let f = SnowField::new(capacity, visible, &mut rng);
    (f, rng)
}

#[test]
fn flakes_start_inside_the_box() {
    let (f, _) = field(1000, 1000);
    for flake in f.flakes().all() {
        for c in flake.position {
            assert!((-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT).contains(&c));
        }
    }
}

#[test]
fn velocities_fall_and_drift_within_bounds() {
    let (f, _) = field(1000, 1000);
    for v in f.velocities() {
        assert!(v.y <= -SNOW_FALL_MIN + 1e-7);
        assert!(v.y > -(SNOW_FALL_MIN + SNOW_FALL_SPAN) - 1e-7);
        assert!(v.x.abs() <= SNOW_DRIFT * 0.5 + 1e-7);
        assert!(v.z.abs() <= SNOW_DRIFT * 0.5 + 1e-7);
    }
}

#[test]
fn no_flake_ends_a_step_below_the_floor() {
    let (mut f, mut rng) = field(500, 500);
    for _ in 0..2000 {
        f.step(5.0, &mut rng);
        assert!(f
            .flakes()
            .all()
            .iter()
            .all(|s| s.position[1] >= SNOW_FLOOR));
    }
}

#[test]
fn recycled_flakes_restart_at_the_top() {
    let (mut f, mut rng) = field(300, 300);
    let mut respawns = 0;
    for _ in 0..1500 {
        let before: Vec<f32> = f.flakes().all().iter().map(|s| s.position[1]).collect();
        f.step(3.0, &mut rng);
        for (old_y, s) in before.iter().zip(f.flakes().all()) {
            if s.position[1] > *old_y {
                respawns += 1;
                assert_eq!(s.position[1], SNOW_RESPAWN_HEIGHT);
                assert!(s.position[0].abs() <= SNOW_HALF_EXTENT);
                assert!(s.position[2].abs() <= SNOW_HALF_EXTENT);
            }
        }
    }
    assert!(respawns > 0);
}

#[test]
fn hidden_flakes_keep_moving() {
    let (mut f, mut rng) = field(200, 0);
    assert_eq!(f.flakes().draw_range(), 0..0);
    let before: Vec<_> = f.flakes().all().to_vec();
    f.step(1.0, &mut rng);
    for (a, b) in before.iter().zip(f.flakes().all()) {
        assert_ne!(a.position, b.position);
    }
}

#[test]
fn velocities_never_change() {
    let (mut f, mut rng) = field(200, 200);
    let before = f.velocities().to_vec();
    for _ in 0..800 {
        f.step(4.0, &mut rng);
    }
    assert_eq!(f.velocities(), &before[..]);
}

#[test]
fn zero_speed_freezes_the_storm() {
    let (mut f, mut rng) = field(100, 100);
    let before: Vec<_> = f.flakes().all().to_vec();
    f.step(0.0, &mut rng);
    assert_eq!(f.flakes().all(), &before[..]);
}

#[test]
fn density_is_clamped_to_capacity() {
    let (mut f, _) = field(MAX_SNOW, 1000);
    assert_eq!(f.flakes().visible(), 1000);
    assert_eq!(f.set_visible(MAX_SNOW + 50), MAX_SNOW);
    assert_eq!(f.set_visible(0), 0);
    assert_eq!(f.flakes().capacity(), MAX_SNOW);
}
