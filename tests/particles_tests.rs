// Host-side tests for tree particle generation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tree_core {
    pub mod arena {
        include!("../src/core/arena.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
}

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::color::Rgb;
use tree_core::constants::*;
use tree_core::particles::*;

fn palette() -> Palette {
    Palette {
        tree: Rgb::from_hex("#00ff41").unwrap(),
        ornament: Rgb::from_hex("#ff0033").unwrap(),
        light: Rgb::from_hex("#ffd700").unwrap(),
    }
}

fn tree(capacity: usize, visible: usize, seed: u64) -> TreeParticles {
    let mut rng = StdRng::seed_from_u64(seed);
    TreeParticles::generate(capacity, visible, &palette(), &mut rng)
}

#[test]
fn kind_split_thresholds() {
    assert_eq!(ParticleKind::from_sample(0.0), ParticleKind::Tree);
    assert_eq!(ParticleKind::from_sample(0.84), ParticleKind::Tree);
    assert_eq!(ParticleKind::from_sample(0.85), ParticleKind::Ornament);
    assert_eq!(ParticleKind::from_sample(0.92), ParticleKind::Ornament);
    assert_eq!(ParticleKind::from_sample(0.93), ParticleKind::Light);
    assert_eq!(ParticleKind::from_sample(0.999), ParticleKind::Light);
}

#[test]
fn points_stay_inside_the_tapered_cone() {
    let t = tree(3000, 3000, 7);
    for p in t.points().all() {
        let [x, y, z] = p.position;
        let h = y - TREE_Y_OFFSET;
        assert!(h >= -1e-5 && h <= TREE_HEIGHT + 1e-5, "height {h} out of range");
        let max_r = TREE_BASE_RADIUS * (1.0 - h / TREE_TAPER_HEIGHT);
        let r = (x * x + z * z).sqrt();
        assert!(r <= max_r + 1e-4, "radius {r} exceeds {max_r} at h={h}");
    }
}

#[test]
fn sizes_and_colors_follow_kind() {
    let t = tree(3000, 3000, 11);
    let pal = palette();
    for (p, kind) in t.points().all().iter().zip(t.kinds()) {
        let base = kind.base_size();
        assert!(p.size >= base * 0.5 - 1e-6 && p.size < base * 1.5 + 1e-6);
        assert_eq!(p.color, pal.color_for(*kind).to_array());
    }
}

#[test]
fn kind_proportions_match_thresholds() {
    let t = tree(MAX_PARTICLES, MAX_PARTICLES, 3);
    let n = t.kinds().len() as f32;
    let count = |k: ParticleKind| t.kinds().iter().filter(|x| **x == k).count() as f32 / n;
    assert!((count(ParticleKind::Tree) - 0.84).abs() < 0.02);
    assert!((count(ParticleKind::Ornament) - 0.08).abs() < 0.015);
    assert!((count(ParticleKind::Light) - 0.08).abs() < 0.015);
}

#[test]
fn draw_range_tracks_requested_count() {
    let mut t = tree(500, 100, 1);
    assert_eq!(t.points().draw_range(), 0..100);
    for requested in [0usize, 1, 250, 499, 500, 501, 20_000] {
        let applied = t.set_visible(requested);
        assert_eq!(applied, requested.min(500));
        assert_eq!(t.points().draw_range(), 0..applied as u32);
        assert_eq!(t.points().visible_slice().len(), applied);
        assert_eq!(t.points().capacity(), 500);
    }
}

#[test]
fn visible_count_never_moves_points() {
    let mut t = tree(400, 400, 5);
    let before: Vec<_> = t.points().all().to_vec();
    t.set_visible(10);
    t.set_visible(400);
    assert_eq!(t.points().all(), &before[..]);
}

#[test]
fn recolor_is_idempotent_and_keeps_geometry() {
    let mut t = tree(600, 600, 9);
    let before: Vec<_> = t.points().all().to_vec();
    let white = Palette {
        tree: Rgb::from_srgb8(0xff, 0xff, 0xff),
        ornament: Rgb::from_hex("#0000ff").unwrap(),
        light: Rgb::from_hex("#ff00ff").unwrap(),
    };
    t.recolor(&white);
    let once: Vec<_> = t.points().all().to_vec();
    t.recolor(&white);
    assert_eq!(t.points().all(), &once[..]);

    for ((a, b), kind) in before.iter().zip(&once).zip(t.kinds()) {
        assert_eq!(a.position, b.position);
        assert_eq!(a.size, b.size);
        assert_eq!(b.color, white.color_for(*kind).to_array());
    }
}

#[test]
fn same_seed_same_tree() {
    let a = tree(200, 200, 42);
    let b = tree(200, 200, 42);
    assert_eq!(a.points().all(), b.points().all());
    assert_eq!(a.kinds(), b.kinds());
}

#[test]
fn gpu_layout_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<TreePoint>(), 32);
}
