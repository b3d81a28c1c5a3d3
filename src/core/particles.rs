use super::arena::PointArena;
use super::color::Rgb;
use super::constants::*;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Tree,
    Ornament,
    Light,
}

impl ParticleKind {
    /// Pick a kind from a uniform sample in [0, 1).
    #[inline]
    pub fn from_sample(u: f32) -> Self {
        if u > LIGHT_CUTOFF {
            ParticleKind::Light
        } else if u > ORNAMENT_CUTOFF {
            ParticleKind::Ornament
        } else {
            ParticleKind::Tree
        }
    }

    #[inline]
    pub fn base_size(&self) -> f32 {
        match self {
            ParticleKind::Tree => TREE_BASE_SIZE,
            ParticleKind::Ornament => ORNAMENT_BASE_SIZE,
            ParticleKind::Light => LIGHT_BASE_SIZE,
        }
    }
}

/// Per-instance vertex data for one tree point, laid out for the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TreePoint {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

/// The three colors recoloring reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub tree: Rgb,
    pub ornament: Rgb,
    pub light: Rgb,
}

impl Palette {
    #[inline]
    pub fn color_for(&self, kind: ParticleKind) -> Rgb {
        match kind {
            ParticleKind::Tree => self.tree,
            ParticleKind::Ornament => self.ornament,
            ParticleKind::Light => self.light,
        }
    }
}

/// Cone-shaped tree made of a fixed number of points.
pub struct TreeParticles {
    points: PointArena<TreePoint>,
    kinds: Vec<ParticleKind>,
}

impl TreeParticles {
    /// Place `capacity` points inside the tapering cone and color them.
    pub fn generate<R: Rng + ?Sized>(
        capacity: usize,
        visible: usize,
        palette: &Palette,
        rng: &mut R,
    ) -> Self {
        let mut points = Vec::with_capacity(capacity);
        let mut kinds = Vec::with_capacity(capacity);
        for i in 0..capacity {
            let h: f32 = rng.gen_range(0.0..TREE_HEIGHT);
            let max_radius = TREE_BASE_RADIUS * (1.0 - h / TREE_TAPER_HEIGHT);
            let spin = h * SPIRAL_TWIST_PER_HEIGHT + i as f32 * SPIRAL_TWIST_PER_INDEX;
            // sqrt keeps points area-uniform across each horizontal disc
            let r = max_radius * rng.gen::<f32>().sqrt();

            let kind = ParticleKind::from_sample(rng.gen::<f32>());
            let size = kind.base_size() * (SIZE_JITTER_MIN + rng.gen::<f32>());

            points.push(TreePoint {
                position: [r * spin.cos(), h + TREE_Y_OFFSET, r * spin.sin()],
                size,
                color: palette.color_for(kind).to_array(),
                _pad: 0.0,
            });
            kinds.push(kind);
        }
        log::debug!("[tree] generated {} points", capacity);
        Self {
            points: PointArena::new(points, visible),
            kinds,
        }
    }

    /// Rewrite every point's color from its kind. Touches nothing else.
    pub fn recolor(&mut self, palette: &Palette) {
        for (p, kind) in self.points.all_mut().iter_mut().zip(&self.kinds) {
            p.color = palette.color_for(*kind).to_array();
        }
    }

    pub fn set_visible(&mut self, count: usize) -> usize {
        self.points.set_visible(count)
    }

    #[inline]
    pub fn points(&self) -> &PointArena<TreePoint> {
        &self.points
    }

    #[inline]
    pub fn kinds(&self) -> &[ParticleKind] {
        &self.kinds
    }
}
