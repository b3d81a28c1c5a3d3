use super::animator::{Animator, GestureFeed};
use super::constants::{MAX_PARTICLES, MAX_SNOW};
use super::params::{ParamError, ParamKey, ParamValue, Params, SceneChange};
use super::particles::{Palette, TreeParticles};
use super::snow::SnowField;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// GPU-side data that changed since the renderer last looked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Dirty {
    pub tree_colors: bool,
    pub star_color: bool,
    pub bloom: bool,
}

/// Everything the frame loop simulates: parameters, tree, snow and motion.
pub struct Scene {
    params: Params,
    tree: TreeParticles,
    snow: SnowField,
    animator: Animator,
    rng: StdRng,
    dirty: Dirty,
}

impl Scene {
    pub fn new(params: Params, rng: StdRng) -> Self {
        Self::with_capacity(params, MAX_PARTICLES, MAX_SNOW, rng)
    }

    pub fn with_seed(params: Params, seed: u64) -> Self {
        Self::new(params, StdRng::seed_from_u64(seed))
    }

    pub fn with_capacity(params: Params, max_particles: usize, max_snow: usize, mut rng: StdRng) -> Self {
        let tree = TreeParticles::generate(
            max_particles,
            params.particle_count,
            &palette_of(&params),
            &mut rng,
        );
        let snow = SnowField::new(max_snow, params.snow_density, &mut rng);
        let animator = Animator::new(params.global_size);
        Self {
            params,
            tree,
            snow,
            animator,
            rng,
            dirty: Dirty {
                tree_colors: true,
                star_color: true,
                bloom: true,
            },
        }
    }

    /// Apply a panel edit and carry out the scene-side part of its effect.
    ///
    /// The returned change tells the caller what is left for it to do
    /// (gesture toggling, gesture target sync).
    pub fn apply(&mut self, key: ParamKey, value: ParamValue) -> Result<SceneChange, ParamError> {
        let change = self.params.set(key, value)?;
        match change {
            SceneChange::TreeDrawRange(n) => {
                self.tree.set_visible(n);
            }
            SceneChange::SnowDrawRange(n) => {
                self.snow.set_visible(n);
            }
            SceneChange::SizeScale(v) => self.animator.set_size_scale(v),
            SceneChange::Recolor => {
                self.tree.recolor(&palette_of(&self.params));
                self.dirty.tree_colors = true;
            }
            SceneChange::RecolorWithStar => {
                self.tree.recolor(&palette_of(&self.params));
                self.dirty.tree_colors = true;
                self.dirty.star_color = true;
            }
            SceneChange::Bloom => self.dirty.bloom = true,
            SceneChange::Twinkle(_) | SceneChange::GestureControl(_) | SceneChange::None => {}
        }
        Ok(change)
    }

    /// One display frame of simulation.
    pub fn tick(&mut self, elapsed: f32, gesture: GestureFeed, pointer_ndc: Vec2) {
        self.animator
            .tick(elapsed, &mut self.params, gesture, pointer_ndc);
        self.snow.step(self.params.snow_speed, &mut self.rng);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.animator.camera.set_viewport(width, height);
    }

    pub fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    #[inline]
    pub fn tree(&self) -> &TreeParticles {
        &self.tree
    }

    #[inline]
    pub fn snow(&self) -> &SnowField {
        &self.snow
    }

    #[inline]
    pub fn animator(&self) -> &Animator {
        &self.animator
    }
}

pub fn palette_of(params: &Params) -> Palette {
    Palette {
        tree: params.tree_color,
        ornament: params.ornament_color,
        light: params.light_color,
    }
}
