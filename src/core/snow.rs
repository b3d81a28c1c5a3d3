use super::arena::PointArena;
use super::constants::*;
use glam::Vec3;
use rand::Rng;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SnowFlake {
    pub position: [f32; 3],
    pub _pad: f32,
}

/// Falling snow in a fixed box. Velocities are assigned once and never change.
pub struct SnowField {
    flakes: PointArena<SnowFlake>,
    velocities: Vec<Vec3>,
}

impl SnowField {
    pub fn new<R: Rng + ?Sized>(capacity: usize, visible: usize, rng: &mut R) -> Self {
        let mut flakes = Vec::with_capacity(capacity);
        let mut velocities = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            flakes.push(SnowFlake {
                position: [
                    rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT),
                    rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT),
                    rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT),
                ],
                _pad: 0.0,
            });
            velocities.push(Vec3::new(
                (rng.gen::<f32>() - 0.5) * SNOW_DRIFT,
                -SNOW_FALL_MIN - rng.gen::<f32>() * SNOW_FALL_SPAN,
                (rng.gen::<f32>() - 0.5) * SNOW_DRIFT,
            ));
        }
        Self {
            flakes: PointArena::new(flakes, visible),
            velocities,
        }
    }

    /// Advance one frame. Covers the full capacity, not just the visible
    /// prefix, so hidden flakes stay spread out for when density goes up.
    pub fn step<R: Rng + ?Sized>(&mut self, speed: f32, rng: &mut R) {
        for (flake, vel) in self.flakes.all_mut().iter_mut().zip(&self.velocities) {
            let p = &mut flake.position;
            p[0] += vel.x * speed;
            p[1] += vel.y * speed;
            p[2] += vel.z * speed;
            if p[1] < SNOW_FLOOR {
                p[1] = SNOW_RESPAWN_HEIGHT;
                p[0] = rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT);
                p[2] = rng.gen_range(-SNOW_HALF_EXTENT..SNOW_HALF_EXTENT);
            }
        }
    }

    pub fn set_visible(&mut self, count: usize) -> usize {
        self.flakes.set_visible(count)
    }

    #[inline]
    pub fn flakes(&self) -> &PointArena<SnowFlake> {
        &self.flakes
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }
}
