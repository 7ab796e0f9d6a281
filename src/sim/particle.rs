//! Sparkle particles emitted on a catch. Visual only.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::random_range;

/// Gold-ish tints for catch bursts (0xRRGGBB)
pub const SPARKLE_COLORS: [u32; 4] = [0xFFD700, 0xFFC125, 0xFFEC8B, 0xFFFFFF];

/// A short-lived particle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: u32,
}

impl Particle {
    pub fn spawn<R: Rng>(rng: &mut R, config: &Config, x: f32, y: f32, color: u32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(
                random_range(rng, -100.0, 100.0),
                random_range(rng, -150.0, -50.0),
            ),
            life: config.particle_lifetime,
            max_life: config.particle_lifetime,
            size: random_range(rng, config.particle_min_size, config.particle_max_size),
            color,
        }
    }

    pub fn advance(&mut self, dt: f32, gravity: f32) {
        self.pos += self.vel * dt;
        self.vel.y += gravity * dt;
        self.life -= dt;
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Remaining life as a fade factor in `[0, 1]`
    pub fn alpha(&self) -> f32 {
        if self.max_life > 0.0 {
            (self.life / self.max_life).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Emit `count` particles at `(x, y)`
pub fn burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    config: &Config,
    x: f32,
    y: f32,
    count: u32,
) {
    for _ in 0..count {
        let color = SPARKLE_COLORS[rng.random_range(0..SPARKLE_COLORS.len())];
        particles.push(Particle::spawn(rng, config, x, y, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_velocity_ranges() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, &config, 0.0, 0.0, 0xFFD700);
            assert!((-100.0..100.0).contains(&p.vel.x));
            assert!((-150.0..-50.0).contains(&p.vel.y));
            assert_eq!(p.life, config.particle_lifetime);
        }
    }

    #[test]
    fn test_gravity_pulls_down_and_life_runs_out() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::spawn(&mut rng, &config, 0.0, 0.0, 0xFFFFFF);
        let vy = p.vel.y;
        p.advance(0.5, config.particle_gravity);
        assert!((p.vel.y - (vy + config.particle_gravity * 0.5)).abs() < 1e-3);
        assert!(!p.is_expired());
        assert!((p.alpha() - 0.5).abs() < 1e-6);
        p.advance(0.5, config.particle_gravity);
        assert!(p.is_expired());
        assert_eq!(p.alpha(), 0.0);
    }

    #[test]
    fn test_burst_emits_count() {
        let config = Config::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        burst(&mut particles, &mut rng, &config, 5.0, 6.0, 10);
        assert_eq!(particles.len(), 10);
        assert!(particles.iter().all(|p| SPARKLE_COLORS.contains(&p.color)));
    }
}
