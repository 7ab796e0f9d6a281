//! Falling gold pieces

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Circle;
use crate::config::Config;
use crate::random_range;

/// A falling gold piece
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Gold {
    pub pos: Vec2,
    pub radius: f32,
    /// Fall speed in pixels/s
    pub speed: f32,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Cosmetic shimmer phase (radians)
    pub shimmer: f32,
    pub collected: bool,
}

impl Gold {
    /// Reset to a fresh piece at `(x, y)` with a random size
    pub fn spawn<R: Rng>(&mut self, config: &Config, rng: &mut R, x: f32, y: f32) {
        let radius = random_range(rng, config.gold_min_size, config.gold_max_size);
        let rotation_speed = random_range(
            rng,
            -config.gold_max_rotation_speed,
            config.gold_max_rotation_speed,
        );
        self.reset(config, x, y, radius, rotation_speed);
    }

    /// Reset with explicit size and spin
    pub fn reset(&mut self, config: &Config, x: f32, y: f32, radius: f32, rotation_speed: f32) {
        self.pos = Vec2::new(x, y);
        self.radius = radius;
        self.speed = fall_speed(config, radius);
        self.rotation = 0.0;
        self.rotation_speed = rotation_speed;
        self.shimmer = 0.0;
        self.collected = false;
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos.y += self.speed * dt;
        self.rotation += self.rotation_speed * dt;
        self.shimmer += dt * 3.0;
    }

    /// Fully past the bottom edge
    pub fn is_below_arena(&self, config: &Config) -> bool {
        self.pos.y - self.radius > config.arena_height
    }

    /// Hit circle, shrunk by the collision padding
    pub fn collision_bounds(&self, config: &Config) -> Circle {
        Circle {
            center: self.pos,
            radius: self.radius - config.collision_padding,
        }
    }

    /// Points awarded for catching this piece
    pub fn point_value(&self, config: &Config) -> u32 {
        point_value(config, self.radius)
    }
}

/// Larger pieces fall slower: the largest falls at the midpoint of the speed range
pub fn fall_speed(config: &Config, radius: f32) -> f32 {
    let size_span = config.gold_max_size - config.gold_min_size;
    let size_factor = if size_span > 0.0 {
        ((radius - config.gold_min_size) / size_span).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let speed_span = config.gold_max_speed - config.gold_min_speed;
    config.gold_min_speed + speed_span * (1.0 - size_factor * 0.5)
}

/// Larger pieces are worth more
pub fn point_value(config: &Config, radius: f32) -> u32 {
    let value =
        config.score_multiplier * (radius / config.gold_max_size) * config.size_bonus_multiplier;
    value.max(0.0).floor() as u32
}
