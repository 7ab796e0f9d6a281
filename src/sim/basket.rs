//! The player's basket

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::DirectionalIntent;
use crate::clamp;
use crate::config::Config;

/// Player-controlled catcher. Position is its top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Seconds of highlight left after a catch
    pub flash_timer: f32,
}

impl Basket {
    /// Fresh basket at bottom-center
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Vec2::new(
                (config.arena_width - config.basket_width) / 2.0,
                config.arena_height - config.basket_height - config.basket_margin,
            ),
            size: Vec2::new(config.basket_width, config.basket_height),
            vel: Vec2::ZERO,
            flash_timer: 0.0,
        }
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vel = Vec2::new(vx, vy);
    }

    /// Derive velocity from the directional intent. Opposite directions cancel.
    pub fn steer(&mut self, intent: DirectionalIntent, config: &Config) {
        let axis = intent.axis();
        self.set_velocity(axis.x * config.basket_speed, axis.y * config.basket_speed);
    }

    /// Integrate, keep inside the arena margins and count down the flash
    pub fn advance(&mut self, dt: f32, config: &Config) {
        let (min_x, max_x, min_y, max_y) = config.basket_bounds();
        self.pos += self.vel * dt;
        self.pos.x = clamp(self.pos.x, min_x, max_x);
        self.pos.y = clamp(self.pos.y, min_y, max_y);
        self.flash_timer = (self.flash_timer - dt).max(0.0);
    }

    pub fn trigger_flash(&mut self, config: &Config) {
        self.flash_timer = config.pickup_flash_duration;
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    pub fn collision_bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}
