//! Game tuning values
//!
//! A `Config` is built once, validated, and then passed by reference into the
//! simulation. Gameplay never mutates it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Immutable tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Arena
    pub arena_width: f32,
    pub arena_height: f32,

    // Basket
    pub basket_width: f32,
    pub basket_height: f32,
    pub basket_speed: f32,
    pub basket_margin: f32,

    // Gold
    pub gold_min_size: f32,
    pub gold_max_size: f32,
    pub gold_min_speed: f32,
    pub gold_max_speed: f32,
    pub gold_max_rotation_speed: f32,

    // Spawning
    pub spawn_rate: f32,
    pub spawn_rate_increase: f32,
    pub spawn_rate_step: f32,

    // Session
    pub initial_timer: f32,

    // Scoring
    pub score_multiplier: f32,
    pub size_bonus_multiplier: f32,
    pub collision_padding: f32,

    // Effects
    pub pickup_flash_duration: f32,
    pub particle_count: u32,
    pub particle_lifetime: f32,
    pub particle_gravity: f32,
    pub particle_min_size: f32,
    pub particle_max_size: f32,

    // Frame pacing
    pub max_frame_dt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_speed: BASKET_SPEED,
            basket_margin: BASKET_MARGIN,
            gold_min_size: GOLD_MIN_SIZE,
            gold_max_size: GOLD_MAX_SIZE,
            gold_min_speed: GOLD_MIN_SPEED,
            gold_max_speed: GOLD_MAX_SPEED,
            gold_max_rotation_speed: GOLD_MAX_ROTATION_SPEED,
            spawn_rate: SPAWN_RATE,
            spawn_rate_increase: SPAWN_RATE_INCREASE,
            spawn_rate_step: SPAWN_RATE_STEP,
            initial_timer: INITIAL_TIMER,
            score_multiplier: SCORE_MULTIPLIER,
            size_bonus_multiplier: SIZE_BONUS_MULTIPLIER,
            collision_padding: COLLISION_PADDING,
            pickup_flash_duration: PICKUP_FLASH_DURATION,
            particle_count: PARTICLE_COUNT,
            particle_lifetime: PARTICLE_LIFETIME,
            particle_gravity: PARTICLE_GRAVITY,
            particle_min_size: PARTICLE_MIN_SIZE,
            particle_max_size: PARTICLE_MAX_SIZE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Config {
    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that the values describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }

        for (name, value) in [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("basket_width", self.basket_width),
            ("basket_height", self.basket_height),
            ("basket_speed", self.basket_speed),
            ("gold_min_size", self.gold_min_size),
            ("gold_min_speed", self.gold_min_speed),
            ("spawn_rate", self.spawn_rate),
            ("spawn_rate_step", self.spawn_rate_step),
            ("initial_timer", self.initial_timer),
            ("score_multiplier", self.score_multiplier),
            ("size_bonus_multiplier", self.size_bonus_multiplier),
            ("particle_lifetime", self.particle_lifetime),
            ("max_frame_dt", self.max_frame_dt),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        for (name, min, max) in [
            ("gold size", self.gold_min_size, self.gold_max_size),
            ("gold speed", self.gold_min_speed, self.gold_max_speed),
            ("particle size", self.particle_min_size, self.particle_max_size),
        ] {
            if min > max {
                return Err(ConfigError::InvertedRange { name, min, max });
            }
        }

        for (name, value) in [
            ("basket_margin", self.basket_margin),
            ("spawn_rate_increase", self.spawn_rate_increase),
            ("particle_min_size", self.particle_min_size),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        let margin = 2.0 * self.basket_margin;
        if self.basket_width + margin > self.arena_width
            || self.basket_height + margin > self.arena_height
        {
            return Err(ConfigError::ArenaTooSmall {
                what: "basket",
                arena_width: self.arena_width,
                arena_height: self.arena_height,
                width: self.basket_width + margin,
                height: self.basket_height + margin,
            });
        }

        // Spawn x is drawn from [max_size, width - max_size]
        let span = 2.0 * self.gold_max_size;
        if span > self.arena_width {
            return Err(ConfigError::ArenaTooSmall {
                what: "gold spawn lane",
                arena_width: self.arena_width,
                arena_height: self.arena_height,
                width: span,
                height: span,
            });
        }

        // Radius never exceeds gold_max_size, so this is the best single catch
        let best_catch = self.score_multiplier * self.size_bonus_multiplier;
        if best_catch > MAX_POINTS_PER_CATCH as f32 {
            return Err(ConfigError::PointValueTooLarge {
                value: best_catch,
                max: MAX_POINTS_PER_CATCH,
            });
        }

        if !(0.0..self.gold_min_size).contains(&self.collision_padding) {
            return Err(ConfigError::PaddingTooLarge {
                padding: self.collision_padding,
                min_size: self.gold_min_size,
            });
        }

        Ok(())
    }

    fn named_values(&self) -> [(&'static str, f32); 24] {
        [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("basket_width", self.basket_width),
            ("basket_height", self.basket_height),
            ("basket_speed", self.basket_speed),
            ("basket_margin", self.basket_margin),
            ("gold_min_size", self.gold_min_size),
            ("gold_max_size", self.gold_max_size),
            ("gold_min_speed", self.gold_min_speed),
            ("gold_max_speed", self.gold_max_speed),
            ("gold_max_rotation_speed", self.gold_max_rotation_speed),
            ("spawn_rate", self.spawn_rate),
            ("spawn_rate_increase", self.spawn_rate_increase),
            ("spawn_rate_step", self.spawn_rate_step),
            ("initial_timer", self.initial_timer),
            ("score_multiplier", self.score_multiplier),
            ("size_bonus_multiplier", self.size_bonus_multiplier),
            ("collision_padding", self.collision_padding),
            ("pickup_flash_duration", self.pickup_flash_duration),
            ("particle_lifetime", self.particle_lifetime),
            ("particle_gravity", self.particle_gravity),
            ("particle_min_size", self.particle_min_size),
            ("particle_max_size", self.particle_max_size),
            ("max_frame_dt", self.max_frame_dt),
        ]
    }

    /// Spawns per second after `elapsed` seconds of play
    pub fn spawn_rate_at(&self, elapsed: f32) -> f32 {
        let steps = (elapsed.max(0.0) / self.spawn_rate_step).floor();
        self.spawn_rate + steps * self.spawn_rate_increase
    }

    /// Basket position limits as `(min_x, max_x, min_y, max_y)`
    pub fn basket_bounds(&self) -> (f32, f32, f32, f32) {
        (
            self.basket_margin,
            self.arena_width - self.basket_width - self.basket_margin,
            self.basket_margin,
            self.arena_height - self.basket_height - self.basket_margin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_gold_size_fails_fast() {
        let config = Config {
            gold_min_size: 40.0,
            gold_max_size: 20.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { name: "gold size", .. }));
        assert!(err.to_string().contains("gold size"));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let config = Config {
            spawn_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "spawn_rate", .. })
        ));

        let config = Config {
            arena_width: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let cases = [
            Config {
                gold_max_size: f32::NAN,
                ..Default::default()
            },
            Config {
                gold_max_speed: f32::INFINITY,
                ..Default::default()
            },
            Config {
                particle_max_size: f32::NAN,
                ..Default::default()
            },
            Config {
                arena_width: f32::INFINITY,
                ..Default::default()
            },
            Config {
                particle_gravity: f32::NEG_INFINITY,
                ..Default::default()
            },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::NonFinite { .. })
            ));
        }
    }

    #[test]
    fn test_point_value_limit() {
        let config = Config {
            score_multiplier: 1e12,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PointValueTooLarge { .. })
        ));

        let at_limit = Config {
            score_multiplier: 1e5,
            size_bonus_multiplier: 10.0,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_basket_must_fit() {
        let config = Config {
            basket_width: 790.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ArenaTooSmall { what: "basket", .. })
        ));
    }

    #[test]
    fn test_padding_bounded_by_min_size() {
        let config = Config {
            collision_padding: 15.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PaddingTooLarge { .. })
        ));
    }

    #[test]
    fn test_json_override_keeps_defaults() {
        let config = Config::from_json(r#"{ "initial_timer": 30.0 }"#).unwrap();
        assert_eq!(config.initial_timer, 30.0);
        assert_eq!(config.arena_width, ARENA_WIDTH);

        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(Config::from_json(r#"{ "gold_min_size": 50.0 }"#).is_err());
    }

    #[test]
    fn test_spawn_rate_steps_every_ten_seconds() {
        let config = Config::default();
        assert_eq!(config.spawn_rate_at(0.0), 1.0);
        assert_eq!(config.spawn_rate_at(9.99), 1.0);
        assert!((config.spawn_rate_at(10.0) - 1.2).abs() < 1e-6);
        assert!((config.spawn_rate_at(25.0) - 1.4).abs() < 1e-6);
    }
}
