//! Gold Rush - catch the falling gold before the clock runs out
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, game state)
//! - `config`: Immutable tuning values, validated at startup
//! - `platform`: Frame clock, input aggregation and the collaborator wiring
//! - `persistence`: High score storage backends
//! - `audio`: Sound effect sinks

pub mod audio;
pub mod config;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use config::Config;
pub use error::{ConfigError, StoreError};
pub use highscores::HighScore;
pub use settings::Settings;

use rand::Rng;

/// Default tuning constants
pub mod consts {
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 60.0;
    /// Pixels per second along each axis
    pub const BASKET_SPEED: f32 = 400.0;
    /// Gap kept between the basket and the arena edges
    pub const BASKET_MARGIN: f32 = 10.0;

    /// Gold radius range
    pub const GOLD_MIN_SIZE: f32 = 15.0;
    pub const GOLD_MAX_SIZE: f32 = 35.0;
    /// Fall speed range (pixels/s). Larger pieces fall slower.
    pub const GOLD_MIN_SPEED: f32 = 100.0;
    pub const GOLD_MAX_SPEED: f32 = 250.0;
    /// Cosmetic spin range (radians/s)
    pub const GOLD_MAX_ROTATION_SPEED: f32 = 5.0;

    /// Base spawns per second
    pub const SPAWN_RATE: f32 = 1.0;
    /// Spawns per second added every `SPAWN_RATE_STEP` seconds
    pub const SPAWN_RATE_INCREASE: f32 = 0.2;
    pub const SPAWN_RATE_STEP: f32 = 10.0;

    /// Session length in seconds
    pub const INITIAL_TIMER: f32 = 60.0;

    /// Scoring
    pub const SCORE_MULTIPLIER: f32 = 10.0;
    pub const SIZE_BONUS_MULTIPLIER: f32 = 1.5;
    /// Upper bound on a single catch, keeps session totals far from `u32::MAX`
    pub const MAX_POINTS_PER_CATCH: u32 = 1_000_000;
    /// Shrinks the gold hit radius relative to its visual radius
    pub const COLLISION_PADDING: f32 = 5.0;

    /// Basket highlight after a catch (seconds)
    pub const PICKUP_FLASH_DURATION: f32 = 0.2;

    /// Particle burst per catch
    pub const PARTICLE_COUNT: u32 = 10;
    pub const PARTICLE_LIFETIME: f32 = 1.0;
    pub const PARTICLE_GRAVITY: f32 = 300.0;
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 5.0;

    /// Largest frame step the frame clock will hand to the simulation
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Uniform float in `[min, max)`
#[inline]
pub fn random_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}

/// Uniform integer in `[min, max]`
#[inline]
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Clamp `v` into `[min, max]`. Unlike `f32::clamp` this never panics on
/// inverted bounds; the lower bound is checked first.
#[inline]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Format seconds as `M:SS`, truncating fractions
pub fn format_time(seconds: f32) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u32
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f32::NAN), "0:00");
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        // Inverted bounds resolve to min
        assert_eq!(clamp(3.0, 10.0, 0.0), 10.0);
    }

    #[test]
    fn test_random_helpers_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let f = random_range(&mut rng, -5.0, 5.0);
            assert!((-5.0..5.0).contains(&f));
            let i = random_int(&mut rng, 1, 3);
            assert!((1..=3).contains(&i));
        }
        assert_eq!(random_int(&mut rng, 4, 4), 4);
        assert_eq!(random_int(&mut rng, 9, 2), 9);
    }
}
