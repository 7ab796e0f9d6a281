//! Error types
//!
//! Only static configuration errors are fatal. Storage errors are reported to
//! the caller, which logs them and carries on.

use thiserror::Error;

/// Invalid tuning values, detected before any session starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name}: minimum {min} is greater than maximum {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error(
        "arena {arena_width}x{arena_height} cannot hold {what} of size {width}x{height}"
    )]
    ArenaTooSmall {
        what: &'static str,
        arena_width: f32,
        arena_height: f32,
        width: f32,
        height: f32,
    },
    #[error("collision padding {padding} must be in [0, {min_size})")]
    PaddingTooLarge { padding: f32, min_size: f32 },
    #[error("largest catch is worth {value} points, limit is {max}")]
    PointValueTooLarge { value: f32, max: u32 },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// High score storage failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored high score is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage unavailable")]
    Unavailable,
}
