//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Time only advances through `tick(dt)`
//! - Seeded RNG only
//! - Stable iteration order (pool spawn order)
//! - No rendering or platform dependencies

pub mod basket;
pub mod collision;
pub mod gold;
pub mod particle;
pub mod pool;
pub mod state;
pub mod tick;

pub use basket::Basket;
pub use collision::{Circle, Rect, circle_intersects_rect};
pub use gold::Gold;
pub use particle::Particle;
pub use pool::{Handle, Pool};
pub use state::{
    DirectionalIntent, GameEvent, GamePhase, GameState, MAX_PARTICLES, Session, Signal, Snapshot,
};
pub use tick::{TickInput, tick};
