//! Collision shapes and the circle vs box test
//!
//! Gold pieces are circles, the basket is an axis-aligned box. Whether a catch
//! registers is decided entirely by `circle_intersects_rect`, so the test is
//! exact rather than a bounding-box approximation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A circle in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            radius,
        }
    }
}

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// Exact circle vs axis-aligned box intersection. Touching counts as a hit.
pub fn circle_intersects_rect(circle: &Circle, rect: &Rect) -> bool {
    let half = rect.half_extents();
    let dist = (circle.center - rect.center()).abs();

    // Too far along either axis
    if dist.x > half.x + circle.radius {
        return false;
    }
    if dist.y > half.y + circle.radius {
        return false;
    }

    // Center lies in the box's cross-shaped region
    if dist.x <= half.x {
        return true;
    }
    if dist.y <= half.y {
        return true;
    }

    // Corner region
    let corner = dist - half;
    corner.length_squared() <= circle.radius * circle.radius
}
