//! Static rectangular obstacles
//!
//! Obstacles are axis-aligned boxes anchored at their top-left corner. They
//! never move and are only ever used as collision boundaries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An immutable axis-aligned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if a circle at `pos` overlaps this box grown by `radius` on every side
    pub fn overlaps_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x + radius > self.x
            && pos.x - radius < self.x + self.width
            && pos.y + radius > self.y
            && pos.y - radius < self.y + self.height
    }

    /// True if `point` lies strictly inside the box
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }

    /// Distance from the centre to the box edge along a unit direction
    pub fn edge_distance(&self, dir: Vec2) -> f32 {
        let half = self.half_extents();
        let tx = if dir.x.abs() > f32::EPSILON {
            half.x / dir.x.abs()
        } else {
            f32::INFINITY
        };
        let ty = if dir.y.abs() > f32::EPSILON {
            half.y / dir.y.abs()
        } else {
            f32::INFINITY
        };
        tx.min(ty)
    }
}
