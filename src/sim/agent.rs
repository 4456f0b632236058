//! State shared by every combat agent
//!
//! Player, bots and enemies all carry clamped health and a shot cooldown, and
//! all of them can be hit by projectiles through the [`Agent`] trait.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Hit points clamped to `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Subtract damage; negative amounts are ignored
    pub fn take_damage(&mut self, amount: f32) {
        let amount = amount.max(0.0);
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

/// Seconds until the next shot is permitted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    pub remaining: f32,
    pub delay: f32,
}

impl Cooldown {
    /// Starts ready to fire
    pub fn new(delay: f32) -> Self {
        Self {
            remaining: 0.0,
            delay,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn trigger(&mut self) {
        self.remaining = self.delay;
    }
}

/// Anything a projectile can hit
pub trait Agent {
    fn position(&self) -> Vec2;
    fn radius(&self) -> f32;
    fn health(&self) -> &Health;
    fn take_damage(&mut self, amount: f32);

    fn is_alive(&self) -> bool {
        self.health().is_alive()
    }
}
