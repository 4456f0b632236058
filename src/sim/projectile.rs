//! Projectiles
//!
//! Straight-line shots carrying an owner tag and a flat damage payload. The
//! owner decides which faction a shot can hurt and whether the bot damage
//! multiplier applies when it lands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PROJECTILE_RADIUS;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Player,
    Bot,
    Enemy,
}

impl Owner {
    /// Player and bot shots hurt enemies; enemy shots hurt the squad
    pub fn targets_enemies(&self) -> bool {
        matches!(self, Owner::Player | Owner::Bot)
    }

    /// Only squad bots get the settings damage multiplier
    pub fn uses_damage_multiplier(&self) -> bool {
        *self == Owner::Bot
    }
}

/// A projectile entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: Owner,
    pub damage: f32,
    pub radius: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2, owner: Owner, damage: f32) -> Self {
        Self {
            pos,
            vel,
            owner,
            damage,
            radius: PROJECTILE_RADIUS,
        }
    }

    /// Fire from `origin` toward `target` at `speed`
    ///
    /// Returns `None` when the target coincides with the origin.
    pub fn aimed(origin: Vec2, target: Vec2, speed: f32, owner: Owner, damage: f32) -> Option<Self> {
        let dir = crate::direction(origin, target)?;
        Some(Self::new(origin, dir * speed, owner, damage))
    }

    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Damage dealt on impact given the current settings multiplier
    pub fn impact_damage(&self, damage_multiplier: f32) -> f32 {
        if self.owner.uses_damage_multiplier() {
            self.damage * damage_multiplier
        } else {
            self.damage
        }
    }
}
