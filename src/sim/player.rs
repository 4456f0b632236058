//! The human-controlled player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Cooldown, Health};
use super::collision::slide_move;
use super::obstacle::Obstacle;
use super::projectile::{Owner, Projectile};
use super::tick::TickInput;
use crate::consts::*;

/// The player agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: Health,
    pub speed: f32,
    pub cooldown: Cooldown,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: Health::new(PLAYER_MAX_HEALTH),
            speed: PLAYER_SPEED,
            cooldown: Cooldown::new(PLAYER_SHOOT_DELAY),
        }
    }

    /// Move from the held direction keys and run down the shot cooldown
    pub fn update(&mut self, dt: f32, input: &TickInput, obstacles: &[Obstacle]) {
        if let Some(dir) = input.move_intent().try_normalize() {
            self.pos = slide_move(self.pos, dir * self.speed * dt, self.radius, obstacles);
        }
        self.cooldown.tick(dt);
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown.ready()
    }

    /// Fire toward `target`; `None` while cooling down or when aiming at self
    pub fn shoot(&mut self, target: Vec2) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        let projectile = Projectile::aimed(
            self.pos,
            target,
            PLAYER_SHOT_SPEED,
            Owner::Player,
            PLAYER_SHOT_DAMAGE,
        )?;
        self.cooldown.trigger();
        Some(projectile)
    }
}

impl Agent for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn take_damage(&mut self, amount: f32) {
        self.health.take_damage(amount);
    }
}
