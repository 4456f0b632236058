//! Hostile agents
//!
//! Enemies have no state machine. Every tick they pick the closest squad
//! member, close distance while far away and circle-strafe once inside
//! [`ENEMY_STRAFE_RANGE`]. They always shoot at the player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Cooldown, Health};
use super::bot::Bot;
use super::collision::slide_move;
use super::obstacle::Obstacle;
use super::player::Player;
use super::projectile::{Owner, Projectile};
use crate::consts::*;

/// A hostile agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub health: Health,
    pub speed: f32,
    pub cooldown: Cooldown,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: ENEMY_RADIUS,
            health: Health::new(ENEMY_MAX_HEALTH),
            speed: ENEMY_SPEED,
            cooldown: Cooldown::new(ENEMY_SHOOT_DELAY),
        }
    }

    /// Closest of the player and the live bots, with its distance
    pub fn nearest_target(&self, player: &Player, bots: &[Bot]) -> (Vec2, f32) {
        let mut best = (player.pos, self.pos.distance(player.pos));
        for bot in bots.iter().filter(|bot| bot.is_alive()) {
            let dist = self.pos.distance(bot.pos);
            if dist < best.1 {
                best = (bot.pos, dist);
            }
        }
        best
    }

    pub fn update(&mut self, dt: f32, player: &Player, bots: &[Bot], obstacles: &[Obstacle]) {
        self.cooldown.tick(dt);

        let (target, dist) = self.nearest_target(player, bots);
        let Some(dir) = crate::direction(self.pos, target) else {
            return;
        };

        let step = if dist > ENEMY_STRAFE_RANGE {
            dir * self.speed * dt
        } else {
            dir.perp() * self.speed * dt * ENEMY_STRAFE_SPEED_MULT
        };
        self.pos = slide_move(self.pos, step, self.radius, obstacles);
    }

    pub fn can_shoot(&self) -> bool {
        self.cooldown.ready()
    }

    /// Fire at the player's position
    pub fn shoot(&mut self, player_pos: Vec2) -> Option<Projectile> {
        if !self.can_shoot() {
            return None;
        }
        let projectile = Projectile::aimed(
            self.pos,
            player_pos,
            ENEMY_SHOT_SPEED,
            Owner::Enemy,
            ENEMY_SHOT_DAMAGE,
        )?;
        self.cooldown.trigger();
        Some(projectile)
    }
}

impl Agent for Enemy {
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
