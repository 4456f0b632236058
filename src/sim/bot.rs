//! Squad bot AI
//!
//! Each bot runs a small timed state machine:
//!
//! - `Follow`: trail the player with per-tick jitter so the squad clusters
//!   loosely instead of stacking on one spot
//! - `Engage`: strafe sideways around the nearest enemy at reduced speed
//! - `Cover`: hold a point behind the nearest obstacle, away from the enemy
//! - `Flank`: swing out to a point 90° off the line to the enemy
//!
//! A state is kept until its timer runs out. Only then is the nearest enemy
//! checked and a new state rolled. Movement for every state goes through
//! [`Bot::seek`], which has a small dead-zone and resolves obstacles per axis.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Cooldown, Health};
use super::collision::slide_move;
use super::enemy::Enemy;
use super::obstacle::Obstacle;
use super::player::Player;
use super::projectile::{Owner, Projectile};
use super::random::RandomSource;
use crate::consts::*;
use crate::settings::Settings;

/// Bot behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BotState {
    #[default]
    Follow,
    Engage,
    Cover,
    Flank,
}

impl BotState {
    /// Label shown under the bot
    pub fn label(&self) -> &'static str {
        match self {
            BotState::Follow => "FOLLOW",
            BotState::Engage => "ENGAGE",
            BotState::Cover => "COVER",
            BotState::Flank => "FLANK",
        }
    }

    /// Seconds the bot stays in this state before re-evaluating
    pub fn commitment(&self) -> f32 {
        match self {
            BotState::Follow => BOT_FOLLOW_COMMIT,
            BotState::Engage => BOT_ENGAGE_COMMIT,
            BotState::Cover => BOT_COVER_COMMIT,
            BotState::Flank => BOT_FLANK_COMMIT,
        }
    }

    /// Map a uniform roll to a combat state
    pub fn from_roll(roll: f32) -> Self {
        if roll < 0.5 {
            BotState::Engage
        } else if roll < 0.75 {
            BotState::Cover
        } else {
            BotState::Flank
        }
    }
}

/// An AI squad member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    /// Call-sign
    pub name: String,
    pub pos: Vec2,
    pub radius: f32,
    pub health: Health,
    /// Current speed (base speed scaled by the movement tier)
    pub speed: f32,
    pub cooldown: Cooldown,
    pub state: BotState,
    /// Seconds left before the state is re-evaluated
    pub state_timer: f32,
    /// Index of the nearest live enemy, recomputed every tick
    pub target: Option<usize>,
    pub cover_point: Option<Vec2>,
    pub flank_point: Option<Vec2>,
}

impl Bot {
    pub fn new(name: impl Into<String>, pos: Vec2, settings: &Settings) -> Self {
        let mut bot = Self {
            name: name.into(),
            pos,
            radius: BOT_RADIUS,
            health: Health::new(BOT_MAX_HEALTH),
            speed: BOT_BASE_SPEED,
            cooldown: Cooldown::new(BOT_SHOOT_DELAY),
            state: BotState::Follow,
            state_timer: 0.0,
            target: None,
            cover_point: None,
            flank_point: None,
        };
        bot.apply_settings(settings);
        bot
    }

    /// Recompute derived values from new settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.speed = BOT_BASE_SPEED * settings.movement_speed.multiplier();
    }

    /// Enter `state` for `duration` seconds, dropping any old waypoints
    pub fn commit(&mut self, state: BotState, duration: f32) {
        if state != self.state {
            log::debug!("Bot {}: {} -> {}", self.name, self.state.label(), state.label());
        }
        self.state = state;
        self.state_timer = duration;
        self.cover_point = None;
        self.flank_point = None;
    }

    /// Advance one tick: decide, then move
    pub fn update(
        &mut self,
        dt: f32,
        player: &Player,
        enemies: &[Enemy],
        obstacles: &[Obstacle],
        rng: &mut impl RandomSource,
    ) {
        self.cooldown.tick(dt);
        self.state_timer -= dt;

        self.think(enemies, obstacles, rng);
        self.act(dt, player, enemies, obstacles, rng);
    }

    /// Track the nearest enemy and, once the timer has run out, pick a state
    fn think(&mut self, enemies: &[Enemy], obstacles: &[Obstacle], rng: &mut impl RandomSource) {
        let nearest = crate::nearest(
            self.pos,
            enemies
                .iter()
                .enumerate()
                .filter(|(_, e)| e.is_alive())
                .map(|(i, e)| (i, e.pos)),
        );
        self.target = nearest.map(|(i, _)| i);

        if self.state_timer > 0.0 {
            return;
        }

        match nearest {
            Some((idx, dist)) if dist < BOT_ENGAGE_RANGE => {
                let threat = enemies[idx].pos;
                let state = BotState::from_roll(rng.unit());
                match state {
                    BotState::Cover => {
                        let cover = self.find_cover(obstacles, threat);
                        self.commit(state, state.commitment());
                        self.cover_point = cover;
                    }
                    BotState::Flank => {
                        let flank = self.flank_position(threat, rng);
                        self.commit(state, state.commitment());
                        self.flank_point = Some(flank);
                    }
                    _ => self.commit(state, state.commitment()),
                }
            }
            _ => self.commit(BotState::Follow, BotState::Follow.commitment()),
        }
    }

    fn act(
        &mut self,
        dt: f32,
        player: &Player,
        enemies: &[Enemy],
        obstacles: &[Obstacle],
        rng: &mut impl RandomSource,
    ) {
        match self.state {
            BotState::Follow => self.follow(dt, player, obstacles, rng),
            BotState::Engage => match self.tracked(enemies).map(|e| e.pos) {
                Some(enemy_pos) => {
                    if let Some(dir) = crate::direction(self.pos, enemy_pos) {
                        let strafe = self.pos + dir.perp() * BOT_STRAFE_OFFSET;
                        self.seek(strafe, dt, obstacles, BOT_STRAFE_SPEED_MULT);
                    }
                }
                None => self.follow(dt, player, obstacles, rng),
            },
            BotState::Cover => match self.cover_point {
                Some(point) => self.seek(point, dt, obstacles, 1.0),
                None => self.follow(dt, player, obstacles, rng),
            },
            BotState::Flank => match self.flank_point {
                Some(point) => self.seek(point, dt, obstacles, 1.0),
                None => self.follow(dt, player, obstacles, rng),
            },
        }
    }

    fn follow(
        &mut self,
        dt: f32,
        player: &Player,
        obstacles: &[Obstacle],
        rng: &mut impl RandomSource,
    ) {
        let jitter_x = (rng.unit() - 0.5) * BOT_FOLLOW_JITTER;
        let jitter_y = (rng.unit() - 0.5) * BOT_FOLLOW_JITTER;
        let target = player.pos + Vec2::new(jitter_x, jitter_y);
        self.seek(target, dt, obstacles, 1.0);
    }

    /// Steer toward `target`, stopping inside the arrive radius
    pub fn seek(&mut self, target: Vec2, dt: f32, obstacles: &[Obstacle], speed_mult: f32) {
        let offset = target - self.pos;
        let dist = offset.length();
        if dist <= BOT_ARRIVE_RADIUS {
            return;
        }
        let step = offset / dist * self.speed * speed_mult * dt;
        self.pos = slide_move(self.pos, step, self.radius, obstacles);
    }

    /// Point just behind the nearest obstacle, on the side away from `threat`
    pub fn find_cover(&self, obstacles: &[Obstacle], threat: Vec2) -> Option<Vec2> {
        let (idx, _) = crate::nearest(
            self.pos,
            obstacles.iter().map(Obstacle::center).enumerate(),
        )?;
        let obs = &obstacles[idx];
        let center = obs.center();
        let away = crate::direction(threat, center)
            .or_else(|| crate::direction(center, self.pos))
            .unwrap_or(Vec2::NEG_X);
        Some(center + away * (obs.edge_distance(away) + BOT_COVER_MARGIN))
    }

    /// Point [`BOT_FLANK_DISTANCE`] from the enemy, 90° off the line to it
    pub fn flank_position(&self, enemy_pos: Vec2, rng: &mut impl RandomSource) -> Vec2 {
        let dir = crate::direction(self.pos, enemy_pos).unwrap_or(Vec2::X);
        let side = if rng.unit() > 0.5 { dir.perp() } else { -dir.perp() };
        enemy_pos + side * BOT_FLANK_DISTANCE
    }

    /// The enemy currently tracked, if it still exists and is alive
    pub fn tracked<'a>(&self, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
        self.target
            .and_then(|idx| enemies.get(idx))
            .filter(|e| e.is_alive())
    }

    pub fn should_shoot(&self, enemies: &[Enemy]) -> bool {
        match self.tracked(enemies) {
            Some(enemy) => self.cooldown.ready() && self.pos.distance(enemy.pos) < BOT_FIRE_RANGE,
            None => false,
        }
    }

    /// Fire at the tracked enemy
    ///
    /// Damage is the base value; the settings multiplier is applied on impact.
    pub fn shoot(&mut self, enemies: &[Enemy]) -> Option<Projectile> {
        if !self.cooldown.ready() {
            return None;
        }
        let enemy = self.tracked(enemies)?;
        let projectile = Projectile::aimed(
            self.pos,
            enemy.pos,
            BOT_SHOT_SPEED,
            Owner::Bot,
            BOT_SHOT_DAMAGE,
        )?;
        self.cooldown.trigger();
        Some(projectile)
    }
}

impl Agent for Bot {
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
