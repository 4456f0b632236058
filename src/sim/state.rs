//! World state and the fixed battlefield layout
//!
//! The world owns every entity collection plus the settings and the random
//! source. Nothing else mutates it; see [`super::tick`] for the update order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::agent::Agent;
use super::bot::Bot;
use super::enemy::Enemy;
use super::obstacle::Obstacle;
use super::player::Player;
use super::projectile::Projectile;
use crate::consts::*;
use crate::error::SettingsError;
use crate::settings::Settings;

/// Where the player starts
pub const PLAYER_SPAWN: Vec2 = Vec2::new(100.0, 100.0);

/// Squad call-signs and start positions
pub const SQUAD: [(&str, Vec2); 3] = [
    ("Alpha", Vec2::new(150.0, 150.0)),
    ("Bravo", Vec2::new(50.0, 150.0)),
    ("Charlie", Vec2::new(100.0, 200.0)),
];

/// Static obstacle layout
pub const OBSTACLE_LAYOUT: [Obstacle; 6] = [
    Obstacle::new(400.0, 300.0, 100.0, 100.0),
    Obstacle::new(700.0, 200.0, 150.0, 80.0),
    Obstacle::new(1000.0, 400.0, 120.0, 120.0),
    Obstacle::new(300.0, 600.0, 80.0, 200.0),
    Obstacle::new(1200.0, 700.0, 200.0, 100.0),
    Obstacle::new(1500.0, 300.0, 100.0, 150.0),
];

/// Enemy wave spawn points, far from the squad start
pub const ENEMY_SPAWN_POINTS: [Vec2; 5] = [
    Vec2::new(1700.0, 200.0),
    Vec2::new(1600.0, 800.0),
    Vec2::new(1800.0, 500.0),
    Vec2::new(1500.0, 100.0),
    Vec2::new(1750.0, 900.0),
];

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World<R = Pcg32> {
    /// Field bounds (projectiles leaving them are culled)
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub bots: Vec<Bot>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub settings: Settings,
    /// Simulated seconds elapsed
    pub time: f64,
    /// Ticks processed
    pub ticks: u64,
    /// Enemy waves spawned so far (including the first)
    pub waves_spawned: u32,
    pub rng: R,
}

impl World<Pcg32> {
    /// Standard battlefield with an entropy-seeded generator
    pub fn new(settings: Settings) -> Self {
        Self::with_seed(settings, rand::random())
    }

    /// Standard battlefield with a reproducible generator
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, Pcg32::seed_from_u64(seed))
    }
}

impl<R> World<R> {
    /// Standard battlefield: player, three bots, obstacles and a first wave
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        let mut world = Self::bare(settings, rng);
        world.bots = SQUAD
            .iter()
            .map(|(name, pos)| Bot::new(*name, *pos, &world.settings))
            .collect();
        world.obstacles = OBSTACLE_LAYOUT.to_vec();
        world.spawn_enemy_wave();
        log::info!(
            "World ready: {} bots, {} enemies, {} obstacles",
            world.bots.len(),
            world.enemies.len(),
            world.obstacles.len()
        );
        world
    }

    /// Empty field containing only the player
    pub fn bare(settings: Settings, rng: R) -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            player: Player::new(PLAYER_SPAWN),
            bots: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            settings,
            time: 0.0,
            ticks: 0,
            waves_spawned: 0,
            rng,
        }
    }

    /// Add one enemy at every spawn point
    pub fn spawn_enemy_wave(&mut self) {
        self.enemies
            .extend(ENEMY_SPAWN_POINTS.iter().map(|&pos| Enemy::new(pos)));
        self.waves_spawned += 1;
    }

    /// Replace the settings and push them to every bot
    ///
    /// Invalid settings are rejected and the previous value is kept.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        for bot in &mut self.bots {
            bot.apply_settings(&self.settings);
        }
        log::info!(
            "Settings applied: damage x{}, speed {}",
            settings.damage_multiplier,
            settings.movement_speed.as_str()
        );
        Ok(())
    }

    pub fn live_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub fn live_bot_count(&self) -> usize {
        self.bots.iter().filter(|b| b.is_alive()).count()
    }
}
