//! Squad Skirmish - top-down squad combat simulation
//!
//! Core modules:
//! - `sim`: Simulation core (entities, AI, collision, world tick)
//! - `game_loop`: Frame scheduler with start/stop/pause/resume
//! - `settings`: Squad settings pushed by the options panel
//! - `error`: Errors raised at the settings boundary

pub mod error;
pub mod game_loop;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use game_loop::GameLoop;
pub use settings::{MovementSpeed, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest simulated step accepted per frame (seconds)
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1920.0;
    pub const FIELD_HEIGHT: f32 = 1080.0;

    /// Player stats
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 250.0;
    pub const PLAYER_SHOOT_DELAY: f32 = 0.2;
    pub const PLAYER_SHOT_SPEED: f32 = 800.0;
    pub const PLAYER_SHOT_DAMAGE: f32 = 25.0;

    /// Bot stats (speed is scaled by the movement tier)
    pub const BOT_RADIUS: f32 = 18.0;
    pub const BOT_MAX_HEALTH: f32 = 100.0;
    pub const BOT_BASE_SPEED: f32 = 200.0;
    pub const BOT_SHOOT_DELAY: f32 = 0.35;
    pub const BOT_SHOT_SPEED: f32 = 700.0;
    pub const BOT_SHOT_DAMAGE: f32 = 20.0;
    /// Bots only open fire inside this range
    pub const BOT_FIRE_RANGE: f32 = 500.0;

    /// Bot AI tuning
    pub const BOT_ENGAGE_RANGE: f32 = 400.0;
    pub const BOT_FOLLOW_COMMIT: f32 = 2.0;
    pub const BOT_ENGAGE_COMMIT: f32 = 3.0;
    pub const BOT_COVER_COMMIT: f32 = 4.0;
    pub const BOT_FLANK_COMMIT: f32 = 3.0;
    /// Follow target jitter (full width, centred on the player)
    pub const BOT_FOLLOW_JITTER: f32 = 100.0;
    pub const BOT_STRAFE_OFFSET: f32 = 50.0;
    /// Engage strafing runs at a fraction of full speed
    pub const BOT_STRAFE_SPEED_MULT: f32 = 0.3;
    pub const BOT_FLANK_DISTANCE: f32 = 200.0;
    /// Distance a cover point sits beyond the obstacle edge
    pub const BOT_COVER_MARGIN: f32 = 30.0;
    /// Steering dead-zone around a seek target
    pub const BOT_ARRIVE_RADIUS: f32 = 20.0;

    /// Enemy stats
    pub const ENEMY_RADIUS: f32 = 18.0;
    pub const ENEMY_MAX_HEALTH: f32 = 80.0;
    pub const ENEMY_SPEED: f32 = 120.0;
    pub const ENEMY_SHOOT_DELAY: f32 = 1.2;
    pub const ENEMY_SHOT_SPEED: f32 = 500.0;
    pub const ENEMY_SHOT_DAMAGE: f32 = 15.0;
    /// Enemies close in beyond this distance and strafe inside it
    pub const ENEMY_STRAFE_RANGE: f32 = 300.0;
    pub const ENEMY_STRAFE_SPEED_MULT: f32 = 0.5;

    /// Projectile collision radius (also the agent hit tolerance)
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Respawn policy
    pub const ENEMY_FLOOR: usize = 3;
}

/// Unit direction from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Index and distance of the closest indexed point to `origin`
///
/// Ties keep the earliest candidate.
pub fn nearest<I>(origin: Vec2, points: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = (usize, Vec2)>,
{
    points
        .into_iter()
        .map(|(i, p)| (i, origin.distance(p)))
        .fold(None, |best, (i, d)| match best {
            Some((_, best_d)) if best_d <= d => best,
            _ => Some((i, d)),
        })
}
