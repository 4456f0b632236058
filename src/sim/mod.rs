//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, reads the
//! clock or touches the platform:
//! - Variable timestep supplied by the caller
//! - Randomness only through the world's [`RandomSource`]
//! - Stable iteration order (array order for bots, enemies and projectiles)

pub mod agent;
pub mod bot;
pub mod collision;
pub mod enemy;
pub mod obstacle;
pub mod player;
pub mod projectile;
pub mod random;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use agent::{Agent, Cooldown, Health};
pub use bot::{Bot, BotState};
pub use collision::{blocked, slide_move};
pub use enemy::Enemy;
pub use obstacle::Obstacle;
pub use player::Player;
pub use projectile::{Owner, Projectile};
pub use random::{RandomSource, ScriptedRandom};
pub use snapshot::{AgentView, BotView, ProjectileView, WorldSnapshot};
pub use state::{ENEMY_SPAWN_POINTS, OBSTACLE_LAYOUT, PLAYER_SPAWN, SQUAD, World};
pub use tick::{TickInput, tick};
