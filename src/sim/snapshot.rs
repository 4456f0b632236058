//! Read-only view of the world for presentation layers
//!
//! Renderers and HUDs consume this instead of reaching into [`World`]. It is
//! plain data and serializes to JSON.

use glam::Vec2;
use serde::Serialize;

use super::agent::{Agent, Health};
use super::obstacle::Obstacle;
use super::projectile::Owner;
use super::state::World;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub pos: Vec2,
    pub radius: f32,
    pub health: Health,
}

impl AgentView {
    fn of(agent: &impl Agent) -> Self {
        Self {
            pos: agent.position(),
            radius: agent.radius(),
            health: *agent.health(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotView {
    pub name: String,
    /// State label shown above the bot (FOLLOW, ENGAGE, ...)
    pub state: &'static str,
    #[serde(flatten)]
    pub agent: AgentView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
    pub owner: Owner,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    pub width: f32,
    pub height: f32,
    pub time: f64,
    pub player: AgentView,
    pub bots: Vec<BotView>,
    pub enemies: Vec<AgentView>,
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<Obstacle>,
    pub enemy_count: usize,
    pub paused: bool,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl<R> World<R> {
    /// Capture the current state; `paused` is filled in by the game loop
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            width: self.width,
            height: self.height,
            time: self.time,
            player: AgentView::of(&self.player),
            bots: self
                .bots
                .iter()
                .map(|bot| BotView {
                    name: bot.name.clone(),
                    state: bot.state.label(),
                    agent: AgentView::of(bot),
                })
                .collect(),
            enemies: self.enemies.iter().map(AgentView::of).collect(),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    radius: p.radius,
                    owner: p.owner,
                })
                .collect(),
            obstacles: self.obstacles.clone(),
            enemy_count: self.enemies.len(),
            paused: false,
        }
    }
}
