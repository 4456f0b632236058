//! Per-frame simulation tick
//!
//! Advances the world by one variable timestep. The stage order is fixed so
//! collision outcomes are reproducible:
//!
//! 1. player movement and shooting
//! 2. each bot: AI, movement, shooting (array order)
//! 3. each enemy: pursuit, movement, shooting
//! 4. projectile motion
//! 5. projectile vs obstacle / field bounds
//! 6. projectile vs agent hits and damage
//! 7. dead enemies, then dead bots, are removed
//! 8. enemy respawn floor

use glam::Vec2;

use super::agent::Agent;
use super::collision::{out_of_bounds, projectile_hits, projectile_in_obstacle};
use super::projectile::Projectile;
use super::random::RandomSource;
use super::state::World;
use crate::consts::*;

/// Input sampled once per tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Aim point in field coordinates
    pub aim: Vec2,
    /// Fire button held
    pub fire: bool,
}

impl TickInput {
    /// Build from the names of currently held keys (WASD or arrow keys)
    pub fn from_held_keys<'a, I>(keys: I, aim: Vec2, fire: bool) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut input = Self {
            aim,
            fire,
            ..Default::default()
        };
        for key in keys {
            match key.to_lowercase().as_str() {
                "w" | "arrowup" | "up" => input.up = true,
                "s" | "arrowdown" | "down" => input.down = true,
                "a" | "arrowleft" | "left" => input.left = true,
                "d" | "arrowright" | "right" => input.right = true,
                _ => {}
            }
        }
        input
    }

    /// Raw 8-way intent (not normalized); +Y points down the screen
    pub fn move_intent(&self) -> Vec2 {
        let mut intent = Vec2::ZERO;
        if self.up {
            intent.y -= 1.0;
        }
        if self.down {
            intent.y += 1.0;
        }
        if self.left {
            intent.x -= 1.0;
        }
        if self.right {
            intent.x += 1.0;
        }
        intent
    }
}

/// Advance the world by `dt` seconds
pub fn tick<R: RandomSource>(world: &mut World<R>, input: &TickInput, dt: f32) {
    world.ticks += 1;
    world.time += dt as f64;

    update_player(world, input, dt);
    update_bots(world, dt);
    update_enemies(world, dt);

    for projectile in &mut world.projectiles {
        projectile.advance(dt);
    }
    cull_projectiles(world);
    resolve_hits(world);

    cull_dead(world);
    respawn(world);
}

fn update_player<R>(world: &mut World<R>, input: &TickInput, dt: f32) {
    let player = &mut world.player;
    if !player.is_alive() {
        return;
    }
    player.update(dt, input, &world.obstacles);
    if input.fire && player.can_shoot() {
        if let Some(projectile) = player.shoot(input.aim) {
            world.projectiles.push(projectile);
        }
    }
}

fn update_bots<R: RandomSource>(world: &mut World<R>, dt: f32) {
    for bot in world.bots.iter_mut().filter(|b| b.is_alive()) {
        bot.update(
            dt,
            &world.player,
            &world.enemies,
            &world.obstacles,
            &mut world.rng,
        );
        if bot.should_shoot(&world.enemies) {
            if let Some(projectile) = bot.shoot(&world.enemies) {
                world.projectiles.push(projectile);
            }
        }
    }
}

fn update_enemies<R>(world: &mut World<R>, dt: f32) {
    for enemy in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        enemy.update(dt, &world.player, &world.bots, &world.obstacles);
        if enemy.can_shoot() {
            if let Some(projectile) = enemy.shoot(world.player.pos) {
                world.projectiles.push(projectile);
            }
        }
    }
}

/// Drop projectiles that left the field or flew into an obstacle
fn cull_projectiles<R>(world: &mut World<R>) {
    let (width, height) = (world.width, world.height);
    let obstacles = &world.obstacles;
    world.projectiles.retain(|p| {
        !out_of_bounds(p.pos, width, height) && !projectile_in_obstacle(p.pos, obstacles)
    });
}

fn hits(projectile: &Projectile, agent: &impl Agent) -> bool {
    agent.is_alive() && projectile_hits(projectile.pos, projectile.radius, agent.position(), agent.radius())
}

/// First live agent in iteration order touched by the projectile
fn first_hit<'a, A, I>(projectile: &Projectile, agents: I) -> Option<&'a mut A>
where
    A: Agent + 'a,
    I: IntoIterator<Item = &'a mut A>,
{
    agents.into_iter().find(|agent| hits(projectile, &**agent))
}

/// Apply projectile damage; every projectile that hits is consumed
fn resolve_hits<R>(world: &mut World<R>) {
    let multiplier = world.settings.damage_multiplier;
    let player = &mut world.player;
    let bots = &mut world.bots;
    let enemies = &mut world.enemies;

    world.projectiles.retain(|projectile| {
        let damage = projectile.impact_damage(multiplier);
        if projectile.owner.targets_enemies() {
            if let Some(enemy) = first_hit(projectile, enemies.iter_mut()) {
                enemy.take_damage(damage);
                return false;
            }
        } else {
            // The player is never culled and keeps absorbing shots once down
            if projectile_hits(projectile.pos, projectile.radius, player.pos, player.radius) {
                player.take_damage(damage);
                return false;
            }
            if let Some(bot) = first_hit(projectile, bots.iter_mut()) {
                bot.take_damage(damage);
                return false;
            }
        }
        true
    });
}

fn cull_dead<R>(world: &mut World<R>) {
    let before = world.enemies.len();
    world.enemies.retain(|e| e.is_alive());
    let killed = before - world.enemies.len();
    if killed > 0 {
        log::debug!("{} enemies down, {} remaining", killed, world.enemies.len());
    }

    world.bots.retain(|bot| {
        if !bot.is_alive() {
            log::info!("Bot {} is down", bot.name);
        }
        bot.is_alive()
    });
}

fn respawn<R>(world: &mut World<R>) {
    if world.enemies.len() < ENEMY_FLOOR {
        let survivors = world.enemies.len();
        world.spawn_enemy_wave();
        log::info!(
            "Enemy wave {} inbound ({} survivors, {} total)",
            world.waves_spawned,
            survivors,
            world.enemies.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{MovementSpeed, Settings};
    use crate::sim::bot::Bot;
    use crate::sim::enemy::Enemy;
    use crate::sim::projectile::Owner;
    use crate::sim::random::ScriptedRandom;
    use crate::sim::state::PLAYER_SPAWN;

    fn bare(multiplier: f32) -> World<ScriptedRandom> {
        World::bare(
            Settings::new(multiplier, MovementSpeed::Standard),
            ScriptedRandom::constant(0.5),
        )
    }

    #[test]
    fn test_held_keys_mapping() {
        let input = TickInput::from_held_keys(["W", "d", "Shift"], Vec2::ZERO, false);
        assert!(input.up && input.right);
        assert!(!input.down && !input.left);
        assert_eq!(input.move_intent(), Vec2::new(1.0, -1.0));

        let arrows = TickInput::from_held_keys(["ArrowDown", "ArrowLeft"], Vec2::ZERO, true);
        assert_eq!(arrows.move_intent(), Vec2::new(-1.0, 1.0));
        assert!(arrows.fire);
    }

    #[test]
    fn test_player_fires_toward_aim() {
        let mut world = bare(1.0);
        let input = TickInput {
            aim: Vec2::new(100.0, 1000.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input, 0.01);
        let shots: Vec<_> = world
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Player)
            .collect();
        assert_eq!(shots.len(), 1);
        assert!(shots[0].vel.y > 0.0);

        // Still cooling down on the next tick
        tick(&mut world, &input, 0.01);
        let count = world
            .projectiles
            .iter()
            .filter(|p| p.owner == Owner::Player)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_bot_damage_multiplier_at_impact() {
        let mut world = bare(3.0);
        world.enemies.push(Enemy::new(Vec2::new(1000.0, 500.0)));
        world
            .projectiles
            .push(Projectile::new(Vec2::new(1000.0, 500.0), Vec2::ZERO, Owner::Bot, BOT_SHOT_DAMAGE));
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.enemies[0].health.current, ENEMY_MAX_HEALTH - 60.0);

        // Second hit clamps at zero and the enemy is culled
        world
            .projectiles
            .push(Projectile::new(world.enemies[0].pos, Vec2::ZERO, Owner::Bot, BOT_SHOT_DAMAGE));
        tick(&mut world, &TickInput::default(), 0.0);
        assert!(world.enemies.iter().all(|e| e.pos != Vec2::new(1000.0, 500.0)));
        assert!(world.enemies.iter().all(|e| e.health.current > 0.0));
    }

    #[test]
    fn test_player_damage_ignores_multiplier() {
        let mut world = bare(3.0);
        world.enemies.push(Enemy::new(Vec2::new(1000.0, 500.0)));
        world.projectiles.push(Projectile::new(
            Vec2::new(1000.0, 500.0),
            Vec2::ZERO,
            Owner::Player,
            PLAYER_SHOT_DAMAGE,
        ));
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.enemies[0].health.current, ENEMY_MAX_HEALTH - 25.0);
    }

    #[test]
    fn test_multiplier_change_applies_to_shots_in_flight() {
        let mut world = bare(1.0);
        world.enemies.push(Enemy::new(Vec2::new(1000.0, 500.0)));
        world.projectiles.push(Projectile::new(
            Vec2::new(1000.0, 500.0),
            Vec2::ZERO,
            Owner::Bot,
            BOT_SHOT_DAMAGE,
        ));
        world
            .apply_settings(Settings::new(2.0, MovementSpeed::Standard))
            .unwrap();
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.enemies[0].health.current, ENEMY_MAX_HEALTH - 40.0);
    }

    #[test]
    fn test_enemy_shots_do_not_hurt_enemies() {
        let mut world = bare(1.0);
        world.enemies.push(Enemy::new(Vec2::new(1000.0, 500.0)));
        world.projectiles.push(Projectile::new(
            Vec2::new(1000.0, 500.0),
            Vec2::ZERO,
            Owner::Enemy,
            ENEMY_SHOT_DAMAGE,
        ));
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.enemies[0].health.current, ENEMY_MAX_HEALTH);
    }

    #[test]
    fn test_enemy_shot_hits_player_before_bots() {
        let mut world = bare(1.0);
        let settings = world.settings;
        world.bots.push(Bot::new("Alpha", PLAYER_SPAWN, &settings));
        world.projectiles.push(Projectile::new(
            PLAYER_SPAWN,
            Vec2::ZERO,
            Owner::Enemy,
            ENEMY_SHOT_DAMAGE,
        ));
        // Keep the bot in place: scripted jitter of 0.5 targets the player exactly
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.player.health.current, PLAYER_MAX_HEALTH - ENEMY_SHOT_DAMAGE);
        assert_eq!(world.bots[0].health.current, BOT_MAX_HEALTH);
    }

    #[test]
    fn test_dead_player_still_absorbs_enemy_shots() {
        let mut world = bare(1.0);
        let settings = world.settings;
        world.player.take_damage(1000.0);
        world.bots.push(Bot::new("Alpha", PLAYER_SPAWN, &settings));
        world.projectiles.push(Projectile::new(
            PLAYER_SPAWN,
            Vec2::ZERO,
            Owner::Enemy,
            ENEMY_SHOT_DAMAGE,
        ));
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.player.health.current, 0.0);
        assert_eq!(world.bots[0].health.current, BOT_MAX_HEALTH);
        assert!(!world.projectiles.iter().any(|p| p.owner == Owner::Enemy));
    }

    #[test]
    fn test_enemy_shot_hits_bot() {
        let mut world = bare(1.0);
        let settings = world.settings;
        let bot_pos = Vec2::new(600.0, 600.0);
        world.bots.push(Bot::new("Bravo", bot_pos, &settings));
        world.projectiles.push(Projectile::new(
            bot_pos,
            Vec2::ZERO,
            Owner::Enemy,
            ENEMY_SHOT_DAMAGE,
        ));
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.bots[0].health.current, BOT_MAX_HEALTH - ENEMY_SHOT_DAMAGE);
        assert_eq!(world.player.health.current, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_one_projectile_one_hit() {
        let mut world = bare(1.0);
        let pos = Vec2::new(1000.0, 500.0);
        world.enemies.push(Enemy::new(pos));
        world.enemies.push(Enemy::new(pos));
        world
            .projectiles
            .push(Projectile::new(pos, Vec2::ZERO, Owner::Player, PLAYER_SHOT_DAMAGE));
        tick(&mut world, &TickInput::default(), 0.0);
        assert_eq!(world.enemies[0].health.current, ENEMY_MAX_HEALTH - 25.0);
        assert_eq!(world.enemies[1].health.current, ENEMY_MAX_HEALTH);
        assert!(!world.projectiles.iter().any(|p| p.owner == Owner::Player));
    }

    #[test]
    fn test_out_of_bounds_culled_next_pass() {
        let mut world = bare(1.0);
        world.projectiles.push(Projectile::new(
            Vec2::new(FIELD_WIDTH - 1.0, 500.0),
            Vec2::new(1000.0, 0.0),
            Owner::Player,
            PLAYER_SHOT_DAMAGE,
        ));
        world.projectiles.push(Projectile::new(
            Vec2::new(500.0, FIELD_HEIGHT + 5.0),
            Vec2::ZERO,
            Owner::Player,
            PLAYER_SHOT_DAMAGE,
        ));
        tick(&mut world, &TickInput::default(), 0.01);
        assert!(!world.projectiles.iter().any(|p| p.owner == Owner::Player));
    }

    #[test]
    fn test_obstacle_absorbs_projectile() {
        let mut world = bare(1.0);
        world
            .obstacles
            .push(crate::sim::obstacle::Obstacle::new(500.0, 500.0, 50.0, 50.0));
        world.projectiles.push(Projectile::new(
            Vec2::new(495.0, 525.0),
            Vec2::new(1000.0, 0.0),
            Owner::Player,
            PLAYER_SHOT_DAMAGE,
        ));
        tick(&mut world, &TickInput::default(), 0.01);
        assert!(!world.projectiles.iter().any(|p| p.owner == Owner::Player));
    }

    #[test]
    fn test_respawn_floor() {
        let mut world = World::with_seed(Settings::default(), 9);
        assert_eq!(world.enemies.len(), 5);
        for enemy in world.enemies.iter_mut().take(3) {
            enemy.take_damage(1000.0);
        }
        tick(&mut world, &TickInput::default(), 0.016);
        assert_eq!(world.enemies.len(), 7);
        assert_eq!(world.waves_spawned, 2);
        assert!(world.enemies.iter().all(|e| e.is_alive()));
    }

    #[test]
    fn test_respawn_after_removal() {
        let mut world = World::with_seed(Settings::default(), 9);
        world.enemies.truncate(2);
        tick(&mut world, &TickInput::default(), 0.016);
        assert!(world.enemies.len() >= ENEMY_FLOOR);
        assert_eq!(world.enemies.len(), 7);
    }

    #[test]
    fn test_no_respawn_at_floor() {
        let mut world = World::with_seed(Settings::default(), 9);
        world.enemies.truncate(3);
        tick(&mut world, &TickInput::default(), 0.016);
        assert_eq!(world.enemies.len(), 3);
    }

    #[test]
    fn test_dead_bots_removed() {
        let mut world = World::with_seed(Settings::default(), 3);
        world.bots[1].take_damage(500.0);
        tick(&mut world, &TickInput::default(), 0.016);
        let names: Vec<_> = world.bots.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Charlie"]);
    }

    #[test]
    fn test_dead_player_stays_still() {
        let mut world = bare(1.0);
        world.player.take_damage(1000.0);
        let input = TickInput {
            right: true,
            fire: true,
            aim: Vec2::new(900.0, 100.0),
            ..Default::default()
        };
        tick(&mut world, &input, 0.05);
        assert_eq!(world.player.pos, PLAYER_SPAWN);
        assert!(!world.projectiles.iter().any(|p| p.owner == Owner::Player));
    }

    #[test]
    fn test_agents_never_enter_obstacles() {
        let mut world = World::with_seed(Settings::new(1.0, MovementSpeed::VeryFast), 11);
        let keys: [&[&str]; 4] = [&["d", "s"], &["d"], &["s"], &["d", "w"]];
        for i in 0..600 {
            let input = TickInput::from_held_keys(
                keys[(i / 60) % keys.len()].iter().copied(),
                Vec2::new(1700.0, 500.0),
                true,
            );
            tick(&mut world, &input, 1.0 / 60.0);
            let obstacles = &world.obstacles;
            assert!(!crate::sim::collision::blocked(world.player.pos, world.player.radius, obstacles));
            for bot in &world.bots {
                assert!(!crate::sim::collision::blocked(bot.pos, bot.radius, obstacles));
            }
            for enemy in &world.enemies {
                assert!(!crate::sim::collision::blocked(enemy.pos, enemy.radius, obstacles));
            }
            assert!(world.enemies.len() >= ENEMY_FLOOR);
        }
    }

    #[test]
    fn test_determinism() {
        let mut world1 = World::with_seed(Settings::default(), 99999);
        let mut world2 = World::with_seed(Settings::default(), 99999);

        let inputs = [
            TickInput::from_held_keys(["d"], Vec2::new(1700.0, 200.0), true),
            TickInput::from_held_keys(["s", "d"], Vec2::new(1600.0, 800.0), false),
            TickInput::default(),
        ];

        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            tick(&mut world1, input, 1.0 / 60.0);
            tick(&mut world2, input, 1.0 / 60.0);
        }

        assert_eq!(world1.ticks, world2.ticks);
        assert_eq!(world1.player.pos, world2.player.pos);
        assert_eq!(world1.bots.len(), world2.bots.len());
        for (a, b) in world1.bots.iter().zip(&world2.bots) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.state, b.state);
        }
        assert_eq!(world1.enemies.len(), world2.enemies.len());
        assert_eq!(world1.projectiles.len(), world2.projectiles.len());
    }
}
