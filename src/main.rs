//! Squad Skirmish headless runner
//!
//! Drives the simulation at 60 Hz with a scripted player so the AI and
//! respawn logic can be watched in the log without a renderer.
//!
//! Usage: `squad-skirmish [settings.json] [seconds]`

use glam::Vec2;

use squad_skirmish::sim::{Agent, TickInput};
use squad_skirmish::{GameLoop, Settings};

const FRAME_DT: f64 = 1.0 / 60.0;
const DEFAULT_SECONDS: f64 = 30.0;

/// Sweep right and down in two-second legs, firing at the closest enemy
fn scripted_input(game: &GameLoop, frame: u64) -> TickInput {
    const LEGS: [&[&str]; 4] = [&["d"], &["s"], &["d", "w"], &["a", "s"]];
    let leg = LEGS[(frame / 120) as usize % LEGS.len()];

    let world = game.world();
    let player = world.player.pos;
    let target = squad_skirmish::nearest(
        player,
        world
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, e)| (i, e.pos)),
    )
    .map(|(i, _)| world.enemies[i].pos);

    TickInput::from_held_keys(
        leg.iter().copied(),
        target.unwrap_or(Vec2::ZERO),
        target.is_some(),
    )
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seconds = match args.next().map(|s| s.parse::<f64>()) {
        Some(Ok(s)) if s > 0.0 => s,
        Some(_) => {
            log::warn!("Invalid run length, using {}s", DEFAULT_SECONDS);
            DEFAULT_SECONDS
        }
        None => DEFAULT_SECONDS,
    };

    log::info!(
        "Squad Skirmish (headless) starting: damage x{}, speed {}, {}s",
        settings.damage_multiplier,
        settings.movement_speed.as_str(),
        seconds
    );

    let mut game = GameLoop::new(settings);
    game.start();

    let total_frames = (seconds / FRAME_DT).ceil() as u64;
    for frame in 0..total_frames {
        let input = scripted_input(&game, frame);
        game.frame(frame as f64 * FRAME_DT, &input);

        if frame % 600 == 0 {
            let world = game.world();
            log::info!(
                "t={:.1}s player hp {:.0}, bots {}, enemies {}, projectiles {}",
                world.time,
                world.player.health.current,
                world.live_bot_count(),
                world.live_enemy_count(),
                world.projectiles.len()
            );
        }
    }
    game.stop();

    let world = game.world();
    log::info!(
        "Finished: {} frames, {} ticks, {} waves, player {}, {} bots standing",
        game.frames(),
        world.ticks,
        world.waves_spawned,
        if world.player.is_alive() { "alive" } else { "down" },
        world.live_bot_count()
    );

    match game.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}
