//! Frame scheduler
//!
//! The host drives [`GameLoop::frame`] from its own timer (an animation frame
//! callback, a fixed sleep loop, a test). The loop turns wall-clock
//! timestamps into clamped ticks and owns the start/stop and pause gates.

use rand_pcg::Pcg32;

use crate::consts::MAX_TICK_DT;
use crate::error::SettingsError;
use crate::settings::Settings;
use crate::sim::random::RandomSource;
use crate::sim::snapshot::WorldSnapshot;
use crate::sim::state::World;
use crate::sim::tick::{TickInput, tick};

/// Owns the world and decides when it advances
#[derive(Debug)]
pub struct GameLoop<R = Pcg32> {
    world: World<R>,
    running: bool,
    paused: bool,
    /// Timestamp of the previous frame (seconds); `None` until the first frame
    last_time: Option<f64>,
    /// Settings waiting to be applied before the next tick
    pending_settings: Option<Settings>,
    /// Frames that advanced the world
    frames: u64,
}

impl GameLoop<Pcg32> {
    pub fn new(settings: Settings) -> Self {
        Self::from_world(World::new(settings))
    }

    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::from_world(World::with_seed(settings, seed))
    }
}

impl<R: RandomSource> GameLoop<R> {
    pub fn from_world(world: World<R>) -> Self {
        Self {
            world,
            running: false,
            paused: false,
            last_time: None,
            pending_settings: None,
            frames: 0,
        }
    }

    pub fn world(&self) -> &World<R> {
        &self.world
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Begin accepting frames. Calling it again while running does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_time = None;
        log::info!("Game loop started");
    }

    /// Stop accepting frames. Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_time = None;
        log::info!("Game loop stopped after {} frames", self.frames);
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Queue settings for the next tick
    ///
    /// Validated here so a bad value is reported to the caller instead of
    /// being dropped later. A second push before the next tick replaces the
    /// first.
    pub fn push_settings(&mut self, settings: Settings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.pending_settings = Some(settings);
        Ok(())
    }

    /// Process one host frame at `now` seconds
    ///
    /// Returns `true` when the world advanced. The clock is updated even when
    /// paused so the first frame after resuming does not see the pause as
    /// elapsed time.
    pub fn frame(&mut self, now: f64, input: &TickInput) -> bool {
        if !self.running {
            return false;
        }

        let elapsed = match self.last_time {
            Some(last) => (now - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(now);

        if self.paused {
            return false;
        }

        if let Some(settings) = self.pending_settings.take() {
            if let Err(err) = self.world.apply_settings(settings) {
                log::warn!("Dropping pending settings: {}", err);
            }
        }

        let dt = elapsed.min(MAX_TICK_DT);
        tick(&mut self.world, input, dt);
        self.frames += 1;
        true
    }

    /// Snapshot for the renderer, including the pause flag
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut snapshot = self.world.snapshot();
        snapshot.paused = self.paused;
        snapshot
    }
}
