//! Random source used by the AI
//!
//! Bot and enemy routines draw their samples through [`RandomSource`] so the
//! caller decides where randomness comes from: the world's `Pcg32`, any other
//! `rand` generator, or a [`ScriptedRandom`] replaying fixed samples.

use std::collections::VecDeque;

use rand::Rng;

/// Uniform samples in `[0, 1)`
pub trait RandomSource {
    fn unit(&mut self) -> f32;
}

impl<R: Rng> RandomSource for R {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of samples, then repeats a fallback value
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    samples: VecDeque<f32>,
    fallback: f32,
}

impl ScriptedRandom {
    pub fn new(samples: impl IntoIterator<Item = f32>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
            fallback: 0.5,
        }
    }

    /// Same value forever
    pub fn constant(value: f32) -> Self {
        Self {
            samples: VecDeque::new(),
            fallback: value,
        }
    }

    pub fn with_fallback(mut self, fallback: f32) -> Self {
        self.fallback = fallback;
        self
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f32 {
        self.samples.pop_front().unwrap_or(self.fallback)
    }
}
