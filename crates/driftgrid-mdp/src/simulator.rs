use driftgrid_core::{Action, StateIndex};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{MdpModel, render};

/// Result of one simulated step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub next_state: StateIndex,
    pub reward: f64,
    pub terminal: bool,
}

#[derive(Debug, Clone)]
/// Seeded episode runner over a built model. It reads nothing but the
/// transition table and the initial distribution.
pub struct MdpSimulator {
    model: MdpModel,
    rng: ChaCha8Rng,
    state: StateIndex,
    last_action: Option<Action>,
}

impl MdpSimulator {
    /// Create a simulator with deterministic RNG seed, already reset.
    pub fn new(model: MdpModel, seed: u64) -> Self {
        let start = model.start_state();
        let mut sim = Self {
            model,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: start,
            last_action: None,
        };
        sim.reset();
        sim
    }

    /// Borrow the underlying model.
    pub fn model(&self) -> &MdpModel {
        &self.model
    }

    pub fn state(&self) -> StateIndex {
        self.state
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Start a new episode from the initial distribution.
    pub fn reset(&mut self) -> StateIndex {
        let sample = self.next_sample();
        self.state = self
            .model
            .initial_distribution()
            .sample(sample)
            .unwrap_or_else(|| self.model.start_state());
        self.last_action = None;
        self.state
    }

    /// Sample one transition from the current state.
    /// Terminal states loop onto themselves with zero reward.
    pub fn step(&mut self, action: Action) -> Step {
        let sample = self.next_sample();
        let step = self
            .model
            .transitions()
            .sample(self.state, action, sample)
            .map(|outcome| Step {
                next_state: outcome.next_state,
                reward: outcome.reward,
                terminal: outcome.terminal,
            })
            .unwrap_or(Step {
                next_state: self.state,
                reward: 0.0,
                terminal: true,
            });

        self.state = step.next_state;
        self.last_action = Some(action);
        step
    }

    /// ANSI view of the current position and last action.
    pub fn render(&self) -> String {
        render::render(&self.model, self.state, self.last_action)
    }

    fn next_sample(&mut self) -> f64 {
        (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0)
    }
}
