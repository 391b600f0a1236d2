//! Per-frame game loop driver
//!
//! The host calls [`Game::tick`] once per display frame. Each running tick
//! runs the stages in order: apply input, AI, physics, particles, score.
//! Outside `Running` the simulation is frozen but frames still render.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{InputState, apply_input};
use super::rng::{RandomSource, seeded};
use super::state::{GameEvent, GameState, RunState, Score, Side};
use super::{ai, collision, score};
use crate::Tuning;
use crate::audio::{AudioMix, AudioSink};
use crate::render::{FrameSnapshot, RenderSink};

/// Commands from the UI control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    TogglePause,
    Reset,
}

/// Owns the simulation and its run-state
#[derive(Debug, Clone)]
pub struct Game<R: RandomSource = Pcg32> {
    state: GameState,
    run_state: RunState,
    /// Buffered human input, written by host event handlers
    input: InputState,
    /// AI drives the human paddle too (demo mode)
    autopilot: bool,
    rng: R,
    /// Events raised by commands, delivered with the next tick
    pending: Vec<GameEvent>,
}

impl Game<Pcg32> {
    /// New game with a seeded PCG random stream
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_random(tuning, seeded(seed))
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_random(tuning: Tuning, rng: R) -> Self {
        Self {
            state: GameState::new(tuning),
            run_state: RunState::NotStarted,
            input: InputState::default(),
            autopilot: false,
            rng,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Input buffer for host event handlers; applied on the next running tick
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn score(&self) -> Score {
        self.state.score
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, on: bool) {
        if on != self.autopilot {
            log::info!("Autopilot: {}", on);
        }
        self.autopilot = on;
    }

    /// Apply a UI command. Commands that make no sense in the current state
    /// are ignored; pausing a game that never started starts it.
    ///
    /// Leaving `NotStarted` draws a random opening serve direction.
    pub fn command(&mut self, command: Command) {
        let next = match (command, self.run_state) {
            (Command::Reset, _) => {
                self.state.reset();
                self.input = InputState::default();
                self.pending.push(GameEvent::GameReset);
                RunState::NotStarted
            }
            (Command::Start, RunState::NotStarted | RunState::Paused) => RunState::Running,
            (Command::Start, RunState::Running) => RunState::Running,
            (Command::TogglePause, RunState::Running) => RunState::Paused,
            (Command::TogglePause, RunState::Paused | RunState::NotStarted) => RunState::Running,
        };

        if next != self.run_state {
            log::info!("{:?}: {:?} -> {:?}", command, self.run_state, next);
        }
        if self.run_state == RunState::NotStarted && next == RunState::Running {
            self.state.ball.serve(&self.state.tuning, &mut self.rng);
        }
        self.run_state = next;
    }

    /// Advance one frame. Returns the events raised since the previous tick.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if self.run_state != RunState::Running {
            return events;
        }

        let state = &mut self.state;
        let rng = &mut self.rng;

        if self.autopilot {
            ai::drive(&mut state.left, &state.ball, &state.tuning, rng);
        } else {
            apply_input(&mut state.left, &mut self.input, &state.tuning);
        }
        ai::drive(&mut state.right, &state.ball, &state.tuning, rng);

        collision::step(state, rng, &mut events);
        state.particles.advance(state.tuning.particle_damping);
        score::check_score(state, rng, &mut events);

        state.frame += 1;
        events
    }

    /// Read-only view for the render sink
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            width: self.state.tuning.width,
            height: self.state.tuning.height,
            left: &self.state.left,
            right: &self.state.right,
            ball: &self.state.ball,
            particles: self.state.particles.as_slice(),
            score: self.state.score,
            run_state: self.run_state,
        }
    }

    /// Points for `side`
    pub fn points(&self, side: Side) -> u32 {
        self.state.score.get(side)
    }
}

/// One host frame: tick, forward tones, draw
pub fn run_frame<R: RandomSource>(
    game: &mut Game<R>,
    mix: &AudioMix,
    audio: &mut impl AudioSink,
    renderer: &mut impl RenderSink,
) -> Vec<GameEvent> {
    let events = game.tick();
    mix.dispatch(&events, audio);
    renderer.draw(&game.snapshot());
    events
}
