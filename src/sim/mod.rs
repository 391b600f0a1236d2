//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed step per tick, distances in px and speeds in px/frame
//! - Randomness only through an injected `RandomSource`
//! - Particles kept in spawn order
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod input;
pub mod particles;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use input::InputState;
pub use particles::ParticleSystem;
pub use rng::{RandomSource, ScriptedRandom, seeded};
pub use state::{Ball, GameEvent, GameState, Paddle, Particle, RunState, Score, Side};
pub use tick::{Command, Game, run_frame};
