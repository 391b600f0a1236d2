//! Duel Pong - a human vs AI paddle-and-ball arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, particles, game loop)
//! - `settings`: Data-driven game tuning
//! - `audio`: Tone requests emitted for game events
//! - `render`: Read-only frame snapshots handed to a drawing surface

pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Tuning;

/// Game configuration constants
///
/// All distances are in playfield pixels, all speeds in pixels per frame.
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Gap between the playfield edge and the outer face of each paddle
    pub const PADDLE_INSET: f32 = 10.0;
    /// Keyboard paddle speed
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Per-frame velocity multiplier once no movement key is held
    pub const PADDLE_DAMPING: f32 = 0.8;

    /// AI defaults
    pub const AI_SPEED: f32 = 3.5;
    /// Speed multiplier while the ball is heading toward the AI side
    pub const AI_BOOST: f32 = 1.2;
    pub const AI_DEAD_ZONE: f32 = 10.0;
    /// Per-frame probability of nudging the AI target off course
    pub const AI_JITTER_CHANCE: f32 = 0.05;
    /// Maximum target nudge (either direction)
    pub const AI_JITTER_MAGNITUDE: f32 = 20.0;

    /// Ball defaults (diameter)
    pub const BALL_SIZE: f32 = 12.0;
    pub const SERVE_DX: f32 = 5.0;
    pub const SERVE_DY: f32 = 3.0;
    /// Speed-up applied to dx on every paddle hit (multiplicative)
    pub const PADDLE_SPEEDUP: f32 = 1.05;
    /// Per-component ball speed limit
    pub const MAX_BALL_SPEED: f32 = 12.0;
    /// dy added per unit of normalized impact offset
    pub const SPIN_FACTOR: f32 = 2.0;
    /// Share of paddle velocity transferred into the ball
    pub const SPIN_INFLUENCE: f32 = 0.3;
    pub const TRAIL_LENGTH: usize = 8;
    /// Longest trail a tuning file may ask for
    pub const TRAIL_LENGTH_LIMIT: usize = 64;

    /// Particle defaults
    pub const PADDLE_HIT_PARTICLES: usize = 15;
    pub const WALL_BOUNCE_PARTICLES: usize = 6;
    pub const SCORE_PARTICLES: usize = 30;
    pub const SERVE_PARTICLES: usize = 10;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 4.0;
    pub const PARTICLE_MIN_LIFE: u32 = 20;
    pub const PARTICLE_MAX_LIFE: u32 = 40;
    pub const PARTICLE_MIN_RADIUS: f32 = 1.5;
    pub const PARTICLE_MAX_RADIUS: f32 = 3.5;
    pub const PARTICLE_DAMPING: f32 = 0.95;
    pub const MAX_PARTICLES: usize = 512;
    /// Highest particle cap a tuning file may ask for
    pub const PARTICLE_CAP_LIMIT: usize = 4096;

    /// Colors (0xRRGGBB)
    pub const LEFT_COLOR: u32 = 0x61dafb;
    pub const RIGHT_COLOR: u32 = 0xe06c75;
    pub const BALL_COLOR: u32 = 0xffffff;
}

/// Bound a scalar to `[min, max]`
///
/// Unlike `f32::clamp` this never panics and never propagates NaN: a NaN
/// input collapses to `min`, and an inverted range collapses to `min`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() || max < min {
        return min;
    }
    value.max(min).min(max)
}
