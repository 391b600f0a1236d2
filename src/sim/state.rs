//! Game state and core simulation types
//!
//! `GameState` is the single owned aggregate the loop driver mutates each
//! tick. Nothing in here talks to a renderer, audio device or DOM.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::particles::ParticleSystem;
use super::rng::RandomSource;
use crate::Tuning;
use crate::consts::{BALL_COLOR, LEFT_COLOR, RIGHT_COLOR, TRAIL_LENGTH_LIMIT};

/// Which half of the playfield a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of ball dx when the ball travels toward this side
    pub fn toward(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    /// Paddle and particle color
    pub fn color(self) -> u32 {
        match self {
            Side::Left => LEFT_COLOR,
            Side::Right => RIGHT_COLOR,
        }
    }
}

/// Coarse mode gating whether the simulation advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Fresh or reset game, waiting for start
    #[default]
    NotStarted,
    /// Simulation advances every tick
    Running,
    /// Frozen frame, rendering continues
    Paused,
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallBounce { pos: Vec2 },
    /// Ball bounced off a paddle at the given contact point
    PaddleHit { side: Side, pos: Vec2 },
    /// Ball left the playfield; `side` scored
    Score { side: Side },
    /// Ball re-served from the center
    BallReset,
    /// Whole game reset by command
    GameReset,
}

/// A paddle. Only `y` and `dy` change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed)
    pub x: f32,
    /// Top edge, kept within `[0, height - paddle_height]`
    pub y: f32,
    /// Vertical velocity (px/frame)
    pub dy: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let x = match side {
            Side::Left => tuning.paddle_inset,
            Side::Right => tuning.width - tuning.paddle_inset - tuning.paddle_width,
        };
        Self {
            side,
            x,
            y: Self::centered_y(tuning),
            dy: 0.0,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    fn centered_y(tuning: &Tuning) -> f32 {
        (tuning.height - tuning.paddle_height) / 2.0
    }

    /// Recenter vertically and stop
    pub fn recenter(&mut self, tuning: &Tuning) {
        self.y = Self::centered_y(tuning);
        self.dy = 0.0;
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// x of the face the ball bounces off
    #[inline]
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.x + self.width,
            Side::Right => self.x,
        }
    }

    /// Keep the paddle inside the playfield
    pub fn clamp_to(&mut self, playfield_height: f32) {
        self.y = crate::clamp(self.y, 0.0, playfield_height - self.height);
    }

    /// Signed contact offset from the paddle center, normalized to `[-1, 1]`
    pub fn impact(&self, ball_y: f32) -> f32 {
        let half = self.height / 2.0;
        crate::clamp((ball_y - self.center_y()) / half, -1.0, 1.0)
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity (dx, dy) in px/frame
    pub vel: Vec2,
    pub radius: f32,
    /// Recent positions, most recent last
    pub trail: VecDeque<Vec2>,
    trail_capacity: usize,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.width / 2.0, tuning.height / 2.0),
            vel: Vec2::new(tuning.serve_dx, tuning.serve_dy),
            radius: tuning.ball_radius(),
            trail: VecDeque::with_capacity(tuning.trail_length.min(TRAIL_LENGTH_LIMIT)),
            trail_capacity: tuning.trail_length,
        }
    }

    /// Remember the current position, dropping the oldest beyond capacity
    pub fn record_trail(&mut self) {
        if self.trail_capacity == 0 {
            return;
        }
        self.trail.push_back(self.pos);
        while self.trail.len() > self.trail_capacity {
            self.trail.pop_front();
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Recenter with a fresh random diagonal serve
    pub fn serve(&mut self, tuning: &Tuning, rng: &mut impl RandomSource) {
        self.pos = Vec2::new(tuning.width / 2.0, tuning.height / 2.0);
        let dx = tuning.serve_dx * rng.sign();
        let dy = tuning.serve_dy * rng.sign();
        self.vel = Vec2::new(dx, dy);
        self.clear_trail();
    }
}

/// A cosmetic feedback particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Frames left to live
    pub life: u32,
    pub max_life: u32,
    /// 0xRRGGBB
    pub color: u32,
    pub radius: f32,
}

impl Particle {
    /// Render opacity, proportional to remaining life
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Award one point. Never decrements.
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    pub score: Score,
    pub particles: ParticleSystem,
    /// Simulated frames since the last reset
    pub frame: u64,
}

impl GameState {
    /// Fresh state: paddles centered, ball centered with the default serve
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            left: Paddle::new(Side::Left, &tuning),
            right: Paddle::new(Side::Right, &tuning),
            ball: Ball::new(&tuning),
            score: Score::default(),
            particles: ParticleSystem::new(tuning.max_particles),
            frame: 0,
            tuning,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Back to the freshly created layout: scores zero, ball centered with
    /// the default serve, paddles centered, no particles
    pub fn reset(&mut self) {
        self.left.recenter(&self.tuning);
        self.right.recenter(&self.tuning);
        self.ball = Ball::new(&self.tuning);
        self.score.clear();
        self.particles.clear();
        self.frame = 0;
    }

    /// Serve a new point and throw a small burst at the center
    pub fn reset_ball(&mut self, rng: &mut impl RandomSource) {
        self.ball.serve(&self.tuning, rng);
        let center = self.ball.pos;
        let count = self.tuning.serve_particles;
        self.particles.spawn(&self.tuning, center, BALL_COLOR, count, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;

    #[test]
    fn test_new_layout() {
        let state = GameState::new(Tuning::default());
        assert_eq!(state.left.x, 10.0);
        assert_eq!(state.right.x, 780.0);
        assert_eq!(state.left.y, 210.0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(state.score, Score::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_paddle_faces() {
        let tuning = Tuning::default();
        assert_eq!(Paddle::new(Side::Left, &tuning).face_x(), 20.0);
        assert_eq!(Paddle::new(Side::Right, &tuning).face_x(), 780.0);
    }

    #[test]
    fn test_paddle_impact_normalized() {
        let paddle = Paddle::new(Side::Left, &Tuning::default());
        assert_eq!(paddle.impact(paddle.center_y()), 0.0);
        assert_eq!(paddle.impact(paddle.y), -1.0);
        assert_eq!(paddle.impact(paddle.y + paddle.height), 1.0);
        assert_eq!(paddle.impact(paddle.y - 500.0), -1.0);
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::new(Side::Left, &Tuning::default());
        paddle.y = -40.0;
        paddle.clamp_to(500.0);
        assert_eq!(paddle.y, 0.0);
        paddle.y = 1e9;
        paddle.clamp_to(500.0);
        assert_eq!(paddle.y, 420.0);
        paddle.y = f32::NAN;
        paddle.clamp_to(500.0);
        assert_eq!(paddle.y, 0.0);
    }

    #[test]
    fn test_trail_bounded_most_recent_last() {
        let mut ball = Ball::new(&Tuning::default());
        for i in 0..20 {
            ball.pos = Vec2::new(i as f32, 0.0);
            ball.record_trail();
        }
        assert_eq!(ball.trail.len(), 8);
        assert_eq!(ball.trail.back(), Some(&Vec2::new(19.0, 0.0)));
        assert_eq!(ball.trail.front(), Some(&Vec2::new(12.0, 0.0)));
    }

    #[test]
    fn test_serve_randomizes_signs() {
        let tuning = Tuning::default();
        let mut ball = Ball::new(&tuning);
        ball.pos = Vec2::new(3.0, 3.0);
        ball.record_trail();

        let mut rng = ScriptedRandom::new(vec![0.2, 0.9]);
        ball.serve(&tuning, &mut rng);
        assert_eq!(ball.pos, Vec2::new(400.0, 250.0));
        assert_eq!(ball.vel, Vec2::new(-5.0, 3.0));
        assert!(ball.trail.is_empty());
    }

    #[test]
    fn test_score_award() {
        let mut score = Score::default();
        score.award(Side::Right);
        score.award(Side::Right);
        score.award(Side::Left);
        assert_eq!(score.get(Side::Right), 2);
        assert_eq!(score.get(Side::Left), 1);
        score.clear();
        assert_eq!(score, Score::default());
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let fresh = GameState::new(Tuning::default());
        let mut state = fresh.clone();
        let mut rng = ScriptedRandom::constant(0.3);

        state.score.award(Side::Left);
        state.left.y = 0.0;
        state.right.dy = 3.0;
        state.frame = 99;
        state.reset_ball(&mut rng);
        assert!(!state.particles.is_empty());

        state.reset();
        assert_eq!(state, fresh);
    }
}
