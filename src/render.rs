//! Read-only frame snapshots for a drawing surface
//!
//! The host draws; the core only hands over what to draw.

use glam::Vec2;

use crate::sim::{Ball, Paddle, Particle, RunState, Score};

/// Dash pattern for the center net (on, off)
const NET_DASH: (f32, f32) = (8.0, 10.0);

/// Everything needed to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub width: f32,
    pub height: f32,
    pub left: &'a Paddle,
    pub right: &'a Paddle,
    pub ball: &'a Ball,
    pub particles: &'a [Particle],
    pub score: Score,
    pub run_state: RunState,
}

impl FrameSnapshot<'_> {
    /// Trail points oldest first, with alpha fading toward the oldest
    pub fn trail(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        let len = self.ball.trail.len() as f32;
        self.ball
            .trail
            .iter()
            .enumerate()
            .map(move |(i, &pos)| (pos, (i as f32 + 1.0) / (len + 1.0) * 0.8))
    }

    /// Particles with their render opacity
    pub fn particles_with_alpha(&self) -> impl Iterator<Item = (&Particle, f32)> + '_ {
        self.particles.iter().map(|p| (p, p.alpha()))
    }

    /// Vertical dashed net segments as (top, bottom) y pairs at `width / 2`
    pub fn net_segments(&self) -> Vec<(f32, f32)> {
        let (on, off) = NET_DASH;
        let mut segments = Vec::new();
        let mut y = 0.0;
        while y < self.height {
            segments.push((y, (y + on).min(self.height)));
            y += on + off;
        }
        segments
    }
}

/// Host-side drawing surface
pub trait RenderSink {
    fn draw(&mut self, frame: &FrameSnapshot<'_>);
}
