//! Score tracking
//!
//! A ball fully past the left edge is a point for the right side and vice
//! versa. Every point re-serves the ball from the center.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Ball, GameEvent, GameState, Side};

/// Which side scores if the ball has left the playfield
pub fn exit_side(ball: &Ball, playfield_width: f32) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > playfield_width {
        Some(Side::Left)
    } else {
        None
    }
}

/// Award a point if the ball left the playfield, then re-serve.
///
/// Returns the scoring side.
pub fn check_score(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) -> Option<Side> {
    let side = exit_side(&state.ball, state.tuning.width)?;

    state.score.award(side);
    log::info!("{:?} scores: {} - {}", side, state.score.left, state.score.right);

    let exit = Vec2::new(
        crate::clamp(state.ball.pos.x, 0.0, state.tuning.width),
        crate::clamp(state.ball.pos.y, 0.0, state.tuning.height),
    );
    let count = state.tuning.score_particles;
    state.particles.spawn(&state.tuning, exit, side.color(), count, rng);
    events.push(GameEvent::Score { side });

    state.reset_ball(rng);
    events.push(GameEvent::BallReset);

    Some(side)
}
