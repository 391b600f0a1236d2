//! Physics and collision response
//!
//! One call to [`step`] advances paddles and ball by one frame. Collision
//! checks run in a fixed order: top/bottom wall, then left paddle, then
//! right paddle. A ball touching a wall and a paddle in the same frame
//! therefore has its dy flipped by the wall first and then receives spin
//! from the paddle.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Ball, GameEvent, GameState, Paddle, Side};
use crate::Tuning;
use crate::consts::BALL_COLOR;

/// Integrate paddle velocity and keep the paddle on the playfield
pub fn move_paddle(paddle: &mut Paddle, playfield_height: f32) {
    if !paddle.dy.is_finite() {
        paddle.dy = 0.0;
    }
    paddle.y += paddle.dy;
    paddle.clamp_to(playfield_height);
}

/// Bounce off the top or bottom wall.
///
/// The ball is pushed back inside so the flip cannot retrigger on the next
/// frame. Returns true if a wall was touched.
pub fn wall_collision(ball: &mut Ball, playfield_height: f32) -> bool {
    let r = ball.radius;
    if ball.pos.y < r {
        ball.pos.y = r;
    } else if ball.pos.y > playfield_height - r {
        ball.pos.y = playfield_height - r;
    } else {
        return false;
    }
    ball.vel.y = -ball.vel.y;
    true
}

/// Bounce off a paddle.
///
/// Only a ball travelling toward the paddle can hit it, and on a hit the
/// ball is snapped onto the paddle face, so it can never stay inside the
/// paddle across frames. Returns the contact point.
pub fn paddle_collision(ball: &mut Ball, paddle: &Paddle, tuning: &Tuning) -> Option<Vec2> {
    if ball.vel.x * paddle.side.toward() <= 0.0 {
        return None;
    }

    let r = ball.radius;
    let overlaps_x = ball.pos.x - r < paddle.x + paddle.width && ball.pos.x + r > paddle.x;
    let overlaps_y = ball.pos.y >= paddle.y && ball.pos.y <= paddle.y + paddle.height;
    if !(overlaps_x && overlaps_y) {
        return None;
    }

    let face = paddle.face_x();
    ball.pos.x = match paddle.side {
        Side::Left => face + r,
        Side::Right => face - r,
    };

    ball.vel.x = -ball.vel.x * tuning.speedup;
    let impact = paddle.impact(ball.pos.y);
    ball.vel.y += impact * tuning.spin_factor + paddle.dy * tuning.spin_influence;
    clamp_speed(ball, tuning.max_ball_speed);

    Some(Vec2::new(face, ball.pos.y))
}

/// Bound each velocity component to `[-max, max]`
pub fn clamp_speed(ball: &mut Ball, max: f32) {
    ball.vel.x = crate::clamp(ball.vel.x, -max, max);
    ball.vel.y = crate::clamp(ball.vel.y, -max, max);
}

/// Advance paddles and ball one frame, resolving wall and paddle contacts
pub fn step(state: &mut GameState, rng: &mut impl RandomSource, events: &mut Vec<GameEvent>) {
    let height = state.tuning.height;
    move_paddle(&mut state.left, height);
    move_paddle(&mut state.right, height);

    state.ball.record_trail();
    state.ball.pos += state.ball.vel;

    if wall_collision(&mut state.ball, height) {
        let pos = state.ball.pos;
        let count = state.tuning.wall_bounce_particles;
        state.particles.spawn(&state.tuning, pos, BALL_COLOR, count, rng);
        events.push(GameEvent::WallBounce { pos });
    }

    for side in [Side::Left, Side::Right] {
        let paddle = match side {
            Side::Left => &state.left,
            Side::Right => &state.right,
        };
        if let Some(contact) = paddle_collision(&mut state.ball, paddle, &state.tuning) {
            log::debug!(
                "{:?} paddle hit at y={:.1}, ball vel ({:.2}, {:.2})",
                side,
                contact.y,
                state.ball.vel.x,
                state.ball.vel.y
            );
            let count = state.tuning.paddle_hit_particles;
            state.particles.spawn(&state.tuning, contact, side.color(), count, rng);
            events.push(GameEvent::PaddleHit { side, pos: contact });
        }
    }
}
