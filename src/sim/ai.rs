//! Computer-controlled paddle
//!
//! Tracks the ball with a bounded speed, reacts faster while the ball is
//! incoming, and now and then aims slightly off so it can be beaten.

use super::rng::RandomSource;
use super::state::{Ball, Paddle};
use crate::Tuning;

/// Paddle-top position the AI wants this frame
pub fn target_y(
    paddle: &Paddle,
    ball: &Ball,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> f32 {
    let mut target = ball.pos.y - paddle.height / 2.0;
    if rng.chance(tuning.ai_jitter_chance) {
        let m = tuning.ai_jitter_magnitude;
        target += rng.range(-m, m);
    }
    target
}

/// Set the paddle velocity toward `target`, holding still inside the dead zone
pub fn steer(paddle: &mut Paddle, target: f32, ball: &Ball, tuning: &Tuning) {
    let incoming = ball.vel.x * paddle.side.toward() > 0.0;
    let speed = if incoming {
        tuning.ai_speed * tuning.ai_boost
    } else {
        tuning.ai_speed
    };

    paddle.dy = if paddle.y < target - tuning.ai_dead_zone {
        speed
    } else if paddle.y > target + tuning.ai_dead_zone {
        -speed
    } else {
        0.0
    };
}

/// One AI decision for `paddle`; position integration happens in physics
pub fn drive(paddle: &mut Paddle, ball: &Ball, tuning: &Tuning, rng: &mut impl RandomSource) {
    let target = target_y(paddle, ball, tuning, rng);
    steer(paddle, target, ball, tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::Side;
    use glam::Vec2;

    fn setup() -> (Tuning, Paddle, Ball) {
        let tuning = Tuning::default();
        let paddle = Paddle::new(Side::Right, &tuning);
        let ball = Ball::new(&tuning);
        (tuning, paddle, ball)
    }

    #[test]
    fn test_target_without_jitter() {
        let (tuning, paddle, mut ball) = setup();
        ball.pos.y = 300.0;
        let mut rng = ScriptedRandom::constant(0.5);
        assert_eq!(target_y(&paddle, &ball, &tuning, &mut rng), 260.0);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_target_with_jitter() {
        let (tuning, paddle, mut ball) = setup();
        ball.pos.y = 300.0;
        // 0.01 triggers jitter, 0.0 picks the full negative nudge
        let mut rng = ScriptedRandom::new(vec![0.01, 0.0]);
        let target = target_y(&paddle, &ball, &tuning, &mut rng);
        assert_eq!(target, 260.0 - tuning.ai_jitter_magnitude);
    }

    #[test]
    fn test_steer_boosts_when_incoming() {
        let (tuning, mut paddle, mut ball) = setup();
        ball.vel = Vec2::new(5.0, 0.0);
        let below = paddle.y + 100.0;
        steer(&mut paddle, below, &ball, &tuning);
        assert!((paddle.dy - tuning.ai_speed * tuning.ai_boost).abs() < 1e-6);

        ball.vel = Vec2::new(-5.0, 0.0);
        let above = paddle.y - 100.0;
        steer(&mut paddle, above, &ball, &tuning);
        assert_eq!(paddle.dy, -tuning.ai_speed);
    }

    #[test]
    fn test_dead_zone_holds_still() {
        let (tuning, mut paddle, ball) = setup();
        paddle.dy = 3.0;
        let edge = paddle.y + tuning.ai_dead_zone;
        steer(&mut paddle, edge, &ball, &tuning);
        assert_eq!(paddle.dy, 0.0);
        let inside = paddle.y - tuning.ai_dead_zone + 0.5;
        steer(&mut paddle, inside, &ball, &tuning);
        assert_eq!(paddle.dy, 0.0);
    }

    #[test]
    fn test_left_side_incoming_is_negative_dx() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(Side::Left, &tuning);
        let mut ball = Ball::new(&tuning);
        ball.vel = Vec2::new(-5.0, 0.0);
        let below = paddle.y + 100.0;
        steer(&mut paddle, below, &ball, &tuning);
        assert!((paddle.dy - tuning.ai_speed * tuning.ai_boost).abs() < 1e-6);
    }

    #[test]
    fn test_drive_tracks_ball() {
        let (tuning, mut paddle, mut ball) = setup();
        let mut rng = ScriptedRandom::constant(0.9);
        ball.pos.y = 20.0;
        drive(&mut paddle, &ball, &tuning, &mut rng);
        assert!(paddle.dy < 0.0);

        ball.pos.y = 480.0;
        drive(&mut paddle, &ball, &tuning, &mut rng);
        assert!(paddle.dy > 0.0);
    }
}
