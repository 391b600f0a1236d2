//! Human paddle input
//!
//! Host event handlers write into `InputState` whenever they fire; the tick
//! reads it once per frame. Last writer wins.

use serde::{Deserialize, Serialize};

use super::state::Paddle;
use crate::Tuning;

/// Velocity below this snaps to zero while coasting
const REST_EPSILON: f32 = 0.05;

/// Raw input captured between ticks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    /// Latest absolute pointer Y (playfield px), consumed by the next tick
    pub pointer_y: Option<f32>,
    /// Move-up key held
    pub up: bool,
    /// Move-down key held
    pub down: bool,
}

impl InputState {
    /// Record a pointer position; non-finite values are ignored
    pub fn pointer_moved(&mut self, y: f32) {
        if y.is_finite() {
            self.pointer_y = Some(y);
        }
    }

    pub fn key_up(&mut self, held: bool) {
        self.up = held;
    }

    pub fn key_down(&mut self, held: bool) {
        self.down = held;
    }

    /// Net key direction: -1 up, +1 down, 0 for none or both
    pub fn key_axis(&self) -> f32 {
        match (self.up, self.down) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Apply buffered input to the human paddle.
///
/// A pointer sample places the paddle top at `pointer - height/2` directly.
/// A held key sets full keyboard speed; otherwise velocity decays toward zero
/// by `paddle_damping` each frame. Position integration happens in physics.
pub fn apply_input(paddle: &mut Paddle, input: &mut InputState, tuning: &Tuning) {
    if let Some(pointer_y) = input.pointer_y.take() {
        paddle.y = pointer_y - paddle.height / 2.0;
        paddle.clamp_to(tuning.height);
    }

    let axis = input.key_axis();
    if axis != 0.0 {
        paddle.dy = axis * tuning.paddle_speed;
    } else {
        paddle.dy *= tuning.paddle_damping;
        if paddle.dy.abs() < REST_EPSILON || !paddle.dy.is_finite() {
            paddle.dy = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;

    fn paddle() -> Paddle {
        Paddle::new(Side::Left, &Tuning::default())
    }

    #[test]
    fn test_pointer_centers_paddle() {
        let tuning = Tuning::default();
        let mut paddle = paddle();
        let mut input = InputState::default();

        input.pointer_moved(100.0);
        apply_input(&mut paddle, &mut input, &tuning);
        assert_eq!(paddle.y, 60.0);
        assert!(input.pointer_y.is_none());
    }

    #[test]
    fn test_pointer_clamped_and_nan_ignored() {
        let tuning = Tuning::default();
        let mut paddle = paddle();
        let mut input = InputState::default();

        input.pointer_moved(-300.0);
        apply_input(&mut paddle, &mut input, &tuning);
        assert_eq!(paddle.y, 0.0);

        input.pointer_moved(f32::NAN);
        assert!(input.pointer_y.is_none());
        apply_input(&mut paddle, &mut input, &tuning);
        assert_eq!(paddle.y, 0.0);
    }

    #[test]
    fn test_key_sets_speed() {
        let tuning = Tuning::default();
        let mut paddle = paddle();
        let mut input = InputState::default();

        input.key_down(true);
        apply_input(&mut paddle, &mut input, &tuning);
        assert_eq!(paddle.dy, tuning.paddle_speed);

        input.key_up(true);
        apply_input(&mut paddle, &mut input, &tuning);
        // Both held cancel out and coast
        assert!(paddle.dy < tuning.paddle_speed && paddle.dy > 0.0);
    }

    #[test]
    fn test_release_decays_to_rest() {
        let tuning = Tuning::default();
        let mut paddle = paddle();
        let mut input = InputState::default();

        input.key_up(true);
        apply_input(&mut paddle, &mut input, &tuning);
        assert_eq!(paddle.dy, -tuning.paddle_speed);

        input.key_up(false);
        apply_input(&mut paddle, &mut input, &tuning);
        assert!((paddle.dy + tuning.paddle_speed * tuning.paddle_damping).abs() < 1e-6);

        for _ in 0..100 {
            apply_input(&mut paddle, &mut input, &tuning);
        }
        assert_eq!(paddle.dy, 0.0);
    }
}
