//! Game tuning
//!
//! Every gameplay constant in one serializable struct. Missing JSON fields
//! fall back to the defaults in `crate::consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_inset: f32,
    /// Keyboard paddle speed (px/frame)
    pub paddle_speed: f32,
    /// Velocity decay when no key is held (0-1)
    pub paddle_damping: f32,

    // === AI ===
    pub ai_speed: f32,
    pub ai_boost: f32,
    pub ai_dead_zone: f32,
    pub ai_jitter_chance: f32,
    pub ai_jitter_magnitude: f32,

    // === Ball ===
    pub ball_size: f32,
    pub serve_dx: f32,
    pub serve_dy: f32,
    pub speedup: f32,
    pub max_ball_speed: f32,
    pub spin_factor: f32,
    pub spin_influence: f32,
    pub trail_length: usize,

    // === Particles ===
    pub paddle_hit_particles: usize,
    pub wall_bounce_particles: usize,
    pub score_particles: usize,
    pub serve_particles: usize,
    pub particle_min_speed: f32,
    pub particle_max_speed: f32,
    pub particle_min_life: u32,
    pub particle_max_life: u32,
    pub particle_min_radius: f32,
    pub particle_max_radius: f32,
    pub particle_damping: f32,
    pub max_particles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            paddle_speed: PADDLE_SPEED,
            paddle_damping: PADDLE_DAMPING,

            ai_speed: AI_SPEED,
            ai_boost: AI_BOOST,
            ai_dead_zone: AI_DEAD_ZONE,
            ai_jitter_chance: AI_JITTER_CHANCE,
            ai_jitter_magnitude: AI_JITTER_MAGNITUDE,

            ball_size: BALL_SIZE,
            serve_dx: SERVE_DX,
            serve_dy: SERVE_DY,
            speedup: PADDLE_SPEEDUP,
            max_ball_speed: MAX_BALL_SPEED,
            spin_factor: SPIN_FACTOR,
            spin_influence: SPIN_INFLUENCE,
            trail_length: TRAIL_LENGTH,

            paddle_hit_particles: PADDLE_HIT_PARTICLES,
            wall_bounce_particles: WALL_BOUNCE_PARTICLES,
            score_particles: SCORE_PARTICLES,
            serve_particles: SERVE_PARTICLES,
            particle_min_speed: PARTICLE_MIN_SPEED,
            particle_max_speed: PARTICLE_MAX_SPEED,
            particle_min_life: PARTICLE_MIN_LIFE,
            particle_max_life: PARTICLE_MAX_LIFE,
            particle_min_radius: PARTICLE_MIN_RADIUS,
            particle_max_radius: PARTICLE_MAX_RADIUS,
            particle_damping: PARTICLE_DAMPING,
            max_particles: MAX_PARTICLES,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Highest y a paddle's top edge may take (the lowest is 0)
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_height
    }

    #[inline]
    pub fn ball_radius(&self) -> f32 {
        self.ball_size / 2.0
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        fn positive(value: &mut f32, fallback: f32, name: &str) {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Tuning {} = {} rejected, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        fn unit(value: &mut f32, fallback: f32, name: &str) {
            if !value.is_finite() || !(0.0..=1.0).contains(&*value) {
                log::warn!("Tuning {} = {} rejected, using {}", name, value, fallback);
                *value = fallback;
            }
        }

        positive(&mut self.width, defaults.width, "width");
        positive(&mut self.height, defaults.height, "height");
        positive(&mut self.paddle_width, defaults.paddle_width, "paddle_width");
        positive(&mut self.paddle_height, defaults.paddle_height, "paddle_height");
        positive(&mut self.paddle_speed, defaults.paddle_speed, "paddle_speed");
        positive(&mut self.ai_speed, defaults.ai_speed, "ai_speed");
        positive(&mut self.ai_boost, defaults.ai_boost, "ai_boost");
        positive(&mut self.ball_size, defaults.ball_size, "ball_size");
        positive(&mut self.serve_dx, defaults.serve_dx, "serve_dx");
        positive(&mut self.serve_dy, defaults.serve_dy, "serve_dy");
        positive(&mut self.speedup, defaults.speedup, "speedup");
        positive(&mut self.max_ball_speed, defaults.max_ball_speed, "max_ball_speed");
        positive(&mut self.particle_min_speed, defaults.particle_min_speed, "particle_min_speed");
        positive(&mut self.particle_max_speed, defaults.particle_max_speed, "particle_max_speed");
        positive(
            &mut self.particle_min_radius,
            defaults.particle_min_radius,
            "particle_min_radius",
        );
        positive(
            &mut self.particle_max_radius,
            defaults.particle_max_radius,
            "particle_max_radius",
        );
        unit(&mut self.paddle_damping, defaults.paddle_damping, "paddle_damping");
        unit(&mut self.ai_jitter_chance, defaults.ai_jitter_chance, "ai_jitter_chance");
        unit(&mut self.particle_damping, defaults.particle_damping, "particle_damping");

        if !self.paddle_inset.is_finite() || self.paddle_inset < 0.0 {
            self.paddle_inset = 0.0;
        }
        if !self.ai_dead_zone.is_finite() || self.ai_dead_zone < 0.0 {
            self.ai_dead_zone = 0.0;
        }
        if !self.ai_jitter_magnitude.is_finite() || self.ai_jitter_magnitude < 0.0 {
            self.ai_jitter_magnitude = 0.0;
        }
        if !self.spin_factor.is_finite() {
            self.spin_factor = defaults.spin_factor;
        }
        if !self.spin_influence.is_finite() {
            self.spin_influence = defaults.spin_influence;
        }

        // Both paddles must fit side by side with room between them
        if 2.0 * (self.paddle_inset + self.paddle_width) >= self.width {
            log::warn!(
                "Paddle layout (inset {}, width {}) too wide for playfield {}, using defaults",
                self.paddle_inset,
                self.paddle_width,
                self.width
            );
            self.paddle_inset = defaults.paddle_inset;
            self.paddle_width = defaults.paddle_width;
            if 2.0 * (self.paddle_inset + self.paddle_width) >= self.width {
                self.paddle_inset = 0.0;
                self.paddle_width = self.width / 4.0;
            }
        }

        // Paddle must fit inside the playfield
        if self.paddle_height > self.height {
            log::warn!(
                "Paddle height {} exceeds playfield height {}, shrinking",
                self.paddle_height,
                self.height
            );
            self.paddle_height = self.height;
        }

        // Serve speed must itself respect the speed limit
        let serve_max = self.serve_dx.max(self.serve_dy);
        if self.max_ball_speed < serve_max {
            log::warn!(
                "max_ball_speed {} below serve speed {}, raising",
                self.max_ball_speed,
                serve_max
            );
            self.max_ball_speed = serve_max;
        }

        if self.particle_max_speed < self.particle_min_speed {
            std::mem::swap(&mut self.particle_min_speed, &mut self.particle_max_speed);
        }
        if self.particle_max_radius < self.particle_min_radius {
            std::mem::swap(&mut self.particle_min_radius, &mut self.particle_max_radius);
        }
        self.particle_min_life = self.particle_min_life.max(1);
        if self.particle_max_life < self.particle_min_life {
            self.particle_max_life = self.particle_min_life;
        }

        if self.trail_length > TRAIL_LENGTH_LIMIT {
            log::warn!(
                "trail_length {} above {}, clamping",
                self.trail_length,
                TRAIL_LENGTH_LIMIT
            );
            self.trail_length = TRAIL_LENGTH_LIMIT;
        }
        if self.max_particles > PARTICLE_CAP_LIMIT {
            log::warn!(
                "max_particles {} above {}, clamping",
                self.max_particles,
                PARTICLE_CAP_LIMIT
            );
            self.max_particles = PARTICLE_CAP_LIMIT;
        }
        // A burst never spawns more than the cap can hold
        let cap = self.max_particles;
        for count in [
            &mut self.paddle_hit_particles,
            &mut self.wall_bounce_particles,
            &mut self.score_particles,
            &mut self.serve_particles,
        ] {
            *count = (*count).min(cap);
        }

        self
    }
}
