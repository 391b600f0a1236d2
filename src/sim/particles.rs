//! Particle bursts for hit/score feedback
//!
//! Purely cosmetic: particles never touch paddles, ball or walls.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::Particle;
use crate::Tuning;

/// Owns every live particle, in spawn order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Emit `count` particles from `origin`, evenly spread over a full circle
    /// (`angle = 2π·i/count`) with random speed, life and radius.
    ///
    /// When the cap is hit the oldest particles make room.
    pub fn spawn(
        &mut self,
        tuning: &Tuning,
        origin: Vec2,
        color: u32,
        count: usize,
        rng: &mut impl RandomSource,
    ) {
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32;
            let speed = rng.range(tuning.particle_min_speed, tuning.particle_max_speed);
            let life = rng.range_inclusive(tuning.particle_min_life, tuning.particle_max_life);
            let radius = rng.range(tuning.particle_min_radius, tuning.particle_max_radius);

            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life,
                max_life: life,
                color,
                radius,
            });
        }

        if self.particles.len() > self.capacity {
            let excess = self.particles.len() - self.capacity;
            self.particles.drain(..excess);
        }
    }

    /// Move, damp and age every particle; drop the dead ones
    pub fn advance(&mut self, damping: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel *= damping;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{ScriptedRandom, seeded};

    #[test]
    fn test_spawn_adds_count() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(tuning.max_particles);
        let mut rng = seeded(1);

        system.spawn(&tuning, Vec2::new(100.0, 100.0), 0xffffff, 15, &mut rng);
        assert_eq!(system.len(), 15);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
            assert!(p.life >= tuning.particle_min_life && p.life <= tuning.particle_max_life);
            assert_eq!(p.life, p.max_life);
            let speed = p.vel.length();
            assert!(speed >= tuning.particle_min_speed - 1e-4);
            assert!(speed <= tuning.particle_max_speed + 1e-4);
        }
    }

    #[test]
    fn test_spawn_directions_evenly_spread() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(64);
        let mut rng = ScriptedRandom::constant(0.0);

        system.spawn(&tuning, Vec2::ZERO, 0, 4, &mut rng);
        let dirs: Vec<Vec2> = system.iter().map(|p| p.vel.normalize()).collect();
        let expected = [Vec2::X, Vec2::Y, -Vec2::X, -Vec2::Y];
        for (dir, want) in dirs.iter().zip(expected) {
            assert!((*dir - want).length() < 1e-5, "{dir:?} != {want:?}");
        }
    }

    #[test]
    fn test_advance_moves_and_damps() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(64);
        let mut rng = ScriptedRandom::constant(0.0);

        system.spawn(&tuning, Vec2::ZERO, 0, 1, &mut rng);
        let before = system.as_slice()[0].clone();
        system.advance(0.5);
        let after = &system.as_slice()[0];

        assert_eq!(after.pos, before.pos + before.vel);
        assert_eq!(after.vel, before.vel * 0.5);
        assert_eq!(after.life, before.life - 1);
    }

    #[test]
    fn test_population_drains_monotonically() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(tuning.max_particles);
        let mut rng = seeded(99);

        system.spawn(&tuning, Vec2::ZERO, 0, 15, &mut rng);
        let mut last = system.len();
        for _ in 0..=tuning.particle_max_life {
            system.advance(tuning.particle_damping);
            assert!(system.len() <= last);
            last = system.len();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_alpha_tracks_life() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(8);
        // life = 20 with a zero sample
        let mut rng = ScriptedRandom::constant(0.0);
        system.spawn(&tuning, Vec2::ZERO, 0, 1, &mut rng);
        assert_eq!(system.as_slice()[0].alpha(), 1.0);

        for _ in 0..10 {
            system.advance(1.0);
        }
        assert!((system.as_slice()[0].alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let tuning = Tuning::default();
        let mut system = ParticleSystem::new(10);
        let mut rng = seeded(3);

        system.spawn(&tuning, Vec2::ZERO, 0xaaaaaa, 8, &mut rng);
        system.spawn(&tuning, Vec2::ONE, 0xbbbbbb, 8, &mut rng);
        assert_eq!(system.len(), 10);
        assert_eq!(system.iter().filter(|p| p.color == 0xaaaaaa).count(), 2);
        assert_eq!(system.as_slice()[9].color, 0xbbbbbb);
    }
}
