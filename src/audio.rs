//! Sound requests
//!
//! The simulation never synthesizes audio. Each game event maps to a short
//! tone request that a host audio backend plays however it likes.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top/bottom wall
    WallHit,
    /// Point scored
    Score,
    /// Ball re-served from the center
    Serve,
    /// Game reset by the player
    Reset,
}

impl SoundEffect {
    pub fn from_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::PaddleHit { .. } => SoundEffect::PaddleHit,
            GameEvent::WallBounce { .. } => SoundEffect::WallHit,
            GameEvent::Score { .. } => SoundEffect::Score,
            GameEvent::BallReset => SoundEffect::Serve,
            GameEvent::GameReset => SoundEffect::Reset,
        }
    }

    /// Base tone at full volume
    pub fn tone(self) -> Tone {
        let (frequency, duration, gain) = match self {
            // Solid thump
            SoundEffect::PaddleHit => (150.0, 0.1, 0.6),
            // Higher ping
            SoundEffect::WallHit => (400.0, 0.08, 0.3),
            SoundEffect::Score => (880.0, 0.3, 0.5),
            SoundEffect::Serve => (300.0, 0.06, 0.25),
            SoundEffect::Reset => (220.0, 0.2, 0.4),
        };
        Tone {
            frequency,
            duration,
            volume: gain,
        }
    }
}

/// A single "play tone" request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f32,
    /// 0.0 - 1.0
    pub volume: f32,
}

/// Host-side tone player
pub trait AudioSink {
    fn play(&mut self, tone: Tone);
}

/// Volume/mute applied before tones reach the sink
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioMix {
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl AudioMix {
    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = crate::clamp(vol, 0.0, 1.0);
    }

    /// Effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Tone for an event, or `None` when silent
    pub fn tone_for(&self, event: &GameEvent) -> Option<Tone> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }
        let mut tone = SoundEffect::from_event(event).tone();
        tone.volume *= vol;
        Some(tone)
    }

    /// Forward every audible event to `sink`
    pub fn dispatch(&self, events: &[GameEvent], sink: &mut impl AudioSink) {
        for tone in events.iter().filter_map(|e| self.tone_for(e)) {
            sink.play(tone);
        }
    }
}

/// Sink that only logs requests (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, tone: Tone) {
        self.played += 1;
        log::trace!(
            "tone {:.0} Hz for {:.2}s at {:.2}",
            tone.frequency,
            tone.duration,
            tone.volume
        );
    }
}
