//! Duel Pong headless host
//!
//! Runs an autopilot match at a fixed frame count and logs what a real host
//! would draw and play. Usage: `duel-pong [frames] [seed] [tuning.json]`

use duel_pong::Tuning;
use duel_pong::audio::{AudioMix, LogAudio};
use duel_pong::render::{FrameSnapshot, RenderSink};
use duel_pong::sim::{Command, Game, GameEvent, Score, run_frame};

const DEFAULT_FRAMES: u64 = 60 * 60;

/// Stand-in drawing surface: reports score changes like the HUD would
#[derive(Default)]
struct HudLog {
    frames: u64,
    last_score: Score,
    peak_particles: usize,
}

impl RenderSink for HudLog {
    fn draw(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        self.peak_particles = self.peak_particles.max(frame.particles.len());
        if frame.score != self.last_score {
            log::info!(
                "[frame {}] score {} - {}",
                self.frames,
                frame.score.left,
                frame.score.right
            );
            self.last_score = frame.score;
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);
    let tuning = args.next().map(Tuning::load).unwrap_or_default();

    log::info!("Duel Pong (headless) starting: {} frames, seed {}", frames, seed);

    let mut game = Game::new(tuning, seed);
    game.set_autopilot(true);
    game.command(Command::Start);

    let mix = AudioMix::default();
    let mut audio = LogAudio::default();
    let mut hud = HudLog::default();
    let mut paddle_hits = 0u64;

    for _ in 0..frames {
        let events = run_frame(&mut game, &mix, &mut audio, &mut hud);
        paddle_hits += events
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit { .. }))
            .count() as u64;
    }

    log::info!(
        "Finished: {} paddle hits, {} tones, peak {} particles",
        paddle_hits,
        audio.played,
        hud.peak_particles
    );

    match serde_json::to_string(&game.score()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot encode score: {}", e),
    }
}
