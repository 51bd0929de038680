//! Minion Mania entry point
//!
//! Runs a headless session: settings from JSON, the demo player at the
//! controls, logged HUD and sound cues, and a JSON run summary on exit.
//!
//! Usage: `minion-mania [settings.json]`

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use minion_mania::audio::LogAudio;
use minion_mania::consts::SIM_DT;
use minion_mania::renderer::LogRenderer;
use minion_mania::{Game, Settings};

fn main() {
    env_logger::init();
    log::info!("Minion Mania starting...");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
    let settings = Settings::load(&path);
    if !path.exists() {
        // First run: leave an editable copy of the defaults behind
        if let Err(e) = settings.save(&path) {
            log::warn!("Could not write {}: {}", path.display(), e);
        }
    }

    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("World seed {}", seed);

    let mut audio = LogAudio::new();
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut game = Game::new(seed, &settings, LogRenderer::new(), audio);
    if !settings.autopilot {
        log::warn!("No input source attached; the minion will run straight ahead");
    }

    let frame_time = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();
    let mut frames = 0;
    while !game.is_over() && frames < settings.max_frames {
        let frame_dt = if settings.realtime {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            dt
        } else {
            SIM_DT
        };

        game.frame(frame_dt);
        frames += 1;

        if settings.realtime {
            std::thread::sleep(frame_time.saturating_sub(last.elapsed()));
        }
    }

    if !game.is_over() {
        log::warn!("Stopped after {} frames without an ending", frames);
    }

    match serde_json::to_string_pretty(&game.summary()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}

/// Seed from the wall clock when none is configured
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
