//! Sound cue playback
//!
//! The simulation raises events; the frame driver maps them to cues and hands
//! them to an `AudioPlayer`. Playback is fire-and-forget.

use crate::sim::{EntityClass, GameEvent, GamePhase};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Banana picked up
    BananaCollect,
    /// Coin picked up
    CoinCollect,
    /// Ran into a barrier or log
    Glitch,
    /// Bounced off a sandbag
    Rebound,
    /// Countdown penalty applied
    Penalty,
    /// Through the portal
    LevelUp,
    Win,
    Lose,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PickupCollected {
                class: EntityClass::Coin,
                ..
            } => Some(SoundCue::CoinCollect),
            GameEvent::PickupCollected { .. } => Some(SoundCue::BananaCollect),
            GameEvent::Glitched { .. } => Some(SoundCue::Glitch),
            GameEvent::ReboundStarted => Some(SoundCue::Rebound),
            GameEvent::TimePenalty { .. } => Some(SoundCue::Penalty),
            GameEvent::LevelUp => Some(SoundCue::LevelUp),
            GameEvent::GameOver {
                phase: GamePhase::GameOverWin,
            } => Some(SoundCue::Win),
            GameEvent::GameOver { .. } => Some(SoundCue::Lose),
        }
    }
}

/// Fire-and-forget cue playback
pub trait AudioPlayer {
    fn play(&mut self, cue: SoundCue);
}

/// Cues kept in `LogAudio`'s history
const HISTORY_LEN: usize = 32;

/// Audio backend for headless runs: honours volume and mute, logs each cue
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: Vec<SoundCue>,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Most recent audible cues, oldest first
    pub fn played(&self) -> &[SoundCue] {
        &self.played
    }
}

impl AudioPlayer for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Sound {:?} at volume {:.2}", cue, vol);
        if self.played.len() == HISTORY_LEN {
            self.played.remove(0);
        }
        self.played.push(cue);
    }
}
