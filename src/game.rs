//! Frame driver
//!
//! Turns wall-clock frame deltas into fixed simulation ticks, forwards tick
//! events to the audio player and hands a fresh scene to the renderer.

use serde::Serialize;

use crate::audio::{AudioPlayer, SoundCue};
use crate::consts::*;
use crate::renderer::{Renderer, Scene};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, InputEvent, TickInput, tick};

/// Longest frame delta accepted before clamping (seconds)
const MAX_FRAME_DT: f32 = 0.1;

/// Outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u32,
    pub remaining: f32,
    pub elapsed: f32,
    pub ticks: u64,
}

/// Game instance holding state and its collaborators
pub struct Game<R: Renderer, A: AudioPlayer> {
    state: GameState,
    renderer: R,
    audio: A,
    accumulator: f32,
    input: TickInput,
}

impl<R: Renderer, A: AudioPlayer> Game<R, A> {
    pub fn new(seed: u64, settings: &Settings, renderer: R, audio: A) -> Self {
        let mut state = GameState::new(seed);
        state.player.perspective = settings.perspective;
        Self {
            state,
            renderer,
            audio,
            accumulator: 0.0,
            input: TickInput {
                events: Vec::new(),
                autopilot: settings.autopilot,
            },
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Queue an input event for the next tick
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.events.push(event);
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns the tick count.
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Input events are one-shot
            self.input.events.clear();

            for event in &self.state.events {
                if let Some(cue) = SoundCue::for_event(event) {
                    self.audio.play(cue);
                }
            }
        }
        substeps
    }

    /// Draw the current state
    pub fn render(&mut self) {
        let scene = Scene::build(&self.state);
        self.renderer.draw(&scene);
    }

    /// Update then render
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        let ticks = self.update(frame_dt);
        self.render();
        ticks
    }

    pub fn is_over(&self) -> bool {
        self.state.phase.is_terminal()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.state.seed,
            phase: self.state.phase,
            score: self.state.score,
            remaining: self.state.remaining,
            elapsed: self.state.elapsed,
            ticks: self.state.time_ticks,
        }
    }
}
