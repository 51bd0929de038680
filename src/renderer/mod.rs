//! Rendering boundary
//!
//! The core never rasterizes anything. Each frame it builds a `Scene` and
//! passes it to whatever `Renderer` the host supplies.

pub mod scene;

pub use scene::{CameraPose, DrawItem, EndScreen, Hud, Model, Scene};

/// Consumes one scene per frame
pub trait Renderer {
    fn draw(&mut self, scene: &Scene);
}

/// Headless renderer: logs HUD changes and the end screen
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_hud: Option<(u32, u32)>,
    shown_end: bool,
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, scene: &Scene) {
        self.frames += 1;

        if let Some(end) = &scene.end_screen {
            if !self.shown_end {
                log::info!("{} {}", end.title, end.detail);
                self.shown_end = true;
            }
            return;
        }
        self.shown_end = false;

        // Log once per whole second or score change
        let hud = (scene.hud.score, scene.hud.remaining.ceil() as u32);
        if self.last_hud != Some(hud) {
            log::info!(
                "{:?} | score {}/{} | {:>2}s | {:?} light {:.2} | {} objects",
                scene.hud.level,
                scene.hud.score,
                scene.hud.target,
                hud.1,
                scene.environment.time_of_day,
                scene.environment.light_intensity,
                scene.items.len()
            );
            self.last_hud = Some(hud);
        }
        log::trace!("camera {:?}", scene.camera);
    }
}
