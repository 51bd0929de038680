//! Day/night lighting
//!
//! Level 1 runs in daylight. Level 2 starts in daylight and sinks through
//! dusk into night as level time passes. Lighting feeds the renderer only;
//! nothing in the simulation reads it back.

use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::lerp;

/// Seconds of level 2 before full night
pub const NIGHTFALL_SECONDS: f32 = 20.0;

const DAY_INTENSITY: f32 = 0.7;
const NIGHT_INTENSITY: f32 = 0.15;
const DAY_SKY: [f32; 3] = [0.53, 0.81, 0.92];
const DUSK_SKY: [f32; 3] = [0.85, 0.45, 0.30];
const NIGHT_SKY: [f32; 3] = [0.04, 0.05, 0.15];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Day,
    Dusk,
    Night,
}

/// Light state for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub time_of_day: TimeOfDay,
    /// Ambient light intensity (0-1)
    pub light_intensity: f32,
    pub sky_color: [f32; 3],
    /// Light source height; sinks with the sun
    pub light_height: f32,
}

impl Environment {
    pub fn for_level(level: Level, level_elapsed: f32) -> Self {
        match level {
            Level::One => Self::daylight(),
            Level::Two => Self::nightfall(level_elapsed / NIGHTFALL_SECONDS),
        }
    }

    fn daylight() -> Self {
        Self {
            time_of_day: TimeOfDay::Day,
            light_intensity: DAY_INTENSITY,
            sky_color: DAY_SKY,
            light_height: 100.0,
        }
    }

    /// `progress` 0 = day, 1 = night
    fn nightfall(progress: f32) -> Self {
        let t = progress.clamp(0.0, 1.0);
        let time_of_day = if t < 0.35 {
            TimeOfDay::Day
        } else if t < 0.75 {
            TimeOfDay::Dusk
        } else {
            TimeOfDay::Night
        };
        // Day -> dusk over the first half, dusk -> night over the second
        let sky_color = if t < 0.5 {
            mix(DAY_SKY, DUSK_SKY, t * 2.0)
        } else {
            mix(DUSK_SKY, NIGHT_SKY, (t - 0.5) * 2.0)
        };
        Self {
            time_of_day,
            light_intensity: lerp(DAY_INTENSITY, NIGHT_INTENSITY, t),
            sky_color,
            light_height: lerp(100.0, 10.0, t),
        }
    }
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}
