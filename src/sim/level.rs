//! Per-level configuration
//!
//! Lane layouts, movement constants, terrain height and spawn tables for the
//! two levels. Everything here is fixed at construction time; jump launch
//! velocity is solved once from the desired peak height.

use serde::{Deserialize, Serialize};

use super::state::{EntityClass, GoalKind};
use crate::lerp;

/// Which of the two levels is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    One,
    Two,
}

/// Ordered, fixed X coordinates the player can occupy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneSet {
    xs: Vec<f32>,
}

impl LaneSet {
    pub fn new(xs: &[f32]) -> Self {
        assert!(!xs.is_empty(), "a lane set needs at least one lane");
        Self { xs: xs.to_vec() }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.xs.len() - 1
    }

    /// X coordinate of a lane, clamped to the last lane
    pub fn x(&self, index: usize) -> f32 {
        self.xs[index.min(self.last_index())]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.xs
    }

    /// One lane to the left, stopping at lane 0
    pub fn step_left(&self, index: usize) -> usize {
        index.min(self.last_index()).saturating_sub(1)
    }

    /// One lane to the right, stopping at the last lane
    pub fn step_right(&self, index: usize) -> usize {
        (index + 1).min(self.last_index())
    }
}

/// One linear piece of the terrain height profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightSegment {
    /// Z where the segment begins (the player reaches it first, higher Z)
    pub z_from: f32,
    /// Z where the segment ends
    pub z_to: f32,
    pub y_from: f32,
    pub y_to: f32,
}

impl HeightSegment {
    fn contains(&self, z: f32) -> bool {
        z <= self.z_from && z > self.z_to
    }

    fn height_at(&self, z: f32) -> f32 {
        let t = (self.z_from - z) / (self.z_from - self.z_to);
        lerp(self.y_from, self.y_to, t)
    }
}

/// Piecewise-linear ground height keyed by Z
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightProfile {
    pub resting: f32,
    pub segments: Vec<HeightSegment>,
}

impl HeightProfile {
    pub fn flat(resting: f32) -> Self {
        Self {
            resting,
            segments: Vec::new(),
        }
    }

    /// Ground height at depth `z`; the resting height outside every segment
    pub fn height_at(&self, z: f32) -> f32 {
        self.segments
            .iter()
            .find(|s| s.contains(z))
            .map(|s| s.height_at(z))
            .unwrap_or(self.resting)
    }
}

/// Which X positions a spawn rule draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Columns {
    Lanes,
    Scenery,
}

/// Placement rule for one entity class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub class: EntityClass,
    pub count: usize,
    pub start_z: f32,
    pub spacing: f32,
    pub columns: Columns,
}

/// Vertical motion constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpTuning {
    pub gravity: f32,
    pub peak_height: f32,
    /// Launch velocity, `sqrt(2 g h)`
    pub launch_velocity: f32,
}

impl JumpTuning {
    pub fn new(gravity: f32, peak_height: f32) -> Self {
        Self {
            gravity,
            peak_height,
            launch_velocity: (2.0 * gravity * peak_height).sqrt(),
        }
    }
}

/// Everything that differs between level 1 and level 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: Level,
    pub lanes: LaneSet,
    pub start_lane: usize,
    /// X positions for decorative scenery, off the running lanes
    pub scenery: Vec<f32>,
    /// Forward speed (units/s toward -Z)
    pub speed: f32,
    /// Peak backward speed added at glitch onset, decays to zero
    pub glitch_pushback: f32,
    pub jump: JumpTuning,
    pub terrain: HeightProfile,
    pub goal: GoalKind,
    pub goal_z: f32,
    /// Score needed at the goal to progress
    pub threshold: u32,
    pub spawns: Vec<SpawnRule>,
}

impl LevelConfig {
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::One => Self::level_one(),
            Level::Two => Self::level_two(),
        }
    }

    /// Daylight park with a footbridge, bananas and barriers
    pub fn level_one() -> Self {
        Self {
            level: Level::One,
            lanes: LaneSet::new(&[0.6, 1.6, 2.4, 3.3, 4.1, 5.0]),
            start_lane: 2,
            scenery: vec![-1.5, 7.0],
            speed: 6.0,
            glitch_pushback: 8.0,
            jump: JumpTuning::new(30.0, 2.5),
            terrain: HeightProfile {
                resting: 11.0,
                segments: vec![
                    // ascent onto the bridge
                    HeightSegment { z_from: 25.0, z_to: 15.0, y_from: 11.0, y_to: 13.0 },
                    HeightSegment { z_from: 15.0, z_to: 5.0, y_from: 13.0, y_to: 14.0 },
                    // plateau
                    HeightSegment { z_from: 5.0, z_to: -10.0, y_from: 14.0, y_to: 14.0 },
                    // descent
                    HeightSegment { z_from: -10.0, z_to: -25.0, y_from: 14.0, y_to: 11.0 },
                ],
            },
            goal: GoalKind::Portal,
            goal_z: -110.0,
            threshold: crate::consts::LEVEL1_THRESHOLD,
            spawns: vec![
                SpawnRule { class: EntityClass::Banana, count: 15, start_z: 55.0, spacing: 10.0, columns: Columns::Lanes },
                SpawnRule { class: EntityClass::Obstacle, count: 6, start_z: 48.0, spacing: 22.0, columns: Columns::Lanes },
                SpawnRule { class: EntityClass::Tree, count: 12, start_z: 58.0, spacing: 14.0, columns: Columns::Scenery },
            ],
        }
    }

    /// Riverside at dusk with coins, logs and sandbag walls
    pub fn level_two() -> Self {
        Self {
            level: Level::Two,
            lanes: LaneSet::new(&[0.8, 2.0, 3.2, 4.4]),
            start_lane: 1,
            scenery: vec![-1.0, 6.2],
            speed: 8.0,
            glitch_pushback: 10.0,
            jump: JumpTuning::new(40.0, 2.0),
            terrain: HeightProfile::flat(1.0),
            goal: GoalKind::FinishLine,
            goal_z: -130.0,
            threshold: crate::consts::LEVEL2_THRESHOLD,
            spawns: vec![
                SpawnRule { class: EntityClass::Coin, count: 14, start_z: 50.0, spacing: 12.0, columns: Columns::Lanes },
                SpawnRule { class: EntityClass::Log, count: 5, start_z: 40.0, spacing: 30.0, columns: Columns::Lanes },
                SpawnRule { class: EntityClass::Sandbag, count: 4, start_z: 22.0, spacing: 35.0, columns: Columns::Lanes },
                SpawnRule { class: EntityClass::Tree, count: 14, start_z: 58.0, spacing: 13.0, columns: Columns::Scenery },
            ],
        }
    }

    pub fn spawn_rule(&self, class: EntityClass) -> Option<&SpawnRule> {
        self.spawns.iter().find(|r| r.class == class)
    }

    pub fn start_x(&self) -> f32 {
        self.lanes.x(self.start_lane)
    }
}
