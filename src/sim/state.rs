//! Game state and core simulation types
//!
//! A single owned `GameState` holds everything a tick reads or writes.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::level::{Level, LevelConfig};
use super::spawn;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Level1Running,
    Level2Running,
    /// Reached the portal without enough bananas
    GameOverLoseEarly,
    /// Failed level 2 (short on score, or out of time while rebounding)
    GameOverLose,
    GameOverWin,
}

impl GamePhase {
    /// Terminal phases absorb: nothing but the end screen runs once entered
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GamePhase::GameOverLoseEarly | GamePhase::GameOverLose | GamePhase::GameOverWin
        )
    }

    pub fn level(&self) -> Option<Level> {
        match self {
            GamePhase::Level1Running => Some(Level::One),
            GamePhase::Level2Running => Some(Level::Two),
            _ => None,
        }
    }
}

/// World object classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    Coin,
    Banana,
    Obstacle,
    Sandbag,
    Log,
    Tree,
}

/// What touching an entity does to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Pickup,
    /// Knocks the player into a glitch
    Glitch,
    /// Bounces the player backward
    Rebound,
    Decoration,
}

impl EntityClass {
    pub const ALL: [EntityClass; 6] = [
        EntityClass::Coin,
        EntityClass::Banana,
        EntityClass::Obstacle,
        EntityClass::Sandbag,
        EntityClass::Log,
        EntityClass::Tree,
    ];

    pub fn role(&self) -> Role {
        match self {
            EntityClass::Coin | EntityClass::Banana => Role::Pickup,
            EntityClass::Obstacle | EntityClass::Log => Role::Glitch,
            EntityClass::Sandbag => Role::Rebound,
            EntityClass::Tree => Role::Decoration,
        }
    }
}

/// A placed world object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub pos: Vec3,
}

impl Entity {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec3::new(x, y, z),
        }
    }
}

/// Per-class entity collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub coins: Vec<Entity>,
    pub bananas: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub sandbags: Vec<Entity>,
    pub logs: Vec<Entity>,
    pub trees: Vec<Entity>,
}

impl World {
    pub fn collection(&self, class: EntityClass) -> &Vec<Entity> {
        match class {
            EntityClass::Coin => &self.coins,
            EntityClass::Banana => &self.bananas,
            EntityClass::Obstacle => &self.obstacles,
            EntityClass::Sandbag => &self.sandbags,
            EntityClass::Log => &self.logs,
            EntityClass::Tree => &self.trees,
        }
    }

    pub fn collection_mut(&mut self, class: EntityClass) -> &mut Vec<Entity> {
        match class {
            EntityClass::Coin => &mut self.coins,
            EntityClass::Banana => &mut self.bananas,
            EntityClass::Obstacle => &mut self.obstacles,
            EntityClass::Sandbag => &mut self.sandbags,
            EntityClass::Log => &mut self.logs,
            EntityClass::Tree => &mut self.trees,
        }
    }

    pub fn clear(&mut self) {
        for class in EntityClass::ALL {
            self.collection_mut(class).clear();
        }
    }

    pub fn total(&self) -> usize {
        EntityClass::ALL
            .iter()
            .map(|&c| self.collection(c).len())
            .sum()
    }
}

/// Level goal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    /// Level 1 exit
    Portal,
    /// Level 2 finish
    FinishLine,
}

/// Fixed trigger that ends a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalMarker {
    pub kind: GoalKind,
    pub pos: Vec3,
}

/// Camera perspective (view-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Perspective {
    #[default]
    ThirdPerson,
    FirstPerson,
}

impl Perspective {
    pub fn toggled(self) -> Self {
        match self {
            Perspective::ThirdPerson => Perspective::FirstPerson,
            Perspective::FirstPerson => Perspective::ThirdPerson,
        }
    }
}

/// Vertical jump arc
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpState {
    pub active: bool,
    pub velocity: f32,
    /// Height above the ground profile
    pub offset: f32,
}

/// Post-collision stutter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glitch {
    /// Countdown value when the glitch began. Recorded for logs and hosts;
    /// clearing is driven by `elapsed` alone.
    pub onset_timer: f32,
    /// Timer units elapsed since onset
    pub elapsed: f32,
}

/// Sandbag knockback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rebound {
    /// Current backward speed (units/s toward +Z)
    pub velocity: f32,
    /// Distance pushed back so far
    pub distance: f32,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub lane: usize,
    pub jump: JumpState,
    pub glitch: Option<Glitch>,
    pub rebound: Option<Rebound>,
    pub perspective: Perspective,
    /// Camera dolly offset (view-only)
    pub zoom: f32,
}

impl Player {
    /// Place a fresh player at the start of a level
    pub fn spawn(config: &LevelConfig, perspective: Perspective) -> Self {
        let z = PLAYER_START_Z;
        Self {
            pos: Vec3::new(config.start_x(), config.terrain.height_at(z), z),
            lane: config.start_lane,
            jump: JumpState::default(),
            glitch: None,
            rebound: None,
            perspective,
            zoom: 0.0,
        }
    }

    pub fn is_glitching(&self) -> bool {
        self.glitch.is_some()
    }

    pub fn is_rebounding(&self) -> bool {
        self.rebound.is_some()
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCollected { class: EntityClass, score: u32 },
    Glitched { class: EntityClass },
    ReboundStarted,
    TimePenalty { seconds: f32 },
    LevelUp,
    GameOver { phase: GamePhase },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded once per run, never reseeded
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub config: LevelConfig,
    pub player: Player,
    /// Simulation camera depth (culling and rebound), independent of perspective
    pub camera_z: f32,
    pub world: World,
    pub goal: GoalMarker,
    pub score: u32,
    /// Countdown, clamped at zero
    pub remaining: f32,
    /// Sum of frame deltas since the run began
    pub elapsed: f32,
    /// Sum of frame deltas since the current level began
    pub level_elapsed: f32,
    /// Drives pickup bob/spin
    pub anim_time: f32,
    pub time_ticks: u64,
    pub environment: Environment,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run at level 1 with the given seed
    pub fn new(seed: u64) -> Self {
        let config = LevelConfig::level_one();
        let player = Player::spawn(&config, Perspective::default());
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Level1Running,
            goal: goal_for(&config),
            camera_z: player.pos.z + CAMERA_OFFSET_Z,
            environment: Environment::for_level(Level::One, 0.0),
            config,
            player,
            world: World::default(),
            score: 0,
            remaining: TIMER_START,
            elapsed: 0.0,
            level_elapsed: 0.0,
            anim_time: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        };
        spawn::populate_level(&mut state);
        state
    }

    /// Reset player, camera, timer and world for `level`
    ///
    /// Score carries over; the RNG keeps its stream.
    pub fn enter_level(&mut self, level: Level) {
        let perspective = self.player.perspective;
        self.config = LevelConfig::for_level(level);
        self.player = Player::spawn(&self.config, perspective);
        self.camera_z = self.player.pos.z + CAMERA_OFFSET_Z;
        self.goal = goal_for(&self.config);
        self.remaining = TIMER_START;
        self.level_elapsed = 0.0;
        self.environment = Environment::for_level(level, 0.0);
        self.phase = match level {
            Level::One => GamePhase::Level1Running,
            Level::Two => GamePhase::Level2Running,
        };
        spawn::populate_level(self);
    }

    /// Ground height under the player right now
    pub fn ground_height(&self) -> f32 {
        self.config.terrain.height_at(self.player.pos.z)
    }
}

fn goal_for(config: &LevelConfig) -> GoalMarker {
    GoalMarker {
        kind: config.goal,
        pos: Vec3::new(
            config.lanes.x(config.lanes.len() / 2),
            config.terrain.height_at(config.goal_z),
            config.goal_z,
        ),
    }
}
