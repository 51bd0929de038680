//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, seeded once per run
//! - Fixed per-tick countdown step
//! - Stable iteration order (by entity class, then placement order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod environment;
pub mod level;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{AxisTest, Tolerance, goal_reached, tolerance};
pub use environment::{Environment, TimeOfDay};
pub use level::{LaneSet, Level, LevelConfig};
pub use state::{
    Entity, EntityClass, GameEvent, GamePhase, GameState, GoalKind, GoalMarker, Perspective,
    Player, Role, World,
};
pub use tick::{InputEvent, TickInput, tick};
