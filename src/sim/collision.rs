//! Collision detection and response
//!
//! Every class gets its own axis-aligned proximity test from a tolerance
//! table rather than a shared bounding box. Pickups match lanes exactly
//! (both sides are snapped to the same lane coordinates); hazards use small
//! X/Z windows and either an absolute or player-relative Y window.

use glam::Vec3;

use super::physics;
use super::state::{EntityClass, GameEvent, GameState, GoalMarker, Role};
use crate::consts::GOAL_REACH;

/// Per-axis proximity test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisTest {
    /// Coordinates must be equal
    Exact,
    /// Absolute difference strictly below the bound
    Within(f32),
    /// Absolute difference at most this fraction of the player's coordinate
    RelativeToPlayer(f32),
}

impl AxisTest {
    fn passes(&self, player: f32, entity: f32) -> bool {
        let d = (player - entity).abs();
        match *self {
            AxisTest::Exact => player == entity,
            AxisTest::Within(bound) => d < bound,
            AxisTest::RelativeToPlayer(fraction) => d <= player.abs() * fraction,
        }
    }
}

/// Proximity window for one class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub x: AxisTest,
    pub y: AxisTest,
    /// Half-depth of the Z window
    pub z: f32,
    /// Skip this class entirely while the player is glitching
    pub ignored_while_glitching: bool,
}

impl Tolerance {
    pub fn overlaps(&self, player: Vec3, entity: Vec3) -> bool {
        (player.z - entity.z).abs() < self.z
            && self.x.passes(player.x, entity.x)
            && self.y.passes(player.y, entity.y)
    }
}

/// Tolerance table; decoration never collides
pub fn tolerance(class: EntityClass) -> Option<Tolerance> {
    match class {
        EntityClass::Obstacle => Some(Tolerance {
            x: AxisTest::Within(0.5),
            y: AxisTest::RelativeToPlayer(0.07),
            z: 0.8,
            ignored_while_glitching: true,
        }),
        EntityClass::Log => Some(Tolerance {
            x: AxisTest::Within(0.6),
            y: AxisTest::RelativeToPlayer(0.07),
            z: 1.0,
            ignored_while_glitching: true,
        }),
        EntityClass::Sandbag => Some(Tolerance {
            x: AxisTest::Within(0.5),
            y: AxisTest::Within(1.5),
            z: 0.8,
            ignored_while_glitching: true,
        }),
        EntityClass::Banana | EntityClass::Coin => Some(Tolerance {
            x: AxisTest::Exact,
            y: AxisTest::Within(1.5),
            z: 1.0,
            ignored_while_glitching: false,
        }),
        EntityClass::Tree => None,
    }
}

/// Whether the player touches any entity of `class` right now
pub fn touches(state: &GameState, class: EntityClass) -> bool {
    let Some(tol) = tolerance(class) else {
        return false;
    };
    if tol.ignored_while_glitching && state.player.is_glitching() {
        return false;
    }
    let player = state.player.pos;
    state
        .world
        .collection(class)
        .iter()
        .any(|e| tol.overlaps(player, e.pos))
}

/// Goal check on Z alone; overshooting also counts
pub fn goal_reached(player_z: f32, goal: &GoalMarker) -> bool {
    player_z - goal.pos.z <= GOAL_REACH
}

/// Turn this tick's contacts into state changes
pub fn resolve(state: &mut GameState) {
    for class in EntityClass::ALL {
        match class.role() {
            Role::Glitch => {
                if touches(state, class) && physics::begin_glitch(&mut state.player, state.remaining) {
                    log::debug!("Glitch from {:?} at z={:.2}", class, state.player.pos.z);
                    state.events.push(GameEvent::Glitched { class });
                }
            }
            Role::Rebound => {
                if touches(state, class) && physics::begin_rebound(&mut state.player) {
                    log::debug!("Rebound from {:?} at z={:.2}", class, state.player.pos.z);
                    state.events.push(GameEvent::ReboundStarted);
                }
            }
            Role::Pickup => collect_pickups(state, class),
            Role::Decoration => {}
        }
    }
}

/// Remove every overlapping pickup of `class`, one point each
fn collect_pickups(state: &mut GameState, class: EntityClass) {
    let Some(tol) = tolerance(class) else {
        return;
    };
    let player = state.player.pos;
    let items = state.world.collection_mut(class);
    let before = items.len();
    items.retain(|e| !tol.overlaps(player, e.pos));
    let collected = before - items.len();

    for _ in 0..collected {
        state.score += 1;
        state.events.push(GameEvent::PickupCollected {
            class,
            score: state.score,
        });
    }
    if collected > 0 {
        log::debug!("Collected {} {:?}, score {}", collected, class, state.score);
    }
}
