//! Scene snapshot
//!
//! Everything an external renderer needs for one frame: camera pose,
//! lighting, HUD numbers and a draw list with per-entity position,
//! orientation and scale. Built fresh from `GameState` every frame.

use glam::Vec3;
use serde::Serialize;

use crate::consts::{LEVEL1_THRESHOLD, LEVEL2_THRESHOLD};
use crate::sim::{
    Entity, EntityClass, Environment, GamePhase, GameState, GoalKind, Level, Perspective,
};

/// Models the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Model {
    Minion,
    Banana,
    Coin,
    Barrier,
    Sandbag,
    Log,
    Tree,
    Bridge,
    Portal,
    FinishLine,
}

impl Model {
    pub fn for_class(class: EntityClass) -> Self {
        match class {
            EntityClass::Coin => Model::Coin,
            EntityClass::Banana => Model::Banana,
            EntityClass::Obstacle => Model::Barrier,
            EntityClass::Sandbag => Model::Sandbag,
            EntityClass::Log => Model::Log,
            EntityClass::Tree => Model::Tree,
        }
    }

    /// Uniform scale and base yaw (degrees) the model assets need
    fn base_transform(&self) -> (f32, f32) {
        match self {
            Model::Minion => (0.2, 180.0),
            Model::Banana => (0.3, 90.0),
            Model::Coin => (0.5, 0.0),
            Model::Barrier => (0.8, 0.0),
            Model::Sandbag => (1.0, 90.0),
            Model::Log => (0.7, 90.0),
            Model::Tree => (1.5, 0.0),
            Model::Bridge => (4.0, 90.0),
            Model::Portal => (1.2, 0.0),
            Model::FinishLine => (1.0, 0.0),
        }
    }
}

/// One model instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub model: Model,
    pub position: Vec3,
    /// Rotation about +Y, degrees
    pub yaw: f32,
    pub scale: f32,
}

impl DrawItem {
    fn new(model: Model, position: Vec3) -> Self {
        let (scale, yaw) = model.base_transform();
        Self {
            model,
            position,
            yaw,
            scale,
        }
    }
}

/// Look-at camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// On-screen numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    /// Countdown, shown as zero once exhausted
    pub remaining: f32,
    /// None on the end screen
    pub level: Option<Level>,
    /// Score needed at the current goal
    pub target: u32,
}

/// End-of-game text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndScreen {
    pub title: &'static str,
    pub detail: String,
}

/// Everything drawn in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub camera: CameraPose,
    pub environment: Environment,
    pub hud: Hud,
    pub items: Vec<DrawItem>,
    pub end_screen: Option<EndScreen>,
}

impl Scene {
    pub fn build(state: &GameState) -> Self {
        let hud = Hud {
            score: state.score,
            remaining: state.remaining.max(0.0),
            level: state.phase.level(),
            target: state.config.threshold,
        };
        let camera = camera_pose(state);

        if let Some(end_screen) = end_screen(state) {
            return Self {
                camera,
                environment: state.environment,
                hud,
                items: Vec::new(),
                end_screen: Some(end_screen),
            };
        }

        let mut items = Vec::with_capacity(state.world.total() + 3);
        items.push(player_item(state));

        if state.config.level == Level::One {
            // The footbridge spans the raised part of the terrain
            let center_x = state.config.lanes.x(state.config.lanes.len() / 2);
            items.push(DrawItem::new(Model::Bridge, Vec3::new(center_x, 11.0, 0.0)));
        }

        for class in EntityClass::ALL {
            let model = Model::for_class(class);
            for entity in state.world.collection(class) {
                items.push(entity_item(model, entity, state.anim_time));
            }
        }

        let goal_model = match state.goal.kind {
            GoalKind::Portal => Model::Portal,
            GoalKind::FinishLine => Model::FinishLine,
        };
        items.push(DrawItem::new(goal_model, state.goal.pos));

        Self {
            camera,
            environment: state.environment,
            hud,
            items,
            end_screen: None,
        }
    }
}

fn player_item(state: &GameState) -> DrawItem {
    let mut item = DrawItem::new(Model::Minion, state.player.pos);
    if state.player.is_glitching() {
        // Stutter sideways while glitching
        item.position.x += (state.anim_time * 60.0).sin() * 0.08;
    }
    item
}

fn entity_item(model: Model, entity: &Entity, anim_time: f32) -> DrawItem {
    let mut item = DrawItem::new(model, entity.pos);
    if matches!(model, Model::Banana | Model::Coin) {
        // Bob and spin; phase offset by depth so neighbours don't move in lockstep
        item.position.y += (anim_time * 3.0 + entity.pos.z).sin() * 0.15;
        item.yaw = (item.yaw + anim_time * 90.0) % 360.0;
    }
    item
}

fn camera_pose(state: &GameState) -> CameraPose {
    let p = state.player.pos;
    let zoom = state.player.zoom;
    let (eye, target) = match state.player.perspective {
        Perspective::ThirdPerson => (
            Vec3::new(p.x, p.y + 1.0, state.camera_z + zoom),
            Vec3::new(p.x, p.y - 2.0, p.z - 20.0),
        ),
        Perspective::FirstPerson => (
            Vec3::new(p.x, p.y + 0.6, p.z - 0.5 + zoom.min(0.0)),
            Vec3::new(p.x, p.y, p.z - 30.0),
        ),
    };
    CameraPose {
        eye,
        target,
        up: Vec3::Y,
    }
}

fn end_screen(state: &GameState) -> Option<EndScreen> {
    match state.phase {
        GamePhase::Level1Running | GamePhase::Level2Running => None,
        GamePhase::GameOverWin => Some(EndScreen {
            title: "YOU WIN!",
            detail: format!("Final score: {}", state.score),
        }),
        GamePhase::GameOverLose => Some(EndScreen {
            title: "GAME OVER",
            detail: format!("Score {} of {} needed", state.score, LEVEL2_THRESHOLD),
        }),
        GamePhase::GameOverLoseEarly => Some(EndScreen {
            title: "GAME OVER",
            detail: format!(
                "Only {} bananas, the portal needs {}",
                state.score, LEVEL1_THRESHOLD
            ),
        }),
    }
}
