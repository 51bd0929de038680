//! World generation and culling
//!
//! Entities are laid out along decreasing Z from a per-class start offset at a
//! fixed spacing, with X drawn from the level's lanes (or scenery columns for
//! decoration). A spawn always replaces the whole collection. Culling drops
//! anything that has passed behind the camera; nothing respawns.

use rand::Rng;

use super::level::Columns;
use super::state::{Entity, EntityClass, GameState};

/// Repopulate every collection for the current level
pub fn populate_level(state: &mut GameState) {
    state.world.clear();
    let rules = state.config.spawns.clone();
    for rule in rules {
        spawn(state, rule.class, rule.count);
    }
    log::debug!(
        "Populated {:?}: {} entities",
        state.config.level,
        state.world.total()
    );
}

/// Clear `class` and place `count` fresh entities (rows, for sandbags)
///
/// Classes without a spawn rule in the current level end up empty.
pub fn spawn(state: &mut GameState, class: EntityClass, count: usize) {
    let Some(rule) = state.config.spawn_rule(class).copied() else {
        state.world.collection_mut(class).clear();
        return;
    };

    let columns: Vec<f32> = match rule.columns {
        Columns::Lanes => state.config.lanes.as_slice().to_vec(),
        Columns::Scenery => state.config.scenery.clone(),
    };

    let mut placed = Vec::with_capacity(count);
    for i in 0..count {
        let z = rule.start_z - i as f32 * rule.spacing;
        let y = state.config.terrain.height_at(z);
        let x = columns[state.rng.random_range(0..columns.len())];
        placed.push(Entity::new(x, y, z));

        if class == EntityClass::Sandbag {
            // Second bag of the pair; skipped when both picks land on one lane
            let x2 = columns[state.rng.random_range(0..columns.len())];
            if x2 != x {
                placed.push(Entity::new(x2, y, z));
            }
        }
    }

    *state.world.collection_mut(class) = placed;
}

/// Permanently remove entities behind the camera
pub fn cull(state: &mut GameState) {
    let camera_z = state.camera_z;
    for class in EntityClass::ALL {
        state.world.collection_mut(class).retain(|e| e.pos.z <= camera_z);
    }
}
