//! Demo-mode player
//!
//! Produces the same discrete input events a human would: steer toward the
//! nearest upcoming pickup, sidestep hazards, and jump when a hazard in the
//! current lane cannot be avoided.

use super::state::{EntityClass, GameState, Role};
use super::tick::InputEvent;

/// How far ahead (in Z) the autopilot looks
const LOOKAHEAD: f32 = 14.0;

/// Choose this tick's input events
pub fn steer(state: &GameState) -> Vec<InputEvent> {
    let player = &state.player;
    let lanes = &state.config.lanes;
    let z = player.pos.z;
    let ahead = |ez: f32| ez < z + 0.5 && ez > z - LOOKAHEAD;

    // Nearest hazard distance per lane
    let mut danger = vec![f32::INFINITY; lanes.len()];
    for class in EntityClass::ALL {
        if !matches!(class.role(), Role::Glitch | Role::Rebound) {
            continue;
        }
        for e in state.world.collection(class) {
            if !ahead(e.pos.z) {
                continue;
            }
            if let Some(lane) = lanes.as_slice().iter().position(|&x| x == e.pos.x) {
                danger[lane] = danger[lane].min(z - e.pos.z);
            }
        }
    }
    let safe = |lane: usize| danger[lane].is_infinite();

    // Closest pickup in a safe lane
    let target = EntityClass::ALL
        .iter()
        .filter(|c| c.role() == Role::Pickup)
        .flat_map(|&c| state.world.collection(c).iter())
        .filter(|e| ahead(e.pos.z))
        .filter_map(|e| {
            let lane = lanes.as_slice().iter().position(|&x| x == e.pos.x)?;
            safe(lane).then_some((lane, z - e.pos.z))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(lane, _)| lane)
        .or_else(|| {
            if safe(player.lane) {
                None
            } else {
                (0..lanes.len())
                    .filter(|&l| safe(l))
                    .min_by_key(|&l| l.abs_diff(player.lane))
            }
        });

    let mut events = Vec::new();
    match target {
        Some(lane) if lane < player.lane => events.push(InputEvent::LaneLeft),
        Some(lane) if lane > player.lane => events.push(InputEvent::LaneRight),
        _ => {}
    }

    // Stuck behind a hazard: time the jump so the peak lines up with it
    let jump = &state.config.jump;
    let time_to_peak = jump.launch_velocity / jump.gravity;
    let stay = events.is_empty();
    if stay && !player.jump.active && danger[player.lane] <= state.config.speed * time_to_peak {
        events.push(InputEvent::Jump);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Entity;

    fn bare_state() -> GameState {
        let mut state = GameState::new(11);
        state.world.clear();
        state
    }

    #[test]
    fn test_steers_toward_pickup() {
        let mut state = bare_state();
        let p = state.player.pos;
        let right = state.config.lanes.x(state.player.lane + 1);
        state.world.bananas.push(Entity::new(right, p.y, p.z - 5.0));
        assert_eq!(steer(&state), vec![InputEvent::LaneRight]);
    }

    #[test]
    fn test_sidesteps_hazard() {
        let mut state = bare_state();
        let p = state.player.pos;
        state.world.obstacles.push(Entity::new(p.x, p.y, p.z - 6.0));
        let events = steer(&state);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], InputEvent::LaneLeft | InputEvent::LaneRight));
    }

    #[test]
    fn test_jumps_when_boxed_in() {
        let mut state = bare_state();
        let p = state.player.pos;
        for &x in state.config.lanes.as_slice() {
            state.world.obstacles.push(Entity::new(x, p.y, p.z - 1.0));
        }
        assert_eq!(steer(&state), vec![InputEvent::Jump]);
    }

    #[test]
    fn test_idle_on_empty_road() {
        let state = bare_state();
        assert!(steer(&state).is_empty());
    }
}
