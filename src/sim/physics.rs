//! Per-tick motion integration
//!
//! Lanes snap instantly; depth is integrated at the level speed with glitch
//! and rebound terms layered on top; height is the terrain profile plus the
//! jump offset.

use super::level::{JumpTuning, LevelConfig};
use super::state::{Glitch, JumpState, Player, Rebound};
use crate::consts::*;

/// Snap one lane left. Returns whether the player moved.
pub fn move_left(player: &mut Player, config: &LevelConfig) -> bool {
    let lane = config.lanes.step_left(player.lane);
    snap_to_lane(player, config, lane)
}

/// Snap one lane right. Returns whether the player moved.
pub fn move_right(player: &mut Player, config: &LevelConfig) -> bool {
    let lane = config.lanes.step_right(player.lane);
    snap_to_lane(player, config, lane)
}

fn snap_to_lane(player: &mut Player, config: &LevelConfig, lane: usize) -> bool {
    let moved = lane != player.lane;
    player.lane = lane;
    player.pos.x = config.lanes.x(lane);
    moved
}

/// Launch a jump unless already airborne
pub fn start_jump(jump: &mut JumpState, tuning: &JumpTuning) -> bool {
    if jump.active {
        return false;
    }
    jump.active = true;
    jump.velocity = tuning.launch_velocity;
    jump.offset = 0.0;
    true
}

/// Integrate the jump arc under constant gravity. Returns true on landing.
pub fn integrate_jump(jump: &mut JumpState, tuning: &JumpTuning, dt: f32) -> bool {
    if !jump.active {
        return false;
    }
    jump.velocity -= tuning.gravity * dt;
    jump.offset += jump.velocity * dt;
    if jump.offset <= 0.0 {
        *jump = JumpState::default();
        return true;
    }
    false
}

/// Move the player (and the simulation camera) along Z for one frame
///
/// Forward motion pauses while a rebound carries the player backward.
pub fn advance_depth(player: &mut Player, camera_z: &mut f32, config: &LevelConfig, dt: f32) {
    if let Some(rebound) = player.rebound.as_mut() {
        let step = rebound.velocity * dt;
        player.pos.z += step;
        *camera_z += step;
        rebound.distance += step;
        rebound.velocity -= REBOUND_DECEL * dt;
        return;
    }

    let mut velocity = -config.speed;
    if let Some(glitch) = &player.glitch {
        // Knockback that fades out over the glitch
        let fade = (1.0 - glitch.elapsed / GLITCH_DURATION).max(0.0);
        velocity += config.glitch_pushback * fade;
    }
    player.pos.z += velocity * dt;
    *camera_z = player.pos.z + CAMERA_OFFSET_Z;
}

/// Vertical position: terrain height at the current Z plus any jump offset
pub fn update_height(player: &mut Player, config: &LevelConfig) {
    player.pos.y = config.terrain.height_at(player.pos.z) + player.jump.offset;
}

/// Start a glitch at the current countdown value
pub fn begin_glitch(player: &mut Player, remaining: f32) -> bool {
    if player.glitch.is_some() {
        return false;
    }
    player.glitch = Some(Glitch {
        onset_timer: remaining,
        elapsed: 0.0,
    });
    true
}

/// Age the glitch by one timer step. Returns true when it clears.
pub fn advance_glitch(player: &mut Player) -> bool {
    let Some(glitch) = player.glitch.as_mut() else {
        return false;
    };
    glitch.elapsed += TIMER_STEP;
    if glitch.elapsed >= GLITCH_DURATION - f32::EPSILON {
        player.glitch = None;
        return true;
    }
    false
}

/// Start a rebound unless one is already running
pub fn begin_rebound(player: &mut Player) -> bool {
    if player.rebound.is_some() {
        return false;
    }
    player.rebound = Some(Rebound {
        velocity: REBOUND_VELOCITY,
        distance: 0.0,
    });
    true
}

/// End the rebound once its velocity has run out. Returns true exactly once per rebound.
pub fn settle_rebound(player: &mut Player) -> bool {
    match player.rebound {
        Some(rebound) if rebound.velocity <= 0.0 => {
            player.rebound = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelConfig;
    use crate::sim::state::Perspective;
    use proptest::prelude::*;

    fn player() -> (Player, LevelConfig) {
        let config = LevelConfig::level_one();
        (Player::spawn(&config, Perspective::ThirdPerson), config)
    }

    #[test]
    fn test_move_right_clamps_at_last_lane() {
        let (mut p, config) = player();
        assert_eq!(p.lane, 2);
        for _ in 0..5 {
            move_right(&mut p, &config);
        }
        assert_eq!(p.lane, 5);
        assert_eq!(p.pos.x, 5.0);
        assert!(!move_right(&mut p, &config));
    }

    #[test]
    fn test_jump_cannot_restart_midair() {
        let (mut p, config) = player();
        assert!(start_jump(&mut p.jump, &config.jump));
        integrate_jump(&mut p.jump, &config.jump, SIM_DT);
        let velocity = p.jump.velocity;
        assert!(!start_jump(&mut p.jump, &config.jump));
        assert_eq!(p.jump.velocity, velocity);
    }

    #[test]
    fn test_jump_peak_close_to_configured_height() {
        let (mut p, config) = player();
        start_jump(&mut p.jump, &config.jump);
        let mut peak: f32 = 0.0;
        while p.jump.active {
            integrate_jump(&mut p.jump, &config.jump, 0.001);
            peak = peak.max(p.jump.offset);
        }
        assert!((peak - config.jump.peak_height).abs() < 0.05, "peak {peak}");
    }

    #[test]
    fn test_glitch_pushes_back_then_fades() {
        let (mut p, config) = player();
        let mut camera_z = p.pos.z + CAMERA_OFFSET_Z;
        begin_glitch(&mut p, 20.0);

        let z0 = p.pos.z;
        advance_depth(&mut p, &mut camera_z, &config, SIM_DT);
        // pushback exceeds forward speed at onset
        assert!(p.pos.z > z0);

        p.glitch.as_mut().unwrap().elapsed = 0.9;
        let z1 = p.pos.z;
        advance_depth(&mut p, &mut camera_z, &config, SIM_DT);
        assert!(p.pos.z < z1);
        assert_eq!(camera_z, p.pos.z + CAMERA_OFFSET_Z);
    }

    #[test]
    fn test_glitch_clears_after_duration_in_timer_steps() {
        let (mut p, _) = player();
        begin_glitch(&mut p, 12.0);
        let mut steps = 0;
        while !advance_glitch(&mut p) {
            steps += 1;
            assert!(steps < 1000);
        }
        let expected = (GLITCH_DURATION / TIMER_STEP).round() as i32;
        assert!((steps + 1 - expected).abs() <= 1, "steps {steps}");
        assert!(!p.is_glitching());
    }

    #[test]
    fn test_rebound_moves_player_and_camera_back_then_settles() {
        let config = LevelConfig::level_two();
        let mut p = Player::spawn(&config, Perspective::ThirdPerson);
        let mut camera_z = p.pos.z + CAMERA_OFFSET_Z;
        let z0 = p.pos.z;
        let cam0 = camera_z;

        assert!(begin_rebound(&mut p));
        assert!(!begin_rebound(&mut p));

        let mut settled = 0;
        for _ in 0..200 {
            advance_depth(&mut p, &mut camera_z, &config, SIM_DT);
            if settle_rebound(&mut p) {
                settled += 1;
            }
        }
        assert_eq!(settled, 1);
        assert!(p.rebound.is_none());
        // After settling, forward motion resumes; camera stays locked to player
        assert!(((camera_z - p.pos.z) - (cam0 - z0)).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn lane_index_stays_in_range(start in 0usize..6, moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let config = LevelConfig::level_one();
            let mut p = Player::spawn(&config, Perspective::ThirdPerson);
            p.lane = start;
            for right in moves {
                if right {
                    move_right(&mut p, &config);
                } else {
                    move_left(&mut p, &config);
                }
                prop_assert!(p.lane < config.lanes.len());
                prop_assert_eq!(p.pos.x, config.lanes.x(p.lane));
            }
        }

        #[test]
        fn jump_always_lands_once(dt in 0.001f32..0.1, level_two in any::<bool>()) {
            let config = if level_two { LevelConfig::level_two() } else { LevelConfig::level_one() };
            let mut jump = JumpState::default();
            start_jump(&mut jump, &config.jump);

            let flight = 2.0 * config.jump.launch_velocity / config.jump.gravity;
            let max_ticks = (flight / dt).ceil() as usize + 2;
            let mut landings = 0;
            for _ in 0..max_ticks {
                if integrate_jump(&mut jump, &config.jump, dt) {
                    landings += 1;
                }
            }
            prop_assert_eq!(landings, 1);
            prop_assert!(!jump.active);
            prop_assert_eq!(jump.offset, 0.0);
            prop_assert_eq!(jump.velocity, 0.0);
        }
    }
}
