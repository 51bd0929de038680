//! Fixed timestep simulation tick
//!
//! Advances one frame in a strict order: clocks, countdown, input, motion,
//! collisions, effect timers, goal check, culling, environment. Terminal
//! phases only advance the presentation clocks.

use serde::{Deserialize, Serialize};

use super::autopilot;
use super::collision;
use super::environment::Environment;
use super::level::Level;
use super::physics;
use super::spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// A discrete player command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    LaneLeft,
    LaneRight,
    Jump,
    /// Flip between third- and first-person view
    ToggleCamera,
    /// Dolly the camera in (negative) or out (positive)
    Zoom(f32),
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in the order they arrived
    pub events: Vec<InputEvent>,
    /// Let the demo player drive
    pub autopilot: bool,
}

/// Advance the game state by one tick of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.elapsed += dt;
    state.anim_time += dt;

    if state.phase.is_terminal() {
        return;
    }

    state.time_ticks += 1;
    state.level_elapsed += dt;
    state.remaining = (state.remaining - TIMER_STEP).max(0.0);

    let mut commands = input.events.clone();
    if input.autopilot {
        commands.extend(autopilot::steer(state));
    }
    for command in commands {
        apply_input(state, command);
    }

    // Motion
    physics::advance_depth(&mut state.player, &mut state.camera_z, &state.config, dt);
    physics::integrate_jump(&mut state.player.jump, &state.config.jump, dt);
    physics::update_height(&mut state.player, &state.config);

    collision::resolve(state);

    let onset = state.player.glitch.map(|g| g.onset_timer);
    if physics::advance_glitch(&mut state.player) {
        log::debug!(
            "Glitch from t={:.2} cleared at t={:.2}",
            onset.unwrap_or(state.remaining),
            state.remaining
        );
    }
    if physics::settle_rebound(&mut state.player) {
        state.remaining = (state.remaining - REBOUND_PENALTY).max(0.0);
        state.events.push(GameEvent::TimePenalty {
            seconds: REBOUND_PENALTY,
        });
        log::debug!("Rebound settled, {:.2}s left", state.remaining);
        if state.remaining <= 0.0 {
            finish(state, GamePhase::GameOverLose);
            return;
        }
    }
    if state.player.is_rebounding() && state.remaining <= 0.0 {
        finish(state, GamePhase::GameOverLose);
        return;
    }

    if collision::goal_reached(state.player.pos.z, &state.goal) {
        // Either level 2 starts fresh next tick or the run is over
        reach_goal(state);
        return;
    }

    spawn::cull(state);

    if let Some(level) = state.phase.level() {
        state.environment = Environment::for_level(level, state.level_elapsed);
    }

    log::trace!(
        "tick {} z={:.2} y={:.2} lane={} score={} t={:.2}",
        state.time_ticks,
        state.player.pos.z,
        state.player.pos.y,
        state.player.lane,
        state.score,
        state.remaining
    );
}

fn apply_input(state: &mut GameState, command: InputEvent) {
    let player = &mut state.player;
    match command {
        InputEvent::LaneLeft => {
            physics::move_left(player, &state.config);
        }
        InputEvent::LaneRight => {
            physics::move_right(player, &state.config);
        }
        InputEvent::Jump => {
            physics::start_jump(&mut player.jump, &state.config.jump);
        }
        InputEvent::ToggleCamera => {
            player.perspective = player.perspective.toggled();
        }
        InputEvent::Zoom(delta) => {
            player.zoom = (player.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }
}

/// Portal or finish line reached: progress or end the run by score
fn reach_goal(state: &mut GameState) {
    let qualified = state.score >= state.config.threshold;
    match (state.phase, qualified) {
        (GamePhase::Level1Running, true) => {
            log::info!("Portal reached with {} points, entering level 2", state.score);
            state.enter_level(Level::Two);
            state.events.push(GameEvent::LevelUp);
        }
        (GamePhase::Level1Running, false) => finish(state, GamePhase::GameOverLoseEarly),
        (GamePhase::Level2Running, true) => finish(state, GamePhase::GameOverWin),
        (GamePhase::Level2Running, false) => finish(state, GamePhase::GameOverLose),
        _ => {}
    }
}

fn finish(state: &mut GameState, phase: GamePhase) {
    log::info!(
        "Game over: {:?} (score {}, {:.2}s left)",
        phase,
        state.score,
        state.remaining
    );
    state.phase = phase;
    state.events.push(GameEvent::GameOver { phase });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Entity, Perspective};

    /// A state with no world objects and a far-away goal
    fn open_road(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.world.clear();
        state.goal.pos.z = -100_000.0;
        state
    }

    fn press(event: InputEvent) -> TickInput {
        TickInput {
            events: vec![event],
            ..Default::default()
        }
    }

    fn run_to_goal(state: &mut GameState) {
        state.world.clear();
        state.player.pos.z = state.goal.pos.z + 0.9;
        tick(state, &TickInput::default(), SIM_DT);
    }

    #[test]
    fn test_move_right_five_times_clamps() {
        let mut state = open_road(1);
        assert_eq!(state.player.lane, 2);
        for _ in 0..5 {
            tick(&mut state, &press(InputEvent::LaneRight), SIM_DT);
        }
        assert_eq!(state.player.lane, 5);
        assert_eq!(state.phase, GamePhase::Level1Running);
    }

    #[test]
    fn test_countdown_runs_out_without_ending_run() {
        let mut state = open_road(1);
        let input = TickInput::default();
        let mut ticks = 0;
        while state.remaining > 0.0 {
            tick(&mut state, &input, SIM_DT);
            ticks += 1;
            assert!(ticks < 2000);
        }
        assert!((1870..=1880).contains(&ticks), "ticks {ticks}");
        for _ in 0..10 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.remaining, 0.0);
        assert_eq!(state.phase, GamePhase::Level1Running);
    }

    #[test]
    fn test_portal_with_enough_score_enters_level_two() {
        let mut state = GameState::new(2);
        state.score = LEVEL1_THRESHOLD;
        state.remaining = 4.0;
        run_to_goal(&mut state);

        assert_eq!(state.phase, GamePhase::Level2Running);
        assert!(state.events.contains(&GameEvent::LevelUp));
        assert_eq!(state.remaining, TIMER_START);
        assert_eq!(state.player.pos.z, PLAYER_START_Z);
        assert_eq!(state.score, LEVEL1_THRESHOLD);
    }

    #[test]
    fn test_portal_short_of_score_loses_early() {
        let mut state = GameState::new(2);
        state.score = LEVEL1_THRESHOLD - 1;
        run_to_goal(&mut state);
        assert_eq!(state.phase, GamePhase::GameOverLoseEarly);
        assert!(state.events.contains(&GameEvent::GameOver {
            phase: GamePhase::GameOverLoseEarly
        }));
    }

    #[test]
    fn test_finish_line_win_and_lose() {
        let mut win = GameState::new(3);
        win.enter_level(Level::Two);
        win.score = LEVEL2_THRESHOLD;
        run_to_goal(&mut win);
        assert_eq!(win.phase, GamePhase::GameOverWin);

        let mut lose = GameState::new(3);
        lose.enter_level(Level::Two);
        lose.score = LEVEL2_THRESHOLD - 1;
        run_to_goal(&mut lose);
        assert_eq!(lose.phase, GamePhase::GameOverLose);
    }

    #[test]
    fn test_terminal_phase_is_absorbing() {
        let mut state = GameState::new(4);
        state.phase = GamePhase::GameOverWin;
        let z = state.player.pos.z;
        let remaining = state.remaining;
        let bananas = state.world.bananas.len();

        for _ in 0..50 {
            tick(&mut state, &press(InputEvent::LaneLeft), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOverWin);
        assert_eq!(state.player.pos.z, z);
        assert_eq!(state.player.lane, 2);
        assert_eq!(state.remaining, remaining);
        assert_eq!(state.world.bananas.len(), bananas);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_sandbag_rebound_penalty_applied_once() {
        let mut state = open_road(5);
        state.enter_level(Level::Two);
        state.world.clear();
        state.goal.pos.z = -100_000.0;
        let p = state.player.pos;
        state.world.sandbags.push(Entity::new(p.x, p.y, p.z - 0.2));

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.is_rebounding());
        assert_eq!(state.player.rebound.unwrap().velocity, REBOUND_VELOCITY);
        assert!(state.events.contains(&GameEvent::ReboundStarted));
        // Out of the way, so the run-up after settling does not bounce again
        state.world.sandbags.clear();

        let mut penalties = 0;
        let mut before = state.remaining;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.events.contains(&GameEvent::TimePenalty { seconds: REBOUND_PENALTY }) {
                penalties += 1;
                assert!((before - TIMER_STEP - REBOUND_PENALTY - state.remaining).abs() < 1e-4);
            }
            before = state.remaining;
        }
        assert_eq!(penalties, 1);
        assert_eq!(state.phase, GamePhase::Level2Running);
    }

    #[test]
    fn test_rebound_with_exhausted_timer_loses() {
        let mut state = GameState::new(6);
        state.enter_level(Level::Two);
        state.world.clear();
        state.remaining = 1.0;
        physics::begin_rebound(&mut state.player);

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.phase.is_terminal() {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOverLose);
        assert_eq!(state.remaining, 0.0);
    }

    #[test]
    fn test_timer_hitting_zero_mid_rebound_loses() {
        let mut state = GameState::new(6);
        state.enter_level(Level::Two);
        state.world.clear();
        state.remaining = 0.05;
        physics::begin_rebound(&mut state.player);

        for _ in 0..4 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOverLose);
    }

    #[test]
    fn test_glitch_duration_independent_of_frame_delta() {
        for dt in [0.008, 0.016, 0.05] {
            let mut state = open_road(7);
            physics::begin_glitch(&mut state.player, state.remaining);
            let mut ticks = 0;
            while state.player.is_glitching() {
                tick(&mut state, &TickInput::default(), dt);
                ticks += 1;
            }
            assert!((62..=64).contains(&ticks), "dt {dt}: {ticks} ticks");
        }
    }

    #[test]
    fn test_jump_clears_after_landing() {
        let mut state = open_road(8);
        let ground = state.player.pos.y;
        tick(&mut state, &press(InputEvent::Jump), SIM_DT);
        assert!(state.player.jump.active);
        assert!(state.player.pos.y > ground);

        let mut ticks = 0;
        while state.player.jump.active {
            tick(&mut state, &TickInput::default(), SIM_DT);
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(state.player.jump.offset, 0.0);
        assert_eq!(state.player.pos.y, state.ground_height());
    }

    #[test]
    fn test_camera_toggle_and_zoom_are_view_only() {
        let mut a = open_road(9);
        let mut b = open_road(9);
        tick(&mut a, &press(InputEvent::ToggleCamera), SIM_DT);
        tick(&mut a, &press(InputEvent::Zoom(100.0)), SIM_DT);
        tick(&mut b, &TickInput::default(), SIM_DT);
        tick(&mut b, &TickInput::default(), SIM_DT);

        assert_eq!(a.player.perspective, Perspective::FirstPerson);
        assert_eq!(a.player.zoom, MAX_ZOOM);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.camera_z, b.camera_z);
    }

    #[test]
    fn test_entities_behind_camera_are_culled() {
        let mut state = open_road(10);
        let p = state.player.pos;
        state.world.trees.push(Entity::new(-1.5, p.y, p.z + 3.9));
        state.world.trees.push(Entity::new(-1.5, p.y, p.z - 30.0));
        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.world.trees.len(), 1);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn test_autopilot_clears_level_one() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..4000 {
            tick(&mut state, &input, SIM_DT);
            if state.phase != GamePhase::Level1Running {
                break;
            }
        }
        assert_ne!(state.phase, GamePhase::Level1Running);
    }
}
