//! Per-frame simulation step
//!
//! One tick per animation frame. Input is applied first; a tick that commits
//! a shot transition does not also integrate, so launch velocity is exactly
//! the drag conversion. While `Moving`, the pass order is fixed: puck
//! (integrate, cushions, friction, target impulses, hole test), then each
//! visible target, then the termination check - so a sink or stop detected
//! this tick reflects this tick's final positions. Physics never runs while
//! a drag is active or a sink animation is playing.

use glam::Vec2;

use super::collision::{disk_hit, hole_test, reflect_cushions};
use super::state::{GameState, Phase};
use super::viewport::{follow_puck, to_world};
use crate::consts::*;
use crate::launch_velocity;

/// Pointer gestures gathered since the last tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer went down at this screen position (starts aiming)
    pub press: Option<Vec2>,
    /// Pointer moved to this screen position (updates the live drag)
    pub move_to: Option<Vec2>,
    /// Pointer released or left the surface (commits the shot)
    pub release: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // --- Input / shot state machine ---

    if let Some(pos) = input.press {
        if state.phase.accepts_aim() {
            state.phase = Phase::Aiming {
                anchor: pos,
                current: pos,
            };
            log::debug!("aiming from {pos}");
        } else {
            // No new shot while the previous one resolves
            log::debug!("press rejected in {:?}", state.phase);
        }
    }

    if let Some(pos) = input.move_to
        && let Phase::Aiming { ref mut current, .. } = state.phase
    {
        *current = pos;
    }

    if input.release
        && let Phase::Aiming { anchor, current } = state.phase
    {
        let vel = launch_velocity(anchor, current);
        if vel.length_squared() > f32::EPSILON {
            state.puck.vel = vel;
            state.phase = Phase::Moving;
            log::info!("launched at {vel} (drag {anchor} -> {current})");
        } else {
            // Zero-length drag: no launch, never a non-finite velocity
            state.phase = Phase::Idle;
            log::debug!("zero-length drag discarded");
        }
        return;
    }

    // --- Phase behavior ---

    match state.phase {
        Phase::Moving => step_physics(state),
        Phase::Sinking { ticks_left } => {
            // Fixed-duration linear shrink, decoupled from the physics pass;
            // completion forces a full puck reset regardless of anything else
            let ticks_left = ticks_left.saturating_sub(1);
            state.puck.scale = ticks_left as f32 / SINK_DURATION_TICKS as f32;
            if ticks_left == 0 {
                state.puck.reset(state.arena.center());
                state.phase = Phase::Idle;
                log::debug!("puck reset to center");
            } else {
                state.phase = Phase::Sinking { ticks_left };
            }
        }
        // Aiming suppresses the physics loop; Idle/Settled have nothing moving
        Phase::Idle | Phase::Aiming { .. } | Phase::Settled => {}
    }
}

/// One full physics pass: puck first, then targets, termination last
fn step_physics(state: &mut GameState) {
    let GameState {
        arena,
        puck,
        targets,
        viewport_offset,
        score,
        phase,
        ..
    } = state;

    // 1. Puck: Euler step, cushion reflection, friction
    puck.pos += puck.vel;
    reflect_cushions(&mut puck.pos, &mut puck.vel, puck.radius, arena);
    puck.vel *= FRICTION;

    // Follow-scroll: keep the puck inside the visible band, move the world
    let (screen_y, offset) = follow_puck(puck.pos.y, *viewport_offset, arena.height);
    let scrolled = offset != *viewport_offset;
    puck.pos.y = screen_y;
    *viewport_offset = offset;

    // 2. Puck-target impulses, list order. Each hit sees the puck velocity
    //    as it stands after the previous resolution. Targets and holes live
    //    in world space; the puck is projected per check.
    if puck.scale >= 1.0 {
        for target in targets.iter_mut().filter(|t| t.visible) {
            let puck_world = to_world(puck.pos, offset);
            if let Some(hit) = disk_hit(puck_world, puck.radius, target.pos, target.radius) {
                target.vel = hit.normal * puck.vel.length() * DISK_RESTITUTION;
                puck.vel *= WALL_RESTITUTION;
                // Separate half the overlap each to prevent sticking
                let push = hit.normal * (hit.overlap / 2.0);
                target.pos += push;
                puck.pos -= push;
            }
        }
    }

    // Puck hole test (side-aware, world space). A sink suppresses the rest
    // of this tick - targets freeze where this tick left them.
    let puck_world = to_world(puck.pos, offset);
    if arena.holes.iter().any(|h| hole_test(puck_world, h)) {
        puck.vel = Vec2::ZERO;
        *phase = Phase::Sinking {
            ticks_left: SINK_DURATION_TICKS,
        };
        log::info!("puck sank at world {puck_world}");
        return;
    }

    // 3. Targets: Euler step, cushions, friction, then their hole tests
    for target in targets.iter_mut().filter(|t| t.visible) {
        target.pos += target.vel;
        reflect_cushions(&mut target.pos, &mut target.vel, target.radius, arena);
        target.vel *= FRICTION;

        if arena.holes.iter().any(|h| hole_test(target.pos, h)) {
            target.visible = false;
            target.vel = Vec2::ZERO;
            *score += target.kind.point_value();
            log::info!("target sank for {} (score {score})", target.kind.point_value());
        }
    }

    // 4. Termination: every velocity component below threshold -> snap and
    //    settle, awaiting the next shot
    let stopped = puck.vel.abs().max_element() < STOP_EPS
        && targets
            .iter()
            .filter(|t| t.visible)
            .all(|t| t.vel.abs().max_element() < STOP_EPS);
    if stopped {
        puck.vel = Vec2::ZERO;
        for target in targets.iter_mut() {
            target.vel = Vec2::ZERO;
        }
        *phase = Phase::Settled;
        log::debug!("settled, score {score}");
    }

    // Reveal holes/targets for newly scrolled-into range
    if scrolled {
        state.sync_sections();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345, 1000.0, 800.0);
        // Most tests want a clear table
        state.targets.clear();
        state
    }

    fn launch(state: &mut GameState, anchor: Vec2, current: Vec2) {
        tick(state, &TickInput { press: Some(anchor), ..Default::default() });
        tick(state, &TickInput { move_to: Some(current), ..Default::default() });
        tick(state, &TickInput { release: true, ..Default::default() });
    }

    #[test]
    fn test_drag_scenario_launch() {
        let mut state = quiet_state();
        launch(
            &mut state,
            Vec2::new(500.0, 500.0),
            Vec2::new(450.0, 460.0),
        );
        // Shot fires opposite the drag: (50, 40) * POWER_SCALE
        assert_eq!(state.phase, Phase::Moving);
        assert!((state.puck.vel.x - 5.0).abs() < 1e-5);
        assert!((state.puck.vel.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_drag_is_not_a_launch() {
        let mut state = quiet_state();
        let p = Vec2::new(500.0, 500.0);
        launch(&mut state, p, p);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.puck.vel, Vec2::ZERO);
        assert!(state.puck.vel.is_finite());
    }

    #[test]
    fn test_aim_rejected_while_moving() {
        let mut state = quiet_state();
        launch(
            &mut state,
            Vec2::new(500.0, 500.0),
            Vec2::new(400.0, 500.0),
        );
        assert_eq!(state.phase, Phase::Moving);
        tick(
            &mut state,
            &TickInput { press: Some(Vec2::new(300.0, 300.0)), ..Default::default() },
        );
        assert_eq!(state.phase, Phase::Moving);
    }

    #[test]
    fn test_friction_settles_the_puck() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        state.puck.vel = Vec2::new(3.0, 0.0);
        let mut last_speed = state.puck.vel.length();
        for _ in 0..2000 {
            tick(&mut state, &TickInput::default());
            let speed = state.puck.vel.length();
            assert!(speed <= last_speed + 1e-6, "energy decay");
            last_speed = speed;
            if state.phase == Phase::Settled {
                break;
            }
        }
        assert_eq!(state.phase, Phase::Settled);
        assert_eq!(state.puck.vel, Vec2::ZERO);
    }

    #[test]
    fn test_cushion_containment() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        state.puck.pos = Vec2::new(100.0, 400.0);
        state.puck.vel = Vec2::new(-40.0, 0.0);
        let (min_x, max_x) = state.arena.field_x_range(state.puck.radius);
        for _ in 0..300 {
            tick(&mut state, &TickInput::default());
            assert!(state.puck.pos.x >= min_x && state.puck.pos.x <= max_x);
        }
    }

    #[test]
    fn test_puck_sink_and_reset_invariant() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        // Section 0 left hole sits at world (24, 300); offset is 0
        state.puck.pos = Vec2::new(50.0, 300.0);
        state.puck.vel = Vec2::new(-5.0, 0.0);
        tick(&mut state, &TickInput::default());
        assert!(matches!(state.phase, Phase::Sinking { .. }));

        // Shrink animation runs to completion, then a hard reset
        for _ in 0..SINK_DURATION_TICKS {
            tick(&mut state, &TickInput::default());
            if matches!(state.phase, Phase::Sinking { .. }) {
                assert!(state.puck.scale < 1.0);
            }
        }
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.puck.pos, state.arena.center());
        assert_eq!(state.puck.vel, Vec2::ZERO);
        assert_eq!(state.puck.scale, 1.0);
    }

    #[test]
    fn test_target_sink_scores_once() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        state.puck.vel = Vec2::new(0.0, 1.0); // keep the pass running
        state.targets.push(crate::sim::Target {
            pos: Vec2::new(60.0, 300.0),
            vel: Vec2::new(-16.0, 0.0),
            radius: TARGET_RADIUS,
            kind: crate::sim::TargetKind::High,
            visible: true,
        });
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 25);
        assert!(!state.targets[0].visible);

        // Retired targets never contribute again
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 25);
    }

    #[test]
    fn test_puck_strike_transfers_momentum() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        state.puck.pos = Vec2::new(400.0, 400.0);
        state.puck.vel = Vec2::new(10.0, 0.0);
        state.targets.push(crate::sim::Target {
            pos: Vec2::new(440.0, 400.0),
            vel: Vec2::ZERO,
            radius: TARGET_RADIUS,
            kind: crate::sim::TargetKind::Low,
            visible: true,
        });
        tick(&mut state, &TickInput::default());
        let target = &state.targets[0];
        // Target pushed away along the collision normal, puck damped
        assert!(target.vel.x > 0.0);
        assert!(state.puck.vel.x < 10.0);
        assert!(target.pos.is_finite() && state.puck.pos.is_finite());
        // Separated past each other, not stuck
        assert!(target.pos.x > state.puck.pos.x);
    }

    #[test]
    fn test_coincident_targets_resolve_without_nan() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        state.puck.pos = Vec2::new(500.0, 400.0);
        state.puck.vel = Vec2::new(2.0, 0.0);
        // Two identical targets at the same point as the puck
        for _ in 0..2 {
            state.targets.push(crate::sim::Target {
                pos: Vec2::new(502.0, 400.0),
                vel: Vec2::ZERO,
                radius: TARGET_RADIUS,
                kind: crate::sim::TargetKind::Low,
                visible: true,
            });
        }
        tick(&mut state, &TickInput::default());
        assert!(state.puck.pos.is_finite() && state.puck.vel.is_finite());
        for target in &state.targets {
            assert!(target.pos.is_finite() && target.vel.is_finite());
        }
    }

    #[test]
    fn test_scroll_follows_fast_puck() {
        let mut state = quiet_state();
        state.phase = Phase::Moving;
        state.puck.pos = Vec2::new(500.0, 555.0);
        state.puck.vel = Vec2::new(0.0, 10.0);
        tick(&mut state, &TickInput::default());
        // Upper threshold at 0.7 * 800 = 560: puck pulled back, offset grows
        assert!((state.puck.pos.y - 560.0).abs() < 1e-3);
        assert!(state.viewport_offset > 0.0);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput { press: Some(Vec2::new(500.0, 500.0)), ..Default::default() },
            TickInput { move_to: Some(Vec2::new(420.0, 470.0)), ..Default::default() },
            TickInput { release: true, ..Default::default() },
        ];
        let mut a = GameState::new(777, 1000.0, 800.0);
        let mut b = GameState::new(777, 1000.0, 800.0);
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        for _ in 0..600 {
            tick(&mut a, &TickInput::default());
            tick(&mut b, &TickInput::default());
        }
        assert_eq!(a.puck.pos, b.puck.pos);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.targets.len(), b.targets.len());
    }
}
