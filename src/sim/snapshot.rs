//! Read-only render boundary
//!
//! The renderer never touches `GameState` directly: each frame it receives a
//! [`Snapshot`] with everything already projected to screen coordinates, plus
//! the capped drag-preview arrow. The cap is visual only; the underlying
//! launch magnitude is not clamped.

use glam::Vec2;

use super::arena::Side;
use super::state::{GameState, Phase, TargetKind};
use crate::consts::*;

/// Puck as drawn
#[derive(Debug, Clone, Copy)]
pub struct PuckView {
    pub pos: Vec2,
    pub radius: f32,
    pub scale: f32,
}

/// Target as drawn (screen coordinates)
#[derive(Debug, Clone, Copy)]
pub struct TargetView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: TargetKind,
}

/// Hole as drawn (screen coordinates)
#[derive(Debug, Clone, Copy)]
pub struct HoleView {
    pub pos: Vec2,
    pub radius: f32,
    pub side: Side,
}

/// Drag preview: a fixed-max-length arrow along the launch direction
#[derive(Debug, Clone, Copy)]
pub struct AimArrow {
    pub from: Vec2,
    pub to: Vec2,
}

/// Immutable per-frame view of the simulation
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub width: f32,
    pub height: f32,
    pub border_width: f32,
    pub puck: PuckView,
    pub targets: Vec<TargetView>,
    pub holes: Vec<HoleView>,
    pub score: u64,
    pub aim: Option<AimArrow>,
}

impl Snapshot {
    /// Capture the current state for drawing. Targets and holes outside the
    /// screen (plus their radius) are culled.
    pub fn capture(state: &GameState) -> Self {
        let offset = state.viewport_offset;
        let height = state.arena.height;
        let on_screen = |pos: Vec2, r: f32| pos.y >= -r && pos.y <= height + r;

        let targets = state
            .targets
            .iter()
            .filter(|t| t.visible)
            .map(|t| TargetView {
                pos: super::viewport::to_screen(t.pos, offset),
                radius: t.radius,
                kind: t.kind,
            })
            .filter(|t| on_screen(t.pos, t.radius))
            .collect();

        let holes = state
            .arena
            .holes
            .iter()
            .map(|h| HoleView {
                pos: super::viewport::to_screen(h.pos, offset),
                radius: h.radius,
                side: h.side,
            })
            .filter(|h| on_screen(h.pos, h.radius))
            .collect();

        let aim = match state.phase {
            Phase::Aiming { anchor, current } => {
                let dir = (anchor - current).clamp_length_max(ARROW_MAX_LEN);
                Some(AimArrow {
                    from: state.puck.pos,
                    to: state.puck.pos + dir,
                })
            }
            _ => None,
        };

        Self {
            width: state.arena.width,
            height,
            border_width: state.arena.border_width,
            puck: PuckView {
                pos: state.puck.pos,
                radius: state.puck.radius,
                scale: state.puck.scale,
            },
            targets,
            holes,
            score: state.score,
            aim,
        }
    }
}
