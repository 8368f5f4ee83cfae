//! Game state and core simulation types
//!
//! The whole simulation is one explicit state struct advanced by `tick()`;
//! nothing lives in ambient globals. Target spawning is a pure function of
//! (game seed, section index), so replays and resizes are deterministic.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use crate::consts::*;

/// Current stage of the shot lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// No shot pending, ready to aim
    Idle,
    /// Pointer down, drag in progress; puck stationary
    Aiming { anchor: Vec2, current: Vec2 },
    /// Shot committed; puck and targets integrate each tick
    Moving,
    /// Puck sank; shrink animation running, physics suppressed
    Sinking { ticks_left: u32 },
    /// Everything below the stop threshold; ready for the next aim
    Settled,
}

impl Phase {
    /// A new aim is only accepted while nothing is resolving
    #[inline]
    pub fn accepts_aim(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Settled)
    }
}

/// The single player-controlled disk (screen coordinates)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Puck {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// 1.0 normally; shrinks toward 0 during the sink animation.
    /// While below 1.0 the puck is inert and produces no collisions.
    pub scale: f32,
}

impl Puck {
    pub fn new(center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            radius: PUCK_RADIUS,
            scale: 1.0,
        }
    }

    /// Hard reset to the arena center: full scale, zero velocity.
    /// The puck is repositioned, never recreated.
    pub fn reset(&mut self, center: Vec2) {
        self.pos = center;
        self.vel = Vec2::ZERO;
        self.scale = 1.0;
    }
}

/// Scoring disk kinds, drawn per spawn with a weighted coin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Low,
    High,
}

impl TargetKind {
    /// Points awarded when a target of this kind sinks
    #[inline]
    pub fn point_value(&self) -> u64 {
        match self {
            TargetKind::Low => 10,
            TargetKind::High => 25,
        }
    }
}

/// A scoring disk (world coordinates)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub kind: TargetKind,
    /// False once sunk; a retired target never re-enters the simulation
    pub visible: bool,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducible target spawns
    pub seed: u64,
    pub arena: Arena,
    pub puck: Puck,
    /// Targets in spawn order (stable iteration for determinism)
    pub targets: Vec<Target>,
    /// Sections whose targets have already been spawned; a visited section
    /// is never respawned, not even on resize
    pub spawned_sections: Vec<i32>,
    /// Monotone score accumulator, lifetime = this session
    pub score: u64,
    /// Vertical world-to-screen translation from follow-scrolling
    pub viewport_offset: f32,
    pub phase: Phase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session for the given canvas size
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        let arena = Arena::new(width, height);
        let puck = Puck::new(arena.center());
        let mut state = Self {
            seed,
            arena,
            puck,
            targets: Vec::new(),
            spawned_sections: Vec::new(),
            score: 0,
            viewport_offset: 0.0,
            phase: Phase::Idle,
            time_ticks: 0,
        };
        state.sync_sections();
        state
    }

    /// Regenerate holes for the current visible range and spawn targets for
    /// any section revealed for the first time.
    pub fn sync_sections(&mut self) {
        self.arena.regenerate_holes(self.viewport_offset);
        for section in self.arena.visible_sections(self.viewport_offset) {
            if !self.spawned_sections.contains(&section) {
                self.spawn_section(section);
                self.spawned_sections.push(section);
            }
        }
    }

    /// Spawn the fixed target count for one section. Pure in (seed, section):
    /// the same session always populates a section identically.
    fn spawn_section(&mut self, section: i32) {
        let mut rng = section_rng(self.seed, section);
        let (min_x, max_x) = self.arena.field_x_range(TARGET_RADIUS);
        let y_lo = section as f32 * self.arena.hole_spacing_y;
        let y_hi = y_lo + self.arena.hole_spacing_y;
        for _ in 0..TARGETS_PER_SECTION {
            let kind = if rng.random_bool(HIGH_VALUE_CHANCE) {
                TargetKind::High
            } else {
                TargetKind::Low
            };
            self.targets.push(Target {
                pos: Vec2::new(rng.random_range(min_x..max_x), rng.random_range(y_lo..y_hi)),
                vel: Vec2::ZERO,
                radius: TARGET_RADIUS,
                kind,
                visible: true,
            });
        }
    }

    /// Handle a canvas resize: rebuild the arena layout and hole set without
    /// touching puck, targets, score, or scroll offset.
    pub fn resize(&mut self, width: f32, height: f32) {
        let mut arena = Arena::new(width, height);
        arena.regenerate_holes(self.viewport_offset);
        self.arena = arena;
        // Newly revealed sections (taller canvas) still spawn exactly once
        self.sync_sections();
    }
}

/// Per-section RNG, mixed so adjacent sections decorrelate
fn section_rng(seed: u64, section: i32) -> Pcg32 {
    let mix = (section as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    Pcg32::seed_from_u64(seed ^ mix)
}
