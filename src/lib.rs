//! Sling Puck - a drag-to-launch table puck game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arena, entities, physics, shot lifecycle)
//!
//! The renderer and input source are external collaborators: the wasm entry
//! point in `main.rs` feeds pointer gestures into [`sim::TickInput`] and draws
//! the read-only [`sim::Snapshot`] each frame.

pub mod sim;

pub use sim::{Arena, GameState, Phase, Snapshot, TickInput, tick};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate; one simulation tick per animation frame.
    /// Velocities are expressed in pixels per tick.
    pub const TICKS_PER_SEC: u32 = 60;

    /// Thickness of the left/right cushions
    pub const BORDER_WIDTH: f32 = 24.0;
    /// Vertical period between hole rows (one "section" of the table)
    pub const HOLE_SPACING_Y: f32 = 600.0;
    /// Sink radius of a scoring hole
    pub const HOLE_RADIUS: f32 = 26.0;

    /// Puck defaults
    pub const PUCK_RADIUS: f32 = 20.0;
    /// Target disks are smaller than the puck
    pub const TARGET_RADIUS: f32 = 14.0;
    /// Targets spawned per newly revealed section
    pub const TARGETS_PER_SECTION: u32 = 3;
    /// Probability that a spawned target is the high-value kind
    pub const HIGH_VALUE_CHANCE: f64 = 0.3;

    /// Drag distance to launch speed conversion
    pub const POWER_SCALE: f32 = 0.1;
    /// Per-tick velocity damping from table drag
    pub const FRICTION: f32 = 0.98;
    /// Velocity kept by the component perpendicular to a cushion
    pub const WALL_RESTITUTION: f32 = 0.9;
    /// Speed fraction transferred to a struck target
    pub const DISK_RESTITUTION: f32 = 0.85;
    /// Widens the contact radius to soften tunneling at high speed
    pub const COLLISION_SLACK: f32 = 1.2;
    /// Below this speed per component, an entity counts as stopped
    pub const STOP_EPS: f32 = 0.05;

    /// Sink shrink animation length: 500 ms at the nominal tick rate
    pub const SINK_DURATION_TICKS: u32 = TICKS_PER_SEC / 2;

    /// Screen-height fractions where the viewport starts following the puck
    pub const SCROLL_UPPER_FRAC: f32 = 0.7;
    pub const SCROLL_LOWER_FRAC: f32 = 0.3;

    /// Longest drag-preview arrow the renderer will show, in pixels
    pub const ARROW_MAX_LEN: f32 = 150.0;
}

/// Distance between two points
#[inline]
pub fn dist(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Convert a committed drag into a launch velocity.
///
/// Slingshot semantics: the shot fires opposite the drag direction, with
/// magnitude proportional to drag distance. A zero-length drag yields a zero
/// vector (no launch) rather than a non-finite velocity.
#[inline]
pub fn launch_velocity(anchor: Vec2, current: Vec2) -> Vec2 {
    (anchor - current) * consts::POWER_SCALE
}
