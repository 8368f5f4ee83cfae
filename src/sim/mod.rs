//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, fixed-step only
//! - Seeded RNG only (section spawns are a pure function of seed + section)
//! - Stable iteration order (targets in spawn order)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod viewport;

pub use arena::{Arena, Hole, Side};
pub use collision::{DiskHit, disk_hit, hole_test, reflect_cushions};
pub use snapshot::Snapshot;
pub use state::{GameState, Phase, Puck, Target, TargetKind};
pub use tick::{TickInput, tick};
pub use viewport::{follow_puck, to_screen, to_world};
