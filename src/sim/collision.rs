//! Collision detection for disks, cushions, and holes
//!
//! Everything here is pure geometry; velocity responses are applied by the
//! tick loop so the detection math stays independently testable.

use glam::Vec2;

use super::arena::{Arena, Hole};
use crate::consts::*;
use crate::dist;

/// Result of a disk-disk overlap check
#[derive(Debug, Clone, Copy)]
pub struct DiskHit {
    /// Unit normal from the puck toward the target
    pub normal: Vec2,
    /// Penetration depth against the slack-widened contact radius
    pub overlap: f32,
}

/// Check a puck-target overlap.
///
/// The contact radius is widened by [`COLLISION_SLACK`] to soften tunneling
/// at high speed. Coincident centers (distance zero) fall back to a fixed
/// axis so resolution never produces NaN.
pub fn disk_hit(puck_pos: Vec2, puck_r: f32, target_pos: Vec2, target_r: f32) -> Option<DiskHit> {
    let contact = (puck_r + target_r) * COLLISION_SLACK;
    let d = dist(puck_pos, target_pos);
    if d >= contact {
        return None;
    }
    let normal = if d > f32::EPSILON {
        (target_pos - puck_pos) / d
    } else {
        Vec2::X
    };
    Some(DiskHit {
        normal,
        overlap: contact - d,
    })
}

/// Reflect a disk off the left/right cushions.
///
/// On penetration the position is clamped to the boundary and the
/// perpendicular velocity component is negated and damped by
/// [`WALL_RESTITUTION`], so no residual out-of-bounds coordinate survives
/// the tick. Top/bottom are open: the table scrolls vertically.
pub fn reflect_cushions(pos: &mut Vec2, vel: &mut Vec2, r: f32, arena: &Arena) {
    let (min_x, max_x) = arena.field_x_range(r);
    if pos.x < min_x {
        pos.x = min_x;
        vel.x = -vel.x * WALL_RESTITUTION;
    } else if pos.x > max_x {
        pos.x = max_x;
        vel.x = -vel.x * WALL_RESTITUTION;
    }
}

/// True if a disk at `pos` (same coordinate space as the hole) is sunk.
///
/// Membership requires both proximity to the hole center and approach from
/// the field side of the cushion; an entity behind the cushion at equal
/// distance never sinks.
pub fn hole_test(pos: Vec2, hole: &Hole) -> bool {
    hole.accepts_from(pos.x) && dist(pos, hole.pos) < hole.radius
}
