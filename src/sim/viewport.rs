//! Viewport scrolling: world/screen projection and puck-follow
//!
//! Holes and targets are stored in world coordinates; the puck is stored in
//! screen coordinates and stays inside the visible band. When the puck pushes
//! past a follow threshold, the excess is absorbed into the viewport offset
//! and the world scrolls underneath it instead.

use glam::Vec2;

use crate::consts::*;

/// Project a world position to screen coordinates
#[inline]
pub fn to_screen(world: Vec2, offset: f32) -> Vec2 {
    Vec2::new(world.x, world.y - offset)
}

/// Project a screen position to world coordinates
#[inline]
pub fn to_world(screen: Vec2, offset: f32) -> Vec2 {
    Vec2::new(screen.x, screen.y + offset)
}

/// Pull the puck's screen y back inside the follow band, moving the excess
/// into the viewport offset. Returns `(screen_y, offset)` unchanged when the
/// puck is already inside the band.
pub fn follow_puck(screen_y: f32, offset: f32, height: f32) -> (f32, f32) {
    let upper = height * SCROLL_UPPER_FRAC;
    let lower = height * SCROLL_LOWER_FRAC;
    if screen_y > upper {
        (upper, offset + (screen_y - upper))
    } else if screen_y < lower {
        (lower, offset + (screen_y - lower))
    } else {
        (screen_y, offset)
    }
}
