//! Arena layout: playing-field extents, cushions, and scoring holes
//!
//! Holes live in world coordinates and sit embedded in the left/right
//! cushions, one pair per vertical section. The hole set is regenerated (full
//! replacement, idempotent) whenever the canvas size or the visible vertical
//! range changes; it covers one screen of look-behind and two of look-ahead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which cushion a hole is embedded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A border-anchored sink point (world coordinates)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hole {
    pub pos: Vec2,
    pub side: Side,
    pub radius: f32,
}

impl Hole {
    /// True if `x` is on the field side of this hole's cushion.
    /// Entities can only enter a hole from the field, never through the back
    /// of the cushion.
    #[inline]
    pub fn accepts_from(&self, x: f32) -> bool {
        match self.side {
            Side::Left => x > self.pos.x,
            Side::Right => x < self.pos.x,
        }
    }
}

/// Static/derived playing-field layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    /// Field extents in pixels (viewport-dependent)
    pub width: f32,
    pub height: f32,
    /// Thickness of the left/right cushions
    pub border_width: f32,
    /// Vertical period between hole rows
    pub hole_spacing_y: f32,
    pub hole_radius: f32,
    /// Holes covering the currently visible world range plus margin
    pub holes: Vec<Hole>,
}

impl Arena {
    /// Build an arena for the given canvas size with an empty hole set.
    ///
    /// Degenerate dimensions are a setup fault, not a runtime error: this
    /// fails fast rather than letting NaN geometry leak into the sim.
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
            "degenerate canvas size {width}x{height}"
        );
        assert!(
            BORDER_WIDTH * 2.0 < width,
            "cushions overlap: border {BORDER_WIDTH} vs width {width}"
        );
        Self {
            width,
            height,
            border_width: BORDER_WIDTH,
            hole_spacing_y: HOLE_SPACING_Y,
            hole_radius: HOLE_RADIUS,
            holes: Vec::new(),
        }
    }

    /// World x of the left/right hole columns
    #[inline]
    pub fn hole_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.border_width,
            Side::Right => self.width - self.border_width,
        }
    }

    /// Field center in screen coordinates (puck reset point)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Horizontal span a disk of radius `r` may occupy between the cushions
    #[inline]
    pub fn field_x_range(&self, r: f32) -> (f32, f32) {
        (self.border_width + r, self.width - self.border_width - r)
    }

    /// Section index containing world y
    #[inline]
    pub fn section_of(&self, world_y: f32) -> i32 {
        (world_y / self.hole_spacing_y).floor() as i32
    }

    /// World-y center of a section's hole row
    #[inline]
    pub fn section_mid_y(&self, section: i32) -> f32 {
        (section as f32 + 0.5) * self.hole_spacing_y
    }

    /// Sections intersecting `[offset - height, offset + 2*height]`
    /// (one screen behind, two ahead)
    pub fn visible_sections(&self, offset: f32) -> std::ops::RangeInclusive<i32> {
        let lo = self.section_of(offset - self.height);
        let hi = self.section_of(offset + 2.0 * self.height);
        lo..=hi
    }

    /// Rebuild the hole set for the visible world range.
    ///
    /// Full replacement: calling again with the same offset yields the same
    /// holes in the same order, so resize handlers can re-invoke freely
    /// without accumulating duplicates.
    pub fn regenerate_holes(&mut self, offset: f32) {
        self.holes.clear();
        for section in self.visible_sections(offset) {
            let y = self.section_mid_y(section);
            for side in [Side::Left, Side::Right] {
                self.holes.push(Hole {
                    pos: Vec2::new(self.hole_x(side), y),
                    side,
                    radius: self.hole_radius,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holes_anchored_to_cushions() {
        let mut arena = Arena::new(1000.0, 800.0);
        arena.regenerate_holes(0.0);
        assert!(!arena.holes.is_empty());
        for hole in &arena.holes {
            match hole.side {
                Side::Left => assert_eq!(hole.pos.x, arena.border_width),
                Side::Right => assert_eq!(hole.pos.x, arena.width - arena.border_width),
            }
        }
    }

    #[test]
    fn test_holes_paired_at_section_midpoints() {
        let mut arena = Arena::new(1000.0, 800.0);
        arena.regenerate_holes(0.0);
        for pair in arena.holes.chunks(2) {
            assert_eq!(pair[0].pos.y, pair[1].pos.y);
            assert_eq!(pair[0].side, Side::Left);
            assert_eq!(pair[1].side, Side::Right);
            // Midpoint of some section
            let frac = pair[0].pos.y / arena.hole_spacing_y;
            assert!((frac.fract().abs() - 0.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_regeneration_idempotent() {
        let mut arena = Arena::new(1000.0, 800.0);
        arena.regenerate_holes(1234.0);
        let first: Vec<_> = arena.holes.iter().map(|h| (h.pos, h.side)).collect();
        arena.regenerate_holes(1234.0);
        let second: Vec<_> = arena.holes.iter().map(|h| (h.pos, h.side)).collect();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_visible_range_covers_margin() {
        let mut arena = Arena::new(1000.0, 800.0);
        let offset = 3000.0;
        arena.regenerate_holes(offset);
        let lo = offset - arena.height;
        let hi = offset + 2.0 * arena.height;
        for hole in &arena.holes {
            let section = arena.section_of(hole.pos.y);
            // The section must intersect the padded range
            assert!(arena.section_mid_y(section) >= lo - arena.hole_spacing_y);
            assert!(arena.section_mid_y(section) <= hi + arena.hole_spacing_y);
        }
        // First section behind and last section ahead are both present
        let sections: Vec<i32> = arena.holes.iter().map(|h| arena.section_of(h.pos.y)).collect();
        assert!(sections.contains(&arena.section_of(lo)));
        assert!(sections.contains(&arena.section_of(hi)));
    }

    #[test]
    fn test_hole_accepts_from_field_side_only() {
        let hole = Hole {
            pos: Vec2::new(24.0, 300.0),
            side: Side::Left,
            radius: 26.0,
        };
        assert!(hole.accepts_from(30.0));
        assert!(!hole.accepts_from(10.0));
        assert!(!hole.accepts_from(24.0));
    }

    #[test]
    #[should_panic]
    fn test_degenerate_size_rejected() {
        let _ = Arena::new(0.0, 800.0);
    }
}
