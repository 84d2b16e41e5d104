//! Arena Bounds
//!
//! Flat world with hard boundaries: the playfield is a square centered on
//! the origin, `half_extent` meters to each side on X and Z. Craft bounce
//! off the walls; nothing wraps.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Square arena boundary centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    /// Distance from the origin to each wall (meters).
    pub half_extent: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self { half_extent: 150.0 }
    }
}

impl ArenaBounds {
    /// Create bounds with a custom half extent.
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    /// The wall position an entity of the given radius can actually reach.
    pub fn interior(&self, radius: f32) -> f32 {
        self.half_extent - radius
    }

    /// Whether a position (ignoring Y) is inside the walls.
    pub fn contains_xz(&self, pos: Vec3) -> bool {
        pos.x.abs() <= self.half_extent && pos.z.abs() <= self.half_extent
    }

    /// Clamp a position's X and Z into the interior for the given radius.
    ///
    /// Y is preserved.
    pub fn clamp_xz(&self, pos: Vec3, radius: f32) -> Vec3 {
        let limit = self.interior(radius);
        Vec3::new(pos.x.clamp(-limit, limit), pos.y, pos.z.clamp(-limit, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let bounds = ArenaBounds::default();
        assert_eq!(bounds.half_extent, 150.0);
        assert_eq!(bounds.interior(0.6), 149.4);
    }

    #[test]
    fn test_contains_xz() {
        let bounds = ArenaBounds::new(50.0);
        assert!(bounds.contains_xz(Vec3::new(49.0, 100.0, -49.0)));
        assert!(!bounds.contains_xz(Vec3::new(51.0, 0.0, 0.0)));
    }

    #[test]
    fn test_clamp_preserves_y() {
        let bounds = ArenaBounds::new(50.0);
        let clamped = bounds.clamp_xz(Vec3::new(100.0, 25.0, -75.0), 1.0);
        assert_eq!(clamped.x, 49.0);
        assert_eq!(clamped.y, 25.0);
        assert_eq!(clamped.z, -49.0);
    }
}
