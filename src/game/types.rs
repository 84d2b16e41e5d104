//! Shared Game Types
//!
//! Small identity types plus the deterministic hash-noise helpers used for
//! AI fire jitter, aim spread, particle velocities, and terrain generation.
//! The simulation is a fixed-step deterministic core, so all "randomness"
//! comes from seeded fractional-sine hashing instead of an RNG.

use std::f32::consts::TAU;

use glam::Vec3;

/// Stable identifier for a combatant, assigned at spawn and never reused
/// within a match.
pub type CombatantId = u32;

/// Team tag. Combatants on the same team never damage each other.
pub type Team = u8;

/// Hash a seed into [0, 1).
pub fn hash_1d(seed: f32) -> f32 {
    let n = ((seed * 12.9898).sin() * 43758.5453).fract();
    n * 0.5 + 0.5
}

/// Hash two coordinates into [0, 1).
pub fn hash_2d(x: f32, y: f32) -> f32 {
    let n = ((x * 127.1 + y * 311.7).sin() * 43758.5453).fract();
    n * 0.5 + 0.5
}

/// Map a seed into the range [lo, hi).
pub fn jitter_range(seed: f32, lo: f32, hi: f32) -> f32 {
    lo + hash_1d(seed) * (hi - lo)
}

/// Map a seed onto the unit sphere (uniform direction).
pub fn hash_unit_dir(seed: f32) -> Vec3 {
    let u = hash_1d(seed);
    let v = hash_1d(seed + 17.17);
    let y = 2.0 * v - 1.0;
    let theta = TAU * u;
    let r = (1.0 - y * y).max(0.0).sqrt();
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

/// Smoothstep interpolation
pub fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// 2D value noise for terrain height
pub fn noise_2d(x: f32, y: f32) -> f32 {
    let ix = x.floor();
    let iy = y.floor();
    let fx = x - ix;
    let fy = y - iy;

    let v00 = hash_2d(ix, iy);
    let v10 = hash_2d(ix + 1.0, iy);
    let v01 = hash_2d(ix, iy + 1.0);
    let v11 = hash_2d(ix + 1.0, iy + 1.0);

    let sx = smoothstep(fx);
    let sy = smoothstep(fy);

    let v0 = v00 + sx * (v10 - v00);
    let v1 = v01 + sx * (v11 - v01);
    v0 + sy * (v1 - v0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_in_unit_range() {
        for i in 0..200 {
            let h = hash_1d(i as f32 * 1.37);
            assert!((0.0..1.0).contains(&h), "hash_1d out of range: {}", h);
        }
    }

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash_1d(42.5), hash_1d(42.5));
        assert_eq!(hash_2d(3.0, 7.0), hash_2d(3.0, 7.0));
    }

    #[test]
    fn test_jitter_range_bounds() {
        for i in 0..100 {
            let j = jitter_range(i as f32 * 0.713, -0.1, 0.1);
            assert!((-0.1..0.1).contains(&j), "jitter out of range: {}", j);
        }
    }

    #[test]
    fn test_unit_dir_is_normalized() {
        for i in 0..100 {
            let d = hash_unit_dir(i as f32 * 2.31);
            assert!(
                (d.length() - 1.0).abs() < 1e-4,
                "direction not unit length: {:?}",
                d
            );
        }
    }

    #[test]
    fn test_noise_continuous() {
        // Neighboring samples should not jump wildly
        let a = noise_2d(10.0, 10.0);
        let b = noise_2d(10.01, 10.0);
        assert!((a - b).abs() < 0.05);
    }
}
