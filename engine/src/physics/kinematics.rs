//! Velocity and orientation kinematics.
//!
//! Shared movement math for craft and debris: exponential drag, the soft
//! speed cap, surface bounce with tangential friction, and the look-at
//! quaternion used by AI steering. All functions are pure.

use glam::{Mat3, Quat, Vec3};

/// Apply per-frame exponential drag to a velocity.
///
/// `coefficient` is the per-frame retention factor (just below 1.0), so with
/// no further thrust speed decays exponentially over time.
pub fn apply_drag(velocity: Vec3, coefficient: f32) -> Vec3 {
    velocity * coefficient
}

/// Soft-cap a velocity at `max_speed`.
///
/// Instead of hard-clamping, speed above the limit is lerped back toward the
/// limit by `lerp_factor` each frame (1.0 = instant clamp). Keeps ability
/// impulses like turbo feeling punchy while still converging to max speed.
pub fn soft_speed_cap(velocity: Vec3, max_speed: f32, lerp_factor: f32) -> Vec3 {
    let speed = velocity.length();
    if speed <= max_speed || speed < 1e-6 {
        return velocity;
    }
    let target_speed = speed + (max_speed - speed) * lerp_factor;
    velocity / speed * target_speed
}

/// Reflect a velocity off a surface with the given normal, applying a bounce
/// factor and tangential friction.
///
/// The reflected velocity keeps the incoming speed scaled by `bounce`, then
/// loses `friction` of its surface-parallel component. Returns the incoming
/// velocity unchanged when it is (near) zero, since there is nothing to
/// reflect.
pub fn reflect_with_friction(velocity: Vec3, normal: Vec3, bounce: f32, friction: f32) -> Vec3 {
    let speed = velocity.length();
    if speed < 1e-6 {
        return velocity;
    }
    let dir = velocity / speed;
    let reflected = dir - 2.0 * dir.dot(normal) * normal;
    let mut out = reflected * speed * bounce;

    let tangential = out - out.dot(normal) * normal;
    out -= tangential * friction;
    out
}

/// Build a rotation whose +Z axis points along `forward`.
///
/// `up` is a hint; the actual up axis is re-orthogonalized. Falls back to
/// identity for a zero forward vector and picks an arbitrary right axis when
/// `forward` is (anti)parallel to `up`.
pub fn look_at_quat(forward: Vec3, up: Vec3) -> Quat {
    let f = forward.normalize_or_zero();
    if f == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let mut right = up.cross(f);
    if right.length_squared() < 1e-8 {
        // forward is vertical; any horizontal right axis works
        right = Vec3::X.cross(f);
    }
    let right = right.normalize();
    let up = f.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_decays_speed() {
        let v = Vec3::new(10.0, 0.0, 0.0);
        let dragged = apply_drag(v, 0.99);
        assert!(dragged.length() < v.length());
        assert!(dragged.x > 9.8);
    }

    #[test]
    fn test_soft_cap_leaves_slow_velocity_alone() {
        let v = Vec3::new(3.0, 0.0, 0.0);
        assert_eq!(soft_speed_cap(v, 10.0, 0.8), v);
    }

    #[test]
    fn test_soft_cap_converges_to_max() {
        let mut v = Vec3::new(100.0, 0.0, 0.0);
        for _ in 0..40 {
            v = soft_speed_cap(v, 10.0, 0.8);
        }
        assert!(
            (v.length() - 10.0).abs() < 0.1,
            "speed should converge to max, got {}",
            v.length()
        );
    }

    #[test]
    fn test_reflect_flat_ground() {
        // Falling straight down onto flat ground bounces straight up,
        // scaled by the bounce factor (no tangential component to rub off).
        let v = Vec3::new(0.0, -10.0, 0.0);
        let out = reflect_with_friction(v, Vec3::Y, 0.5, 0.7);
        assert!(out.y > 0.0, "should bounce upward, got {:?}", out);
        assert!((out.y - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_reflect_friction_kills_tangential() {
        // Grazing impact: full friction removes all surface-parallel motion.
        let v = Vec3::new(10.0, -1.0, 0.0);
        let out = reflect_with_friction(v, Vec3::Y, 1.0, 1.0);
        assert!(out.x.abs() < 0.01, "tangential x should be gone, got {:?}", out);
    }

    #[test]
    fn test_reflect_zero_velocity() {
        let out = reflect_with_friction(Vec3::ZERO, Vec3::Y, 0.4, 0.7);
        assert_eq!(out, Vec3::ZERO);
    }

    #[test]
    fn test_look_at_points_forward() {
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let q = look_at_quat(dir, Vec3::Y);
        let forward = q * Vec3::Z;
        assert!((forward - dir).length() < 1e-4, "forward was {:?}", forward);
        assert!((q.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_vertical_forward() {
        let q = look_at_quat(Vec3::Y, Vec3::Y);
        let forward = q * Vec3::Z;
        assert!((forward - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn test_look_at_zero_is_identity() {
        assert_eq!(look_at_quat(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
    }
}
