//! Physics module for the Nova Arena engine.
//!
//! Custom physics implementation built from scratch, without an external
//! physics library. The simulation is a deterministic fixed-step integrator:
//! no forces are accumulated across frames and every operation is a pure
//! function of the current state plus the frame's delta time.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`kinematics`] - Velocity integration, drag, bounce/friction response,
//!   orientation helpers
//! - [`collision`] - Sphere overlap, ray-triangle, and point-in-triangle tests

pub mod collision;
pub mod kinematics;

// Re-export commonly used functions at the physics module level
pub use collision::{point_in_triangle_xz, ray_triangle_intersect, spheres_overlap};
pub use kinematics::{apply_drag, look_at_quat, reflect_with_friction, soft_speed_cap};
