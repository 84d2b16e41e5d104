//! Game Systems
//!
//! The per-frame combat systems layered on the combatant model:
//!
//! - [`projectile_system`] - projectile flight, hit tests, and the
//!   mark-then-sweep removal pass
//! - [`ability_system`] - cooldown-gated ability slots and their effects
//! - [`collision_system`] - combatant-vs-combatant contact resolution

pub mod ability_system;
pub mod collision_system;
pub mod projectile_system;

pub use ability_system::{AbilityLoadout, AbilitySlot, BOMB_LAUNCH_OFFSET, TURBO_IMPULSE_FACTOR};
pub use collision_system::{CollisionSystem, PAIR_DAMAGE_INTERVAL};
pub use projectile_system::{Projectile, ProjectileSystem};
