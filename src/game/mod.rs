//! Game Module
//!
//! The simulation systems layered on top of the engine: terrain index,
//! configuration tables, the unified combatant model, projectiles,
//! abilities, particles, and the frame orchestrator.

pub mod combatant;
pub mod config;
pub mod events;
pub mod input;
pub mod particles;
pub mod state;
pub mod systems;
pub mod terrain;
pub mod types;

// Re-exports from the game modules
pub use combatant::{Combatant, ControlMode, UpdateCtx};
pub use config::{
    AbilityKind, AbilityTable, ConfigError, ProjectileKind, ProjectileStats, ProjectileTable,
    ShipCatalog, ShipKind, ShipStats,
};
pub use events::HitFeed;
pub use input::ControlInput;
pub use particles::{EffectKind, ParticleSnapshot, Particles};
pub use state::GameState;
pub use systems::{AbilityLoadout, CollisionSystem, Projectile, ProjectileSystem};
pub use terrain::{
    BuildReport, HEIGHT_SENTINEL, TerrainIndex, TerrainMesh, generate_arena_mesh,
};
pub use types::{CombatantId, Team};
