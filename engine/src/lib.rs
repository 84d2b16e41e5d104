//! Nova Arena Engine Library
//!
//! Simulation core for an arcade space-combat game: craft physics, terrain
//! collision, combat resolution, and AI targeting. The engine is headless —
//! a rendering/input layer drives it once per frame through
//! [`game::GameState::update`] and reads back positions, orientations,
//! projectile snapshots, and particle snapshots for display.
//!
//! # Modules
//!
//! - [`physics`] - Pure physics primitives (kinematics, sphere and ray tests)
//! - [`world`] - World-space configuration (arena bounds)
//! - [`game`] - Game systems: terrain index, combatants, projectiles,
//!   abilities, particles, and the frame orchestrator
//!
//! # Example
//!
//! ```ignore
//! use nova_arena_engine::game::state::GameState;
//! use nova_arena_engine::game::terrain::generate_arena_mesh;
//! use nova_arena_engine::game::config::{ShipCatalog, ShipKind};
//! use nova_arena_engine::game::combatant::ControlMode;
//! use nova_arena_engine::world::ArenaBounds;
//! use glam::Vec3;
//!
//! let mesh = generate_arena_mesh(150.0, 64, 12.0, 7.0);
//! let mut game = GameState::with_defaults(&mesh, ArenaBounds::default())?;
//! game.spawn_combatant(ShipKind::Raptor, 0, ControlMode::Human, Vec3::new(0.0, 20.0, 0.0));
//! game.spawn_wave(ShipKind::Hydra, 1, 3, 60.0);
//!
//! // Frame driver supplies delta time once per tick.
//! game.update(1.0 / 60.0);
//! ```

pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::ArenaBounds;
// Re-export commonly used physics helpers
pub use physics::{look_at_quat, ray_triangle_intersect, reflect_with_friction};
