//! Ship Catalog
//!
//! Per-craft performance rows: health, handling, weapon binding, collision
//! response constants, and muzzle layout. A combatant copies its row at
//! spawn, so balance edits only affect craft spawned afterwards.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::{ConfigError, ProjectileKind};

/// Craft hull type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    /// Fast twin-gun fighter.
    Raptor,
    /// Beam interceptor.
    Hellfire,
    /// Heavy launcher with explosive rounds.
    Hydra,
    /// Unarmed heavy rammer.
    Spear,
}

impl ShipKind {
    pub const ALL: [ShipKind; 4] = [
        ShipKind::Raptor,
        ShipKind::Hellfire,
        ShipKind::Hydra,
        ShipKind::Spear,
    ];
}

/// Immutable per-type performance stats.
///
/// Turn rates are in degrees per second; a human pilot's mouse deltas and an
/// AI pilot's look-at both scale off them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub name: String,

    pub max_health: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    /// Bound weapon, if any. `None` means the craft cannot shoot.
    pub projectile: Option<ProjectileKind>,

    pub max_speed: f32,
    pub acceleration: f32,
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub roll_rate: f32,

    pub collision_radius: f32,
    /// Velocity retained after a bounce (and the separation impulse this
    /// craft applies in entity collisions).
    pub bounce_factor: f32,
    /// Fraction of surface-parallel velocity lost on ground contact.
    pub friction_factor: f32,
    /// Flat damage taken from a terrain or wall impact.
    pub collision_base_damage: f32,
    /// Damage per m/s of impact speed.
    pub collision_damage_mult: f32,

    /// Local-space muzzle offsets; one projectile per muzzle per shot.
    pub muzzles: Vec<Vec3>,
}

/// Static catalog of ship rows, keyed by hull type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipCatalog {
    ships: HashMap<ShipKind, ShipStats>,
}

impl Default for ShipCatalog {
    fn default() -> Self {
        let mut ships = HashMap::new();
        ships.insert(
            ShipKind::Raptor,
            ShipStats {
                name: "Raptor".to_string(),
                max_health: 300.0,
                fire_interval: 0.1,
                projectile: Some(ProjectileKind::Bullet),
                max_speed: 75.0,
                acceleration: 25.0,
                pitch_rate: 45.0,
                yaw_rate: 50.0,
                roll_rate: 110.0,
                collision_radius: 0.6,
                bounce_factor: 0.4,
                friction_factor: 0.7,
                collision_base_damage: 15.0,
                collision_damage_mult: 0.8,
                muzzles: vec![Vec3::new(0.5, 0.0, 1.0), Vec3::new(-0.5, 0.0, 1.0)],
            },
        );
        ships.insert(
            ShipKind::Hellfire,
            ShipStats {
                name: "Hellfire".to_string(),
                max_health: 200.0,
                fire_interval: 0.0025,
                projectile: Some(ProjectileKind::Laser),
                max_speed: 90.0,
                acceleration: 30.0,
                pitch_rate: 45.0,
                yaw_rate: 50.0,
                roll_rate: 125.0,
                collision_radius: 0.45,
                bounce_factor: 0.4,
                friction_factor: 0.7,
                collision_base_damage: 15.0,
                collision_damage_mult: 0.8,
                muzzles: vec![Vec3::new(0.3, -0.1, 0.5)],
            },
        );
        ships.insert(
            ShipKind::Hydra,
            ShipStats {
                name: "Hydra".to_string(),
                max_health: 500.0,
                fire_interval: 0.75,
                projectile: Some(ProjectileKind::Explosive),
                max_speed: 55.0,
                acceleration: 20.0,
                pitch_rate: 45.0,
                yaw_rate: 50.0,
                roll_rate: 95.0,
                collision_radius: 0.9,
                bounce_factor: 0.4,
                friction_factor: 0.7,
                collision_base_damage: 15.0,
                collision_damage_mult: 0.8,
                muzzles: vec![Vec3::new(0.45, -0.2, 0.0), Vec3::new(-0.45, -0.2, 0.0)],
            },
        );
        ships.insert(
            ShipKind::Spear,
            ShipStats {
                name: "Spear".to_string(),
                max_health: 3000.0,
                fire_interval: 0.0,
                projectile: None,
                max_speed: 150.0,
                acceleration: 50.0,
                pitch_rate: 45.0,
                yaw_rate: 50.0,
                roll_rate: 150.0,
                collision_radius: 1.2,
                bounce_factor: 0.8,
                friction_factor: 0.8,
                collision_base_damage: 10.0,
                collision_damage_mult: 0.1,
                muzzles: Vec::new(),
            },
        );
        Self { ships }
    }
}

impl ShipCatalog {
    /// Parse a catalog from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every hull type has a row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ShipKind::ALL {
            if !self.ships.contains_key(&kind) {
                return Err(ConfigError::MissingShip(kind));
            }
        }
        Ok(())
    }

    /// Look up a row. Panics on a missing row — `validate()` at startup
    /// makes that unreachable in a correctly configured game.
    pub fn stats(&self, kind: ShipKind) -> &ShipStats {
        self.ships
            .get(&kind)
            .unwrap_or_else(|| panic!("ship catalog has no entry for {kind:?}"))
    }

    /// Non-panicking lookup for validation paths.
    pub fn get(&self, kind: ShipKind) -> Option<&ShipStats> {
        self.ships.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_validates() {
        assert!(ShipCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_armed_ships_have_muzzles() {
        let catalog = ShipCatalog::default();
        for kind in ShipKind::ALL {
            let stats = catalog.stats(kind);
            if stats.projectile.is_some() {
                assert!(
                    !stats.muzzles.is_empty(),
                    "{} is armed but has no muzzles",
                    stats.name
                );
            }
        }
    }

    #[test]
    fn test_spear_is_unarmed() {
        let catalog = ShipCatalog::default();
        let spear = catalog.stats(ShipKind::Spear);
        assert!(spear.projectile.is_none());
        assert!(spear.muzzles.is_empty());
    }

    #[test]
    fn test_missing_row_fails_validation() {
        let mut catalog = ShipCatalog::default();
        catalog.ships.remove(&ShipKind::Hydra);
        assert!(matches!(
            catalog.validate(),
            Err(ConfigError::MissingShip(ShipKind::Hydra))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let catalog = ShipCatalog::default();
        let json = serde_json::to_string(&catalog).expect("serialize");
        let back = ShipCatalog::from_json(&json).expect("parse");
        assert_eq!(back.stats(ShipKind::Raptor), catalog.stats(ShipKind::Raptor));
    }
}
