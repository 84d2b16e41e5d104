//! Projectile Stat Table
//!
//! Per-type ballistic parameters. Each row is immutable once loaded; craft
//! and abilities copy the row they fire at spawn time so the hot path never
//! touches the table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Projectile archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Plain slug, destroyed on first hit.
    Bullet,
    /// Continuous beam pulse: pierces targets, damage gated per tick.
    Laser,
    /// Area-effect round: expanded damage sweep when it dies.
    Explosive,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 3] = [
        ProjectileKind::Bullet,
        ProjectileKind::Laser,
        ProjectileKind::Explosive,
    ];
}

/// Immutable per-type ballistic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileStats {
    pub kind: ProjectileKind,
    /// Flight speed (m/s).
    pub speed: f32,
    /// Time to live after spawn (seconds).
    pub lifetime: f32,
    /// Hit-test radius while flying (meters).
    pub collision_radius: f32,
    /// Damage per hit (per tick for piercing types).
    pub base_damage: f32,
    /// Piercing projectiles survive hits instead of dying on the first one.
    #[serde(default)]
    pub piercing: bool,
    /// Minimum interval between damage applications for piercing types.
    #[serde(default)]
    pub tick_interval: Option<f32>,
    /// Radius of the end-of-life damage sweep for explosive types.
    #[serde(default)]
    pub explosion_radius: Option<f32>,
}

/// Static table of projectile rows, keyed by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileTable {
    rows: HashMap<ProjectileKind, ProjectileStats>,
}

impl Default for ProjectileTable {
    fn default() -> Self {
        let mut rows = HashMap::new();
        rows.insert(
            ProjectileKind::Bullet,
            ProjectileStats {
                kind: ProjectileKind::Bullet,
                speed: 75.0,
                lifetime: 2.0,
                collision_radius: 0.5,
                base_damage: 7.5,
                piercing: false,
                tick_interval: None,
                explosion_radius: None,
            },
        );
        rows.insert(
            ProjectileKind::Laser,
            ProjectileStats {
                kind: ProjectileKind::Laser,
                speed: 1000.0,
                lifetime: 0.1,
                collision_radius: 0.5,
                base_damage: 35.0,
                piercing: true,
                tick_interval: Some(0.05),
                explosion_radius: None,
            },
        );
        rows.insert(
            ProjectileKind::Explosive,
            ProjectileStats {
                kind: ProjectileKind::Explosive,
                speed: 40.0,
                lifetime: 4.0,
                collision_radius: 0.5,
                base_damage: 120.0,
                piercing: false,
                tick_interval: None,
                explosion_radius: Some(6.0),
            },
        );
        Self { rows }
    }
}

impl ProjectileTable {
    /// Parse a table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check that every projectile type has a row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in ProjectileKind::ALL {
            if !self.rows.contains_key(&kind) {
                return Err(ConfigError::MissingProjectile(kind));
            }
        }
        Ok(())
    }

    /// Look up a row. Panics on a missing row — `validate()` at startup
    /// makes that unreachable in a correctly configured game.
    pub fn stats(&self, kind: ProjectileKind) -> ProjectileStats {
        *self
            .rows
            .get(&kind)
            .unwrap_or_else(|| panic!("projectile table has no entry for {kind:?}"))
    }

    /// Non-panicking lookup for validation paths.
    pub fn get(&self, kind: ProjectileKind) -> Option<&ProjectileStats> {
        self.rows.get(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_validates() {
        assert!(ProjectileTable::default().validate().is_ok());
    }

    #[test]
    fn test_bullet_row_matches_contract() {
        let table = ProjectileTable::default();
        let bullet = table.stats(ProjectileKind::Bullet);
        assert_eq!(bullet.speed, 75.0);
        assert_eq!(bullet.lifetime, 2.0);
        assert_eq!(bullet.collision_radius, 0.5);
        assert_eq!(bullet.base_damage, 7.5);
        assert!(!bullet.piercing);
    }

    #[test]
    fn test_laser_pierces_with_tick() {
        let table = ProjectileTable::default();
        let laser = table.stats(ProjectileKind::Laser);
        assert!(laser.piercing);
        assert!(laser.tick_interval.is_some());
    }

    #[test]
    fn test_explosive_has_blast_radius() {
        let table = ProjectileTable::default();
        let round = table.stats(ProjectileKind::Explosive);
        assert!(round.explosion_radius.unwrap() > round.collision_radius);
    }

    #[test]
    fn test_missing_row_fails_validation() {
        let mut table = ProjectileTable::default();
        table.rows.remove(&ProjectileKind::Laser);
        assert!(matches!(
            table.validate(),
            Err(ConfigError::MissingProjectile(ProjectileKind::Laser))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let table = ProjectileTable::default();
        let json = serde_json::to_string(&table).expect("serialize");
        let back = ProjectileTable::from_json(&json).expect("parse");
        assert_eq!(
            back.stats(ProjectileKind::Bullet),
            table.stats(ProjectileKind::Bullet)
        );
    }
}
