//! Configuration Module
//!
//! Immutable stat tables loaded once at startup: ship performance rows,
//! projectile ballistic rows, and ability parameters. Every table ships
//! built-in defaults matching the game's balance numbers and can instead be
//! deserialized from JSON supplied by the asset/config loader.
//!
//! A table missing a row for a type in use is a fatal configuration error:
//! `validate()` catches it at startup, after which runtime lookups are
//! assumed infallible.

pub mod ability_config;
pub mod projectile_config;
pub mod ship_config;

pub use ability_config::{AbilityKind, AbilityParams, AbilityTable};
pub use projectile_config::{ProjectileKind, ProjectileStats, ProjectileTable};
pub use ship_config::{ShipCatalog, ShipKind, ShipStats};

/// Error raised while loading or validating the static stat tables.
#[derive(Debug)]
pub enum ConfigError {
    /// A ship type has no row in the catalog.
    MissingShip(ShipKind),
    /// A projectile type has no row in the table.
    MissingProjectile(ProjectileKind),
    /// An ability type has no row in the table.
    MissingAbility(AbilityKind),
    /// JSON parse failure.
    JsonError(serde_json::Error),
    /// Standard I/O error while reading a config file.
    IoError(std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingShip(kind) => {
                write!(f, "ship catalog has no entry for {kind:?}")
            }
            ConfigError::MissingProjectile(kind) => {
                write!(f, "projectile table has no entry for {kind:?}")
            }
            ConfigError::MissingAbility(kind) => {
                write!(f, "ability table has no entry for {kind:?}")
            }
            ConfigError::JsonError(err) => write!(f, "config JSON error: {err}"),
            ConfigError::IoError(err) => write!(f, "config I/O error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::JsonError(err) => Some(err),
            ConfigError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError(err)
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}
