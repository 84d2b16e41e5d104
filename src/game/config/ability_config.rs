//! Ability Parameter Table
//!
//! Cooldowns for the two player-selected ability slots. The effects
//! themselves live in [`crate::game::systems::ability_system`]; this table
//! only carries the tuning numbers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Discrete activation effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    /// Deployable explosive launched ahead of the activator.
    Bomb,
    /// Instantaneous forward velocity impulse.
    Turbo,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 2] = [AbilityKind::Bomb, AbilityKind::Turbo];
}

/// Tuning row for one ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityParams {
    pub name: String,
    /// Seconds between activations of a slot bound to this ability.
    pub cooldown: f32,
}

/// Static table of ability rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityTable {
    rows: HashMap<AbilityKind, AbilityParams>,
}

impl Default for AbilityTable {
    fn default() -> Self {
        let mut rows = HashMap::new();
        rows.insert(
            AbilityKind::Bomb,
            AbilityParams {
                name: "Bomb".to_string(),
                cooldown: 10.0,
            },
        );
        rows.insert(
            AbilityKind::Turbo,
            AbilityParams {
                name: "Turbo".to_string(),
                cooldown: 5.0,
            },
        );
        Self { rows }
    }
}

impl AbilityTable {
    /// Parse a table from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check that every ability has a row.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in AbilityKind::ALL {
            if !self.rows.contains_key(&kind) {
                return Err(ConfigError::MissingAbility(kind));
            }
        }
        Ok(())
    }

    /// Look up a row. Panics on a missing row — `validate()` at startup
    /// makes that unreachable in a correctly configured game.
    pub fn params(&self, kind: AbilityKind) -> &AbilityParams {
        self.rows
            .get(&kind)
            .unwrap_or_else(|| panic!("ability table has no entry for {kind:?}"))
    }
}
