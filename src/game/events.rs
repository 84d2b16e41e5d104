//! Damage Event Feed
//!
//! Outbound combat events for the HUD layer: when the last hit and kill
//! happened (simulation time, for hit-marker fades) and per-combatant
//! tallies (scoreboard). The core only records that an event occurred and
//! when; pixels are somebody else's problem.

use std::collections::HashMap;

use crate::game::types::CombatantId;

/// Records hit and kill reports as they happen.
#[derive(Debug, Clone, Default)]
pub struct HitFeed {
    last_hit_time: Option<f32>,
    last_kill_time: Option<f32>,
    hits: HashMap<CombatantId, u32>,
    kills: HashMap<CombatantId, u32>,
}

impl HitFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// A non-lethal hit credited to `attacker` at simulation time `time`.
    pub fn report_hit(&mut self, attacker: CombatantId, time: f32) {
        self.last_hit_time = Some(time);
        *self.hits.entry(attacker).or_insert(0) += 1;
    }

    /// A kill credited to `attacker` at simulation time `time`.
    pub fn report_killed(&mut self, attacker: CombatantId, time: f32) {
        self.last_kill_time = Some(time);
        *self.kills.entry(attacker).or_insert(0) += 1;
    }

    /// Simulation time of the most recent non-lethal hit.
    pub fn last_hit_time(&self) -> Option<f32> {
        self.last_hit_time
    }

    /// Simulation time of the most recent kill.
    pub fn last_kill_time(&self) -> Option<f32> {
        self.last_kill_time
    }

    /// Non-lethal hits credited to a combatant.
    pub fn hits(&self, id: CombatantId) -> u32 {
        self.hits.get(&id).copied().unwrap_or(0)
    }

    /// Kills credited to a combatant.
    pub fn kills(&self, id: CombatantId) -> u32 {
        self.kills.get(&id).copied().unwrap_or(0)
    }

    /// Reset all timestamps and tallies (match restart).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
