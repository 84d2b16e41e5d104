//! Ability System
//!
//! Two independently-cooled ability slots per combatant. Activation against
//! an un-elapsed cooldown is a silent no-op; otherwise the slot timer resets
//! to zero and the effect fires. Bomb projectiles spawn into a per-activation
//! buffer that the caller transfers into the shared projectile collection
//! before the buffer is reused.

use glam::Vec3;

use crate::game::config::{AbilityKind, AbilityTable, ProjectileStats};
use crate::game::systems::projectile_system::Projectile;

/// Fraction of max speed added as a forward impulse by turbo.
pub const TURBO_IMPULSE_FACTOR: f32 = 0.5;

/// Local-space launch offset for deployed bombs (just ahead, slightly low).
pub const BOMB_LAUNCH_OFFSET: Vec3 = Vec3::new(0.0, -0.1, 5.0);

/// One ability binding with its cooldown clock.
///
/// The clock counts simulation time since the last activation; slots start
/// ready (clock preloaded to the cooldown).
#[derive(Debug, Clone, Copy)]
pub struct AbilitySlot {
    pub kind: AbilityKind,
    pub cooldown: f32,
    time_since: f32,
}

impl AbilitySlot {
    fn new(kind: AbilityKind, cooldown: f32) -> Self {
        Self {
            kind,
            cooldown,
            time_since: cooldown,
        }
    }

    /// Whether the slot could fire right now.
    pub fn ready(&self) -> bool {
        self.time_since >= self.cooldown
    }

    /// Seconds since the last activation.
    pub fn time_since(&self) -> f32 {
        self.time_since
    }
}

/// A combatant's selected abilities: slot 0 (primary) and slot 1 (secondary).
#[derive(Debug, Clone)]
pub struct AbilityLoadout {
    slots: [AbilitySlot; 2],
    /// Stats row for the bomb projectile, resolved at spawn so activation
    /// never touches the table.
    bomb_stats: ProjectileStats,
    /// Per-activation spawn buffer, drained by the owner's transfer step.
    pending: Vec<Projectile>,
}

impl AbilityLoadout {
    /// Bind two abilities using cooldowns from the table.
    pub fn new(
        primary: AbilityKind,
        secondary: AbilityKind,
        table: &AbilityTable,
        bomb_stats: ProjectileStats,
    ) -> Self {
        Self {
            slots: [
                AbilitySlot::new(primary, table.params(primary).cooldown),
                AbilitySlot::new(secondary, table.params(secondary).cooldown),
            ],
            bomb_stats,
            pending: Vec::new(),
        }
    }

    /// Advance both cooldown clocks.
    pub fn tick(&mut self, dt: f32) {
        for slot in &mut self.slots {
            slot.time_since += dt;
        }
    }

    /// Try to activate a slot.
    ///
    /// Returns the bound ability kind when accepted (and resets the slot
    /// timer to zero), or `None` while the cooldown has not elapsed or for
    /// an out-of-range slot index.
    pub fn try_activate(&mut self, slot: usize) -> Option<AbilityKind> {
        let slot = self.slots.get_mut(slot)?;
        if !slot.ready() {
            return None;
        }
        slot.time_since = 0.0;
        Some(slot.kind)
    }

    /// Slot state for HUD cooldown rings.
    pub fn slot(&self, index: usize) -> Option<&AbilitySlot> {
        self.slots.get(index)
    }

    /// Stats row bombs are spawned with.
    pub fn bomb_stats(&self) -> ProjectileStats {
        self.bomb_stats
    }

    /// Buffer freshly spawned ability projectiles land in.
    pub fn buffer_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.pending
    }

    /// Move every buffered projectile into `dest`, leaving the buffer empty
    /// for the next activation.
    pub fn transfer_projectiles(&mut self, dest: &mut Vec<Projectile>) {
        dest.append(&mut self.pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{ProjectileKind, ProjectileTable};

    fn loadout() -> AbilityLoadout {
        let table = AbilityTable::default();
        let bomb = ProjectileTable::default().stats(ProjectileKind::Explosive);
        AbilityLoadout::new(AbilityKind::Bomb, AbilityKind::Turbo, &table, bomb)
    }

    #[test]
    fn test_slots_start_ready() {
        let mut loadout = loadout();
        assert_eq!(loadout.try_activate(0), Some(AbilityKind::Bomb));
        assert_eq!(loadout.try_activate(1), Some(AbilityKind::Turbo));
    }

    #[test]
    fn test_activation_rejected_during_cooldown() {
        let mut loadout = loadout();
        assert!(loadout.try_activate(1).is_some());
        // Immediately again: still cooling down
        assert!(loadout.try_activate(1).is_none());
        // Not quite elapsed
        loadout.tick(4.9);
        assert!(loadout.try_activate(1).is_none());
        // Elapsed
        loadout.tick(0.2);
        assert_eq!(loadout.try_activate(1), Some(AbilityKind::Turbo));
    }

    #[test]
    fn test_activation_resets_timer_to_zero() {
        let mut loadout = loadout();
        loadout.tick(3.0);
        assert!(loadout.try_activate(0).is_some());
        let slot = loadout.slot(0).expect("slot 0");
        assert_eq!(slot.time_since(), 0.0);
    }

    #[test]
    fn test_slots_cool_independently() {
        let mut loadout = loadout();
        assert!(loadout.try_activate(0).is_some());
        // Slot 0 is cooling; slot 1 is untouched and still ready
        assert!(loadout.try_activate(0).is_none());
        assert!(loadout.try_activate(1).is_some());
    }

    #[test]
    fn test_bad_slot_index_is_noop() {
        let mut loadout = loadout();
        assert!(loadout.try_activate(5).is_none());
    }
}
