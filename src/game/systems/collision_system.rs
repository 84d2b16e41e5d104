//! Collision system — combatant-vs-combatant contact resolution.
//!
//! Runs once per frame after individual combatant updates. Each overlapping
//! pair is processed exactly once: physics separation always applies (same
//! team included), ramming damage applies only across teams and is gated by
//! a shared per-pair interval so a touching pair cannot take damage twice in
//! one frame or every frame while overlapping.
//!
//! Pairs are visited in list order; within a frame the earlier craft's
//! impulse lands first. That ordering bias is accepted, not corrected.

use std::collections::HashMap;

use glam::Vec3;

use crate::game::combatant::Combatant;
use crate::game::events::HitFeed;
use crate::game::particles::Particles;
use crate::game::types::CombatantId;

/// Minimum interval between damage applications for one pair (seconds).
pub const PAIR_DAMAGE_INTERVAL: f32 = 0.5;

fn pair_key(a: CombatantId, b: CombatantId) -> (CombatantId, CombatantId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Stateful pair tracker for entity-vs-entity collisions.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    /// Last time each pair took collision damage.
    pair_timers: HashMap<(CombatantId, CombatantId), f32>,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every overlapping pair of live combatants.
    pub fn resolve(
        &mut self,
        combatants: &mut [Combatant],
        time: f32,
        particles: &mut Particles,
        feed: &mut HitFeed,
    ) {
        for i in 0..combatants.len() {
            let (head, tail) = combatants.split_at_mut(i + 1);
            let a = &mut head[i];
            if !a.is_alive() {
                continue;
            }
            for b in tail.iter_mut() {
                if !b.is_alive() {
                    continue;
                }

                let delta = a.position - b.position;
                let min_distance = a.stats.collision_radius + b.stats.collision_radius;
                if delta.length_squared() >= min_distance * min_distance {
                    continue;
                }

                // Closing speed before the impulses change it
                let closing_speed = (a.velocity - b.velocity).length();

                // Physics separation: each party pushed along the connecting
                // normal by its own bounce constant. Applies to teammates too.
                let dir = delta.normalize_or_zero();
                let dir = if dir == Vec3::ZERO { Vec3::X } else { dir };
                a.velocity += dir * a.stats.bounce_factor;
                b.velocity -= dir * b.stats.bounce_factor;

                if a.team == b.team {
                    continue;
                }

                let key = pair_key(a.id, b.id);
                let last = self
                    .pair_timers
                    .get(&key)
                    .copied()
                    .unwrap_or(f32::NEG_INFINITY);
                if time - last < PAIR_DAMAGE_INTERVAL {
                    continue;
                }
                self.pair_timers.insert(key, time);

                let (a_id, b_id) = (a.id, b.id);
                let damage_to_a = closing_speed * a.stats.collision_damage_mult;
                let damage_to_b = closing_speed * b.stats.collision_damage_mult;

                if a.take_damage(damage_to_a, particles) {
                    feed.report_killed(b_id, time);
                } else {
                    feed.report_hit(b_id, time);
                }
                if b.take_damage(damage_to_b, particles) {
                    feed.report_killed(a_id, time);
                } else {
                    feed.report_hit(a_id, time);
                }

                // The ram may have killed this craft; stop pairing it
                if !a.is_alive() {
                    break;
                }
            }
        }
    }

    /// Drop pair history involving a removed combatant.
    pub fn forget(&mut self, id: CombatantId) {
        self.pair_timers.retain(|&(a, b), _| a != id && b != id);
    }
}
