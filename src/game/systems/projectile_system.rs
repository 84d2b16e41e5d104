//! Projectile lifecycle management system.
//!
//! Owns the collection of active projectiles and drives their per-frame
//! state machine: flight → impact/expiry → optional area effect. Destroyed
//! projectiles are only flagged during the update pass and physically
//! removed in a batch [`ProjectileSystem::sweep`] afterwards, so every live
//! projectile sees exactly one full update per frame and iteration is never
//! invalidated mid-pass.

use glam::Vec3;

use crate::game::combatant::Combatant;
use crate::game::config::ProjectileStats;
use crate::game::events::HitFeed;
use crate::game::particles::{EffectKind, Particles};
use crate::game::terrain::TerrainIndex;
use crate::game::types::{CombatantId, Team};
use crate::physics::collision::spheres_overlap;

/// A round in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec3,
    /// Normalized flight direction; fixed for the projectile's whole life.
    pub direction: Vec3,
    /// Type-derived immutable parameters, copied from the table at spawn.
    pub stats: ProjectileStats,
    /// Remaining time to live (seconds).
    pub lifetime: f32,
    /// Combatant that fired this round (never damaged by it).
    pub owner: CombatantId,
    /// Owner's team (friendly fire excluded wholesale).
    pub owner_team: Team,

    destroy: bool,
    exploded: bool,
    /// Time since the last damage application, for piercing types.
    tick_timer: f32,
    /// Combatant damaged by direct contact this frame, excluded from the
    /// explosion sweep so one round cannot damage the same craft twice.
    direct_hit: Option<CombatantId>,
}

impl Projectile {
    /// Spawn a round at `position` flying along `direction`.
    pub fn new(
        position: Vec3,
        direction: Vec3,
        stats: ProjectileStats,
        owner: CombatantId,
        owner_team: Team,
    ) -> Self {
        Self {
            position,
            direction: direction.normalize_or_zero(),
            stats,
            lifetime: stats.lifetime,
            owner,
            owner_team,
            destroy: false,
            exploded: false,
            // Preload so the first contact of a piercing round damages
            tick_timer: stats.tick_interval.unwrap_or(0.0),
            direct_hit: None,
        }
    }

    /// Whether the sweep should remove this projectile.
    pub fn should_destroy(&self) -> bool {
        self.destroy
    }

    /// Flag for removal at the end of the frame.
    pub fn mark_for_destruction(&mut self) {
        self.destroy = true;
    }

    /// Advance one frame: move, age, and run all collision checks.
    pub fn update(
        &mut self,
        dt: f32,
        combatants: &mut [Combatant],
        terrain: &TerrainIndex,
        particles: &mut Particles,
        feed: &mut HitFeed,
        time: f32,
    ) {
        if self.destroy {
            return;
        }

        self.position += self.direction * self.stats.speed * dt;
        self.lifetime -= dt;
        self.tick_timer += dt;
        self.direct_hit = None;

        self.check_combatant_hits(combatants, particles, feed, time);
        self.check_terrain_impact(terrain);

        if self.lifetime <= 0.0 {
            self.destroy = true;
        }

        // Explosive rounds get one expanded-radius pass the moment they die,
        // whatever killed them.
        if self.destroy && !self.exploded && self.stats.explosion_radius.is_some() {
            self.exploded = true;
            self.explosion_sweep(combatants, particles, feed, time);
        }
    }

    fn check_combatant_hits(
        &mut self,
        combatants: &mut [Combatant],
        particles: &mut Particles,
        feed: &mut HitFeed,
        time: f32,
    ) {
        for target in combatants.iter_mut() {
            if target.id == self.owner || target.team == self.owner_team || !target.is_alive() {
                continue;
            }
            if !spheres_overlap(
                self.position,
                self.stats.collision_radius,
                target.position,
                target.stats.collision_radius,
            ) {
                continue;
            }

            if self.stats.piercing {
                // Continuous-damage weapon: damage at most once per tick
                let tick = self.stats.tick_interval.unwrap_or(0.0);
                if self.tick_timer >= tick {
                    self.tick_timer = 0.0;
                    self.apply_hit(target, particles, feed, time);
                }
            } else {
                self.apply_hit(target, particles, feed, time);
                self.destroy = true;
            }
            break;
        }
    }

    fn apply_hit(
        &mut self,
        target: &mut Combatant,
        particles: &mut Particles,
        feed: &mut HitFeed,
        time: f32,
    ) {
        let killed = target.take_damage(self.stats.base_damage, particles);
        self.direct_hit = Some(target.id);
        if killed {
            feed.report_killed(self.owner, time);
        } else {
            feed.report_hit(self.owner, time);
        }
    }

    fn check_terrain_impact(&mut self, terrain: &TerrainIndex) {
        let ground = terrain.height_at(self.position.x, self.position.z);
        if self.position.y - self.stats.collision_radius <= ground {
            self.destroy = true;
        }
    }

    /// End-of-life damage sweep for explosive rounds: the normal hit test
    /// re-run with the blast radius. The combatant already damaged by direct
    /// contact this frame is excluded.
    fn explosion_sweep(
        &mut self,
        combatants: &mut [Combatant],
        particles: &mut Particles,
        feed: &mut HitFeed,
        time: f32,
    ) {
        let Some(blast_radius) = self.stats.explosion_radius else {
            return;
        };

        for target in combatants.iter_mut() {
            if target.id == self.owner || target.team == self.owner_team || !target.is_alive() {
                continue;
            }
            if self.direct_hit == Some(target.id) {
                continue;
            }
            if !spheres_overlap(
                self.position,
                blast_radius,
                target.position,
                target.stats.collision_radius,
            ) {
                continue;
            }

            let killed = target.take_damage(self.stats.base_damage, particles);
            if killed {
                feed.report_killed(self.owner, time);
            } else {
                feed.report_hit(self.owner, time);
            }
        }

        particles.emit(
            EffectKind::ExplosionBig,
            self.position,
            0.4,
            100,
            Vec3::new(1.0, 0.8, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
    }
}

/// Manages the full lifecycle of the shared projectile collection.
#[derive(Debug, Default)]
pub struct ProjectileSystem {
    projectiles: Vec<Projectile>,
}

impl ProjectileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb freshly spawned projectiles from a combatant's transfer step.
    pub fn extend(&mut self, spawned: impl IntoIterator<Item = Projectile>) {
        self.projectiles.extend(spawned);
    }

    /// Run one frame of updates over every live projectile.
    pub fn update_all(
        &mut self,
        dt: f32,
        combatants: &mut [Combatant],
        terrain: &TerrainIndex,
        particles: &mut Particles,
        feed: &mut HitFeed,
        time: f32,
    ) {
        for projectile in &mut self.projectiles {
            projectile.update(dt, combatants, terrain, particles, feed, time);
        }
    }

    /// Remove every projectile flagged for destruction.
    ///
    /// Called once per frame after all updates complete; never during
    /// iteration.
    pub fn sweep(&mut self) {
        self.projectiles.retain(|p| !p.should_destroy());
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Remove all projectiles (match reset).
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}
