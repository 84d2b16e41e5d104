//! Game State
//!
//! The frame orchestrator. Owns the combatant and projectile collections,
//! the terrain index, the particle system, and the event feed, and drives
//! the fixed update order every frame:
//!
//! 1. combatants (each transfers its freshly spawned projectiles at the end
//!    of its own update)
//! 2. combatant-vs-combatant collision resolution
//! 3. particle aging
//! 4. projectile updates
//! 5. destruction sweep
//!
//! Everything here runs on the single update thread; only the terrain index
//! may additionally be queried from outside (it carries its own lock).

use glam::Vec3;
use log::info;

use crate::game::combatant::{Combatant, ControlMode, UpdateCtx};
use crate::game::config::{
    AbilityKind, AbilityTable, ConfigError, ProjectileKind, ProjectileTable, ShipCatalog, ShipKind,
};
use crate::game::events::HitFeed;
use crate::game::input::ControlInput;
use crate::game::particles::Particles;
use crate::game::systems::ability_system::AbilityLoadout;
use crate::game::systems::collision_system::CollisionSystem;
use crate::game::systems::projectile_system::ProjectileSystem;
use crate::game::terrain::{TerrainIndex, TerrainMesh};
use crate::game::types::CombatantId;
use crate::world::ArenaBounds;

/// Height above the terrain at which wave craft spawn.
const WAVE_SPAWN_ALTITUDE: f32 = 15.0;

/// The whole simulation for one match.
pub struct GameState {
    bounds: ArenaBounds,
    terrain: TerrainIndex,
    catalog: ShipCatalog,
    projectile_table: ProjectileTable,
    ability_table: AbilityTable,

    combatants: Vec<Combatant>,
    projectiles: ProjectileSystem,
    particles: Particles,
    collisions: CollisionSystem,
    feed: HitFeed,

    total_time: f32,
    next_id: CombatantId,
    local_input: ControlInput,
}

impl GameState {
    /// Build a match from explicit tables.
    ///
    /// Validates every table up front — a missing row is a fatal
    /// configuration error, not something to discover mid-frame.
    pub fn new(
        mesh: &TerrainMesh,
        bounds: ArenaBounds,
        catalog: ShipCatalog,
        projectile_table: ProjectileTable,
        ability_table: AbilityTable,
    ) -> Result<Self, ConfigError> {
        catalog.validate()?;
        projectile_table.validate()?;
        ability_table.validate()?;

        let (terrain, report) = TerrainIndex::build(mesh);
        info!(
            "terrain index built: {} triangles accepted, {} skipped, {} cells",
            report.accepted,
            report.skipped,
            terrain.cell_count()
        );

        Ok(Self {
            bounds,
            terrain,
            catalog,
            projectile_table,
            ability_table,
            combatants: Vec::new(),
            projectiles: ProjectileSystem::new(),
            particles: Particles::new(),
            collisions: CollisionSystem::new(),
            feed: HitFeed::new(),
            total_time: 0.0,
            next_id: 0,
            local_input: ControlInput::none(),
        })
    }

    /// Build a match with the built-in balance tables.
    pub fn with_defaults(mesh: &TerrainMesh, bounds: ArenaBounds) -> Result<Self, ConfigError> {
        Self::new(
            mesh,
            bounds,
            ShipCatalog::default(),
            ProjectileTable::default(),
            AbilityTable::default(),
        )
    }

    /// Spawn a craft from its catalog template.
    ///
    /// Human-controlled craft read the local input snapshot; AI craft pick
    /// their own targets. The default loadout is bomb primary / turbo
    /// secondary.
    pub fn spawn_combatant(
        &mut self,
        kind: ShipKind,
        team: u8,
        control: ControlMode,
        position: Vec3,
    ) -> CombatantId {
        let id = self.next_id;
        self.next_id += 1;

        let stats = self.catalog.stats(kind).clone();
        let weapon = stats.projectile.map(|p| self.projectile_table.stats(p));
        let loadout = AbilityLoadout::new(
            AbilityKind::Bomb,
            AbilityKind::Turbo,
            &self.ability_table,
            self.projectile_table.stats(ProjectileKind::Explosive),
        );

        self.combatants.push(Combatant::from_template(
            id, team, control, position, stats, weapon, loadout,
        ));
        id
    }

    /// Spawn `count` AI craft of one type on a ring around the origin.
    ///
    /// Successive spawn angles follow the golden angle so waves spread out
    /// without an RNG.
    pub fn spawn_wave(
        &mut self,
        kind: ShipKind,
        team: u8,
        count: usize,
        ring_radius: f32,
    ) -> Vec<CombatantId> {
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = self.next_id as f32 * 2.399963;
            let x = angle.cos() * ring_radius;
            let z = angle.sin() * ring_radius;
            let ground = self.terrain.height_at(x, z).max(0.0);
            let position = Vec3::new(x, ground + WAVE_SPAWN_ALTITUDE, z);
            ids.push(self.spawn_combatant(kind, team, ControlMode::Ai, position));
        }
        ids
    }

    /// Install the input snapshot human craft will read next update.
    pub fn set_local_input(&mut self, input: ControlInput) {
        self.local_input = input;
    }

    /// Advance the whole simulation one step.
    pub fn update(&mut self, dt: f32) {
        self.total_time += dt;

        for i in 0..self.combatants.len() {
            if !self.combatants[i].is_alive() {
                continue;
            }
            let ai_target = match self.combatants[i].control {
                ControlMode::Ai => self.select_target(i),
                ControlMode::Human => None,
            };
            let input = if self.combatants[i].is_local {
                self.local_input
            } else {
                ControlInput::none()
            };

            let mut ctx = UpdateCtx {
                terrain: &self.terrain,
                bounds: self.bounds,
                particles: &mut self.particles,
                total_time: self.total_time,
                input,
                ai_target,
            };
            self.combatants[i].update(dt, &mut ctx);

            // Transfer ownership of freshly spawned projectiles into the
            // shared collection before the next combatant runs.
            let spawned = self.combatants[i].take_spawned();
            self.projectiles.extend(spawned);
        }

        self.collisions
            .resolve(&mut self.combatants, self.total_time, &mut self.particles, &mut self.feed);

        self.particles.update(dt);

        self.projectiles.update_all(
            dt,
            &mut self.combatants,
            &self.terrain,
            &mut self.particles,
            &mut self.feed,
            self.total_time,
        );

        // Batch removal after all updates; nothing is removed mid-iteration.
        self.projectiles.sweep();
    }

    /// Nearest live hostile position for the combatant at `idx`.
    fn select_target(&self, idx: usize) -> Option<Vec3> {
        let me = &self.combatants[idx];
        let mut best: Option<(f32, Vec3)> = None;
        for (j, other) in self.combatants.iter().enumerate() {
            if j == idx || !other.is_alive() || other.team == me.team {
                continue;
            }
            let d = other.position.distance_squared(me.position);
            if best.is_none_or(|(bd, _)| d < bd) {
                best = Some((d, other.position));
            }
        }
        best.map(|(_, pos)| pos)
    }

    /// Remove destroyed combatants from the active list.
    ///
    /// Deliberately not called from [`GameState::update`]: when to actually
    /// drop dead craft (scoring, respawn, wave accounting) is match-flow
    /// policy, and dead combatants are already skipped everywhere.
    pub fn sweep_destroyed_combatants(&mut self) {
        let dead: Vec<CombatantId> = self
            .combatants
            .iter()
            .filter(|c| !c.is_alive())
            .map(|c| c.id)
            .collect();
        for id in &dead {
            self.collisions.forget(*id);
        }
        self.combatants.retain(Combatant::is_alive);
    }

    // === Read accessors for the rendering layer ===

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    pub fn feed(&self) -> &HitFeed {
        &self.feed
    }

    pub fn terrain(&self) -> &TerrainIndex {
        &self.terrain
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    /// Terrain height query, usable by camera/rendering collision avoidance.
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        self.terrain.height_at(x, z)
    }

    /// Terrain normal query.
    pub fn normal_at(&self, x: f32, z: f32) -> Vec3 {
        self.terrain.normal_at(x, z)
    }
}
