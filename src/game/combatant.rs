//! Combatant
//!
//! The unified craft entity: player-controlled and AI-controlled ships share
//! one type, selected by [`ControlMode`]. A combatant integrates its control
//! into velocity and orientation, moves, resolves terrain and wall
//! collisions, manages its fire and ability cooldowns, and buffers the
//! projectiles it spawns until the orchestrator transfers them into the
//! shared collection.
//!
//! Destroyed is terminal: a dead combatant is skipped by all future updates
//! and is never revived in place. Respawn is a higher-level policy.

use glam::{Quat, Vec3};
use static_assertions::const_assert;

use crate::game::config::{AbilityKind, ProjectileStats, ShipStats};
use crate::game::input::ControlInput;
use crate::game::particles::{EffectKind, Particles};
use crate::game::systems::ability_system::{
    AbilityLoadout, BOMB_LAUNCH_OFFSET, TURBO_IMPULSE_FACTOR,
};
use crate::game::systems::projectile_system::Projectile;
use crate::game::terrain::TerrainIndex;
use crate::game::types::{CombatantId, Team, jitter_range};
use crate::physics::kinematics::{apply_drag, look_at_quat, reflect_with_friction, soft_speed_cap};
use crate::world::ArenaBounds;

/// Per-frame velocity retention (exponential decay without thrust).
pub const DRAG_COEFFICIENT: f32 = 0.9975;
const_assert!(DRAG_COEFFICIENT < 1.0);

/// Lerp factor pulling over-speed craft back toward max speed.
pub const SPEED_CAP_LERP: f32 = 0.8;

/// Minimum interval between collision damage applications (seconds).
pub const COLLISION_DAMAGE_GRACE: f32 = 0.5;

/// Distance inside which an AI craft stops thrusting and opens fire.
pub const AI_ENGAGEMENT_RANGE: f32 = 30.0;

/// AI fire interval stretch over the ship's base interval.
pub const AI_FIRE_INTERVAL_SCALE: f32 = 1.1;

/// Upper bound of the per-shot random delay added to AI fire timing.
pub const AI_FIRE_JITTER_MAX: f32 = 0.15;

/// Per-axis AI aim scatter.
pub const AI_AIM_JITTER: f32 = 0.1;

/// AI thrust fraction of full acceleration while closing.
pub const AI_THRUST_SCALE: f32 = 0.5;

/// Health ratio below which damage smoke turns orange.
const LOW_HEALTH_SMOKE_THRESHOLD: f32 = 0.3;

/// Sub-samples of the frame's motion checked for ground penetration.
const GROUND_SWEEP_STEPS: u32 = 5;

/// Who steers this craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Keyboard thrust/roll plus mouse-look, from a [`ControlInput`].
    Human,
    /// Steers and fires at a designated target.
    Ai,
}

/// Everything a combatant needs from the world for one update.
pub struct UpdateCtx<'a> {
    pub terrain: &'a TerrainIndex,
    pub bounds: ArenaBounds,
    pub particles: &'a mut Particles,
    /// Total simulation time at this frame (seconds).
    pub total_time: f32,
    /// Pilot input; zeroed for AI craft.
    pub input: ControlInput,
    /// Position of the AI target, if this craft has one.
    pub ai_target: Option<Vec3>,
}

/// A craft in the arena.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: CombatantId,
    pub team: Team,
    pub control: ControlMode,
    /// Whether this craft is driven by the local input snapshot.
    pub is_local: bool,

    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,

    pub health: f32,
    /// Performance row copied from the catalog at spawn.
    pub stats: ShipStats,
    /// Stats row of the bound weapon, if armed.
    pub weapon: Option<ProjectileStats>,
    pub loadout: AbilityLoadout,

    alive: bool,
    collision_flagged: bool,
    time_since_shot: f32,
    last_collision_time: f32,
    /// Gunfire spawned this frame, pending transfer to the shared collection.
    pending: Vec<Projectile>,
    /// Seed stream for this craft's fire/aim jitter.
    jitter_seed: f32,
    /// Extra delay before the next AI shot.
    next_fire_jitter: f32,
}

impl Combatant {
    /// Build a craft from its catalog row.
    pub fn from_template(
        id: CombatantId,
        team: Team,
        control: ControlMode,
        position: Vec3,
        stats: ShipStats,
        weapon: Option<ProjectileStats>,
        loadout: AbilityLoadout,
    ) -> Self {
        Self {
            id,
            team,
            control,
            is_local: control == ControlMode::Human,
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            health: stats.max_health,
            stats,
            weapon,
            loadout,
            alive: true,
            collision_flagged: false,
            time_since_shot: 0.0,
            last_collision_time: f32::NEG_INFINITY,
            pending: Vec::new(),
            jitter_seed: id as f32 * 7.31,
            next_fire_jitter: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether any terrain/wall contact was flagged this frame.
    pub fn collision_flagged(&self) -> bool {
        self.collision_flagged
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Advance the craft one frame.
    ///
    /// Callers must skip dead combatants; `update` assumes the alive check
    /// already happened.
    pub fn update(&mut self, dt: f32, ctx: &mut UpdateCtx) {
        self.collision_flagged = false;
        self.time_since_shot += dt;
        self.loadout.tick(dt);

        match self.control {
            ControlMode::Human => self.integrate_human(dt, ctx.input),
            ControlMode::Ai => self.integrate_ai(dt, ctx.ai_target),
        }

        // Movement integration
        self.position += self.velocity * dt;

        self.resolve_terrain_collision(dt, ctx.terrain);
        self.resolve_wall_collision(ctx.bounds);

        // Impact damage, gated so sliding contact does not drain health
        // every frame. The physics response above is never gated.
        if self.collision_flagged
            && ctx.total_time - self.last_collision_time > COLLISION_DAMAGE_GRACE
        {
            self.last_collision_time = ctx.total_time;
            let impact = self.stats.collision_base_damage
                + self.velocity.length() * self.stats.collision_damage_mult;
            self.take_damage(impact, ctx.particles);
            if !self.alive {
                return;
            }
        }

        self.emit_damage_smoke(ctx.particles);

        self.velocity = apply_drag(self.velocity, DRAG_COEFFICIENT);
        self.velocity = soft_speed_cap(self.velocity, self.stats.max_speed, SPEED_CAP_LERP);
    }

    fn integrate_human(&mut self, dt: f32, input: ControlInput) {
        let forward = self.forward();

        let thrust = input.thrust_axis();
        if thrust != 0.0 && self.velocity.length() < self.stats.max_speed {
            self.velocity += forward * (thrust * self.stats.acceleration * dt);
        }

        // Compose this frame's rotation deltas onto the previous orientation
        // and renormalize to stop drift from accumulating.
        let roll = Quat::from_axis_angle(
            forward,
            (input.roll_axis() * self.stats.roll_rate * dt).to_radians(),
        );
        let yaw = Quat::from_axis_angle(
            self.up(),
            (input.yaw_delta * self.stats.yaw_rate * dt).to_radians(),
        );
        let pitch = Quat::from_axis_angle(
            self.right(),
            (-input.pitch_delta * self.stats.pitch_rate * dt).to_radians(),
        );
        self.rotation = (yaw * pitch * roll * self.rotation).normalize();

        if input.fire && self.time_since_shot >= self.stats.fire_interval {
            let aim = self.forward();
            if self.shoot(aim) {
                self.time_since_shot = 0.0;
            }
        }

        if input.ability_primary {
            self.try_ability(0);
        }
        if input.ability_secondary {
            self.try_ability(1);
        }
    }

    fn integrate_ai(&mut self, dt: f32, target: Option<Vec3>) {
        let Some(target_pos) = target else {
            return;
        };
        let to_target = target_pos - self.position;
        let distance = to_target.length();
        if distance < 0.1 {
            return;
        }
        let dir = to_target / distance;

        if distance > AI_ENGAGEMENT_RANGE {
            self.velocity += dir * (self.stats.acceleration * AI_THRUST_SCALE * dt);
        }

        // AI craft face their target directly; no roll/bank modeling.
        self.rotation = look_at_quat(dir, Vec3::Y);

        if distance < AI_ENGAGEMENT_RANGE {
            self.ai_fire(dir);
        }
    }

    fn ai_fire(&mut self, target_dir: Vec3) {
        if self.weapon.is_none() {
            return;
        }
        let interval = self.stats.fire_interval * AI_FIRE_INTERVAL_SCALE + self.next_fire_jitter;
        if self.time_since_shot < interval {
            return;
        }

        self.jitter_seed += 1.0;
        let scatter = Vec3::new(
            jitter_range(self.jitter_seed + 0.1, -AI_AIM_JITTER, AI_AIM_JITTER),
            jitter_range(self.jitter_seed + 0.2, -AI_AIM_JITTER, AI_AIM_JITTER),
            jitter_range(self.jitter_seed + 0.3, -AI_AIM_JITTER, AI_AIM_JITTER),
        );
        let aim = (target_dir + scatter).normalize_or_zero();
        let aim = if aim == Vec3::ZERO { target_dir } else { aim };

        if self.shoot(aim) {
            self.time_since_shot = 0.0;
            self.next_fire_jitter = jitter_range(self.jitter_seed + 0.7, 0.0, AI_FIRE_JITTER_MAX);
        }
    }

    /// Spawn one round per muzzle into the pending buffer.
    ///
    /// Returns false for unarmed craft.
    fn shoot(&mut self, direction: Vec3) -> bool {
        let Some(weapon) = self.weapon else {
            return false;
        };
        for offset in &self.stats.muzzles {
            let muzzle = self.position + self.rotation * *offset;
            self.pending
                .push(Projectile::new(muzzle, direction, weapon, self.id, self.team));
        }
        true
    }

    /// Try to activate an ability slot. Silent no-op while on cooldown.
    pub fn try_ability(&mut self, slot: usize) -> bool {
        let Some(kind) = self.loadout.try_activate(slot) else {
            return false;
        };
        match kind {
            AbilityKind::Turbo => {
                let forward = self.forward();
                self.velocity += forward * (self.stats.max_speed * TURBO_IMPULSE_FACTOR);
            }
            AbilityKind::Bomb => {
                let launch = self.position + self.rotation * BOMB_LAUNCH_OFFSET;
                let shot = Projectile::new(
                    launch,
                    self.forward(),
                    self.loadout.bomb_stats(),
                    self.id,
                    self.team,
                );
                self.loadout.buffer_mut().push(shot);
            }
        }
        true
    }

    fn resolve_terrain_collision(&mut self, dt: f32, terrain: &TerrainIndex) {
        let radius = self.stats.collision_radius;
        let ground = terrain.height_at(self.position.x, self.position.z);
        if self.position.y - ground >= radius {
            return;
        }

        let normal = terrain.normal_at(self.position.x, self.position.z);

        // Walk the frame's motion to catch the first penetrating sample, so
        // fast craft respond where they actually crossed the surface.
        let prev = self.position - self.velocity * dt;
        for i in 0..=GROUND_SWEEP_STEPS {
            let t = i as f32 / GROUND_SWEEP_STEPS as f32;
            let sample = prev.lerp(self.position, t);
            let sample_ground = terrain.height_at(sample.x, sample.z);
            if sample.y - sample_ground < radius {
                self.position = sample;
                self.position.y = sample_ground + radius;
                self.velocity = reflect_with_friction(
                    self.velocity,
                    normal,
                    self.stats.bounce_factor,
                    self.stats.friction_factor,
                );
                self.collision_flagged = true;
                break;
            }
        }
    }

    fn resolve_wall_collision(&mut self, bounds: ArenaBounds) {
        let limit = bounds.interior(self.stats.collision_radius);
        if self.position.x.abs() > limit {
            self.velocity.x = -self.velocity.x * self.stats.bounce_factor;
            self.position.x = self.position.x.clamp(-limit, limit);
            self.collision_flagged = true;
        }
        if self.position.z.abs() > limit {
            self.velocity.z = -self.velocity.z * self.stats.bounce_factor;
            self.position.z = self.position.z.clamp(-limit, limit);
            self.collision_flagged = true;
        }
    }

    /// Apply damage. Returns true when this call killed the craft.
    ///
    /// Callers must check [`Combatant::is_alive`] first; damaging an
    /// already-destroyed combatant is a caller bug.
    pub fn take_damage(&mut self, amount: f32, particles: &mut Particles) -> bool {
        self.health -= amount;
        if self.health <= 0.0 {
            particles.emit(
                EffectKind::ExplosionBig,
                self.position,
                0.4,
                100,
                Vec3::new(1.0, 0.8, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            );
            self.alive = false;
            true
        } else {
            particles.emit(
                EffectKind::ExplosionSmall,
                self.position,
                0.05,
                10,
                Vec3::new(1.0, 0.9, 0.0),
                Vec3::new(1.0, 0.5, 0.0),
            );
            false
        }
    }

    /// Trailing smoke proportional to damage taken, shifting orange when
    /// the craft is nearly dead.
    fn emit_damage_smoke(&mut self, particles: &mut Particles) {
        let health_ratio = self.health / self.stats.max_health;
        let count = ((1.0 - health_ratio) * 10.0) as usize;
        if count == 0 {
            return;
        }
        let start_color = if health_ratio < LOW_HEALTH_SMOKE_THRESHOLD {
            Vec3::new(1.0, 0.6, 0.0)
        } else {
            Vec3::new(0.5, 0.5, 0.5)
        };
        particles.emit(
            EffectKind::Smoke,
            self.position,
            8.0,
            count,
            start_color,
            Vec3::new(0.2, 0.2, 0.2),
        );
    }

    /// Take every projectile spawned this frame (gunfire and abilities),
    /// leaving the buffers empty. The orchestrator moves them into the
    /// shared collection at the end of this combatant's update.
    pub fn take_spawned(&mut self) -> Vec<Projectile> {
        let mut spawned = std::mem::take(&mut self.pending);
        self.loadout.transfer_projectiles(&mut spawned);
        spawned
    }
}
