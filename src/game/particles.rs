//! Particle Emission Contract
//!
//! One-way output channel from combat events to the rendering-facing effect
//! system. Combat code requests emitters (smoke trails, small and large
//! explosions); the core ages and culls the particles each frame; a renderer
//! reads [`ParticleSnapshot`]s for display. The core never reads anything
//! back from rendering.
//!
//! Particle spread comes from seeded hash noise so effect playback is
//! deterministic for a given emission order.

use glam::Vec3;

use crate::game::types::{hash_unit_dir, jitter_range};

/// Effect archetype, selecting a velocity distribution and lifetime band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Slow upward drift with lateral scatter.
    Smoke,
    /// Radial burst, modest speed.
    ExplosionSmall,
    /// Radial burst, fast and dense.
    ExplosionBig,
}

/// A single simulated point particle.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub lifetime: f32,
    pub start_lifetime: f32,
}

/// A burst of particles sharing a color gradient.
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    pub kind: EffectKind,
    pub position: Vec3,
    pub size: f32,
    pub start_color: Vec3,
    pub end_color: Vec3,
    pub max_lifetime: f32,
    pub age: f32,
    pub particles: Vec<Particle>,
}

/// Emitters live at most this long, regardless of particle lifetimes.
const EMITTER_MAX_LIFETIME: f32 = 2.0;

/// Downward pull applied to smoke particles (m/s²).
const SMOKE_SINK: f32 = 0.5;

impl ParticleEmitter {
    fn new(
        kind: EffectKind,
        position: Vec3,
        size: f32,
        count: usize,
        start_color: Vec3,
        end_color: Vec3,
        seed: f32,
    ) -> Self {
        let mut particles = Vec::with_capacity(count);
        for i in 0..count {
            let particle_seed = seed + i as f32 * 1.618;
            let (velocity, lifetime) = match kind {
                EffectKind::ExplosionSmall | EffectKind::ExplosionBig => {
                    let speed = if kind == EffectKind::ExplosionBig {
                        8.0
                    } else {
                        4.0
                    };
                    (
                        hash_unit_dir(particle_seed) * speed,
                        jitter_range(particle_seed + 0.37, 0.5, 1.0),
                    )
                }
                EffectKind::Smoke => (
                    Vec3::new(
                        jitter_range(particle_seed, -0.3, 0.3),
                        jitter_range(particle_seed + 0.11, 1.0, 3.0),
                        jitter_range(particle_seed + 0.23, -0.3, 0.3),
                    ),
                    jitter_range(particle_seed + 0.37, 0.3, 0.6),
                ),
            };
            particles.push(Particle {
                position,
                velocity,
                lifetime,
                start_lifetime: lifetime,
            });
        }

        Self {
            kind,
            position,
            size,
            start_color,
            end_color,
            max_lifetime: EMITTER_MAX_LIFETIME,
            age: 0.0,
            particles,
        }
    }
}

/// Renderer-facing view of one live particle.
#[derive(Debug, Clone, Copy)]
pub struct ParticleSnapshot {
    pub position: Vec3,
    /// Gradient color at the particle's current life ratio.
    pub color: Vec3,
    /// 1.0 at spawn, 0.0 at death; doubles as alpha.
    pub life_ratio: f32,
    pub size: f32,
}

/// Owns every live emitter. Mutated only by the single update thread.
#[derive(Debug, Default)]
pub struct Particles {
    emitters: Vec<ParticleEmitter>,
    seed_counter: f32,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a burst of `count` particles at `position`.
    ///
    /// A zero count is accepted and produces nothing.
    pub fn emit(
        &mut self,
        kind: EffectKind,
        position: Vec3,
        size: f32,
        count: usize,
        start_color: Vec3,
        end_color: Vec3,
    ) {
        if count == 0 {
            return;
        }
        self.seed_counter += 1.0;
        self.emitters.push(ParticleEmitter::new(
            kind,
            position,
            size,
            count,
            start_color,
            end_color,
            self.seed_counter * 2.399963,
        ));
    }

    /// Age every particle, apply smoke sink, and cull dead particles and
    /// expired emitters.
    pub fn update(&mut self, dt: f32) {
        for emitter in &mut self.emitters {
            emitter.age += dt;
            if emitter.age >= emitter.max_lifetime {
                emitter.particles.clear();
                continue;
            }

            let sink = if emitter.kind == EffectKind::Smoke {
                SMOKE_SINK
            } else {
                0.0
            };
            for p in &mut emitter.particles {
                p.position += p.velocity * dt;
                p.velocity.y -= sink * dt;
                p.lifetime -= dt;
            }
            emitter.particles.retain(|p| p.lifetime > 0.0);
        }

        self.emitters
            .retain(|e| !e.particles.is_empty() && e.age < e.max_lifetime);
    }

    /// Renderer-facing view of every live particle.
    pub fn snapshots(&self) -> impl Iterator<Item = ParticleSnapshot> + '_ {
        self.emitters.iter().flat_map(|emitter| {
            emitter.particles.iter().map(move |p| {
                let life_ratio = p.lifetime / p.start_lifetime;
                ParticleSnapshot {
                    position: p.position,
                    color: emitter.end_color.lerp(emitter.start_color, life_ratio),
                    life_ratio,
                    size: emitter.size,
                }
            })
        })
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|e| e.particles.len()).sum()
    }

    /// Drop every live emitter (match reset).
    pub fn clear(&mut self) {
        self.emitters.clear();
    }
}
