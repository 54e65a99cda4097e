use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FireworksConfig;
use crate::error::FireworksResult;
use crate::particles::damping::{sanitize_delta, Visibility};
use crate::particles::particle_data::{prepare_render_data, FireworkData, FireworkVertex};
use crate::particles::spawn::{sample_ignition, SpawnParams};
use crate::particles::update::{advance_particle, Kinematics, ParticleStep};

/// Result of one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireworksUpdate {
    pub live: usize,
    pub delayed: usize,
    pub recycled: usize,
}

/// Statistics about the fireworks pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireworksStats {
    pub total: usize,
    pub delayed: usize,
    pub live: usize,
    /// Recycles since construction, initial ignition excluded
    pub total_recycles: u64,
    pub visibility: f32,
}

/// Fixed pool of firework particles that recycle in place.
///
/// The host calls [`advance`](Self::advance) once per frame and then reads
/// [`positions`](Self::positions), [`colors`](Self::colors) and
/// [`visibility`](Self::visibility). The buffers are only ever written here.
pub struct FireworksSystem<R: Rng = StdRng> {
    config: FireworksConfig,
    particles: FireworkData,
    spawn: SpawnParams,
    anchor: Vec3,
    visibility: Visibility,
    rng: R,
    total_recycles: u64,
}

impl FireworksSystem<StdRng> {
    /// Seeded from `config.seed`, or from entropy when unset
    pub fn new(config: FireworksConfig) -> FireworksResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_seed(config: FireworksConfig, seed: u64) -> FireworksResult<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn from_default() -> Self {
        // The default config always validates
        let config = FireworksConfig::default();
        let rng = StdRng::from_entropy();
        Self::build(config, rng)
    }
}

impl<R: Rng> FireworksSystem<R> {
    /// Validate `config`, then ignite every particle once
    pub fn with_rng(config: FireworksConfig, rng: R) -> FireworksResult<Self> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    fn build(config: FireworksConfig, rng: R) -> Self {
        let count = config.particle_count();
        let mut system = Self {
            particles: FireworkData::new(count),
            spawn: SpawnParams::from_config(&config),
            anchor: config.anchor_vec(),
            visibility: Visibility::new(
                config.visibility_target,
                config.activate_rate,
                config.deactivate_rate,
            ),
            rng,
            total_recycles: 0,
            config,
        };
        system.initialize();

        log::info!(
            "Fireworks initialized: {} particles ({} bursts x {}), anchor {:?}, seed {:?}",
            count,
            system.config.burst_count,
            system.config.particles_per_burst,
            system.anchor,
            system.config.seed,
        );
        system
    }

    /// Re-randomize every particle. Runs once from the constructor.
    pub fn initialize(&mut self) {
        for i in 0..self.particles.count() {
            self.reset(i);
        }
    }

    /// Re-ignite particle `index` with fresh random state.
    /// Out-of-range indices are ignored.
    pub fn reset(&mut self, index: usize) {
        if index >= self.particles.count() {
            return;
        }

        let ignition = sample_ignition(self.anchor, &self.spawn, &mut self.rng);

        self.particles.origin[index] = ignition.origin;
        self.particles.velocity[index] = ignition.velocity;
        self.particles.base_color[index] = ignition.base_color;
        self.particles.lifetime[index] = ignition.lifetime;
        self.particles.age[index] = ignition.age;
        self.particles.set_position(index, ignition.origin);
        self.particles.set_color(index, Vec3::ZERO);
        self.particles.mark_dirty();
    }

    /// Step the simulation by `dt` seconds.
    ///
    /// While inactive only the visibility fades out; particle state is frozen.
    /// Negative or non-finite `dt` is treated as zero.
    pub fn advance(&mut self, dt: f32, active: bool) -> FireworksUpdate {
        let sanitized = sanitize_delta(dt);
        if sanitized != dt {
            log::debug!("Ignoring invalid frame delta {}", dt);
        }
        let dt = sanitized;

        self.visibility.step(dt, active);
        if !active {
            return FireworksUpdate::default();
        }

        let kinematics = self.kinematics();
        let mut update = FireworksUpdate::default();

        for i in 0..self.particles.count() {
            let step = advance_particle(&mut self.particles, i, dt, kinematics);
            if step.needs_reset() {
                self.reset(i);
                update.recycled += 1;
            } else if step == ParticleStep::Delayed {
                update.delayed += 1;
            } else {
                update.live += 1;
            }
        }

        self.total_recycles += update.recycled as u64;
        self.particles.mark_dirty();

        log::trace!(
            "Fireworks frame: {} live, {} delayed, {} recycled, visibility {:.3}",
            update.live,
            update.delayed,
            update.recycled,
            self.visibility.value,
        );
        update
    }

    fn kinematics(&self) -> Kinematics {
        Kinematics {
            gravity: self.config.gravity,
            floor: self.floor_threshold(),
        }
    }

    /// Interleaved `x,y,z` per particle
    pub fn positions(&self) -> &[f32] {
        self.particles.positions()
    }

    /// Interleaved `r,g,b` per particle
    pub fn colors(&self) -> &[f32] {
        self.particles.colors()
    }

    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.particles.positions())
    }

    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.particles.colors())
    }

    /// Fill `out` with one vertex per particle
    pub fn render_vertices(&self, out: &mut Vec<FireworkVertex>) {
        prepare_render_data(&self.particles, out);
    }

    /// Whole-effect opacity in `[0, visibility_target]`
    pub fn visibility(&self) -> f32 {
        self.visibility.value
    }

    /// Buffers changed since the last [`mark_uploaded`](Self::mark_uploaded)
    pub fn is_dirty(&self) -> bool {
        self.particles.is_dirty()
    }

    pub fn mark_uploaded(&mut self) {
        self.particles.clear_dirty();
    }

    pub fn data(&self) -> &FireworkData {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.count()
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    /// Move the effect. Applies to future resets and the floor test;
    /// particles already in flight keep their origin.
    pub fn set_anchor(&mut self, anchor: Vec3) {
        self.anchor = anchor;
        self.config.anchor = anchor.to_array();
    }

    pub fn floor_threshold(&self) -> f32 {
        self.anchor.y - self.config.floor_offset
    }

    pub fn stats(&self) -> FireworksStats {
        let delayed = self.particles.age.iter().filter(|age| **age < 0.0).count();

        FireworksStats {
            total: self.particles.count(),
            delayed,
            live: self.particles.count() - delayed,
            total_recycles: self.total_recycles,
            visibility: self.visibility.value,
        }
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut FireworkData {
        &mut self.particles
    }
}
