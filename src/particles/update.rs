use glam::Vec3;

use crate::particles::color::faded;
use crate::particles::particle_data::FireworkData;

/// Constants shared by every particle in one pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Vertical acceleration
    pub gravity: f32,
    /// Positions below this height trigger a recycle
    pub floor: f32,
}

/// Outcome of advancing one particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleStep {
    /// Still in its ignition delay
    Delayed,
    /// Moved and faded
    Live,
    /// Outlived its lifetime, needs a reset
    Expired,
    /// Dropped below the floor, needs a reset
    Floored,
}

impl ParticleStep {
    pub fn needs_reset(self) -> bool {
        matches!(self, ParticleStep::Expired | ParticleStep::Floored)
    }
}

/// Position at `age`: linear horizontally, parabolic vertically
pub fn integrate_position(origin: Vec3, velocity: Vec3, age: f32, gravity: f32) -> Vec3 {
    let mut position = origin + velocity * age;
    position.y += 0.5 * gravity * age * age;
    position
}

/// Age particle `i` by `dt` and refresh its render state.
///
/// Expired or floored particles are left untouched so the caller can reset
/// them in the same pass.
pub fn advance_particle(particles: &mut FireworkData, i: usize, dt: f32, kinematics: Kinematics) -> ParticleStep {
    particles.age[i] += dt;
    let age = particles.age[i];

    if age < 0.0 {
        let origin = particles.origin[i];
        particles.set_position(i, origin);
        particles.set_color(i, Vec3::ZERO);
        return ParticleStep::Delayed;
    }

    let lifetime = particles.lifetime[i];
    if age > lifetime {
        return ParticleStep::Expired;
    }

    let position = integrate_position(particles.origin[i], particles.velocity[i], age, kinematics.gravity);
    if position.y < kinematics.floor {
        return ParticleStep::Floored;
    }

    particles.set_position(i, position);
    particles.set_color(i, faded(particles.base_color[i], age, lifetime));
    ParticleStep::Live
}
