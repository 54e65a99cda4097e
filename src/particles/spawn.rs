use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

use crate::config::FireworksConfig;
use crate::particles::color::hsl_to_rgb;

/// Random draw ranges used whenever a particle is (re)ignited
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub origin_half_extent: Vec3,
    pub speed_range: (f32, f32),
    pub lifetime_range: (f32, f32),
    pub delay_range: (f32, f32),
    pub cone_bias: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl SpawnParams {
    pub fn from_config(config: &FireworksConfig) -> Self {
        Self {
            origin_half_extent: Vec3::from_array(config.origin_half_extent),
            speed_range: (config.speed_range[0], config.speed_range[1]),
            lifetime_range: (config.lifetime_range[0], config.lifetime_range[1]),
            delay_range: (config.delay_range[0], config.delay_range[1]),
            cone_bias: config.cone_bias,
            saturation: config.saturation,
            lightness: config.lightness,
        }
    }
}

/// Fresh state for one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ignition {
    pub origin: Vec3,
    pub velocity: Vec3,
    pub base_color: Vec3,
    pub lifetime: f32,
    /// Starting age, <= 0
    pub age: f32,
}

/// Uniform draw in `[min, max)`, or `min` when the range is empty
fn uniform(rng: &mut impl Rng, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Uniform in a box around the anchor, only above it vertically
pub fn sample_origin(anchor: Vec3, params: &SpawnParams, rng: &mut impl Rng) -> Vec3 {
    let extent = params.origin_half_extent;
    anchor
        + Vec3::new(
            uniform(rng, (-extent.x, extent.x)),
            uniform(rng, (0.0, extent.y)),
            uniform(rng, (-extent.z, extent.z)),
        )
}

/// Spherical direction with the polar angle (from +Y) compressed by
/// `cone_bias`, scaled by a random speed
pub fn sample_velocity(params: &SpawnParams, rng: &mut impl Rng) -> Vec3 {
    let theta = rng.gen::<f32>() * PI * params.cone_bias;
    let phi = rng.gen::<f32>() * TAU;
    let speed = uniform(rng, params.speed_range);

    Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()) * speed
}

/// Random hue at fixed saturation and lightness
pub fn sample_color(params: &SpawnParams, rng: &mut impl Rng) -> Vec3 {
    hsl_to_rgb(rng.gen::<f32>(), params.saturation, params.lightness)
}

pub fn sample_lifetime(params: &SpawnParams, rng: &mut impl Rng) -> f32 {
    uniform(rng, params.lifetime_range)
}

/// Pre-ignition delay as a starting age
pub fn sample_start_age(params: &SpawnParams, rng: &mut impl Rng) -> f32 {
    -uniform(rng, params.delay_range)
}

pub fn sample_ignition(anchor: Vec3, params: &SpawnParams, rng: &mut impl Rng) -> Ignition {
    Ignition {
        origin: sample_origin(anchor, params, rng),
        velocity: sample_velocity(params, rng),
        base_color: sample_color(params, rng),
        lifetime: sample_lifetime(params, rng),
        age: sample_start_age(params, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params() -> SpawnParams {
        SpawnParams::from_config(&FireworksConfig::default())
    }

    #[test]
    fn test_origin_stays_in_box_above_anchor() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = params();
        let anchor = Vec3::new(0.0, 2.0, -10.0);

        for _ in 0..1000 {
            let origin = sample_origin(anchor, &params, &mut rng);
            let offset = origin - anchor;
            assert!(offset.x.abs() <= params.origin_half_extent.x);
            assert!(offset.y >= 0.0 && offset.y <= params.origin_half_extent.y);
            assert!(offset.z.abs() <= params.origin_half_extent.z);
        }
    }

    #[test]
    fn test_velocity_speed_and_upward_cone() {
        let mut rng = StdRng::seed_from_u64(2);
        let params = params();
        let min_cos = (PI * params.cone_bias).cos();

        for _ in 0..1000 {
            let v = sample_velocity(&params, &mut rng);
            let speed = v.length();
            assert!(speed >= 1.0 - 1e-4 && speed < 2.4 + 1e-4, "speed {speed}");
            assert!(v.y / speed >= min_cos - 1e-4);
        }
    }

    #[test]
    fn test_narrow_cone_points_up() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = SpawnParams { cone_bias: 0.05, ..params() };
        for _ in 0..200 {
            let v = sample_velocity(&params, &mut rng);
            assert!(v.y > 0.0);
        }
    }

    #[test]
    fn test_ignition_ranges() {
        let mut rng = StdRng::seed_from_u64(4);
        let params = params();
        for _ in 0..1000 {
            let ignition = sample_ignition(Vec3::ZERO, &params, &mut rng);
            assert!(ignition.lifetime >= 1.6 && ignition.lifetime < 2.9);
            assert!(ignition.age <= 0.0 && ignition.age > -1.0);
            assert!(ignition.base_color.max_element() <= 1.0 + 1e-5);
            assert!(ignition.base_color.min_element() >= 0.0);
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = SpawnParams { lifetime_range: (2.0, 2.0), ..params() };
        assert_eq!(sample_lifetime(&params, &mut rng), 2.0);
    }
}
