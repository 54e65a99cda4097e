use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{physics, pool, spawn, visibility};
use crate::error::{invalid_config, FireworksError, FireworksResult};

/// Tunables for one fireworks placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// Center of the burst origin distribution
    pub anchor: [f32; 3],
    pub burst_count: usize,
    pub particles_per_burst: usize,
    /// Vertical acceleration, must be <= 0
    pub gravity: f32,
    pub speed_range: [f32; 2],
    pub lifetime_range: [f32; 2],
    /// Pre-ignition delay range in seconds
    pub delay_range: [f32; 2],
    /// x half-width, vertical span above the anchor, z half-depth
    pub origin_half_extent: [f32; 3],
    /// Polar angle compression in (0, 1]; smaller values skew bursts upward
    pub cone_bias: f32,
    pub saturation: f32,
    pub lightness: f32,
    /// Particles below `anchor.y - floor_offset` are recycled
    pub floor_offset: f32,
    pub visibility_target: f32,
    pub activate_rate: f32,
    pub deactivate_rate: f32,
    /// Fixed seed for reproducible runs; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            anchor: spawn::DEFAULT_ANCHOR,
            burst_count: pool::DEFAULT_BURST_COUNT,
            particles_per_burst: pool::DEFAULT_PARTICLES_PER_BURST,
            gravity: physics::GRAVITY,
            speed_range: spawn::SPEED_RANGE,
            lifetime_range: spawn::LIFETIME_RANGE,
            delay_range: spawn::DELAY_RANGE,
            origin_half_extent: spawn::ORIGIN_HALF_EXTENT,
            cone_bias: spawn::CONE_BIAS,
            saturation: spawn::SATURATION,
            lightness: spawn::LIGHTNESS,
            floor_offset: physics::FLOOR_OFFSET,
            visibility_target: visibility::TARGET,
            activate_rate: visibility::ACTIVATE_RATE,
            deactivate_rate: visibility::DEACTIVATE_RATE,
            seed: None,
        }
    }
}

impl FireworksConfig {
    /// Total number of pooled particles
    pub fn particle_count(&self) -> usize {
        self.burst_count.saturating_mul(self.particles_per_burst)
    }

    pub fn anchor_vec(&self) -> Vec3 {
        Vec3::from_array(self.anchor)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> FireworksResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> FireworksResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FireworksError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&source).map_err(|source| FireworksError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::debug!("Loaded fireworks config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> FireworksResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would break pool invariants or produce non-finite state
    pub fn validate(&self) -> FireworksResult<()> {
        if self.burst_count == 0 {
            return Err(invalid_config("burst_count", "must be at least 1"));
        }
        if self.particles_per_burst == 0 {
            return Err(invalid_config("particles_per_burst", "must be at least 1"));
        }
        match self.burst_count.checked_mul(self.particles_per_burst) {
            Some(count) if count <= pool::MAX_PARTICLES => {}
            _ => {
                return Err(invalid_config(
                    "particles_per_burst",
                    format!(
                        "{} bursts x {} exceeds the {} particle limit",
                        self.burst_count,
                        self.particles_per_burst,
                        pool::MAX_PARTICLES
                    ),
                ))
            }
        }
        if self.anchor.iter().any(|v| !v.is_finite()) {
            return Err(invalid_config("anchor", "components must be finite"));
        }
        if !self.gravity.is_finite() || self.gravity > 0.0 {
            return Err(invalid_config("gravity", format!("{} is not a finite value <= 0", self.gravity)));
        }

        check_range("speed_range", self.speed_range, false)?;
        check_range("lifetime_range", self.lifetime_range, false)?;
        check_range("delay_range", self.delay_range, true)?;

        if self.origin_half_extent.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid_config("origin_half_extent", "components must be finite and >= 0"));
        }
        if !(self.cone_bias > 0.0 && self.cone_bias <= 1.0) {
            return Err(invalid_config("cone_bias", format!("{} is outside (0, 1]", self.cone_bias)));
        }

        check_unit("saturation", self.saturation)?;
        check_unit("lightness", self.lightness)?;
        check_unit("visibility_target", self.visibility_target)?;

        if !self.floor_offset.is_finite() || self.floor_offset < 0.0 {
            return Err(invalid_config("floor_offset", format!("{} is not a finite distance >= 0", self.floor_offset)));
        }
        for (field, rate) in [
            ("activate_rate", self.activate_rate),
            ("deactivate_rate", self.deactivate_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(invalid_config(field, format!("{} is not a positive rate", rate)));
            }
        }

        Ok(())
    }
}

/// `min <= max`, both finite. Lower bound must be > 0, or >= 0 when `allow_zero`.
fn check_range(field: &'static str, range: [f32; 2], allow_zero: bool) -> FireworksResult<()> {
    let [min, max] = range;
    if !min.is_finite() || !max.is_finite() {
        return Err(invalid_config(field, "bounds must be finite"));
    }
    if min > max {
        return Err(invalid_config(field, format!("min {} exceeds max {}", min, max)));
    }
    let lower_ok = if allow_zero { min >= 0.0 } else { min > 0.0 };
    if !lower_ok {
        return Err(invalid_config(field, format!("min {} is too small", min)));
    }
    Ok(())
}

fn check_unit(field: &'static str, value: f32) -> FireworksResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid_config(field, format!("{} is outside [0, 1]", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = FireworksConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.particle_count(), 1000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = FireworksConfig::from_toml_str(
            r#"
            burst_count = 2
            particles_per_burst = 5
            seed = 7
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.particle_count(), 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.gravity, physics::GRAVITY);
        assert_eq!(config.anchor, spawn::DEFAULT_ANCHOR);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = FireworksConfig::from_toml_str("lifetime_range = [3.0, 1.0]").unwrap_err();
        match err {
            FireworksError::InvalidConfig { field, .. } => assert_eq!(field, "lifetime_range"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases: Vec<(&str, FireworksConfig)> = vec![
            ("burst_count", FireworksConfig { burst_count: 0, ..Default::default() }),
            ("gravity", FireworksConfig { gravity: 1.0, ..Default::default() }),
            ("cone_bias", FireworksConfig { cone_bias: 0.0, ..Default::default() }),
            ("cone_bias", FireworksConfig { cone_bias: 1.5, ..Default::default() }),
            ("saturation", FireworksConfig { saturation: 2.0, ..Default::default() }),
            ("activate_rate", FireworksConfig { activate_rate: 0.0, ..Default::default() }),
            ("speed_range", FireworksConfig { speed_range: [0.0, 1.0], ..Default::default() }),
            ("delay_range", FireworksConfig { delay_range: [-1.0, 1.0], ..Default::default() }),
            ("anchor", FireworksConfig { anchor: [f32::NAN, 0.0, 0.0], ..Default::default() }),
            ("floor_offset", FireworksConfig { floor_offset: -10.0, ..Default::default() }),
            ("floor_offset", FireworksConfig { floor_offset: f32::INFINITY, ..Default::default() }),
        ];

        for (expected, config) in cases {
            match config.validate() {
                Err(FireworksError::InvalidConfig { field, .. }) => assert_eq!(field, expected),
                other => panic!("{expected}: expected InvalidConfig, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_oversized_pool() {
        let err = FireworksConfig::from_toml_str(
            "burst_count = 9223372036854775807\nparticles_per_burst = 3",
        )
        .unwrap_err();
        assert!(matches!(err, FireworksError::InvalidConfig { field: "particles_per_burst", .. }));

        let config = FireworksConfig {
            burst_count: pool::MAX_PARTICLES,
            particles_per_burst: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.particle_count(), pool::MAX_PARTICLES * 2);

        let at_limit = FireworksConfig {
            burst_count: pool::MAX_PARTICLES,
            particles_per_burst: 1,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = FireworksConfig::from_toml_str("burst_count = \"many\"").unwrap_err();
        assert!(matches!(err, FireworksError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip_keeps_values() {
        let config = FireworksConfig {
            cone_bias: 0.4,
            seed: Some(99),
            ..Default::default()
        };
        let text = config.to_toml_string().expect("serialize");
        let parsed = FireworksConfig::from_toml_str(&text).expect("parse");
        assert_eq!(parsed, config);
    }
}
