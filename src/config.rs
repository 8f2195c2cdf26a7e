use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse RON: {0}")]
    RonError(#[from] ron::error::SpannedError),
    #[error("Invalid lander configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct FlightParams {
    pub gravity: f32,         // downward acceleration (units/tick²)
    pub ignition_thrust: f32, // thrust magnitude set while the engine key is held
    pub thrust_decay: f32,    // per-tick multiplier applied to thrust
    pub rotation_step: f32,   // degrees per tick of rotate input
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            gravity: 0.005,
            ignition_thrust: 0.01,
            thrust_decay: 0.95,
            rotation_step: 0.5,
        }
    }
}

/// Acceptance band for a touchdown. The horizontal band is centred on the pad
/// but sized independently of the pad's drawn width.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LandingCriteria {
    pub horizontal_tolerance: f32, // world units either side of the pad centre
    pub angle_tolerance: f32,      // degrees either side of upright
}

impl Default for LandingCriteria {
    fn default() -> Self {
        Self {
            horizontal_tolerance: 50.0,
            angle_tolerance: 5.0,
        }
    }
}

impl LandingCriteria {
    pub fn within_band(&self, zone: &LandingZone, x: f32) -> bool {
        x >= zone.center_x - self.horizontal_tolerance
            && x <= zone.center_x + self.horizontal_tolerance
    }

    pub fn upright(&self, angle: f32) -> bool {
        angle >= -self.angle_tolerance && angle <= self.angle_tolerance
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct LandingZone {
    pub center_x: f32,
    pub base_y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Default for LandingZone {
    fn default() -> Self {
        Self {
            center_x: 100.0,
            base_y: 20.0,
            half_width: 50.0,
            half_height: 8.0,
        }
    }
}

impl LandingZone {
    /// Altitude at or below which the touchdown rules apply.
    pub fn trigger_altitude(&self) -> f32 {
        self.base_y + self.half_height
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct StartPose {
    pub x: f32,
    pub y: f32,
}

impl Default for StartPose {
    fn default() -> Self {
        Self { x: 200.0, y: 540.0 }
    }
}

#[derive(Resource, Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LanderConfig {
    pub physics: FlightParams,
    pub criteria: LandingCriteria,
    pub zone: LandingZone,
    pub start: StartPose,
    pub tick_hz: f64,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            physics: FlightParams::default(),
            criteria: LandingCriteria::default(),
            zone: LandingZone::default(),
            start: StartPose::default(),
            tick_hz: 60.0,
        }
    }
}

const MIN_TICK_HZ: f64 = 1.0;
const MAX_TICK_HZ: f64 = 10_000.0;

/// Where the active configuration came from, reported once at startup.
#[derive(Resource, Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { reason: String },
}

impl LanderConfig {
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: LanderConfig = ron::de::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    pub fn load_or_default(path: &Path) -> (Self, ConfigSource) {
        match Self::load(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
            Err(ConfigError::FileError(e)) if e.kind() == std::io::ErrorKind::NotFound => (
                Self::default(),
                ConfigSource::Defaults {
                    reason: format!("no config file at {}", path.display()),
                },
            ),
            Err(e) => (
                Self::default(),
                ConfigSource::Defaults {
                    reason: format!("{}: {}", path.display(), e),
                },
            ),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        let fields = [
            ("physics.gravity", physics.gravity),
            ("physics.ignition_thrust", physics.ignition_thrust),
            ("physics.thrust_decay", physics.thrust_decay),
            ("physics.rotation_step", physics.rotation_step),
            ("criteria.horizontal_tolerance", self.criteria.horizontal_tolerance),
            ("criteria.angle_tolerance", self.criteria.angle_tolerance),
            ("zone.center_x", self.zone.center_x),
            ("zone.base_y", self.zone.base_y),
            ("zone.half_width", self.zone.half_width),
            ("zone.half_height", self.zone.half_height),
            ("start.x", self.start.x),
            ("start.y", self.start.y),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if physics.gravity < 0.0 {
            return Err(ConfigError::ValidationError(
                "gravity must not be negative".into(),
            ));
        }
        if physics.ignition_thrust < 0.0 {
            return Err(ConfigError::ValidationError(
                "ignition_thrust must not be negative".into(),
            ));
        }
        if !(0.0..=1.0).contains(&physics.thrust_decay) {
            return Err(ConfigError::ValidationError(format!(
                "thrust_decay must be within [0, 1], got {}",
                physics.thrust_decay
            )));
        }
        if self.criteria.horizontal_tolerance < 0.0 || self.criteria.angle_tolerance < 0.0 {
            return Err(ConfigError::ValidationError(
                "landing tolerances must not be negative".into(),
            ));
        }
        if self.zone.half_width <= 0.0 || self.zone.half_height <= 0.0 {
            return Err(ConfigError::ValidationError(
                "landing zone extents must be positive".into(),
            ));
        }
        // Also rejects NaN; the fixed clock needs a representable, non-zero step
        if !(MIN_TICK_HZ..=MAX_TICK_HZ).contains(&self.tick_hz) {
            return Err(ConfigError::ValidationError(format!(
                "tick_hz must be within [{}, {}], got {}",
                MIN_TICK_HZ, MAX_TICK_HZ, self.tick_hz
            )));
        }
        Ok(())
    }
}

pub fn report_config(source: Res<ConfigSource>, config: Res<LanderConfig>) {
    match &*source {
        ConfigSource::File(path) => info!("Loaded lander config from {}", path.display()),
        ConfigSource::Defaults { reason } => {
            warn!("Using default lander config ({})", reason)
        }
    }
    debug!("{:?}", *config);
}
