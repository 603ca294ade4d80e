//! Default tank and consumption parameters.

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;
use crate::models::Tank;

pub const DEFAULT_VOLUME_L: f64 = 12.0;
pub const DEFAULT_PRESSURE_BAR: f64 = 200.0;
pub const DEFAULT_CONSO_L_MIN: f64 = 20.0;

/// Parameters a profile is created with. Missing JSON fields take the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct ProfileConfig {
    /// Tank volume (L)
    pub volume: f64,
    /// Tank fill pressure (bar)
    pub pressure: f64,
    /// Consumption at the surface (L/min)
    pub conso_per_min: f64,
    /// Depth the dive starts from (m)
    pub start_depth: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME_L,
            pressure: DEFAULT_PRESSURE_BAR,
            conso_per_min: DEFAULT_CONSO_L_MIN,
            start_depth: 0.0,
        }
    }
}

impl ProfileConfig {
    pub fn from_json(input: &str) -> Result<Self, ProfileError> {
        let config: ProfileConfig = serde_json::from_str(input)
            .map_err(|e| ProfileError::config(format!("malformed profile config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn tank(&self) -> Tank {
        Tank {
            volume: self.volume,
            pressure: self.pressure,
        }
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        validate_tank(&self.tank())?;
        validate_rate(self.conso_per_min)?;
        validate_depth(self.start_depth)
    }
}

pub(crate) fn validate_tank(tank: &Tank) -> Result<(), ProfileError> {
    if !(tank.volume.is_finite() && tank.volume > 0.0) {
        return Err(ProfileError::config(format!(
            "tank volume must be positive, got {}",
            tank.volume
        )));
    }
    if !(tank.pressure.is_finite() && tank.pressure > 0.0) {
        return Err(ProfileError::config(format!(
            "tank pressure must be positive, got {}",
            tank.pressure
        )));
    }
    Ok(())
}

pub(crate) fn validate_interval(time_interval: f64) -> Result<(), ProfileError> {
    if time_interval.is_finite() && time_interval >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::config(format!("segment duration must be >= 0, got {time_interval}")))
    }
}

pub(crate) fn validate_depth(depth: f64) -> Result<(), ProfileError> {
    if depth.is_finite() && depth >= 0.0 {
        Ok(())
    } else {
        Err(ProfileError::config(format!("depth must be >= 0, got {depth}")))
    }
}

pub(crate) fn validate_rate(rate: f64) -> Result<(), ProfileError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::config(format!("consumption rate must be positive, got {rate}")))
    }
}
