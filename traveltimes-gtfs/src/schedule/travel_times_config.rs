use std::path::Path;

use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleError;

/// prefix for environment variables that override file configuration,
/// e.g. `TRAVEL_TIMES_DEFAULT_WAIT_TIME_AT_STOP_MSEC=20000`.
pub const ENV_PREFIX: &str = "TRAVEL_TIMES";

/// parameters for synthesizing travel times from schedule times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelTimesConfig {
    /// dwell time modeled at each stop, excluded from travel time
    pub default_wait_time_at_stop_msec: u32,
    /// stop paths longer than this many meters are split into travel time segments
    pub max_travel_time_segment_length: f64,
    /// fastest plausible travel speed. 0.018 m/msec is 18 m/s, about 40 mph
    pub max_travel_speed_meters_per_msec: f64,
}

impl Default for TravelTimesConfig {
    fn default() -> Self {
        Self {
            default_wait_time_at_stop_msec: 10_000,
            max_travel_time_segment_length: 250.0,
            max_travel_speed_meters_per_msec: 0.018,
        }
    }
}

impl TravelTimesConfig {
    /// loads configuration from an optional TOML file, then applies environment
    /// overrides. keys missing from both use their defaults.
    pub fn load(configuration_file: Option<&Path>) -> Result<TravelTimesConfig, ScheduleError> {
        Self::load_with_environment(configuration_file, None)
    }

    /// loads configuration with the environment overrides read from `environment`
    /// instead of the process environment when provided.
    fn load_with_environment(
        configuration_file: Option<&Path>,
        environment: Option<Map<String, String>>,
    ) -> Result<TravelTimesConfig, ScheduleError> {
        let mut builder = Config::builder();
        if let Some(filepath) = configuration_file {
            builder = builder.add_source(File::from(filepath));
        }
        let overrides = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(environment);
        let config = builder
            .add_source(overrides)
            .build()
            .map_err(|e| {
                let filename = configuration_file
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default();
                ScheduleError::InvalidConfig(format!("file '{filename}' produced error: {e}"))
            })?;
        let result: TravelTimesConfig = config
            .try_deserialize()
            .map_err(|e| ScheduleError::InvalidConfig(e.to_string()))?;
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        let length = self.max_travel_time_segment_length;
        if !length.is_finite() || length <= 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "max_travel_time_segment_length must be positive, found {length}"
            )));
        }
        let speed = self.max_travel_speed_meters_per_msec;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ScheduleError::InvalidConfig(format!(
                "max_travel_speed_meters_per_msec must be positive, found {speed}"
            )));
        }
        Ok(())
    }
}
