//! Monitor configuration
//!
//! Layered loading: built-in defaults, then an optional `dozeguard.toml`,
//! then `DOZEGUARD_*` environment overrides.

use serde::{Deserialize, Serialize};
use sleep_estimator::EstimatorConfig;

/// Which debounce strategy drives the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorVariant {
    /// Sleepiness gauge with two-stage confirmation
    #[default]
    Gauge,
    /// Continuous closure timer with blink grace period
    Timer,
}

/// Where blink samples come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionSource {
    /// Scripted open/close pattern, for demos and soak runs
    #[default]
    Simulated,
    /// JSON results piped from an external landmarker process
    Stdin,
}

/// Top-level monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Estimator variant to run
    pub variant: EstimatorVariant,

    /// Vision result source
    pub source: VisionSource,

    /// Control loop rate (samples per second)
    pub tick_hz: Option<u32>,

    /// Serial device path; mock link when absent
    pub serial_device: Option<String>,

    /// Serial baud rate
    pub baud: Option<u32>,

    /// Estimator thresholds and rates
    pub estimator: Option<EstimatorConfig>,
}

impl AppConfig {
    pub const DEFAULT_TICK_HZ: u32 = 30;

    /// Load configuration from file and environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("dozeguard").required(false))
            .add_source(config::Environment::with_prefix("DOZEGUARD").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn tick_hz(&self) -> u32 {
        self.tick_hz.unwrap_or(Self::DEFAULT_TICK_HZ).max(1)
    }

    pub fn baud(&self) -> u32 {
        self.baud.unwrap_or(serial_link::DEFAULT_BAUD)
    }

    pub fn estimator(&self) -> EstimatorConfig {
        self.estimator.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.variant, EstimatorVariant::Gauge);
        assert_eq!(config.source, VisionSource::Simulated);
        assert_eq!(config.tick_hz(), 30);
        assert_eq!(config.baud(), 115_200);
        assert!(config.serial_device.is_none());
    }

    #[test]
    fn test_tick_rate_floor() {
        let config = AppConfig {
            tick_hz: Some(0),
            ..Default::default()
        };
        assert_eq!(config.tick_hz(), 1);
    }

    #[test]
    fn test_variant_deserializes_lowercase() {
        let config: AppConfig = serde_json::from_str(r#"{"variant":"timer"}"#).unwrap();
        assert_eq!(config.variant, EstimatorVariant::Timer);
    }
}
