//! Estimator configuration

use crate::EstimatorError;
use serde::{Deserialize, Serialize};

/// Shared configuration for both estimator variants.
///
/// Rates are in gauge units per second; windows and thresholds in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Blink confidence at or above which eyes count as closed (0-1)
    pub blink_threshold: f32,

    /// Gauge value at which provisional sleep (stage 1) is flagged
    pub gauge_max: f32,

    /// Gauge rise rate while eyes are closed (units/sec)
    pub increase_rate: f32,

    /// Gauge decay rate while eyes are open or the face is absent (units/sec)
    pub decrease_rate: f32,

    /// Sustained stage-1 time before confirmed sleep (stage 2), seconds
    pub confirm_window_secs: f32,

    /// Continuous eye-closure time before the timer variant flags sleep, seconds
    pub sleep_threshold_secs: f32,

    /// Eye-opening tolerance before the closure timer resets, seconds
    pub grace_period_secs: f32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            blink_threshold: 0.5,
            gauge_max: 4.0,
            increase_rate: 1.0,
            decrease_rate: 1.5,
            confirm_window_secs: 3.0,
            sleep_threshold_secs: 3.0,
            grace_period_secs: 1.0,
        }
    }
}

impl EstimatorConfig {
    /// Strict preset: flags sleep sooner, tolerates shorter blinks.
    pub fn strict() -> Self {
        Self {
            gauge_max: 2.5,
            confirm_window_secs: 2.0,
            sleep_threshold_secs: 2.0,
            grace_period_secs: 0.5,
            ..Default::default()
        }
    }

    /// Lenient preset: slower to flag, forgiving of long blinks.
    pub fn lenient() -> Self {
        Self {
            gauge_max: 6.0,
            confirm_window_secs: 4.0,
            sleep_threshold_secs: 5.0,
            grace_period_secs: 2.0,
            ..Default::default()
        }
    }

    /// Validate ranges before constructing an estimator.
    pub fn validate(&self) -> Result<(), EstimatorError> {
        if !(0.0..=1.0).contains(&self.blink_threshold) {
            return Err(EstimatorError::Config(format!(
                "blink_threshold must be in [0, 1], got {}",
                self.blink_threshold
            )));
        }
        if self.gauge_max <= 0.0 {
            return Err(EstimatorError::Config(format!(
                "gauge_max must be positive, got {}",
                self.gauge_max
            )));
        }
        if self.increase_rate <= 0.0 || self.decrease_rate <= 0.0 {
            return Err(EstimatorError::Config(format!(
                "rates must be positive, got increase {} / decrease {}",
                self.increase_rate, self.decrease_rate
            )));
        }
        if self.confirm_window_secs < 0.0
            || self.sleep_threshold_secs <= 0.0
            || self.grace_period_secs < 0.0
        {
            return Err(EstimatorError::Config(
                "time windows must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(EstimatorConfig::default().validate().is_ok());
        assert!(EstimatorConfig::strict().validate().is_ok());
        assert!(EstimatorConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let config = EstimatorConfig {
            blink_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_rates() {
        let config = EstimatorConfig {
            decrease_rate: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
