//! Sleep State Estimation
//!
//! Converts a noisy per-frame eye-closure signal into a debounced sleep/awake
//! classification. Two debounce strategies share one interface:
//! - `GaugeEstimator`: a bounded sleepiness gauge that rises while eyes are
//!   closed and decays while open, with a two-stage confirmation window
//! - `TimerEstimator`: a continuous eye-closed timer with a grace period
//!   that tolerates brief eye-openings (blinks)

pub mod config;
pub mod gauge;
pub mod status;
pub mod timer;

pub use config::EstimatorConfig;
pub use gauge::GaugeEstimator;
pub use status::{Decision, SleepStatus};
pub use timer::TimerEstimator;

use std::time::Instant;
use thiserror::Error;

/// Estimator error types
#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Temporal debouncer over a `(signal, present, now)` stream.
///
/// `update` is infallible: missing faces and degenerate signals are
/// first-class inputs, never errors.
pub trait SleepEstimator {
    /// Fold one sample into the estimator state and classify.
    fn update(&mut self, blink: f32, face_present: bool, now: Instant) -> Decision;

    /// Drop all accumulated state (on subject change).
    fn reset(&mut self);
}
