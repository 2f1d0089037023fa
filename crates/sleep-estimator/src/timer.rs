//! Timer + grace-period estimator

use crate::{Decision, EstimatorConfig, SleepEstimator, SleepStatus};
use std::time::{Duration, Instant};
use tracing::debug;

/// Continuous eye-closure timer with a blink grace period.
///
/// Closure past `sleep_threshold_secs` flags sleep. Brief eye-openings
/// shorter than `grace_period_secs` leave the closure timer armed; once the
/// grace period is exceeded, state resets fully to awake and no partial
/// closure credit carries into the next closure.
///
/// A single-stage detector: the sleeping flag is reported as both stage 1
/// and stage 2 in the shared `Decision`.
pub struct TimerEstimator {
    config: EstimatorConfig,
    closed_since: Option<Instant>,
    reopened_since: Option<Instant>,
    sleeping: bool,
}

impl TimerEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            closed_since: None,
            reopened_since: None,
            sleeping: false,
        }
    }

    fn decision(&self, status: SleepStatus, closed_for: Duration) -> Decision {
        Decision {
            status,
            stage1: self.sleeping,
            stage2: self.sleeping,
            gauge: 0.0,
            closed_for,
        }
    }
}

impl SleepEstimator for TimerEstimator {
    fn update(&mut self, blink: f32, face_present: bool, now: Instant) -> Decision {
        if !face_present {
            self.reset();
            return self.decision(SleepStatus::NoFace, Duration::ZERO);
        }

        if blink >= self.config.blink_threshold {
            // Eyes closed: any pending grace window is forgiven.
            self.reopened_since = None;
            let since = *self.closed_since.get_or_insert(now);
            let closed_for = now.duration_since(since);

            if closed_for.as_secs_f32() >= self.config.sleep_threshold_secs {
                if !self.sleeping {
                    debug!(closed_secs = closed_for.as_secs_f32(), "sleep threshold reached");
                }
                self.sleeping = true;
                return self.decision(SleepStatus::Sleeping, closed_for);
            }
            return self.decision(SleepStatus::EyesClosed, closed_for);
        }

        // Eyes open.
        let Some(since) = self.closed_since else {
            return self.decision(SleepStatus::EyesOpen, Duration::ZERO);
        };

        let reopened = *self.reopened_since.get_or_insert(now);
        let reopened_for = now.duration_since(reopened);

        if reopened_for.as_secs_f32() > self.config.grace_period_secs {
            // Grace exceeded: back to awake, timers dropped together.
            self.reset();
            return self.decision(SleepStatus::EyesOpen, Duration::ZERO);
        }

        // Within grace: sleeping flag and closure timer are retained.
        self.decision(SleepStatus::Grace { reopened_for }, now.duration_since(since))
    }

    fn reset(&mut self) {
        self.closed_since = None;
        self.reopened_since = None;
        self.sleeping = false;
    }
}
