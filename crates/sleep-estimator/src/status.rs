//! Classification results shared by both estimator variants

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Frame-level sleep status
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SleepStatus {
    /// Face present, eyes open, nothing accumulating
    EyesOpen,
    /// Face present, eyes closed, accumulating toward sleep
    EyesClosed,
    /// No face in view
    NoFace,
    /// Gauge saturated; confirmation window running
    Confirming {
        /// Time spent in stage 1 so far
        elapsed: Duration,
    },
    /// Sustained stage 1 for the full confirmation window (stage 2)
    ConfirmedSleep,
    /// Timer variant: continuous closure exceeded the sleep threshold
    Sleeping,
    /// Timer variant: eyes briefly open, closure timer still armed
    Grace {
        /// Time the eyes have been open within the grace window
        reopened_for: Duration,
    },
}

impl fmt::Display for SleepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EyesOpen => write!(f, "Eyes Open"),
            Self::EyesClosed => write!(f, "Eyes Closed"),
            Self::NoFace => write!(f, "No Face"),
            Self::Confirming { elapsed } => {
                write!(f, "Final Confirmation ({:.1}s)", elapsed.as_secs_f32())
            }
            Self::ConfirmedSleep => write!(f, "Confirmed Sleep (Stage 2)"),
            Self::Sleeping => write!(f, "Sleeping"),
            Self::Grace { reopened_for } => {
                write!(f, "Grace Period ({:.1}s)", reopened_for.as_secs_f32())
            }
        }
    }
}

/// One classification step's output.
///
/// Both variants fill `status`, `stage1`, and `stage2`; `gauge` is meaningful
/// for the gauge variant and `closed_for` for the timer variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    /// Human-readable status for logging and display
    pub status: SleepStatus,

    /// Provisional sleep detected
    pub stage1: bool,

    /// Confirmed sleep
    pub stage2: bool,

    /// Current gauge level (gauge variant)
    pub gauge: f32,

    /// Continuous eye-closure time (timer variant)
    pub closed_for: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(SleepStatus::NoFace.to_string(), "No Face");
        assert_eq!(
            SleepStatus::Confirming {
                elapsed: Duration::from_millis(1500)
            }
            .to_string(),
            "Final Confirmation (1.5s)"
        );
        assert_eq!(
            SleepStatus::ConfirmedSleep.to_string(),
            "Confirmed Sleep (Stage 2)"
        );
    }
}
