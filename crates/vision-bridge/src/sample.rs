//! Blink signal extraction from vision-model results

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Blendshape name for left-eye closure
pub const EYE_BLINK_LEFT: &str = "eyeBlinkLeft";

/// Blendshape name for right-eye closure
pub const EYE_BLINK_RIGHT: &str = "eyeBlinkRight";

/// One result from the external face landmarker.
///
/// Deserializable from JSON so a landmarker process can pipe results in
/// line-by-line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionResult {
    /// Whether a face was found in the frame
    pub face_detected: bool,

    /// Named blendshape scores, each in [0, 1]
    #[serde(default)]
    pub blendshapes: HashMap<String, f32>,

    /// Capture timestamp (ms since stream start)
    #[serde(default)]
    pub timestamp_ms: u64,
}

impl VisionResult {
    /// Look up a named blendshape score, defaulting to 0.0 when absent.
    pub fn score(&self, name: &str) -> f32 {
        self.blendshapes.get(name).copied().unwrap_or(0.0)
    }
}

/// Per-frame eye-closure signal, rebuilt each control-loop tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkSample {
    /// Left-eye closure confidence (0 = open, 1 = closed)
    pub left: f32,
    /// Right-eye closure confidence
    pub right: f32,
    /// Average of left and right
    pub average: f32,
    /// Whether a face was present in the source result
    pub face_present: bool,
}

impl BlinkSample {
    /// Build a sample from the latest vision result, if any.
    ///
    /// No result yet, or a result without a face, yields zeroed scores with
    /// `face_present = false`. Missing blendshape entries degrade to 0.0
    /// rather than failing.
    pub fn from_result(result: Option<&VisionResult>) -> Self {
        match result {
            Some(r) if r.face_detected => {
                let left = r.score(EYE_BLINK_LEFT);
                let right = r.score(EYE_BLINK_RIGHT);
                Self {
                    left,
                    right,
                    average: (left + right) / 2.0,
                    face_present: true,
                }
            }
            _ => Self::absent(),
        }
    }

    /// Sample representing "no face in view".
    pub fn absent() -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            average: 0.0,
            face_present: false,
        }
    }
}
