//! Vision-Model Boundary
//!
//! The face landmarker runs as an external process and delivers results
//! asynchronously relative to frame capture. This crate provides:
//! - `VisionResult`: the per-frame payload (face flag + blendshape scores)
//! - `ResultSlot`: a single-slot newest-wins mailbox for the latest result
//! - `BlinkSample`: the eye-closure signal extracted for the estimators

pub mod sample;
pub mod slot;

pub use sample::{BlinkSample, VisionResult, EYE_BLINK_LEFT, EYE_BLINK_RIGHT};
pub use slot::ResultSlot;
