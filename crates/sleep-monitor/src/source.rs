//! Vision result sources
//!
//! Both sources publish into the shared `ResultSlot` from their own task;
//! the control loop reads whatever is newest and never waits for a fresh
//! result.

use std::collections::HashMap;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use vision_bridge::{ResultSlot, VisionResult, EYE_BLINK_LEFT, EYE_BLINK_RIGHT};

/// Read JSON `VisionResult` lines from an external landmarker process.
///
/// Malformed lines are warned about and skipped; the feed never fails the
/// monitor. Returns when stdin closes.
pub async fn feed_from_stdin(slot: ResultSlot) {
    info!("Reading vision results from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match serde_json::from_str::<VisionResult>(trimmed) {
                    Ok(result) => slot.publish(result),
                    Err(e) => warn!("Skipping malformed vision result: {}", e),
                }
            }
            Ok(None) => {
                info!("Vision input closed");
                return;
            }
            Err(e) => {
                warn!("Vision input read error: {}", e);
                return;
            }
        }
    }
}

/// Scripted blink pattern for running without a camera.
///
/// Cycles through: 10s awake with natural blinks, then a long closure that
/// carries the gauge through both sleep stages, then a wake-up. Publishes at
/// 30 Hz like the real landmarker.
pub async fn feed_simulated(slot: ResultSlot) {
    info!("Driving simulated blink pattern");
    let mut ticker = tokio::time::interval(Duration::from_millis(33));
    let mut frame: u64 = 0;

    loop {
        ticker.tick().await;
        frame += 1;
        let t = frame as f32 / 30.0;
        let cycle = t % 30.0;

        // 0-10s awake (short blink each 3s), 10-25s eyes closed, 25-30s awake.
        let blink = if cycle < 10.0 {
            if cycle % 3.0 < 0.15 {
                0.9
            } else {
                0.05
            }
        } else if cycle < 25.0 {
            0.95
        } else {
            0.05
        };

        let mut blendshapes = HashMap::new();
        blendshapes.insert(EYE_BLINK_LEFT.to_string(), blink);
        blendshapes.insert(EYE_BLINK_RIGHT.to_string(), blink);

        slot.publish(VisionResult {
            face_detected: true,
            blendshapes,
            timestamp_ms: frame * 33,
        });
    }
}
