//! Control loop
//!
//! Single-threaded, poll-driven: each tick pulls the latest blink sample,
//! folds it into the estimator, and acts on the decision before the next
//! tick. Inbound device events are logged as they arrive.

use crate::config::{AppConfig, EstimatorVariant};
use notifier::{DeviceCommand, NotificationDispatcher};
use serial_link::{LinkError, LinkEvent, SerialLink};
use sleep_estimator::{GaugeEstimator, SleepEstimator, TimerEstimator};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use vision_bridge::{BlinkSample, ResultSlot};

/// Build the configured estimator variant behind the shared trait.
pub fn build_estimator(config: &AppConfig) -> Box<dyn SleepEstimator + Send> {
    let estimator_config = config.estimator();
    match config.variant {
        EstimatorVariant::Gauge => Box::new(GaugeEstimator::new(estimator_config)),
        EstimatorVariant::Timer => Box::new(TimerEstimator::new(estimator_config)),
    }
}

/// Sampling period for a configured rate. Non-zero for any rate, so the
/// interval timer cannot reject it.
fn tick_period(hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(hz))
}

/// Run the monitor until ctrl-c or a fatal link error.
pub async fn run(config: &AppConfig, slot: ResultSlot, mut link: SerialLink) -> anyhow::Result<()> {
    let mut estimator = build_estimator(config);
    let mut dispatcher = NotificationDispatcher::new();

    let mut ticker = tokio::time::interval(tick_period(config.tick_hz()));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(variant = ?config.variant, tick_hz = config.tick_hz(), "Monitor running");

    // Armed while the inbound side of the link is readable; a read error
    // stops polling it without taking the monitor down.
    let mut link_readable = true;

    loop {
        // Commands are sent after the select block so the inbound-event
        // future's borrow of the link has ended.
        let mut outbound = Vec::new();

        tokio::select! {
            _ = ticker.tick() => {
                outbound = step(estimator.as_mut(), &mut dispatcher, &slot);
            }
            event = link.recv_event(), if link_readable => {
                // Channel-select and power presses from the device are
                // informational here; the TV side consumes them. A read
                // error is not fatal to the monitor, only send failures are.
                link_readable = log_link_event(event);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Quit requested");
                return Ok(());
            }
        }

        for command in outbound {
            link.send(command.as_token()).await?;
        }
    }
}

/// Log one inbound link outcome, returning whether the inbound side is
/// still worth polling.
fn log_link_event(event: Result<LinkEvent, LinkError>) -> bool {
    match event {
        Ok(event) => {
            info!(?event, "Device event");
            true
        }
        Err(e) => {
            warn!("Device link read error, inbound events disabled: {}", e);
            false
        }
    }
}

/// One control-loop iteration: sample, classify, collect notifications.
fn step(
    estimator: &mut dyn SleepEstimator,
    dispatcher: &mut NotificationDispatcher,
    slot: &ResultSlot,
) -> Vec<DeviceCommand> {
    // A stale result is reused silently when inference lags the loop.
    let latest = slot.latest();
    let sample = BlinkSample::from_result(latest.as_ref());

    let decision = estimator.update(sample.average, sample.face_present, Instant::now());
    debug!(
        status = %decision.status,
        gauge = decision.gauge,
        closed_secs = decision.closed_for.as_secs_f32(),
        "tick"
    );

    dispatcher.dispatch(decision.stage1, decision.stage2, sample.face_present)
}
