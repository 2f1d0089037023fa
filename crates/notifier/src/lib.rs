//! Notification Dispatch
//!
//! Maps sleep-stage transitions to outbound device commands. Edge-triggered:
//! a command fires once per transition and is suppressed while its
//! notification flag is set; flags clear together when the subject is
//! confirmed awake again.

mod dispatch;

pub use dispatch::{DeviceCommand, NotificationDispatcher, NotificationFlags};
