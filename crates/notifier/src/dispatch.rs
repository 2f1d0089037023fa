//! Dispatcher implementation

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Outbound command tokens understood by the notification device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceCommand {
    /// Provisional sleep detected: pre-signal the device
    Alert,
    /// Confirmed sleep or subject gone: power the appliance off
    Off,
    /// Subject woke up: stand down
    Awake,
}

impl DeviceCommand {
    /// ASCII token sent over the line channel.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Alert => "ALERT",
            Self::Off => "OFF",
            Self::Awake => "AWAKE",
        }
    }
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// Per-run notification state.
///
/// Both flags clear together when the subject returns to the fully-awake,
/// stage1-false condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationFlags {
    pub stage1_notified: bool,
    pub stage2_notified: bool,
}

impl NotificationFlags {
    fn any(&self) -> bool {
        self.stage1_notified || self.stage2_notified
    }

    fn clear(&mut self) {
        self.stage1_notified = false;
        self.stage2_notified = false;
    }
}

/// Edge-triggered mapping from stage transitions to device commands.
pub struct NotificationDispatcher {
    flags: NotificationFlags,
    face_was_present: bool,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self {
            flags: NotificationFlags::default(),
            face_was_present: true,
        }
    }

    /// Current notification flags.
    pub fn flags(&self) -> NotificationFlags {
        self.flags
    }

    /// Fold one estimator decision into the notification state, returning
    /// the commands to send this tick.
    ///
    /// While the face is absent, stage processing is suspended and the flags
    /// are retained; only the absence edge itself emits a command.
    pub fn dispatch(
        &mut self,
        stage1: bool,
        stage2: bool,
        face_present: bool,
    ) -> Vec<DeviceCommand> {
        let mut commands = Vec::new();

        if !face_present {
            if self.face_was_present {
                info!("subject left view, powering device off");
                commands.push(DeviceCommand::Off);
            }
            self.face_was_present = false;
            return commands;
        }
        self.face_was_present = true;

        if stage1 && !self.flags.stage1_notified {
            info!("stage 1 detected, sending pre-signal");
            self.flags.stage1_notified = true;
            commands.push(DeviceCommand::Alert);
        }

        if stage2 && !self.flags.stage2_notified {
            info!("stage 2 confirmed, sending final signal");
            self.flags.stage2_notified = true;
            commands.push(DeviceCommand::Off);
        }

        if !stage1 && self.flags.any() {
            info!("subject woke up, resetting notifications");
            self.flags.clear();
            commands.push(DeviceCommand::Awake);
        }

        commands
    }
}

impl Default for NotificationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
