//! Inbound device event parsing

use serde::Serialize;

/// Events the microcontroller sends back over the line channel.
///
/// Button presses on the device arrive as plain tokens: `TV_OFF` for the
/// power button and `CH_1`..`CH_12` for channel selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LinkEvent {
    /// Power button pressed
    PowerOff,
    /// Channel button pressed (1-based)
    ChannelSelect(u8),
    /// Anything else (logged, otherwise ignored)
    Unknown(String),
}

impl LinkEvent {
    /// Parse one trimmed inbound line.
    pub fn parse(line: &str) -> Self {
        if line == "TV_OFF" {
            return Self::PowerOff;
        }
        if let Some(num) = line.strip_prefix("CH_") {
            if let Ok(channel) = num.parse::<u8>() {
                if (1..=12).contains(&channel) {
                    return Self::ChannelSelect(channel);
                }
            }
        }
        Self::Unknown(line.to_string())
    }
}
