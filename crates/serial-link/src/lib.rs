//! Serial Device Link
//!
//! Newline-terminated ASCII tokens over an async serial port, talking to the
//! companion microcontroller that drives the IR blaster. Supports a mock
//! transport for hardware-free testing.

mod event;
mod link;

pub use event::LinkEvent;
pub use link::{SerialLink, DEFAULT_BAUD};

use thiserror::Error;

/// Device link error types
#[derive(Error, Debug)]
pub enum LinkError {
    /// Serial port could not be opened
    #[error("Failed to open serial port {device}: {source}")]
    Open {
        device: String,
        source: tokio_serial::Error,
    },

    /// Read/write error on an open port
    #[error("Serial I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the line channel
    #[error("Device link closed")]
    Closed,
}
