//! Serial link implementation

use crate::{LinkError, LinkEvent};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, ReadHalf, WriteHalf};
use tokio::sync::mpsc;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, info, warn};

/// Baud rate the microcontroller firmware expects
pub const DEFAULT_BAUD: u32 = 115_200;

enum Transport {
    Port {
        reader: Lines<BufReader<ReadHalf<SerialStream>>>,
        writer: WriteHalf<SerialStream>,
    },
    Mock {
        sent: Vec<String>,
        inbound_tx: mpsc::UnboundedSender<String>,
        inbound_rx: mpsc::UnboundedReceiver<String>,
    },
}

/// Line-oriented channel to the notification device.
pub struct SerialLink {
    transport: Transport,
}

impl SerialLink {
    /// Open a serial port to the device.
    ///
    /// # Arguments
    /// * `device` - Serial port path (e.g., "/dev/ttyUSB0" or "COM6")
    /// * `baud` - Baud rate, must match the firmware
    pub fn open(device: &str, baud: u32) -> Result<Self, LinkError> {
        info!("Opening device link on {} @ {}bps", device, baud);

        let stream = tokio_serial::new(device, baud)
            .open_native_async()
            .map_err(|source| LinkError::Open {
                device: device.to_string(),
                source,
            })?;

        let (read_half, writer) = tokio::io::split(stream);
        Ok(Self {
            transport: Transport::Port {
                reader: BufReader::new(read_half).lines(),
                writer,
            },
        })
    }

    /// Create a mock link for testing (no hardware required).
    ///
    /// Sent tokens are recorded and inbound lines can be queued with
    /// [`push_inbound`](Self::push_inbound).
    pub fn mock() -> Self {
        info!("Creating mock device link");
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        Self {
            transport: Transport::Mock {
                sent: Vec::new(),
                inbound_tx,
                inbound_rx,
            },
        }
    }

    /// Send one newline-terminated token to the device.
    pub async fn send(&mut self, token: &str) -> Result<(), LinkError> {
        debug!("PC -> device: {}", token);
        match &mut self.transport {
            Transport::Port { writer, .. } => {
                writer.write_all(token.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
                Ok(())
            }
            Transport::Mock { sent, .. } => {
                sent.push(token.to_string());
                Ok(())
            }
        }
    }

    /// Await the next inbound event from the device.
    ///
    /// Blank lines are skipped; unrecognized tokens come back as
    /// [`LinkEvent::Unknown`].
    pub async fn recv_event(&mut self) -> Result<LinkEvent, LinkError> {
        loop {
            let line = match &mut self.transport {
                Transport::Port { reader, .. } => {
                    reader.next_line().await?.ok_or(LinkError::Closed)?
                }
                Transport::Mock { inbound_rx, .. } => {
                    // The link holds its own sender, so this never closes.
                    inbound_rx.recv().await.ok_or(LinkError::Closed)?
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let event = LinkEvent::parse(trimmed);
            if let LinkEvent::Unknown(raw) = &event {
                warn!("Unrecognized device token: {:?}", raw);
            } else {
                debug!("device -> PC: {}", trimmed);
            }
            return Ok(event);
        }
    }

    /// Queue an inbound line on a mock link.
    pub fn push_inbound(&self, line: &str) {
        if let Transport::Mock { inbound_tx, .. } = &self.transport {
            let _ = inbound_tx.send(line.to_string());
        }
    }

    /// Tokens sent so far on a mock link.
    pub fn sent_tokens(&self) -> &[String] {
        match &self.transport {
            Transport::Mock { sent, .. } => sent,
            Transport::Port { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_sent_tokens() {
        let mut link = SerialLink::mock();
        link.send("ALERT").await.unwrap();
        link.send("OFF").await.unwrap();

        assert_eq!(link.sent_tokens(), ["ALERT", "OFF"]);
    }

    #[tokio::test]
    async fn test_mock_inbound_events() {
        let mut link = SerialLink::mock();
        link.push_inbound("CH_3");
        link.push_inbound("TV_OFF");

        assert_eq!(link.recv_event().await.unwrap(), LinkEvent::ChannelSelect(3));
        assert_eq!(link.recv_event().await.unwrap(), LinkEvent::PowerOff);
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let mut link = SerialLink::mock();
        link.push_inbound("");
        link.push_inbound("   ");
        link.push_inbound("CH_1");

        assert_eq!(link.recv_event().await.unwrap(), LinkEvent::ChannelSelect(1));
    }
}
