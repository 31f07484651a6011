//! Serial command receive task
//!
//! Reads the shared command line and queues every complete line for the
//! control loop.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use healing_protocol::LineReader;

use crate::channels::COMMAND_LINES;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Serial RX task - splits the byte stream into command lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut reader: LineReader = LineReader::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    if let Some(line) = reader.push(byte) {
                        trace!("RX line: {}", line.as_str());
                        if COMMAND_LINES.try_send(line).is_err() {
                            warn!("Command queue full, dropping line");
                        }
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
                reader.reset();
            }
        }
    }
}
