//! Serial input reader task
//!
//! Sole producer for both queues: every byte read from the link is
//! classified once and offered to the digit queue and the echo queue in
//! the same iteration.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use arithmo_core::pipeline::publish_byte;

use crate::queues::{DigitQueue, EchoQueue};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Reader task - classifies link bytes and feeds both consumer queues
#[embassy_executor::task]
pub async fn reader_task(
    mut rx: BufferedUartRx,
    digits: &'static DigitQueue,
    echoes: &'static EchoQueue,
) {
    info!("Reader task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // The only point where this task genuinely blocks
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    let receipt = publish_byte(byte, digits, echoes).await;
                    if receipt.any_dropped() {
                        // A failed offer is never retried
                        warn!("queue full, dropped message for byte {:#x}", byte);
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("link read error: {:?}", e);
            }
        }
    }
}
