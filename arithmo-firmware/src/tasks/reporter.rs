//! Feedback reporter task
//!
//! Sole consumer of the echo queue and sole writer of the link's transmit
//! side. Judges each raw byte with its own digit predicate - the render
//! path's classification is never consulted.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::with_timeout;
use embedded_io_async::Write;

use arithmo_core::feedback::feedback_for;

use crate::queues::{EchoQueue, IDLE_POLL};

/// Reporter task - answers every consumed keystroke over the link
#[embassy_executor::task]
pub async fn reporter_task(mut tx: BufferedUartTx, echoes: &'static EchoQueue) {
    info!("Reporter task started");

    loop {
        match with_timeout(IDLE_POLL, echoes.receive()).await {
            Ok(byte) => {
                let msg = feedback_for(byte);
                // The whole string goes out before the next byte is taken
                if let Err(e) = tx.write_all(msg.as_bytes()).await {
                    warn!("link write error: {:?}", e);
                }
            }
            Err(_) => {
                // Nothing pending
            }
        }
    }
}
