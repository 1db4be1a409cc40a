//! Display render task
//!
//! Sole consumer of the digit queue and sole writer of the segment lines.
//! Each received classification replaces whatever the display showed
//! before; an `Invalid` input renders the sentinel glyph and is not an
//! error.

use defmt::*;
use embassy_time::with_timeout;

use arithmo_core::pipeline::render_digit;

use crate::board::SegmentPins;
use crate::queues::{DigitQueue, IDLE_POLL};

/// Render task - resolves glyphs from the digit queue onto the display
#[embassy_executor::task]
pub async fn render_task(mut port: SegmentPins, digits: &'static DigitQueue) {
    info!("Render task started");

    loop {
        // Park on the queue instead of spinning, but never past the poll
        // window, so an idle queue cannot wedge the task
        match with_timeout(IDLE_POLL, digits.receive()).await {
            Ok(digit) => {
                trace!("render {:?}", digit);
                render_digit(digit, &mut port);
            }
            Err(_) => {
                // Nothing pending
            }
        }
    }
}
