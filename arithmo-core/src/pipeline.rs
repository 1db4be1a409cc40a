//! The read/render/report pipeline steps
//!
//! Three long-lived tasks cooperate through two mailboxes: the reader
//! classifies each serial byte and feeds both queues from the same read,
//! the render task resolves glyphs from the digit queue, and the reporter
//! answers from the echo queue. The task loops themselves live in the
//! firmware crate; the per-message logic lives here where it can run on
//! the host.

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::classify::{classify, ClassifiedDigit};
use crate::glyphs::glyph_for;
use crate::mailbox::{Mailbox, SendOutcome};
use crate::traits::SegmentPort;

/// Per-queue outcome of publishing one input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PublishReceipt {
    /// Outcome on the digit queue (render path)
    pub digit: SendOutcome,
    /// Outcome on the echo queue (reporter path)
    pub echo: SendOutcome,
}

impl PublishReceipt {
    /// Returns true if either queue lost a message
    pub fn any_dropped(self) -> bool {
        self.digit.dropped() || self.echo.dropped()
    }
}

/// Fan one raw byte out to both consumer queues
///
/// The byte is classified exactly once; the classification goes to the
/// digit queue and the raw byte to the echo queue. Both offers happen on
/// every call, so the queues are always fed from the same read. A failed
/// offer is reported in the receipt, never retried.
pub async fn publish_byte<M: RawMutex, const N: usize>(
    byte: u8,
    digits: &Mailbox<M, ClassifiedDigit, N>,
    echoes: &Mailbox<M, u8, N>,
) -> PublishReceipt {
    PublishReceipt {
        digit: digits.send(classify(byte)).await,
        echo: echoes.send(byte).await,
    }
}

/// Resolve and write the glyph for one classified digit
///
/// `Invalid` is a normal input here, not a fault; it resolves to the
/// sentinel glyph like any digit resolves to its table entry.
pub fn render_digit<P: SegmentPort>(digit: ClassifiedDigit, port: &mut P) {
    port.write_pattern(glyph_for(digit));
}
