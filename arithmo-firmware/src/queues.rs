//! Inter-task queue configuration
//!
//! Names the two mailboxes the tasks communicate through and the tuning
//! constants that size them. The mailboxes themselves are constructed once
//! in `main` and handed to the tasks as `&'static` references, so there is
//! no ordering hazard between queue creation and first use.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;

use arithmo_core::classify::ClassifiedDigit;
use arithmo_core::mailbox::{Mailbox, OverflowPolicy};

/// Capacity of both queues, in messages
pub const QUEUE_DEPTH: usize = 5;

/// Overflow policy for the digit queue (render path)
pub const DIGIT_QUEUE_POLICY: OverflowPolicy = OverflowPolicy::DropNewest;

/// Overflow policy for the echo queue (feedback path)
///
/// Drop-newest means a keystroke can go unanswered under sustained
/// overload; switch to `DropOldest` or `Block` here to trade that for
/// stale or delayed feedback instead.
pub const ECHO_QUEUE_POLICY: OverflowPolicy = OverflowPolicy::DropNewest;

/// Upper bound on one consumer receive before the task loops again
pub const IDLE_POLL: Duration = Duration::from_millis(50);

/// Classified digits from the reader to the render task
pub type DigitQueue = Mailbox<CriticalSectionRawMutex, ClassifiedDigit, QUEUE_DEPTH>;

/// Raw input bytes from the reader to the reporter task
pub type EchoQueue = Mailbox<CriticalSectionRawMutex, u8, QUEUE_DEPTH>;
