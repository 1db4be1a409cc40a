//! Bounded inter-task mailbox
//!
//! A fixed-capacity FIFO for fixed-size messages, safe for any mix of
//! producers and consumers under the Embassy scheduling model. Capacity is
//! a const generic chosen at the instantiation site; the overflow policy is
//! chosen at construction.
//!
//! The queue is intentionally lossy under overload: when a producer runs
//! ahead of its consumer for longer than the capacity can absorb, a message
//! is dropped. The policy only decides *which* message (or, with `Block`,
//! that the producer waits instead). Callers that care can inspect the
//! `SendOutcome`.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};

/// What to do with a new message when the mailbox is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Drop the incoming message
    #[default]
    DropNewest,
    /// Evict the oldest buffered message to make room
    DropOldest,
    /// Suspend the producer until the consumer frees a slot
    Block,
}

/// Result of a policy-aware send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendOutcome {
    /// The message was enqueued
    Delivered,
    /// The mailbox was full; the incoming message was discarded
    DroppedNewest,
    /// The mailbox was full; the oldest buffered message was discarded
    DroppedOldest,
}

impl SendOutcome {
    /// Returns true if a message was lost, whichever end of the queue
    pub fn dropped(self) -> bool {
        !matches!(self, SendOutcome::Delivered)
    }
}

/// Fixed-capacity FIFO mailbox with a construction-time overflow policy
pub struct Mailbox<M: RawMutex, T, const N: usize> {
    channel: Channel<M, T, N>,
    policy: OverflowPolicy,
}

impl<M: RawMutex, T, const N: usize> Mailbox<M, T, N> {
    /// Create an empty mailbox with the given overflow policy
    pub const fn new(policy: OverflowPolicy) -> Self {
        Self {
            channel: Channel::new(),
            policy,
        }
    }

    /// The policy this mailbox applies when full
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Attempt to enqueue without waiting
    ///
    /// Returns false and drops `msg` if the mailbox is at capacity,
    /// regardless of policy. No blocking, no partial writes.
    pub fn try_send(&self, msg: T) -> bool {
        self.channel.try_send(msg).is_ok()
    }

    /// Enqueue according to the overflow policy
    ///
    /// Only the `Block` policy can suspend; the drop policies resolve
    /// immediately.
    pub async fn send(&self, msg: T) -> SendOutcome {
        match self.channel.try_send(msg) {
            Ok(()) => SendOutcome::Delivered,
            Err(TrySendError::Full(msg)) => match self.policy {
                OverflowPolicy::DropNewest => SendOutcome::DroppedNewest,
                OverflowPolicy::DropOldest => {
                    let _ = self.channel.try_receive();
                    match self.channel.try_send(msg) {
                        Ok(()) => SendOutcome::DroppedOldest,
                        // A racing producer refilled the freed slot
                        Err(TrySendError::Full(_)) => SendOutcome::DroppedNewest,
                    }
                }
                OverflowPolicy::Block => {
                    self.channel.send(msg).await;
                    SendOutcome::Delivered
                }
            },
        }
    }

    /// Attempt to dequeue the oldest message without waiting
    pub fn try_receive(&self) -> Option<T> {
        self.channel.try_receive().ok()
    }

    /// Dequeue the oldest message, suspending until one is available
    pub async fn receive(&self) -> T {
        self.channel.receive().await
    }

    /// Number of messages currently buffered
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// Returns true if no messages are buffered
    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Fixed capacity in messages
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::task::Poll;
    use embassy_futures::{block_on, poll_once};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use proptest::prelude::*;

    const DEPTH: usize = 5;

    type TestBox = Mailbox<NoopRawMutex, u8, DEPTH>;

    #[test]
    fn test_fifo_order() {
        let mb = TestBox::new(OverflowPolicy::DropNewest);
        for n in 1..=5u8 {
            assert!(mb.try_send(n));
        }
        for n in 1..=5u8 {
            assert_eq!(mb.try_receive(), Some(n));
        }
        assert_eq!(mb.try_receive(), None);
    }

    #[test]
    fn test_overflow_drops_and_retains_head() {
        let mb = TestBox::new(OverflowPolicy::DropNewest);
        for n in 1..=5u8 {
            assert!(mb.try_send(n));
        }
        // The (capacity+1)-th send fails and nothing already buffered moves
        assert!(!mb.try_send(6));
        assert_eq!(mb.len(), 5);
        for n in 1..=5u8 {
            assert_eq!(mb.try_receive(), Some(n));
        }
    }

    #[test]
    fn test_drop_newest_policy() {
        let mb = TestBox::new(OverflowPolicy::DropNewest);
        for n in 1..=5u8 {
            assert_eq!(block_on(mb.send(n)), SendOutcome::Delivered);
        }
        assert_eq!(block_on(mb.send(6)), SendOutcome::DroppedNewest);
        assert_eq!(mb.try_receive(), Some(1));
    }

    #[test]
    fn test_drop_oldest_policy() {
        let mb = TestBox::new(OverflowPolicy::DropOldest);
        for n in 1..=5u8 {
            assert_eq!(block_on(mb.send(n)), SendOutcome::Delivered);
        }
        assert_eq!(block_on(mb.send(6)), SendOutcome::DroppedOldest);
        // 1 was evicted; 2..=6 remain in order
        for n in 2..=6u8 {
            assert_eq!(mb.try_receive(), Some(n));
        }
    }

    #[test]
    fn test_block_policy_waits_for_space() {
        let mb = TestBox::new(OverflowPolicy::Block);
        for n in 1..=5u8 {
            assert_eq!(block_on(mb.send(n)), SendOutcome::Delivered);
        }
        // Full mailbox: the producer pends instead of dropping
        assert!(matches!(poll_once(mb.send(99)), Poll::Pending));
        assert_eq!(mb.try_receive(), Some(1));
        assert_eq!(block_on(mb.send(6)), SendOutcome::Delivered);
        for n in 2..=6u8 {
            assert_eq!(mb.try_receive(), Some(n));
        }
    }

    #[test]
    fn test_async_receive_sees_buffered_message() {
        let mb = TestBox::new(OverflowPolicy::DropNewest);
        assert!(mb.try_send(42));
        assert_eq!(block_on(mb.receive()), 42);
        assert!(mb.is_empty());
    }

    #[test]
    fn test_capacity_is_fixed() {
        let mb = TestBox::new(OverflowPolicy::default());
        assert_eq!(mb.capacity(), DEPTH);
        assert_eq!(mb.policy(), OverflowPolicy::DropNewest);
    }

    proptest! {
        #[test]
        fn fifo_order_for_any_fill(bytes in proptest::collection::vec(any::<u8>(), 1..=DEPTH)) {
            let mb = TestBox::new(OverflowPolicy::DropNewest);
            for &b in bytes.iter() {
                assert!(mb.try_send(b));
            }
            for &b in bytes.iter() {
                assert_eq!(mb.try_receive(), Some(b));
            }
            assert!(mb.is_empty());
        }

        #[test]
        fn overload_retains_exactly_the_first_capacity(bytes in proptest::collection::vec(any::<u8>(), DEPTH + 1..=DEPTH * 3)) {
            let mb = TestBox::new(OverflowPolicy::DropNewest);
            for (i, &b) in bytes.iter().enumerate() {
                assert_eq!(mb.try_send(b), i < DEPTH);
            }
            assert_eq!(mb.len(), DEPTH);
            for &b in bytes.iter().take(DEPTH) {
                assert_eq!(mb.try_receive(), Some(b));
            }
        }
    }
}
