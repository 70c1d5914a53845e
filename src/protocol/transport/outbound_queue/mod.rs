//! FIFO of frames waiting for the transmitter.
//!
//! Producers (keypad link, vehicle controller) push as many frames as a
//! button press requires; the runtime releases exactly one frame per tick.
//! The queue is a pre-allocated [`heapless::Deque`] behind an
//! [`embassy_sync`] blocking mutex with a [`NoopRawMutex`]: every access
//! happens on the tick's single context, and shared references are enough to
//! push or pop, so each producer simply borrows the same queue.
//!
//! Two kinds of push exist:
//! - [`OutboundQueue::push`] always appends (drive-shift commands);
//! - [`OutboundQueue::push_latest`] overwrites a pending frame with the same
//!   identifier in place, for frames that carry a full snapshot (LED matrix,
//!   keypad activation). At most one such frame per identifier is ever
//!   pending, so snapshots cannot crowd out commands.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::NoopRawMutex, Mutex};
use heapless::Deque;

use crate::error::QueueError;
use crate::protocol::transport::can_frame::CanFrame;

/// Maximum number of frames waiting for transmission.
///
/// A gear change produces one LED snapshot and four drive-shift
/// repetitions; the capacity absorbs several quick presses before the
/// one-per-tick drain catches up.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 64;

pub struct OutboundQueue {
    frames: Mutex<NoopRawMutex, RefCell<Deque<CanFrame, OUTBOUND_QUEUE_CAPACITY>>>,
}

impl Default for OutboundQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl OutboundQueue {
    pub const fn new() -> Self {
        Self {
            frames: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Append a frame at the tail. A full queue rejects the frame.
    pub fn push(&self, frame: CanFrame) -> Result<(), QueueError> {
        self.frames.lock(|frames| {
            frames.borrow_mut().push_back(frame).map_err(|_dropped| {
                #[cfg(feature = "defmt")]
                defmt::warn!("Outbound queue full, dropping {}", _dropped);
                QueueError::Full
            })
        })
    }

    /// Replace the pending frame with the same identifier, keeping its place
    /// in line, or append when none is pending.
    pub fn push_latest(&self, frame: CanFrame) -> Result<(), QueueError> {
        let replaced = self.frames.lock(|frames| {
            let mut frames = frames.borrow_mut();
            match frames.iter_mut().find(|pending| pending.id == frame.id) {
                Some(pending) => {
                    *pending = frame;
                    true
                }
                None => false,
            }
        });
        if replaced {
            Ok(())
        } else {
            self.push(frame)
        }
    }

    /// Remove and return the head frame, if any.
    pub fn pop(&self) -> Option<CanFrame> {
        self.frames.lock(|frames| frames.borrow_mut().pop_front())
    }

    pub fn len(&self) -> usize {
        self.frames.lock(|frames| frames.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slots still available for [`OutboundQueue::push`].
    pub fn free(&self) -> usize {
        OUTBOUND_QUEUE_CAPACITY - self.len()
    }

    /// Discard every pending frame.
    pub fn clear(&self) {
        self.frames.lock(|frames| frames.borrow_mut().clear());
    }
}
