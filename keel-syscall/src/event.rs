//! Event source side of a component connection
//!
//! An event connection links two components through a notification
//! object. The source holds a capability to the notification and signals
//! it; the sink waits on it. Deciding when to signal is left to the
//! component, this type only knows how.

use keel_cap::{CPtr, Word};

use crate::frame::SyscallFrame;

/// Slot the notification capability is placed in by the system builder.
pub const DEFAULT_EVENT_SLOT: CPtr = CPtr::from_raw(6);

/// Signals one notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventEmitter {
    notification: CPtr,
    payload: Word,
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_SLOT)
    }
}

impl EventEmitter {
    /// Create an emitter for the notification in slot `notification`.
    /// The payload is 0; the kernel ignores it for notifications.
    #[must_use]
    pub const fn new(notification: CPtr) -> Self {
        Self {
            notification,
            payload: 0,
        }
    }

    /// Use a different payload word.
    #[must_use]
    pub const fn with_payload(self, payload: Word) -> Self {
        Self { payload, ..self }
    }

    /// Get the notification slot.
    #[inline]
    pub const fn notification(&self) -> CPtr {
        self.notification
    }

    /// Get the payload word.
    #[inline]
    pub const fn payload(&self) -> Word {
        self.payload
    }

    /// Component entry point. The source has nothing to set up, so this
    /// returns 0 immediately.
    pub fn run(&self) -> i32 {
        log::debug!("event source ready on {}", self.notification);
        0
    }

    /// Register image `emit` traps with.
    #[must_use]
    pub fn frame(&self) -> SyscallFrame {
        SyscallFrame::notify(self.notification, self.payload)
    }

    /// Signal the notification.
    #[cfg(all(feature = "userspace", target_arch = "arm"))]
    pub fn emit(&self) {
        crate::invoke::notify(self.notification, self.payload);
    }
}
