//! User register context
//!
//! Snapshot of a thread's user-visible registers, as read and written by
//! TCB register invocations and delivered with fault messages. The field
//! order is the kernel's, not the architectural register order.

use core::mem::{offset_of, size_of};

use keel_cap::Word;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Number of words in a [`UserContext`].
pub const USER_CONTEXT_WORDS: usize = 17;

/// ARM user register snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct UserContext {
    /// Program counter
    pub pc: Word,
    /// Stack pointer
    pub sp: Word,
    /// Current program status register
    pub cpsr: Word,
    pub r0: Word,
    pub r1: Word,
    pub r8: Word,
    pub r9: Word,
    pub r10: Word,
    pub r11: Word,
    pub r12: Word,
    pub r2: Word,
    pub r3: Word,
    pub r4: Word,
    pub r5: Word,
    pub r6: Word,
    pub r7: Word,
    /// Link register
    pub r14: Word,
}

impl UserContext {
    /// Create a zeroed context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pc: 0,
            sp: 0,
            cpsr: 0,
            r0: 0,
            r1: 0,
            r8: 0,
            r9: 0,
            r10: 0,
            r11: 0,
            r12: 0,
            r2: 0,
            r3: 0,
            r4: 0,
            r5: 0,
            r6: 0,
            r7: 0,
            r14: 0,
        }
    }

    /// Get general-purpose register `rN` (0-12 or 14).
    pub fn gpr(&self, n: usize) -> Option<Word> {
        Some(match n {
            0 => self.r0,
            1 => self.r1,
            2 => self.r2,
            3 => self.r3,
            4 => self.r4,
            5 => self.r5,
            6 => self.r6,
            7 => self.r7,
            8 => self.r8,
            9 => self.r9,
            10 => self.r10,
            11 => self.r11,
            12 => self.r12,
            14 => self.r14,
            _ => return None,
        })
    }

    /// View as the word array exchanged with the kernel.
    pub fn as_words(&self) -> &[Word; USER_CONTEXT_WORDS] {
        zerocopy::transmute_ref!(self)
    }
}

const _: () = {
    assert!(size_of::<Word>() == 4);
    assert!(size_of::<u8>() == 1);
    assert!(size_of::<u16>() == 2);
    assert!(size_of::<u64>() == 8);
    assert!(size_of::<UserContext>() == 68);
    assert!(size_of::<UserContext>() == USER_CONTEXT_WORDS * size_of::<Word>());
    assert!(offset_of!(UserContext, r0) == 12);
    assert!(offset_of!(UserContext, r2) == 40);
    assert!(offset_of!(UserContext, r14) == 64);
};
