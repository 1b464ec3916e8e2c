//! Syscall numbers
//!
//! Kernel entry points are identified by small negative integers. The
//! identifier is loaded into `r7` before the trap and also encoded in the
//! low 24 bits of the `swi` immediate, so both must match the kernel's
//! numbering exactly.

use keel_cap::{SignedWord, Word};

/// Syscall identifiers.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SyscallId {
    /// Send and wait for the reply.
    Call = -1,
    /// Reply to the last caller, then wait for a message.
    ReplyWait = -2,
    /// Send (blocking on endpoints, non-blocking on notifications).
    Send = -3,
    /// Non-blocking send; dropped if no receiver is waiting.
    NBSend = -4,
    /// Wait for a message or signal.
    Wait = -5,
    /// Reply to the last caller.
    Reply = -6,
    /// Yield the remainder of the time slice.
    Yield = -7,
    /// Poll a notification without blocking.
    Poll = -8,

    // === Debug (debug kernels only) ===
    /// Print one character on the kernel console.
    DebugPutChar = -9,
    /// Halt the system.
    DebugHalt = -10,
    /// Identify the type of a capability.
    DebugCapIdentify = -11,
    /// Dump a kernel state snapshot.
    DebugSnapshot = -12,
}

impl SyscallId {
    /// All identifiers in order of decreasing value.
    pub const ALL: [Self; 12] = [
        Self::Call,
        Self::ReplyWait,
        Self::Send,
        Self::NBSend,
        Self::Wait,
        Self::Reply,
        Self::Yield,
        Self::Poll,
        Self::DebugPutChar,
        Self::DebugHalt,
        Self::DebugCapIdentify,
        Self::DebugSnapshot,
    ];

    /// Get the signed identifier.
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> SignedWord {
        self as SignedWord
    }

    /// Get the identifier as loaded into the syscall register.
    #[inline]
    #[must_use]
    pub const fn as_word(self) -> Word {
        self as SignedWord as Word
    }

    /// Immediate operand of the `swi` instruction for this syscall.
    #[inline]
    #[must_use]
    pub const fn swi_immediate(self) -> Word {
        self.as_word() & 0x00ff_ffff
    }

    /// Try to convert from a raw identifier.
    pub fn from_raw(value: SignedWord) -> Option<Self> {
        // -1 maps to index 0, -12 to index 11.
        let index = value.checked_neg()?.checked_sub(1)?;
        let index = usize::try_from(index).ok()?;
        Self::ALL.get(index).copied()
    }

    /// Check whether this is a debug-only entry point.
    #[inline]
    #[must_use]
    pub const fn is_debug(self) -> bool {
        matches!(
            self,
            Self::DebugPutChar | Self::DebugHalt | Self::DebugCapIdentify | Self::DebugSnapshot
        )
    }

    /// Get the syscall name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Call => "Call",
            Self::ReplyWait => "ReplyWait",
            Self::Send => "Send",
            Self::NBSend => "NBSend",
            Self::Wait => "Wait",
            Self::Reply => "Reply",
            Self::Yield => "Yield",
            Self::Poll => "Poll",
            Self::DebugPutChar => "DebugPutChar",
            Self::DebugHalt => "DebugHalt",
            Self::DebugCapIdentify => "DebugCapIdentify",
            Self::DebugSnapshot => "DebugSnapshot",
        }
    }
}
