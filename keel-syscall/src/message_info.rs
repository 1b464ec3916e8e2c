//! Message-info word
//!
//! Every IPC message and object invocation is described by one word passed
//! alongside the destination CPtr:
//!
//! ```text
//!  31                      12 11     9 8   7 6         0
//! +--------------------------+--------+-----+-----------+
//! |          label           | unwrap |extra|  length   |
//! +--------------------------+--------+-----+-----------+
//! ```
//!
//! - `label` (20 bits): operation or user-defined message type
//! - `caps_unwrapped` (3 bits): bitmask of extra caps the kernel unwrapped
//!   into badges on receive
//! - `extra_caps` (2 bits): number of capabilities transferred
//! - `length` (7 bits): number of message registers
//!
//! The kernel decodes with exactly this layout. Construction masks each
//! field to its width and never fails, so a `length` of 200 silently
//! becomes 72. Callers that need to reject oversized messages must check
//! against [`MSG_MAX_LENGTH`] themselves.

use core::fmt;

use keel_cap::Word;
use keel_cap::limits::{MSG_EXTRA_CAP_BITS, MSG_LENGTH_BITS, MSG_MAX_LENGTH};
use tock_registers::{LocalRegisterCopy, fields::FieldValue, register_bitfields};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

register_bitfields![u32,
    /// Message-info word
    pub MSG_INFO [
        /// Message label
        LABEL OFFSET(12) NUMBITS(20) [],
        /// Bitmask of extra caps unwrapped into badges
        CAPS_UNWRAPPED OFFSET(9) NUMBITS(3) [],
        /// Number of extra caps
        EXTRA_CAPS OFFSET(7) NUMBITS(2) [],
        /// Number of message registers
        LENGTH OFFSET(0) NUMBITS(7) []
    ]
];

/// Typed view of a message-info word.
pub type MessageInfoRegister = LocalRegisterCopy<Word, MSG_INFO::Register>;

const fn word_mask(mask: Word, shift: usize) -> Word {
    mask << shift
}

const _: () = {
    use MSG_INFO::{CAPS_UNWRAPPED, EXTRA_CAPS, LABEL, LENGTH};

    assert!(LENGTH.mask == (1 << MSG_LENGTH_BITS) - 1);
    assert!(EXTRA_CAPS.mask == (1 << MSG_EXTRA_CAP_BITS) - 1);

    let label = word_mask(LABEL.mask, LABEL.shift);
    let unwrapped = word_mask(CAPS_UNWRAPPED.mask, CAPS_UNWRAPPED.shift);
    let extra = word_mask(EXTRA_CAPS.mask, EXTRA_CAPS.shift);
    let length = word_mask(LENGTH.mask, LENGTH.shift);
    // The four fields are disjoint and tile the whole word.
    assert!(label & unwrapped == 0);
    assert!(unwrapped & extra == 0);
    assert!(extra & length == 0);
    assert!((label | unwrapped | extra | length) == Word::MAX);
};

/// Packed message-info word.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct MessageInfo(Word);

impl MessageInfo {
    /// Pack the four fields, truncating each to its width.
    #[inline]
    #[must_use]
    pub fn new(label: Word, caps_unwrapped: Word, extra_caps: Word, length: Word) -> Self {
        let mut reg = MessageInfoRegister::new(0);
        reg.write(
            MSG_INFO::LABEL.val(label)
                + MSG_INFO::CAPS_UNWRAPPED.val(caps_unwrapped)
                + MSG_INFO::EXTRA_CAPS.val(extra_caps)
                + MSG_INFO::LENGTH.val(length),
        );
        Self(reg.get())
    }

    /// Tag for a one-word notification: every field zero except length 1.
    #[inline]
    #[must_use]
    pub fn notify() -> Self {
        Self::new(0, 0, 0, 1)
    }

    /// Wrap a raw word as received from the kernel.
    #[inline]
    #[must_use]
    pub const fn from_word(word: Word) -> Self {
        Self(word)
    }

    /// Get the raw word.
    #[inline]
    #[must_use]
    pub const fn word(self) -> Word {
        self.0
    }

    /// Typed register view of the word.
    #[inline]
    #[must_use]
    pub const fn register(self) -> MessageInfoRegister {
        MessageInfoRegister::new(self.0)
    }

    /// Message label.
    #[inline]
    #[must_use]
    pub fn label(self) -> Word {
        self.register().read(MSG_INFO::LABEL)
    }

    /// Bitmask of extra caps unwrapped into badges.
    #[inline]
    #[must_use]
    pub fn caps_unwrapped(self) -> Word {
        self.register().read(MSG_INFO::CAPS_UNWRAPPED)
    }

    /// Number of extra capabilities.
    #[inline]
    #[must_use]
    pub fn extra_caps(self) -> Word {
        self.register().read(MSG_INFO::EXTRA_CAPS)
    }

    /// Number of message registers.
    #[inline]
    #[must_use]
    pub fn length(self) -> Word {
        self.register().read(MSG_INFO::LENGTH)
    }

    fn with(self, field: FieldValue<Word, MSG_INFO::Register>) -> Self {
        let mut reg = self.register();
        reg.modify(field);
        Self(reg.get())
    }

    /// Replace the label (truncated).
    #[inline]
    #[must_use]
    pub fn with_label(self, label: Word) -> Self {
        self.with(MSG_INFO::LABEL.val(label))
    }

    /// Replace the unwrapped-caps mask (truncated).
    #[inline]
    #[must_use]
    pub fn with_caps_unwrapped(self, caps_unwrapped: Word) -> Self {
        self.with(MSG_INFO::CAPS_UNWRAPPED.val(caps_unwrapped))
    }

    /// Replace the extra-cap count (truncated).
    #[inline]
    #[must_use]
    pub fn with_extra_caps(self, extra_caps: Word) -> Self {
        self.with(MSG_INFO::EXTRA_CAPS.val(extra_caps))
    }

    /// Replace the length (truncated).
    #[inline]
    #[must_use]
    pub fn with_length(self, length: Word) -> Self {
        self.with(MSG_INFO::LENGTH.val(length))
    }

    /// Unpack into `(label, caps_unwrapped, extra_caps, length)`.
    #[inline]
    #[must_use]
    pub fn fields(self) -> (Word, Word, Word, Word) {
        (
            self.label(),
            self.caps_unwrapped(),
            self.extra_caps(),
            self.length(),
        )
    }

    /// Number of message registers the kernel will actually transfer.
    ///
    /// The length field can hold up to 127, but messages are capped at
    /// [`MSG_MAX_LENGTH`].
    #[inline]
    #[must_use]
    pub fn transfer_length(self) -> usize {
        (self.length() as usize).min(MSG_MAX_LENGTH)
    }
}

impl fmt::Debug for MessageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageInfo")
            .field("label", &self.label())
            .field("caps_unwrapped", &self.caps_unwrapped())
            .field("extra_caps", &self.extra_caps())
            .field("length", &self.length())
            .finish()
    }
}

impl From<MessageInfo> for Word {
    #[inline]
    fn from(info: MessageInfo) -> Self {
        info.0
    }
}

const _: () = assert!(core::mem::size_of::<MessageInfo>() == 4);
