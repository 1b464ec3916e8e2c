//! Capability transfer data
//!
//! When minting or mutating a capability, the caller passes one extra word
//! whose meaning depends on the target object:
//!
//! - For endpoints and notifications it is a **badge**, delivered to the
//!   receiver so it can tell senders apart.
//! - For CNodes it is a **guard**: a guard value plus the number of guard
//!   bits consumed when resolving CPtrs through that CNode.
//!
//! The word is not self-describing. The caller and the kernel both infer
//! the interpretation from the object being minted, so the tag
//! ([`CapDataTag`]) travels out of band.

use core::fmt;

use tock_registers::{LocalRegisterCopy, register_bitfields};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::types::Word;

/// Which interpretation of a [`CapData`] word applies.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapDataTag {
    /// The word is a badge.
    Badge = 0,
    /// The word is a guard value and guard size.
    Guard = 1,
}

impl CapDataTag {
    /// Try to convert from a raw value.
    pub fn from_raw(value: Word) -> Option<Self> {
        match value {
            0 => Some(Self::Badge),
            1 => Some(Self::Guard),
            _ => None,
        }
    }
}

/// Width of a badge in bits.
pub const BADGE_BITS: u32 = 28;
/// Width of the guard-size field in bits.
pub const GUARD_SIZE_BITS: u32 = 5;
/// Width of the guard value in bits.
pub const GUARD_BITS: u32 = 18;

register_bitfields![u32,
    /// Capability transfer word. `BADGE` overlaps the guard fields; which
    /// applies depends on the object being minted.
    pub CAP_DATA [
        /// Badge: bits 0-27
        BADGE OFFSET(0) NUMBITS(28) [],
        /// Guard size: bits 0-4
        GUARD_SIZE OFFSET(0) NUMBITS(5) [],
        /// Guard value: bits 8-25
        GUARD OFFSET(8) NUMBITS(18) []
    ]
];

/// Typed view of a capability transfer word.
pub type CapDataRegister = LocalRegisterCopy<Word, CAP_DATA::Register>;

const _: () = {
    use CAP_DATA::{BADGE, GUARD, GUARD_SIZE};

    assert!(BADGE.mask == (1 << BADGE_BITS) - 1);
    assert!(GUARD_SIZE.mask == (1 << GUARD_SIZE_BITS) - 1);
    assert!(GUARD.mask == (1 << GUARD_BITS) - 1);
    assert!((GUARD_SIZE.mask << GUARD_SIZE.shift) & (GUARD.mask << GUARD.shift) == 0);
};

/// Capability transfer word: a badge or a guard.
///
/// Values are masked to their field widths on construction, in the same
/// way as the message-info word.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct CapData(Word);

impl CapData {
    /// The zero badge, used when no data is to be applied.
    pub const NIL: Self = Self(0);

    /// Build a badge word.
    #[inline]
    #[must_use]
    pub fn badge(badge: Word) -> Self {
        let mut reg = CapDataRegister::new(0);
        reg.write(CAP_DATA::BADGE.val(badge));
        Self(reg.get())
    }

    /// Build a guard word from a guard value and a guard size in bits.
    #[inline]
    #[must_use]
    pub fn guard(guard: Word, guard_size: Word) -> Self {
        let mut reg = CapDataRegister::new(0);
        reg.write(CAP_DATA::GUARD.val(guard) + CAP_DATA::GUARD_SIZE.val(guard_size));
        Self(reg.get())
    }

    /// Build from a tag and the raw field values.
    ///
    /// For [`CapDataTag::Guard`], `value` is the guard and `guard_size`
    /// the size; for [`CapDataTag::Badge`], `guard_size` is ignored.
    #[inline]
    #[must_use]
    pub fn new(tag: CapDataTag, value: Word, guard_size: Word) -> Self {
        match tag {
            CapDataTag::Badge => Self::badge(value),
            CapDataTag::Guard => Self::guard(value, guard_size),
        }
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
    pub const fn register(self) -> CapDataRegister {
        CapDataRegister::new(self.0)
    }

    /// Read the word as a badge.
    #[inline]
    #[must_use]
    pub fn badge_value(self) -> Word {
        self.register().read(CAP_DATA::BADGE)
    }

    /// Read the word as a guard value.
    #[inline]
    #[must_use]
    pub fn guard_value(self) -> Word {
        self.register().read(CAP_DATA::GUARD)
    }

    /// Read the word as a guard size.
    #[inline]
    #[must_use]
    pub fn guard_size(self) -> Word {
        self.register().read(CAP_DATA::GUARD_SIZE)
    }
}

impl fmt::Debug for CapData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapData({:#010x})", self.0)
    }
}

impl From<CapData> for Word {
    #[inline]
    fn from(data: CapData) -> Self {
        data.0
    }
}

const _: () = assert!(core::mem::size_of::<CapData>() == 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_is_zero() {
        assert_eq!(CapData::NIL.word(), 0);
        assert_eq!(CapData::default(), CapData::NIL);
    }

    #[test]
    fn test_badge() {
        let data = CapData::badge(0x1234);
        assert_eq!(data.word(), 0x1234);
        assert_eq!(data.badge_value(), 0x1234);
    }

    #[test]
    fn test_badge_masked() {
        let data = CapData::badge(0xFFFF_FFFF);
        assert_eq!(data.badge_value(), (1 << BADGE_BITS) - 1);
        assert_eq!(data.word() >> BADGE_BITS, 0);
    }

    #[test]
    fn test_guard() {
        let data = CapData::guard(0x2A, 20);
        assert_eq!(data.guard_value(), 0x2A);
        assert_eq!(data.guard_size(), 20);
        assert_eq!(data.word(), (0x2A << 8) | 20);
    }

    #[test]
    fn test_guard_masked() {
        let data = CapData::guard(1 << GUARD_BITS, 1 << GUARD_SIZE_BITS);
        assert_eq!(data.word(), 0);
    }

    #[test]
    fn test_register_view() {
        let reg = CapData::guard(0x15, 7).register();
        assert_eq!(reg.read(CAP_DATA::GUARD), 0x15);
        assert_eq!(reg.read(CAP_DATA::GUARD_SIZE), 7);
        assert!(reg.matches_all(CAP_DATA::GUARD.val(0x15)));
    }

    #[test]
    fn test_tag() {
        assert_eq!(CapDataTag::from_raw(0), Some(CapDataTag::Badge));
        assert_eq!(CapDataTag::from_raw(1), Some(CapDataTag::Guard));
        assert_eq!(CapDataTag::from_raw(2), None);
        assert_eq!(CapData::new(CapDataTag::Badge, 7, 3), CapData::badge(7));
        assert_eq!(CapData::new(CapDataTag::Guard, 7, 3), CapData::guard(7, 3));
    }
}
