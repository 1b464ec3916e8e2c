//! Capability access rights
//!
//! Rights are independent flags combined with bitwise OR. Interpretation
//! depends on the object type:
//!
//! - **Write**: send on endpoints and notifications, write to frames
//! - **Read**: receive on endpoints and notifications, read from frames
//! - **Grant**: transfer capabilities through IPC
//! - **Transfer-Mint**: request a minted (badged) copy on transfer

use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::types::Word;

/// Access rights for capabilities.
///
/// # Layout
///
/// One word, as passed to the kernel in CNode copy/mint invocations:
/// - Bit 0: Write
/// - Bit 1: Read
/// - Bit 2: Grant
/// - Bit 8: Transfer-Mint
/// - All other bits: reserved (zero)
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct CapRights(Word);

impl CapRights {
    /// No rights.
    pub const NONE: Self = Self(0);

    /// Write permission.
    pub const CAN_WRITE: Self = Self(0x01);

    /// Read permission.
    pub const CAN_READ: Self = Self(0x02);

    /// Grant permission.
    ///
    /// Allows transferring capabilities through IPC.
    pub const CAN_GRANT: Self = Self(0x04);

    /// Write, read and grant: every base right.
    pub const ALL_RIGHTS: Self = Self(Self::CAN_WRITE.0 | Self::CAN_READ.0 | Self::CAN_GRANT.0);

    /// Transfer-Mint flag.
    ///
    /// Not a right on the object; marks a transfer that should mint rather
    /// than copy. Kept outside [`ALL_RIGHTS`](Self::ALL_RIGHTS).
    pub const TRANSFER_MINT: Self = Self(0x100);

    /// Read and write.
    pub const RW: Self = Self(Self::CAN_READ.0 | Self::CAN_WRITE.0);

    const VALID_MASK: Word = Self::ALL_RIGHTS.0 | Self::TRANSFER_MINT.0;

    /// Create rights from individual flags.
    #[inline]
    #[must_use]
    pub const fn new(write: bool, read: bool, grant: bool) -> Self {
        let mut bits = 0;
        if write {
            bits |= Self::CAN_WRITE.0;
        }
        if read {
            bits |= Self::CAN_READ.0;
        }
        if grant {
            bits |= Self::CAN_GRANT.0;
        }
        Self(bits)
    }

    /// Create rights from raw bits.
    ///
    /// Reserved bits are masked off.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: Word) -> Self {
        Self(bits & Self::VALID_MASK)
    }

    /// Get the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> Word {
        self.0
    }

    /// Check for the Write right.
    #[inline]
    #[must_use]
    pub const fn can_write(self) -> bool {
        (self.0 & Self::CAN_WRITE.0) != 0
    }

    /// Check for the Read right.
    #[inline]
    #[must_use]
    pub const fn can_read(self) -> bool {
        (self.0 & Self::CAN_READ.0) != 0
    }

    /// Check for the Grant right.
    #[inline]
    #[must_use]
    pub const fn can_grant(self) -> bool {
        (self.0 & Self::CAN_GRANT.0) != 0
    }

    /// Check for the Transfer-Mint flag.
    #[inline]
    #[must_use]
    pub const fn is_transfer_mint(self) -> bool {
        (self.0 & Self::TRANSFER_MINT.0) != 0
    }

    /// Check if these rights contain all the specified rights.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Intersect rights (logical AND).
    #[inline]
    #[must_use]
    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Union rights (logical OR).
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if every right in `self` is also in `other`.
    #[inline]
    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        (self.0 & !other.0) == 0
    }

    /// Check if no rights are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for CapRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        if self.can_write() {
            list.entry(&"Write");
        }
        if self.can_read() {
            list.entry(&"Read");
        }
        if self.can_grant() {
            list.entry(&"Grant");
        }
        if self.is_transfer_mint() {
            list.entry(&"TransferMint");
        }
        list.finish()
    }
}

impl fmt::Display for CapRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            if self.can_write() { "W" } else { "-" },
            if self.can_read() { "R" } else { "-" },
            if self.can_grant() { "G" } else { "-" },
            if self.is_transfer_mint() { "m" } else { "-" },
        )
    }
}

impl core::ops::BitAnd for CapRights {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect(rhs)
    }
}

impl core::ops::BitOr for CapRights {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for CapRights {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

const _: () = assert!(core::mem::size_of::<CapRights>() == 4);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rights_values() {
        assert_eq!(CapRights::NONE.bits(), 0);
        assert_eq!(CapRights::CAN_WRITE.bits(), 0x01);
        assert_eq!(CapRights::CAN_READ.bits(), 0x02);
        assert_eq!(CapRights::CAN_GRANT.bits(), 0x04);
        assert_eq!(CapRights::ALL_RIGHTS.bits(), 0x07);
        assert_eq!(CapRights::TRANSFER_MINT.bits(), 0x100);
    }

    #[test]
    fn test_all_rights_is_union_of_base_flags() {
        let union = CapRights::CAN_WRITE | CapRights::CAN_READ | CapRights::CAN_GRANT;
        assert_eq!(CapRights::ALL_RIGHTS, union);
    }

    #[test]
    fn test_all_rights_idempotent() {
        let base = [CapRights::CAN_WRITE, CapRights::CAN_READ, CapRights::CAN_GRANT];
        // Every subset of the base flags, including the empty one.
        for mask in 0..(1u32 << base.len()) {
            let mut subset = CapRights::NONE;
            for (i, right) in base.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    subset |= *right;
                }
            }
            assert_eq!(CapRights::ALL_RIGHTS | subset, CapRights::ALL_RIGHTS);
            assert_eq!(
                CapRights::ALL_RIGHTS | subset | subset,
                CapRights::ALL_RIGHTS
            );
        }
    }

    #[test]
    fn test_rights_new() {
        assert_eq!(CapRights::new(true, true, true), CapRights::ALL_RIGHTS);
        assert_eq!(CapRights::new(true, true, false), CapRights::RW);
        assert_eq!(CapRights::new(false, false, false), CapRights::NONE);
    }

    #[test]
    fn test_from_bits_masks_reserved() {
        assert_eq!(CapRights::from_bits(0xFFFF_FFFF).bits(), 0x107);
        assert!(CapRights::from_bits(0x108).is_transfer_mint());
        assert!(!CapRights::ALL_RIGHTS.is_transfer_mint());
    }

    #[test]
    fn test_rights_subset() {
        assert!(CapRights::CAN_READ.is_subset_of(CapRights::ALL_RIGHTS));
        assert!(CapRights::RW.is_subset_of(CapRights::ALL_RIGHTS));
        assert!(!CapRights::CAN_GRANT.is_subset_of(CapRights::RW));
        assert!(CapRights::ALL_RIGHTS.contains(CapRights::RW));
        assert_eq!(CapRights::CAN_READ & CapRights::CAN_WRITE, CapRights::NONE);
    }
}
