//! ARM virtual-memory ABI types
//!
//! Mapping attributes passed with `ARMPageMap`/`ARMPageTableMap`, the
//! reply record of `ARMPageGetAddress`, and the fixed address of the
//! kernel's globals frame.

use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::KernelError;
use crate::types::Word;

/// Virtual address of the read-only globals frame mapped into every
/// address space. Word 0 holds the current thread's IPC buffer address.
pub const GLOBALS_FRAME: Word = 0xffff_c000;

/// Mapping attributes for ARM frames and page tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct VmAttributes(Word);

impl VmAttributes {
    /// Uncached, no parity.
    pub const NONE: Self = Self(0);
    /// Map as cacheable memory.
    pub const PAGE_CACHEABLE: Self = Self(0x01);
    /// Enable parity checking.
    pub const PARITY_ENABLED: Self = Self(0x02);
    /// Default attributes: cacheable with parity.
    pub const DEFAULT: Self = Self(Self::PAGE_CACHEABLE.0 | Self::PARITY_ENABLED.0);

    /// Create attributes from raw bits; unknown bits are masked off.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: Word) -> Self {
        Self(bits & Self::DEFAULT.0)
    }

    /// Get the raw bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> Word {
        self.0
    }

    /// Check if every attribute in `other` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl Default for VmAttributes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for VmAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        if self.contains(Self::PAGE_CACHEABLE) {
            list.entry(&"Cacheable");
        }
        if self.contains(Self::PARITY_ENABLED) {
            list.entry(&"Parity");
        }
        list.finish()
    }
}

impl core::ops::BitOr for VmAttributes {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Reply to `ARMPageGetAddress`: an error code and the frame's physical
/// address, valid only when the error is zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PageGetAddress {
    /// Raw [`KernelError`] code.
    pub error: i32,
    /// Physical address of the frame.
    pub paddr: Word,
}

impl PageGetAddress {
    /// Decode the error code. `None` for success; codes outside the known
    /// set are returned as [`PageAddressError::Unknown`].
    pub fn error(&self) -> Option<PageAddressError> {
        match u32::try_from(self.error).ok().and_then(KernelError::from_raw) {
            Some(KernelError::NoError) => None,
            Some(err) => Some(PageAddressError::Kernel(err)),
            None => Some(PageAddressError::Unknown(self.error)),
        }
    }

    /// Interpret the reply: the physical address, or the decoded error.
    pub fn result(&self) -> Result<Word, PageAddressError> {
        match self.error() {
            None => Ok(self.paddr),
            Some(err) => Err(err),
        }
    }
}

/// Failure reported in a [`PageGetAddress`] reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageAddressError {
    /// A known kernel error.
    Kernel(KernelError),
    /// A code the kernel ABI does not define.
    Unknown(i32),
}

impl PageAddressError {
    /// Get the known kernel error, if any.
    pub const fn kernel_error(self) -> Option<KernelError> {
        match self {
            Self::Kernel(err) => Some(err),
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for PageAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kernel(err) => write!(f, "{}", err),
            Self::Unknown(code) => write!(f, "unknown kernel error code {}", code),
        }
    }
}

impl From<KernelError> for PageAddressError {
    fn from(err: KernelError) -> Self {
        Self::Kernel(err)
    }
}

const _: () = {
    assert!(core::mem::size_of::<VmAttributes>() == 4);
    assert!(core::mem::size_of::<PageGetAddress>() == 8);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vm_attributes() {
        assert_eq!(VmAttributes::DEFAULT.bits(), 0x03);
        assert_eq!(
            VmAttributes::PAGE_CACHEABLE | VmAttributes::PARITY_ENABLED,
            VmAttributes::DEFAULT
        );
        assert_eq!(VmAttributes::from_bits(0xFF), VmAttributes::DEFAULT);
        assert_eq!(VmAttributes::default(), VmAttributes::DEFAULT);
    }

    #[test]
    fn test_page_get_address() {
        let ok = PageGetAddress {
            error: 0,
            paddr: 0x8000_0000,
        };
        assert_eq!(ok.error(), None);
        assert_eq!(ok.result(), Ok(0x8000_0000));

        let bad = PageGetAddress {
            error: KernelError::InvalidCapability as i32,
            paddr: 0,
        };
        assert_eq!(
            bad.result(),
            Err(PageAddressError::Kernel(KernelError::InvalidCapability))
        );
    }

    #[test]
    fn test_page_get_address_unknown_code() {
        for code in [-1, 11, 0x7FFF_FFFF] {
            let reply = PageGetAddress { error: code, paddr: 0x1000 };
            let err = reply.result().unwrap_err();
            assert_eq!(err, PageAddressError::Unknown(code));
            assert_eq!(err.kernel_error(), None);
        }
        assert_ne!(
            PageGetAddress { error: -1, paddr: 0 }.result(),
            Err(PageAddressError::Kernel(KernelError::InvalidArgument))
        );
    }
}
