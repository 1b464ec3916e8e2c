//! Primitive ABI types
//!
//! Everything crossing the user/kernel boundary is built from the machine
//! [`Word`] and the capability pointer [`CPtr`]. The target ABI is 32-bit
//! ARM, so a word is 32 bits wide regardless of the host compiling this
//! crate.

use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Machine word of the kernel ABI.
pub type Word = u32;

/// Signed counterpart of [`Word`], used for syscall identifiers.
pub type SignedWord = i32;

/// Size of a [`Word`] in bytes.
pub const WORD_BYTES: usize = core::mem::size_of::<Word>();

/// Capability pointer - names a slot in a capability space.
///
/// A CPtr is an opaque integer. It has no arithmetic meaning beyond
/// equality and ordering; the kernel resolves it against the caller's
/// CSpace on every invocation. A CPtr becomes dangling when the capability
/// in the slot it names is deleted or revoked, which the holder cannot
/// observe until the next invocation.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, FromBytes, IntoBytes, Immutable,
    KnownLayout,
)]
#[repr(transparent)]
pub struct CPtr(Word);

impl CPtr {
    /// The null capability pointer (slot 0 holds the null cap).
    pub const NULL: Self = Self(0);

    /// Create a CPtr from a raw word.
    #[inline]
    #[must_use]
    pub const fn from_raw(value: Word) -> Self {
        Self(value)
    }

    /// Get the raw word.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> Word {
        self.0
    }

    /// Check if this is the null CPtr.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for CPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CPtr({:#x})", self.0)
    }
}

impl fmt::Display for CPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<Word> for CPtr {
    #[inline]
    fn from(value: Word) -> Self {
        Self(value)
    }
}

impl From<CPtr> for Word {
    #[inline]
    fn from(cptr: CPtr) -> Self {
        cptr.0
    }
}

// Names for what a CPtr is expected to address. These are documentation
// only; the kernel checks the object type at invocation time.

/// CPtr to a CNode.
pub type CNode = CPtr;
/// CPtr to an IRQ handler.
pub type IrqHandler = CPtr;
/// CPtr to the IRQ control capability.
pub type IrqControl = CPtr;
/// CPtr to a thread control block.
pub type Tcb = CPtr;
/// CPtr to untyped memory.
pub type Untyped = CPtr;
/// CPtr to the domain controller.
pub type DomainSet = CPtr;
/// CPtr to an ARM page frame.
pub type ArmPage = CPtr;
/// CPtr to an ARM second-level page table.
pub type ArmPageTable = CPtr;
/// CPtr to an ARM page directory (address space root).
pub type ArmPageDirectory = CPtr;
/// CPtr to the ARM ASID control capability.
pub type ArmAsidControl = CPtr;
/// CPtr to an ARM ASID pool.
pub type ArmAsidPool = CPtr;

// -- Size assertions

const _: () = {
    assert!(core::mem::size_of::<u8>() == 1);
    assert!(core::mem::size_of::<u16>() == 2);
    assert!(core::mem::size_of::<u32>() == 4);
    assert!(core::mem::size_of::<u64>() == 8);
    assert!(core::mem::size_of::<i32>() == 4);
    assert!(core::mem::size_of::<bool>() == 1);
    assert!(core::mem::size_of::<Word>() == 4);
    assert!(core::mem::size_of::<CPtr>() == 4);
    assert!(core::mem::size_of::<CNode>() == 4);
    assert!(core::mem::size_of::<IrqHandler>() == 4);
    assert!(core::mem::size_of::<IrqControl>() == 4);
    assert!(core::mem::size_of::<Tcb>() == 4);
    assert!(core::mem::size_of::<Untyped>() == 4);
    assert!(core::mem::size_of::<DomainSet>() == 4);
    assert!(core::mem::size_of::<ArmPage>() == 4);
    assert!(core::mem::size_of::<ArmPageTable>() == 4);
    assert!(core::mem::size_of::<ArmPageDirectory>() == 4);
    assert!(core::mem::size_of::<ArmAsidControl>() == 4);
    assert!(core::mem::size_of::<ArmAsidPool>() == 4);
};
