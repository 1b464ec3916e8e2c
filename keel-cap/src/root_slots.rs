//! Initial thread capability slot layout
//!
//! Defines the well-known capability slots the kernel populates in the
//! initial thread's CSpace. Every bootstrapped thread can use these
//! without any lookup; all other initial capabilities are described by
//! regions in the boot info.

use crate::types::{CPtr, Word};

/// Well-known capability slot indices in the initial thread's CSpace.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    /// Null capability.
    Null = 0,
    /// Initial thread's TCB.
    InitThreadTcb = 1,
    /// Initial thread's root CNode.
    InitThreadCNode = 2,
    /// Initial thread's page directory.
    InitThreadPd = 3,
    /// Global IRQ controller.
    IrqControl = 4,
    /// Global ASID controller.
    AsidControl = 5,
    /// Initial thread's ASID pool.
    InitThreadAsidPool = 6,
    /// Global IO port capability (null if unsupported).
    IoPort = 7,
    /// Global IO space capability (null without an IOMMU).
    IoSpace = 8,
    /// Boot info frame.
    BootInfoFrame = 9,
    /// Initial thread's IPC buffer frame.
    InitThreadIpcBuffer = 10,
    /// Global domain controller.
    Domain = 11,
}

/// Number of well-known slots; the first slot the boot info may describe.
pub const NUM_INITIAL_CAPS: Word = Slot::Domain as Word + 1;

impl Slot {
    /// All well-known slots in index order.
    pub const ALL: [Self; NUM_INITIAL_CAPS as usize] = [
        Self::Null,
        Self::InitThreadTcb,
        Self::InitThreadCNode,
        Self::InitThreadPd,
        Self::IrqControl,
        Self::AsidControl,
        Self::InitThreadAsidPool,
        Self::IoPort,
        Self::IoSpace,
        Self::BootInfoFrame,
        Self::InitThreadIpcBuffer,
        Self::Domain,
    ];

    /// Get the slot index.
    #[inline]
    pub const fn index(self) -> Word {
        self as Word
    }

    /// Get a CPtr naming this slot in the initial CSpace.
    #[inline]
    pub const fn cptr(self) -> CPtr {
        CPtr::from_raw(self as Word)
    }

    /// Look up the well-known slot at `index`.
    pub fn from_index(index: Word) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// Null capability.
pub const CAP_NULL: CPtr = Slot::Null.cptr();
/// Initial thread's TCB.
pub const CAP_INIT_THREAD_TCB: CPtr = Slot::InitThreadTcb.cptr();
/// Initial thread's root CNode.
pub const CAP_INIT_THREAD_CNODE: CPtr = Slot::InitThreadCNode.cptr();
/// Initial thread's page directory.
pub const CAP_INIT_THREAD_PD: CPtr = Slot::InitThreadPd.cptr();
/// Global IRQ controller.
pub const CAP_IRQ_CONTROL: CPtr = Slot::IrqControl.cptr();
/// Global ASID controller.
pub const CAP_ASID_CONTROL: CPtr = Slot::AsidControl.cptr();
/// Initial thread's ASID pool.
pub const CAP_INIT_THREAD_ASID_POOL: CPtr = Slot::InitThreadAsidPool.cptr();
/// Global IO port capability.
pub const CAP_IO_PORT: CPtr = Slot::IoPort.cptr();
/// Global IO space capability.
pub const CAP_IO_SPACE: CPtr = Slot::IoSpace.cptr();
/// Boot info frame.
pub const CAP_BOOT_INFO_FRAME: CPtr = Slot::BootInfoFrame.cptr();
/// Initial thread's IPC buffer frame.
pub const CAP_INIT_THREAD_IPC_BUFFER: CPtr = Slot::InitThreadIpcBuffer.cptr();
/// Global domain controller.
pub const CAP_DOMAIN: CPtr = Slot::Domain.cptr();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_slots() {
        assert_eq!(CAP_INIT_THREAD_TCB.raw(), 1);
        assert_eq!(CAP_INIT_THREAD_CNODE.raw(), 2);
        assert_eq!(CAP_INIT_THREAD_PD.raw(), 3);
        assert_eq!(CAP_IRQ_CONTROL.raw(), 4);
        assert_eq!(CAP_ASID_CONTROL.raw(), 5);
        assert_eq!(CAP_INIT_THREAD_ASID_POOL.raw(), 6);
        assert_eq!(CAP_BOOT_INFO_FRAME.raw(), 9);
        assert_eq!(CAP_INIT_THREAD_IPC_BUFFER.raw(), 10);
        assert_eq!(CAP_DOMAIN.raw(), 11);
        assert!(CAP_NULL.is_null());
    }

    #[test]
    fn test_slot_indices_dense() {
        for (index, slot) in Slot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), index as Word);
            assert_eq!(Slot::from_index(index as Word), Some(*slot));
        }
        assert_eq!(NUM_INITIAL_CAPS, 12);
        assert_eq!(Slot::from_index(NUM_INITIAL_CAPS), None);
    }
}
