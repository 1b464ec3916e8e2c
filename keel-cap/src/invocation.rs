//! Invocation labels
//!
//! An invocation is a message sent to a kernel object capability; the label
//! field of the message-info word selects the operation. A label only
//! makes sense together with the type of the object it is sent to, which
//! [`InvocationLabel::group`] and [`ArchInvocationLabel::group`] report.
//!
//! ARM labels are numbered from [`N_INVOCATION_LABELS`] upward. Adding a
//! generic label shifts every ARM label, which is why the ARM values are
//! written as offsets from the count rather than as literals.

use crate::types::Word;

/// Object group an invocation label is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvocationGroup {
    /// Not a valid operation.
    Invalid,
    /// Untyped memory.
    Untyped,
    /// Thread control block.
    Tcb,
    /// CNode.
    CNode,
    /// IRQ control.
    IrqControl,
    /// IRQ handler.
    IrqHandler,
    /// Domain controller.
    DomainSet,
    /// ARM page directory.
    PageDirectory,
    /// ARM page table.
    PageTable,
    /// ARM frame.
    Page,
    /// ARM ASID control.
    AsidControl,
    /// ARM ASID pool.
    AsidPool,
}

/// Architecture-independent invocation labels.
///
/// Variants carry the kernel's operation names: `<Object><Operation>`.
#[allow(missing_docs)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvocationLabel {
    InvalidInvocation = 0,
    UntypedRetype = 1,
    TcbReadRegisters = 2,
    TcbWriteRegisters = 3,
    TcbCopyRegisters = 4,
    TcbConfigure = 5,
    TcbSetPriority = 6,
    TcbSetIpcBuffer = 7,
    TcbSetSpace = 8,
    TcbSuspend = 9,
    TcbResume = 10,
    TcbBindNotification = 11,
    TcbUnbindNotification = 12,
    CNodeRevoke = 13,
    CNodeDelete = 14,
    CNodeRecycle = 15,
    CNodeCopy = 16,
    CNodeMint = 17,
    CNodeMove = 18,
    CNodeMutate = 19,
    CNodeRotate = 20,
    CNodeSaveCaller = 21,
    IrqIssueIrqHandler = 22,
    IrqInterruptControl = 23,
    IrqAckIrq = 24,
    IrqSetIrqHandler = 25,
    IrqClearIrqHandler = 26,
    DomainSetSet = 27,
}

/// Number of architecture-independent invocation labels.
pub const N_INVOCATION_LABELS: Word = InvocationLabel::DomainSetSet as Word + 1;

/// ARM invocation labels.
#[allow(missing_docs)]
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchInvocationLabel {
    ArmPdCleanData = N_INVOCATION_LABELS,
    ArmPdInvalidateData = N_INVOCATION_LABELS + 1,
    ArmPdCleanInvalidateData = N_INVOCATION_LABELS + 2,
    ArmPdUnifyInstruction = N_INVOCATION_LABELS + 3,
    ArmPageTableMap = N_INVOCATION_LABELS + 4,
    ArmPageTableUnmap = N_INVOCATION_LABELS + 5,
    ArmPageMap = N_INVOCATION_LABELS + 6,
    ArmPageRemap = N_INVOCATION_LABELS + 7,
    ArmPageUnmap = N_INVOCATION_LABELS + 8,
    ArmPageCleanData = N_INVOCATION_LABELS + 9,
    ArmPageInvalidateData = N_INVOCATION_LABELS + 10,
    ArmPageCleanInvalidateData = N_INVOCATION_LABELS + 11,
    ArmPageUnifyInstruction = N_INVOCATION_LABELS + 12,
    ArmPageGetAddress = N_INVOCATION_LABELS + 13,
    ArmAsidControlMakePool = N_INVOCATION_LABELS + 14,
    ArmAsidPoolAssign = N_INVOCATION_LABELS + 15,
}

/// Number of invocation labels, generic and ARM.
pub const N_ARCH_INVOCATION_LABELS: Word = ArchInvocationLabel::ArmAsidPoolAssign as Word + 1;

impl InvocationLabel {
    /// All generic labels in numeric order.
    pub const ALL: [Self; N_INVOCATION_LABELS as usize] = [
        Self::InvalidInvocation,
        Self::UntypedRetype,
        Self::TcbReadRegisters,
        Self::TcbWriteRegisters,
        Self::TcbCopyRegisters,
        Self::TcbConfigure,
        Self::TcbSetPriority,
        Self::TcbSetIpcBuffer,
        Self::TcbSetSpace,
        Self::TcbSuspend,
        Self::TcbResume,
        Self::TcbBindNotification,
        Self::TcbUnbindNotification,
        Self::CNodeRevoke,
        Self::CNodeDelete,
        Self::CNodeRecycle,
        Self::CNodeCopy,
        Self::CNodeMint,
        Self::CNodeMove,
        Self::CNodeMutate,
        Self::CNodeRotate,
        Self::CNodeSaveCaller,
        Self::IrqIssueIrqHandler,
        Self::IrqInterruptControl,
        Self::IrqAckIrq,
        Self::IrqSetIrqHandler,
        Self::IrqClearIrqHandler,
        Self::DomainSetSet,
    ];

    /// Get the raw label value.
    #[inline]
    #[must_use]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Try to convert from a raw label value.
    pub fn from_raw(value: Word) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Object group this label is addressed to.
    pub const fn group(self) -> InvocationGroup {
        match self {
            Self::InvalidInvocation => InvocationGroup::Invalid,
            Self::UntypedRetype => InvocationGroup::Untyped,
            Self::TcbReadRegisters
            | Self::TcbWriteRegisters
            | Self::TcbCopyRegisters
            | Self::TcbConfigure
            | Self::TcbSetPriority
            | Self::TcbSetIpcBuffer
            | Self::TcbSetSpace
            | Self::TcbSuspend
            | Self::TcbResume
            | Self::TcbBindNotification
            | Self::TcbUnbindNotification => InvocationGroup::Tcb,
            Self::CNodeRevoke
            | Self::CNodeDelete
            | Self::CNodeRecycle
            | Self::CNodeCopy
            | Self::CNodeMint
            | Self::CNodeMove
            | Self::CNodeMutate
            | Self::CNodeRotate
            | Self::CNodeSaveCaller => InvocationGroup::CNode,
            Self::IrqIssueIrqHandler | Self::IrqInterruptControl => InvocationGroup::IrqControl,
            Self::IrqAckIrq | Self::IrqSetIrqHandler | Self::IrqClearIrqHandler => {
                InvocationGroup::IrqHandler
            }
            Self::DomainSetSet => InvocationGroup::DomainSet,
        }
    }
}

impl ArchInvocationLabel {
    /// All ARM labels in numeric order.
    pub const ALL: [Self; (N_ARCH_INVOCATION_LABELS - N_INVOCATION_LABELS) as usize] = [
        Self::ArmPdCleanData,
        Self::ArmPdInvalidateData,
        Self::ArmPdCleanInvalidateData,
        Self::ArmPdUnifyInstruction,
        Self::ArmPageTableMap,
        Self::ArmPageTableUnmap,
        Self::ArmPageMap,
        Self::ArmPageRemap,
        Self::ArmPageUnmap,
        Self::ArmPageCleanData,
        Self::ArmPageInvalidateData,
        Self::ArmPageCleanInvalidateData,
        Self::ArmPageUnifyInstruction,
        Self::ArmPageGetAddress,
        Self::ArmAsidControlMakePool,
        Self::ArmAsidPoolAssign,
    ];

    /// Get the raw label value.
    #[inline]
    #[must_use]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Offset of this label past the generic labels.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> Word {
        self as Word - N_INVOCATION_LABELS
    }

    /// Try to convert from a raw label value.
    pub fn from_raw(value: Word) -> Option<Self> {
        let offset = value.checked_sub(N_INVOCATION_LABELS)?;
        Self::ALL.get(offset as usize).copied()
    }

    /// Object group this label is addressed to.
    pub const fn group(self) -> InvocationGroup {
        match self {
            Self::ArmPdCleanData
            | Self::ArmPdInvalidateData
            | Self::ArmPdCleanInvalidateData
            | Self::ArmPdUnifyInstruction => InvocationGroup::PageDirectory,
            Self::ArmPageTableMap | Self::ArmPageTableUnmap => InvocationGroup::PageTable,
            Self::ArmPageMap
            | Self::ArmPageRemap
            | Self::ArmPageUnmap
            | Self::ArmPageCleanData
            | Self::ArmPageInvalidateData
            | Self::ArmPageCleanInvalidateData
            | Self::ArmPageUnifyInstruction
            | Self::ArmPageGetAddress => InvocationGroup::Page,
            Self::ArmAsidControlMakePool => InvocationGroup::AsidControl,
            Self::ArmAsidPoolAssign => InvocationGroup::AsidPool,
        }
    }
}

/// Any invocation label, generic or ARM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Invocation {
    /// Architecture-independent label.
    Generic(InvocationLabel),
    /// ARM label.
    Arch(ArchInvocationLabel),
}

impl Invocation {
    /// Decode a raw label value.
    pub fn from_raw(value: Word) -> Option<Self> {
        InvocationLabel::from_raw(value)
            .map(Self::Generic)
            .or_else(|| ArchInvocationLabel::from_raw(value).map(Self::Arch))
    }

    /// Get the raw label value.
    #[must_use]
    pub const fn as_word(self) -> Word {
        match self {
            Self::Generic(l) => l.as_word(),
            Self::Arch(l) => l.as_word(),
        }
    }

    /// Object group this label is addressed to.
    pub const fn group(self) -> InvocationGroup {
        match self {
            Self::Generic(l) => l.group(),
            Self::Arch(l) => l.group(),
        }
    }
}

// ARM labels sit directly after the generic ones, one apart.
const _: () = {
    let mut i = 0;
    while i < ArchInvocationLabel::ALL.len() {
        assert!(ArchInvocationLabel::ALL[i] as Word == N_INVOCATION_LABELS + i as Word);
        i += 1;
    }
    let mut i = 0;
    while i < InvocationLabel::ALL.len() {
        assert!(InvocationLabel::ALL[i] as Word == i as Word);
        i += 1;
    }
    assert!(N_INVOCATION_LABELS == 28);
    assert!(N_ARCH_INVOCATION_LABELS == 44);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arch_labels_offset_from_count() {
        for (offset, label) in ArchInvocationLabel::ALL.iter().enumerate() {
            assert_eq!(label.as_word(), N_INVOCATION_LABELS + offset as Word);
            assert_eq!(label.offset(), offset as Word);
        }
        assert_eq!(
            ArchInvocationLabel::ArmPdCleanData.as_word(),
            N_INVOCATION_LABELS
        );
    }

    #[test]
    fn test_generic_labels_dense() {
        for (value, label) in InvocationLabel::ALL.iter().enumerate() {
            assert_eq!(label.as_word(), value as Word);
        }
        assert_eq!(InvocationLabel::CNodeMint.as_word(), 17);
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(
            Invocation::from_raw(1),
            Some(Invocation::Generic(InvocationLabel::UntypedRetype))
        );
        assert_eq!(
            Invocation::from_raw(N_INVOCATION_LABELS),
            Some(Invocation::Arch(ArchInvocationLabel::ArmPdCleanData))
        );
        assert_eq!(Invocation::from_raw(N_ARCH_INVOCATION_LABELS), None);
        assert_eq!(InvocationLabel::from_raw(N_INVOCATION_LABELS), None);
        assert_eq!(ArchInvocationLabel::from_raw(N_INVOCATION_LABELS - 1), None);
    }

    #[test]
    fn test_groups() {
        assert_eq!(InvocationLabel::TcbResume.group(), InvocationGroup::Tcb);
        assert_eq!(InvocationLabel::CNodeCopy.group(), InvocationGroup::CNode);
        assert_eq!(InvocationLabel::IrqAckIrq.group(), InvocationGroup::IrqHandler);
        assert_eq!(
            ArchInvocationLabel::ArmPageGetAddress.group(),
            InvocationGroup::Page
        );
        assert_eq!(
            Invocation::Arch(ArchInvocationLabel::ArmAsidPoolAssign).group(),
            InvocationGroup::AsidPool
        );
    }
}
