//! Kernel object types
//!
//! Object types name what untyped memory can be retyped into. The numeric
//! values are passed to `UntypedRetype` as plain words, so each variant is
//! pinned to the value the kernel uses.
//!
//! The enumeration is split in two. The architecture-independent types come
//! first; the ARM types continue the numbering from
//! [`NON_ARCH_OBJECT_TYPE_COUNT`]. The two halves are only meaningful
//! together and must not be renumbered independently.

use crate::types::Word;

/// Number of architecture-independent object types.
pub const NON_ARCH_OBJECT_TYPE_COUNT: Word = 5;

/// Architecture-independent kernel object types.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Untyped memory.
    Untyped = 0,
    /// Thread control block.
    Tcb = 1,
    /// Synchronous IPC endpoint.
    Endpoint = 2,
    /// Asynchronous notification.
    Notification = 3,
    /// CNode (capability table).
    CapTable = 4,
}

/// ARM object types, numbered after the generic ones.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchObjectType {
    /// 4 KiB frame.
    SmallPage = NON_ARCH_OBJECT_TYPE_COUNT,
    /// 64 KiB frame.
    LargePage = NON_ARCH_OBJECT_TYPE_COUNT + 1,
    /// 1 MiB section.
    Section = NON_ARCH_OBJECT_TYPE_COUNT + 2,
    /// 16 MiB supersection.
    SuperSection = NON_ARCH_OBJECT_TYPE_COUNT + 3,
    /// Second-level page table.
    PageTable = NON_ARCH_OBJECT_TYPE_COUNT + 4,
    /// First-level page directory (address space root).
    PageDirectory = NON_ARCH_OBJECT_TYPE_COUNT + 5,
}

/// Total number of object types, generic and ARM.
pub const OBJECT_TYPE_COUNT: Word = ArchObjectType::PageDirectory as Word + 1;

impl ObjectType {
    /// All generic object types in numeric order.
    pub const ALL: [Self; NON_ARCH_OBJECT_TYPE_COUNT as usize] = [
        Self::Untyped,
        Self::Tcb,
        Self::Endpoint,
        Self::Notification,
        Self::CapTable,
    ];

    /// Get the raw value.
    #[inline]
    #[must_use]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Try to convert from a raw value.
    pub fn from_raw(value: Word) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Get the type name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Untyped => "Untyped",
            Self::Tcb => "TCB",
            Self::Endpoint => "Endpoint",
            Self::Notification => "Notification",
            Self::CapTable => "CapTable",
        }
    }
}

impl ArchObjectType {
    /// All ARM object types in numeric order.
    pub const ALL: [Self; (OBJECT_TYPE_COUNT - NON_ARCH_OBJECT_TYPE_COUNT) as usize] = [
        Self::SmallPage,
        Self::LargePage,
        Self::Section,
        Self::SuperSection,
        Self::PageTable,
        Self::PageDirectory,
    ];

    /// Get the raw value.
    #[inline]
    #[must_use]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Try to convert from a raw value.
    pub fn from_raw(value: Word) -> Option<Self> {
        let offset = value.checked_sub(NON_ARCH_OBJECT_TYPE_COUNT)?;
        Self::ALL.get(offset as usize).copied()
    }

    /// Size of the object in bits (log2 bytes).
    pub const fn size_bits(self) -> u8 {
        match self {
            Self::SmallPage => 12,
            Self::LargePage => 16,
            Self::Section => 20,
            Self::SuperSection => 24,
            Self::PageTable => 10,
            Self::PageDirectory => 14,
        }
    }

    /// Check whether this is a frame type that can be mapped as a page.
    pub const fn is_frame(self) -> bool {
        matches!(
            self,
            Self::SmallPage | Self::LargePage | Self::Section | Self::SuperSection
        )
    }

    /// Get the type name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmallPage => "ARM_SmallPage",
            Self::LargePage => "ARM_LargePage",
            Self::Section => "ARM_Section",
            Self::SuperSection => "ARM_SuperSection",
            Self::PageTable => "ARM_PageTable",
            Self::PageDirectory => "ARM_PageDirectory",
        }
    }
}

/// Any object type, generic or ARM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnyObjectType {
    /// Architecture-independent type.
    Generic(ObjectType),
    /// ARM type.
    Arch(ArchObjectType),
}

impl AnyObjectType {
    /// Try to convert from a raw value.
    pub fn from_raw(value: Word) -> Option<Self> {
        ObjectType::from_raw(value)
            .map(Self::Generic)
            .or_else(|| ArchObjectType::from_raw(value).map(Self::Arch))
    }

    /// Get the raw value.
    #[must_use]
    pub const fn as_word(self) -> Word {
        match self {
            Self::Generic(t) => t.as_word(),
            Self::Arch(t) => t.as_word(),
        }
    }

    /// Get the type name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generic(t) => t.name(),
            Self::Arch(t) => t.name(),
        }
    }
}

impl From<ObjectType> for AnyObjectType {
    fn from(t: ObjectType) -> Self {
        Self::Generic(t)
    }
}

impl From<ArchObjectType> for AnyObjectType {
    fn from(t: ArchObjectType) -> Self {
        Self::Arch(t)
    }
}

const _: () = {
    assert!(ArchObjectType::SmallPage as Word == NON_ARCH_OBJECT_TYPE_COUNT);
    assert!(OBJECT_TYPE_COUNT == 11);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_values() {
        assert_eq!(ObjectType::Untyped as Word, 0);
        assert_eq!(ObjectType::Tcb as Word, 1);
        assert_eq!(ObjectType::Endpoint as Word, 2);
        assert_eq!(ObjectType::Notification as Word, 3);
        assert_eq!(ObjectType::CapTable as Word, 4);
    }

    #[test]
    fn test_arch_values_follow_generic() {
        for (offset, t) in ArchObjectType::ALL.iter().enumerate() {
            assert_eq!(t.as_word(), NON_ARCH_OBJECT_TYPE_COUNT + offset as Word);
        }
    }

    #[test]
    fn test_from_raw() {
        for t in ObjectType::ALL {
            assert_eq!(ObjectType::from_raw(t.as_word()), Some(t));
        }
        for t in ArchObjectType::ALL {
            assert_eq!(ArchObjectType::from_raw(t.as_word()), Some(t));
            assert_eq!(ObjectType::from_raw(t.as_word()), None);
        }
        assert_eq!(ArchObjectType::from_raw(4), None);
        assert_eq!(AnyObjectType::from_raw(OBJECT_TYPE_COUNT), None);
        assert_eq!(
            AnyObjectType::from_raw(9),
            Some(AnyObjectType::Arch(ArchObjectType::PageTable))
        );
    }

    #[test]
    fn test_frame_types() {
        assert!(ArchObjectType::SmallPage.is_frame());
        assert!(!ArchObjectType::PageDirectory.is_frame());
        assert_eq!(ArchObjectType::SmallPage.size_bits(), 12);
    }
}
