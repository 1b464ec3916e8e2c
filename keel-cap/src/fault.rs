//! Fault and lookup-failure classification
//!
//! When a thread traps in a way the kernel cannot complete, the kernel
//! sends a fault message to the thread's fault handler instead. The label
//! of that message is a [`FaultType`]. Capability faults and failed
//! lookups carry a [`LookupFailureType`] describing where CPtr resolution
//! stopped.

use core::fmt;

use crate::types::Word;

/// Why a thread was delivered to its fault handler.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultType {
    /// No fault.
    NoFault = 0,
    /// Capability lookup or invocation failed during a syscall.
    CapFault = 1,
    /// Virtual memory access fault.
    VmFault = 2,
    /// The syscall number was not recognised.
    UnknownSyscall = 3,
    /// The CPU raised an exception the kernel does not handle.
    UserException = 4,
}

impl FaultType {
    /// All fault types in numeric order.
    pub const ALL: [Self; 5] = [
        Self::NoFault,
        Self::CapFault,
        Self::VmFault,
        Self::UnknownSyscall,
        Self::UserException,
    ];

    /// Try to convert from a raw word.
    pub fn from_raw(value: Word) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Get the raw word.
    #[inline]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Get the fault name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoFault => "NoFault",
            Self::CapFault => "CapFault",
            Self::VmFault => "VMFault",
            Self::UnknownSyscall => "UnknownSyscall",
            Self::UserException => "UserException",
        }
    }
}

impl fmt::Display for FaultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where CPtr resolution failed.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LookupFailureType {
    /// The lookup succeeded.
    NoFailure = 0,
    /// The root CNode capability was invalid.
    InvalidRoot = 1,
    /// A slot on the path held no capability.
    MissingCapability = 2,
    /// The requested depth did not match the bits consumed.
    DepthMismatch = 3,
    /// A CNode guard did not match the CPtr bits.
    GuardMismatch = 4,
}

impl LookupFailureType {
    /// All lookup failure types in numeric order.
    pub const ALL: [Self; 5] = [
        Self::NoFailure,
        Self::InvalidRoot,
        Self::MissingCapability,
        Self::DepthMismatch,
        Self::GuardMismatch,
    ];

    /// Try to convert from a raw word.
    pub fn from_raw(value: Word) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Get the raw word.
    #[inline]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Get the failure name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoFailure => "NoFailure",
            Self::InvalidRoot => "InvalidRoot",
            Self::MissingCapability => "MissingCapability",
            Self::DepthMismatch => "DepthMismatch",
            Self::GuardMismatch => "GuardMismatch",
        }
    }
}

impl fmt::Display for LookupFailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
