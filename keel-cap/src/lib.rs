//! Keel capability and object metadata
//!
//! This crate defines the data half of the Keel kernel ABI: the primitive
//! word and capability pointer types, and every closed enumeration whose
//! numeric values cross the user/kernel boundary.
//!
//! Nothing here performs a syscall. The kernel produces error codes, fault
//! types and lookup failures; user code only needs to name and compare
//! them. The numeric identity of each variant is the contract, so every
//! enumeration is explicitly numbered and checked at compile time.
//!
//! # Core Types
//!
//! - [`Word`], [`CPtr`]: primitive ABI types
//! - [`CapRights`]: access rights passed to copy/mint invocations
//! - [`CapData`]: capability transfer word (badge or guard)
//! - [`ObjectType`], [`ArchObjectType`]: retype targets
//! - [`InvocationLabel`], [`ArchInvocationLabel`]: object operations
//! - [`KernelError`]: invocation error codes
//! - [`FaultType`], [`LookupFailureType`]: fault classification
//!
//! # Layout
//!
//! The target ABI is 32-bit ARM. A [`Word`] is 32 bits on every host, so
//! the layouts and assertions in this crate hold when it is compiled for
//! host-side tests as well.

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

mod cap_data;
mod error;
mod fault;
pub mod invocation;
pub mod limits;
pub mod objects;
mod rights;
pub mod root_slots;
mod types;
pub mod vm;

// Re-exports for convenient access
pub use cap_data::{
    BADGE_BITS, CAP_DATA, CapData, CapDataRegister, CapDataTag, GUARD_BITS, GUARD_SIZE_BITS,
};
pub use error::{KernelError, KernelResult};
pub use fault::{FaultType, LookupFailureType};
pub use invocation::{
    ArchInvocationLabel, Invocation, InvocationGroup, InvocationLabel, N_ARCH_INVOCATION_LABELS,
    N_INVOCATION_LABELS,
};
pub use objects::{
    AnyObjectType, ArchObjectType, NON_ARCH_OBJECT_TYPE_COUNT, OBJECT_TYPE_COUNT, ObjectType,
};
pub use rights::CapRights;
pub use root_slots::Slot;
pub use types::{
    ArmAsidControl, ArmAsidPool, ArmPage, ArmPageDirectory, ArmPageTable, CNode, CPtr, DomainSet,
    IrqControl, IrqHandler, SignedWord, Tcb, Untyped, WORD_BYTES, Word,
};
pub use vm::{GLOBALS_FRAME, PageAddressError, PageGetAddress, VmAttributes};
