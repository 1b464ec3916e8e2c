//! Keel Syscall ABI
//!
//! Message encoding, the syscall register convention and the fixed-layout
//! records shared between the kernel and user threads.
//! This crate is `no_std`, allowing it to be used in both the kernel and
//! userspace.
//!
//! # Modules
//!
//! - [`message_info`] - Message-info word
//! - [`numbers`] - Syscall numbers
//! - [`frame`] - Syscall register image
//! - `invoke` - Userspace syscall traps (feature-gated, ARM only)
//! - [`ipc_buffer`] - Per-thread IPC buffer
//! - [`boot_info`] - Boot information passed from kernel to the initial thread
//! - [`context`] - User register snapshot
//! - [`event`] - Event source for component connections

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod boot_info;
pub mod context;
pub mod event;
pub mod frame;
#[cfg(all(feature = "userspace", target_arch = "arm"))]
pub mod invoke;
pub mod ipc_buffer;
pub mod message_info;
pub mod numbers;

// Re-export commonly used items
pub use boot_info::{
    BOOT_INFO_SIZE, BootInfo, BootInfoError, BootInfoResult, DeviceRegion, MAX_DEVICE_REGIONS,
    MAX_UNTYPED, RegionKind, SlotRegion, UntypedDesc,
};
pub use context::UserContext;
pub use event::{DEFAULT_EVENT_SLOT, EventEmitter};
pub use frame::{ArmReg, SyscallFrame};
#[cfg(all(feature = "userspace", target_arch = "arm"))]
pub use invoke::notify;
pub use ipc_buffer::{IPC_BUFFER_SIZE, IpcBuffer};
pub use keel_cap::root_slots;
pub use message_info::MessageInfo;
pub use numbers::SyscallId;
