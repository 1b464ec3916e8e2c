//! Syscall traps
//!
//! Inline assembly wrappers for the Keel kernel entry points. Only built
//! for 32-bit ARM with the `userspace` feature enabled.
//!
//! # ARM ABI
//!
//! - r0: destination CPtr
//! - r1: message-info word
//! - r2-r5: message registers 0-3
//! - r7: syscall number
//! - `svc #(number & 0xffffff)`
//!
//! Each wrapper first builds a [`SyscallFrame`] and then loads exactly
//! that frame, so the register image can be checked without hardware.
//!
//! r7 is the frame pointer in Thumb code and cannot be named as an asm
//! operand. It is saved, loaded and restored inside the asm block instead.
//! The 24-bit immediate requires the ARM instruction set.

use keel_cap::{CPtr, Word};

use crate::frame::SyscallFrame;
use crate::ipc_buffer::IpcBuffer;
use crate::message_info::MessageInfo;
use crate::numbers::SyscallId;

/// Load a frame into r0-r5 and r7, then trap with the immediate for `$id`.
///
/// The kernel may overwrite r0-r5, so they are treated as clobbered.
macro_rules! trap {
    ($frame:expr, $id:expr) => {{
        let frame: SyscallFrame = $frame;
        debug_assert!(frame.syscall.as_word() == ($id).as_word());
        log::trace!(
            "syscall {} dest={} info={:?}",
            frame.syscall.name(),
            frame.dest,
            frame.info
        );
        // SAFETY: The trap enters the kernel with the register image above.
        // r7 is restored before the block ends and r0-r5 are declared
        // clobbered. The kernel reads the caller's IPC buffer, which the
        // caller has finished writing.
        unsafe {
            core::arch::asm!(
                "push {{r7}}",
                "mov r7, {id}",
                "svc #{imm}",
                "pop {{r7}}",
                id = in(reg) frame.syscall.as_word(),
                imm = const ($id).swi_immediate(),
                inout("r0") frame.dest.raw() => _,
                inout("r1") frame.info.word() => _,
                inout("r2") frame.mr[0] => _,
                inout("r3") frame.mr[1] => _,
                inout("r4") frame.mr[2] => _,
                inout("r5") frame.mr[3] => _,
            );
        }
    }};
}

/// Signal a notification with a one-word payload.
///
/// Returns once the trap returns. The kernel gives no result: a
/// notification to a missing or invalid capability is dropped.
#[inline]
pub fn notify(dest: CPtr, msg: Word) {
    trap!(SyscallFrame::notify(dest, msg), SyscallId::Send);
}

/// Send the message staged in `buffer`, blocking until it is delivered.
#[inline]
pub fn send(dest: CPtr, info: MessageInfo, buffer: &IpcBuffer) {
    trap!(
        SyscallFrame::send(SyscallId::Send, dest, info, buffer),
        SyscallId::Send
    );
}

/// Send the message staged in `buffer` if a receiver is waiting.
/// Otherwise it is dropped.
#[inline]
pub fn nb_send(dest: CPtr, info: MessageInfo, buffer: &IpcBuffer) {
    trap!(
        SyscallFrame::send(SyscallId::NBSend, dest, info, buffer),
        SyscallId::NBSend
    );
}

/// Give up the rest of the current time slice.
#[inline]
pub fn yield_now() {
    trap!(SyscallFrame::bare(SyscallId::Yield), SyscallId::Yield);
}

/// Write one character to the kernel console (debug kernels only).
#[inline]
pub fn debug_put_char(c: u8) {
    trap!(
        SyscallFrame::debug_put_char(c),
        SyscallId::DebugPutChar
    );
}

/// Halt the system (debug kernels only).
#[inline]
pub fn debug_halt() {
    log::info!("halting");
    trap!(SyscallFrame::bare(SyscallId::DebugHalt), SyscallId::DebugHalt);
}
