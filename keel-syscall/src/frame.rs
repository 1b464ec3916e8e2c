//! Syscall register image
//!
//! The kernel reads syscall arguments from fixed machine registers. On
//! 32-bit ARM the convention is:
//!
//! | Register | Contents |
//! |----------|----------|
//! | `r0` | destination CPtr |
//! | `r1` | message-info word |
//! | `r2`-`r5` | message registers 0-3 |
//! | `r7` | syscall identifier |
//!
//! followed by `swi #(id & 0xffffff)`. [`SyscallFrame`] is the register
//! state immediately before the trap. It is built without touching any
//! hardware, so the exact values each trap wrapper in `invoke` loads can
//! be checked on any host.

use keel_cap::limits::MSG_REGISTER_COUNT;
use keel_cap::{CPtr, Word};

use crate::ipc_buffer::IpcBuffer;
use crate::message_info::MessageInfo;
use crate::numbers::SyscallId;

/// ARM general-purpose registers used by the syscall convention.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArmReg {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R7 = 7,
}

/// Register holding the destination capability.
pub const CAP_REGISTER: ArmReg = ArmReg::R0;
/// Register holding the message-info word.
pub const INFO_REGISTER: ArmReg = ArmReg::R1;
/// Registers holding message registers 0-3.
pub const MSG_REGISTERS: [ArmReg; MSG_REGISTER_COUNT] =
    [ArmReg::R2, ArmReg::R3, ArmReg::R4, ArmReg::R5];
/// Register holding the syscall identifier.
pub const SYSCALL_REGISTER: ArmReg = ArmReg::R7;

/// Register state loaded for a send-style syscall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyscallFrame {
    /// Destination capability (`r0`).
    pub dest: CPtr,
    /// Message-info word (`r1`).
    pub info: MessageInfo,
    /// Message registers 0-3 (`r2`-`r5`).
    pub mr: [Word; MSG_REGISTER_COUNT],
    /// Syscall identifier (`r7`).
    pub syscall: SyscallId,
}

impl SyscallFrame {
    /// Frame for a one-word notification: tag `(0, 0, 0, 1)`, the payload
    /// in message register 0, syscall `Send`.
    #[inline]
    #[must_use]
    pub fn notify(dest: CPtr, msg: Word) -> Self {
        Self {
            dest,
            info: MessageInfo::notify(),
            mr: [msg, 0, 0, 0],
            syscall: SyscallId::Send,
        }
    }

    /// Frame for a send with the first message registers taken from the
    /// caller's IPC buffer. Registers past the message length are loaded
    /// anyway; the kernel ignores them.
    #[inline]
    #[must_use]
    pub fn send(id: SyscallId, dest: CPtr, info: MessageInfo, buffer: &IpcBuffer) -> Self {
        let mut mr = [0; MSG_REGISTER_COUNT];
        mr.copy_from_slice(&buffer.msg[..MSG_REGISTER_COUNT]);
        Self {
            dest,
            info,
            mr,
            syscall: id,
        }
    }

    /// Frame for a syscall that only needs the identifier.
    #[inline]
    #[must_use]
    pub const fn bare(id: SyscallId) -> Self {
        Self {
            dest: CPtr::NULL,
            info: MessageInfo::from_word(0),
            mr: [0; MSG_REGISTER_COUNT],
            syscall: id,
        }
    }

    /// Frame for printing one character on a debug kernel. The character
    /// travels in `r0`.
    #[inline]
    #[must_use]
    pub const fn debug_put_char(c: u8) -> Self {
        Self {
            dest: CPtr::from_raw(c as Word),
            ..Self::bare(SyscallId::DebugPutChar)
        }
    }

    /// Value loaded into `reg`.
    #[must_use]
    pub const fn register(&self, reg: ArmReg) -> Word {
        match reg {
            ArmReg::R0 => self.dest.raw(),
            ArmReg::R1 => self.info.word(),
            ArmReg::R2 => self.mr[0],
            ArmReg::R3 => self.mr[1],
            ArmReg::R4 => self.mr[2],
            ArmReg::R5 => self.mr[3],
            ArmReg::R7 => self.syscall.as_word(),
        }
    }

    /// Immediate operand for the trap instruction.
    #[inline]
    #[must_use]
    pub const fn swi_immediate(&self) -> Word {
        self.syscall.swi_immediate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_frame() {
        let frame = SyscallFrame::notify(CPtr::from_raw(6), 0);

        assert_eq!(frame.info, MessageInfo::new(0, 0, 0, 1));
        assert_eq!(frame.register(CAP_REGISTER), 6);
        assert_eq!(frame.register(INFO_REGISTER), MessageInfo::new(0, 0, 0, 1).word());
        assert_eq!(frame.register(MSG_REGISTERS[0]), 0);
        assert_eq!(
            frame.register(SYSCALL_REGISTER),
            SyscallId::Send.as_i32() as Word
        );
        assert_eq!(frame.swi_immediate(), 0x00FF_FFFD);
    }

    #[test]
    fn test_notify_payload() {
        let frame = SyscallFrame::notify(CPtr::from_raw(3), 0xDEAD_BEEF);
        assert_eq!(frame.register(ArmReg::R2), 0xDEAD_BEEF);
        assert_eq!(frame.register(ArmReg::R3), 0);
    }

    #[test]
    fn test_register_assignment() {
        assert_eq!(CAP_REGISTER, ArmReg::R0);
        assert_eq!(INFO_REGISTER, ArmReg::R1);
        assert_eq!(MSG_REGISTERS, [ArmReg::R2, ArmReg::R3, ArmReg::R4, ArmReg::R5]);
        assert_eq!(SYSCALL_REGISTER, ArmReg::R7);
    }

    #[test]
    fn test_send_frame_loads_buffer() {
        let mut buffer = IpcBuffer::new();
        for (i, word) in buffer.msg.iter_mut().take(6).enumerate() {
            *word = 10 + i as Word;
        }
        let info = MessageInfo::new(7, 0, 0, 6);
        let frame = SyscallFrame::send(SyscallId::NBSend, CPtr::from_raw(12), info, &buffer);

        assert_eq!(frame.register(ArmReg::R0), 12);
        assert_eq!(frame.register(ArmReg::R1), info.word());
        assert_eq!(frame.mr, [10, 11, 12, 13]);
        assert_eq!(frame.register(ArmReg::R7), SyscallId::NBSend.as_word());
    }

    #[test]
    fn test_bare_frame() {
        let frame = SyscallFrame::bare(SyscallId::Yield);
        assert_eq!(frame.register(ArmReg::R0), 0);
        assert_eq!(frame.register(ArmReg::R7), SyscallId::Yield.as_word());
    }

    #[test]
    fn test_debug_put_char_frame() {
        let frame = SyscallFrame::debug_put_char(b'k');
        assert_eq!(frame.register(ArmReg::R0), b'k' as Word);
        assert_eq!(frame.register(ArmReg::R1), 0);
        assert_eq!(frame.syscall, SyscallId::DebugPutChar);
        assert_eq!(frame.swi_immediate(), 0x00FF_FFF7);
    }
}
