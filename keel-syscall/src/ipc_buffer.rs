//! Per-thread IPC buffer
//!
//! The IPC buffer is a region of memory shared between a thread and the
//! kernel. The thread stages outgoing message words and capabilities here
//! before trapping; the kernel writes received messages back into it.
//!
//! Only the first four message registers travel in machine registers on
//! ARM. The rest of a message, extra capabilities and the receive-slot
//! description are read from this buffer by the kernel during the trap.
//!
//! # Ownership
//!
//! Each thread owns exactly one buffer and is its only user-level writer.
//! The kernel reads it only while that thread is inside a syscall, so no
//! locking is needed.
//!
//! # Memory Layout
//!
//! ```text
//! offset   field
//! 0x000    tag               (message-info word)
//! 0x004    msg[120]
//! 0x1E4    user_data
//! 0x1E8    caps_or_badges[3]
//! 0x1F4    receive_cnode
//! 0x1F8    receive_index
//! 0x1FC    receive_depth
//! 0x200    (end)
//! ```

use core::mem::{offset_of, size_of};

use keel_cap::limits::{MSG_MAX_EXTRA_CAPS, MSG_MAX_LENGTH};
use keel_cap::{CPtr, Word};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::message_info::MessageInfo;

/// Size of the IPC buffer in bytes.
pub const IPC_BUFFER_SIZE: usize = 512;

/// IPC buffer structure.
#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct IpcBuffer {
    /// Message-info word of the current message.
    pub tag: MessageInfo,
    /// Message registers.
    pub msg: [Word; MSG_MAX_LENGTH],
    /// Free for user-level use; the kernel never touches it.
    pub user_data: Word,
    /// Outgoing: CPtrs of extra caps to send. Incoming: badges of caps
    /// that were unwrapped.
    pub caps_or_badges: [Word; MSG_MAX_EXTRA_CAPS],
    /// CNode in which to store a received capability.
    pub receive_cnode: CPtr,
    /// Slot index within `receive_cnode`.
    pub receive_index: CPtr,
    /// Number of bits of `receive_index` to resolve.
    pub receive_depth: Word,
}

impl Default for IpcBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl IpcBuffer {
    /// Create a new zeroed IPC buffer.
    pub const fn new() -> Self {
        Self {
            tag: MessageInfo::from_word(0),
            msg: [0; MSG_MAX_LENGTH],
            user_data: 0,
            caps_or_badges: [0; MSG_MAX_EXTRA_CAPS],
            receive_cnode: CPtr::NULL,
            receive_index: CPtr::NULL,
            receive_depth: 0,
        }
    }

    /// Get message register `index`.
    #[inline]
    pub fn mr(&self, index: usize) -> Option<Word> {
        self.msg.get(index).copied()
    }

    /// Set message register `index`. Returns `false` if out of range.
    #[inline]
    pub fn set_mr(&mut self, index: usize, value: Word) -> bool {
        match self.msg.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Message registers covered by the current tag's length.
    pub fn message(&self) -> &[Word] {
        &self.msg[..self.tag.transfer_length()]
    }

    /// Copy `words` into the message registers and write a tag with the
    /// given label and the staged length.
    ///
    /// Returns the tag. Words beyond [`MSG_MAX_LENGTH`] are not staged
    /// and are not counted in the length.
    pub fn stage(&mut self, label: Word, words: &[Word]) -> MessageInfo {
        let len = words.len().min(MSG_MAX_LENGTH);
        self.msg[..len].copy_from_slice(&words[..len]);
        let tag = MessageInfo::new(label, 0, 0, len as Word);
        self.tag = tag;
        tag
    }

    /// Set the CPtr of extra capability `index` for the next send.
    #[inline]
    pub fn set_cap(&mut self, index: usize, cptr: CPtr) -> bool {
        match self.caps_or_badges.get_mut(index) {
            Some(slot) => {
                *slot = cptr.raw();
                true
            }
            None => false,
        }
    }

    /// Get the CPtr staged as extra capability `index`.
    #[inline]
    pub fn cap(&self, index: usize) -> Option<CPtr> {
        self.caps_or_badges.get(index).map(|&w| CPtr::from_raw(w))
    }

    /// Get the badge of unwrapped capability `index` from a received
    /// message.
    #[inline]
    pub fn badge(&self, index: usize) -> Option<Word> {
        self.caps_or_badges.get(index).copied()
    }

    /// Describe where a capability received with the next message is
    /// stored.
    #[inline]
    pub fn set_receive_path(&mut self, cnode: CPtr, index: CPtr, depth: Word) {
        self.receive_cnode = cnode;
        self.receive_index = index;
        self.receive_depth = depth;
    }

    /// Get the receive path as `(cnode, index, depth)`.
    #[inline]
    pub fn receive_path(&self) -> (CPtr, CPtr, Word) {
        (self.receive_cnode, self.receive_index, self.receive_depth)
    }

    /// Get the current thread's IPC buffer.
    ///
    /// The kernel keeps the running thread's buffer address in word 0 of
    /// the globals frame.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    /// - The globals frame is mapped at [`GLOBALS_FRAME`](keel_cap::GLOBALS_FRAME)
    /// - The thread has an IPC buffer mapped
    /// - No other reference to the buffer is live
    #[cfg(all(feature = "userspace", target_arch = "arm"))]
    pub unsafe fn current() -> &'static mut Self {
        let globals = keel_cap::GLOBALS_FRAME as usize as *const Word;
        // SAFETY: Caller guarantees the globals frame is mapped; it is
        // read-only to user level and word 0 is the buffer address.
        let addr = unsafe { core::ptr::read_volatile(globals) };
        // SAFETY: Caller guarantees the buffer is mapped and unaliased.
        unsafe { &mut *(addr as usize as *mut Self) }
    }
}

// -- Layout assertions

const _: () = {
    assert!(size_of::<IpcBuffer>() == IPC_BUFFER_SIZE);
    assert!(offset_of!(IpcBuffer, tag) == 0x000);
    assert!(offset_of!(IpcBuffer, msg) == 0x004);
    assert!(offset_of!(IpcBuffer, user_data) == 0x1E4);
    assert!(offset_of!(IpcBuffer, caps_or_badges) == 0x1E8);
    assert!(offset_of!(IpcBuffer, receive_cnode) == 0x1F4);
    assert!(offset_of!(IpcBuffer, receive_index) == 0x1F8);
    assert!(offset_of!(IpcBuffer, receive_depth) == 0x1FC);
    assert!(core::mem::align_of::<IpcBuffer>() == 4);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buffer = IpcBuffer::new();
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_mr_bounds() {
        let mut buffer = IpcBuffer::new();
        assert!(buffer.set_mr(0, 1));
        assert!(buffer.set_mr(MSG_MAX_LENGTH - 1, 2));
        assert!(!buffer.set_mr(MSG_MAX_LENGTH, 3));
        assert_eq!(buffer.mr(0), Some(1));
        assert_eq!(buffer.mr(MSG_MAX_LENGTH - 1), Some(2));
        assert_eq!(buffer.mr(MSG_MAX_LENGTH), None);
    }

    #[test]
    fn test_stage() {
        let mut buffer = IpcBuffer::new();
        let tag = buffer.stage(0x55, &[1, 2, 3]);
        assert_eq!(tag, MessageInfo::new(0x55, 0, 0, 3));
        assert_eq!(buffer.tag, tag);
        assert_eq!(buffer.message(), &[1, 2, 3]);
    }

    #[test]
    fn test_stage_oversized() {
        let mut buffer = IpcBuffer::new();
        let words = [7; MSG_MAX_LENGTH + 5];
        let tag = buffer.stage(0, &words);
        assert_eq!(tag.length() as usize, MSG_MAX_LENGTH);
        assert_eq!(buffer.message().len(), MSG_MAX_LENGTH);
        assert_eq!(buffer.user_data, 0);
    }

    #[test]
    fn test_caps_and_receive_path() {
        let mut buffer = IpcBuffer::new();
        assert!(buffer.set_cap(2, CPtr::from_raw(40)));
        assert!(!buffer.set_cap(3, CPtr::from_raw(41)));
        assert_eq!(buffer.cap(2), Some(CPtr::from_raw(40)));
        assert_eq!(buffer.badge(2), Some(40));
        assert_eq!(buffer.cap(3), None);

        buffer.set_receive_path(CPtr::from_raw(2), CPtr::from_raw(100), 32);
        assert_eq!(
            buffer.receive_path(),
            (CPtr::from_raw(2), CPtr::from_raw(100), 32)
        );
    }

    #[test]
    fn test_byte_view_offsets() {
        let mut buffer = IpcBuffer::new();
        buffer.tag = MessageInfo::new(0, 0, 0, 1);
        buffer.receive_depth = 0xAABB_CCDD;
        let bytes = buffer.as_bytes();
        assert_eq!(&bytes[0..4], &1u32.to_ne_bytes());
        assert_eq!(&bytes[0x1FC..0x200], &0xAABB_CCDDu32.to_ne_bytes());
    }
}
