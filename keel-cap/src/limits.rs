//! ABI limits and fixed constants

use crate::types::Word;

/// Bits of the message-info word holding the message length.
pub const MSG_LENGTH_BITS: u32 = 7;

/// Bits of the message-info word holding the extra-cap count.
pub const MSG_EXTRA_CAP_BITS: u32 = 2;

/// Maximum number of message registers in one message.
///
/// Smaller than the 127 the length field could express; lengths above
/// this are truncated by the kernel.
pub const MSG_MAX_LENGTH: usize = 120;

/// Maximum number of extra capabilities in one message.
pub const MSG_MAX_EXTRA_CAPS: usize = (1 << MSG_EXTRA_CAP_BITS) - 1;

/// Number of message registers passed in machine registers on ARM.
pub const MSG_REGISTER_COUNT: usize = 4;

/// Invalid thread priority.
pub const INVALID_PRIO: i32 = -1;

/// Lowest thread priority.
pub const MIN_PRIO: i32 = 0;

/// Highest thread priority.
pub const MAX_PRIO: i32 = 255;

/// Maximum number of objects created by one `UntypedRetype`.
pub const UNTYPED_RETYPE_MAX_OBJECTS: Word = 256;

const _: () = {
    assert!(MSG_MAX_LENGTH < (1 << MSG_LENGTH_BITS));
    assert!(MSG_MAX_EXTRA_CAPS == 3);
    assert!(MSG_REGISTER_COUNT <= MSG_MAX_LENGTH);
};
