//! Kernel error codes
//!
//! Codes returned by the kernel in the label of a reply message when an
//! invocation fails. This crate only names them; the kernel produces them
//! and the caller decides what to do. The numeric value is what crosses the
//! user/kernel boundary, so every variant is pinned explicitly.

use core::fmt;

use crate::types::Word;

/// Error codes returned by kernel object invocations.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "kernel errors must be handled"]
pub enum KernelError {
    /// Success.
    NoError = 0,
    /// An argument was invalid for the operation.
    InvalidArgument = 1,
    /// A capability argument was invalid.
    InvalidCapability = 2,
    /// The operation is not permitted on this object.
    IllegalOperation = 3,
    /// A numeric argument was out of range.
    RangeError = 4,
    /// An address or size was not suitably aligned.
    AlignmentError = 5,
    /// A capability lookup failed; see [`LookupFailureType`](crate::LookupFailureType).
    FailedLookup = 6,
    /// The message was shorter than the operation requires.
    TruncatedMessage = 7,
    /// The destination slot must be emptied first.
    DeleteFirst = 8,
    /// Derived capabilities must be revoked first.
    RevokeFirst = 9,
    /// Untyped memory does not have room for the request.
    NotEnoughMemory = 10,
}

impl KernelError {
    /// All codes in numeric order.
    pub const ALL: [Self; 11] = [
        Self::NoError,
        Self::InvalidArgument,
        Self::InvalidCapability,
        Self::IllegalOperation,
        Self::RangeError,
        Self::AlignmentError,
        Self::FailedLookup,
        Self::TruncatedMessage,
        Self::DeleteFirst,
        Self::RevokeFirst,
        Self::NotEnoughMemory,
    ];

    /// Convert to the raw word.
    #[inline]
    pub const fn as_word(self) -> Word {
        self as Word
    }

    /// Check if this represents success.
    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// Check if this represents an error.
    #[inline]
    pub const fn is_err(self) -> bool {
        !self.is_ok()
    }

    /// Try to convert from a raw word.
    pub fn from_raw(value: Word) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Turn the code into a `Result`, `NoError` being `Ok`.
    #[inline]
    pub const fn into_result(self) -> KernelResult {
        match self {
            Self::NoError => Ok(()),
            err => Err(err),
        }
    }

    /// Get the error name for logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoError => "NoError",
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidCapability => "InvalidCapability",
            Self::IllegalOperation => "IllegalOperation",
            Self::RangeError => "RangeError",
            Self::AlignmentError => "AlignmentError",
            Self::FailedLookup => "FailedLookup",
            Self::TruncatedMessage => "TruncatedMessage",
            Self::DeleteFirst => "DeleteFirst",
            Self::RevokeFirst => "RevokeFirst",
            Self::NotEnoughMemory => "NotEnoughMemory",
        }
    }

    /// Get a short description of the error.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoError => "no error",
            Self::InvalidArgument => "invalid argument",
            Self::InvalidCapability => "invalid capability",
            Self::IllegalOperation => "illegal operation",
            Self::RangeError => "argument out of range",
            Self::AlignmentError => "alignment requirement not met",
            Self::FailedLookup => "capability lookup failed",
            Self::TruncatedMessage => "message truncated",
            Self::DeleteFirst => "destination slot must be deleted first",
            Self::RevokeFirst => "capability must be revoked first",
            Self::NotEnoughMemory => "not enough untyped memory",
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result type for kernel invocations.
pub type KernelResult<T = ()> = Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_values() {
        for (value, err) in KernelError::ALL.iter().enumerate() {
            assert_eq!(err.as_word(), value as Word);
        }
        assert_eq!(KernelError::NotEnoughMemory.as_word(), 10);
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(KernelError::from_raw(6), Some(KernelError::FailedLookup));
        assert_eq!(KernelError::from_raw(11), None);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(KernelError::NoError.into_result(), Ok(()));
        assert_eq!(
            KernelError::RevokeFirst.into_result(),
            Err(KernelError::RevokeFirst)
        );
        assert!(KernelError::DeleteFirst.is_err());
    }
}
