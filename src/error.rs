//! Error types for the KMAC / cSHAKE engine.
//!
//! Every failure here is a deterministic parameter problem: there is nothing
//! transient to retry. Misusing the sponge (absorbing after finalization,
//! squeezing before it) is rejected at compile time by the typestate in
//! [`crate::crypto::sponge`], so it has no runtime variant.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KmacError {
    /// Output length given in bits is not a whole number of bytes.
    #[error("output length of {bits} bits is not a multiple of 8")]
    OutputLengthNotByteAligned { bits: u64 },

    /// Output length does not fit in addressable memory on this target.
    #[error("output length of {bits} bits is too large for this platform")]
    OutputTooLarge { bits: u64 },

    /// Input whose bit length cannot be represented by the length encoders.
    #[error("input of {bytes} bytes is too long to encode")]
    InputTooLong { bytes: usize },

    /// `bytepad` called with `w = 0`.
    #[error("bytepad width must be non-zero")]
    ZeroPadWidth,

    /// Encoded integer shorter than its own length byte claims.
    #[error("truncated integer encoding")]
    TruncatedEncoding,

    /// Length byte outside 1..=8.
    #[error("malformed integer encoding: length byte {0}")]
    MalformedEncoding(u8),
}

impl KmacError {
    /// True for caller-supplied parameters that violate a precondition
    /// (as opposed to a malformed encoding handed to a decoder).
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            KmacError::OutputLengthNotByteAligned { .. }
                | KmacError::OutputTooLarge { .. }
                | KmacError::InputTooLong { .. }
                | KmacError::ZeroPadWidth
        )
    }
}

pub type KmacResult<T> = Result<T, KmacError>;
