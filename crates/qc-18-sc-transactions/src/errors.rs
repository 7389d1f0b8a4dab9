//! # Error Types
//!
//! All error types for SC payload encoding and decoding.
//!
//! Every error is deterministic for a given input: there is no I/O below this
//! layer, so nothing here is ever worth retrying.

use thiserror::Error;

// =============================================================================
// IDENTIFIER ERRORS
// =============================================================================

/// A fixed-size identifier could not be read from too few bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed {kind}: need {expected} bytes, got {actual}")]
pub struct MalformedIdentifier {
    /// Identifier type name (`ScId`, `RequestId`, ...).
    pub kind: &'static str,
    /// Fixed byte length of the identifier.
    pub expected: usize,
    /// Bytes that were actually available.
    pub actual: usize,
}

/// An identifier could not be parsed from its text form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdentifierError {
    /// The text is not valid in the identifier's encoding.
    #[error("invalid {kind} text: not {encoding}: {reason}")]
    InvalidText {
        /// Identifier type name.
        kind: &'static str,
        /// Text encoding of the identifier (`hex`, `base58`).
        encoding: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// The text decoded to the wrong number of bytes.
    #[error(transparent)]
    Length(#[from] MalformedIdentifier),
}

// =============================================================================
// CODEC ERRORS
// =============================================================================

/// Errors raised by the SC payload codec.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// More request blocks than the 7-bit count field can describe.
    #[error("too many request blocks: {count} > {max}")]
    BoundsExceeded {
        /// Request blocks in the payload.
        count: usize,
        /// Largest count the header can carry.
        max: usize,
    },

    /// Neither a state block nor any request block is present.
    #[error("can't encode empty sc payload")]
    EmptyPayload,

    /// The input ended before a declared structure was complete.
    #[error("truncated data reading {field}: need {needed} bytes, {available} available")]
    TruncatedData {
        /// Structure being read.
        field: &'static str,
        /// Bytes the structure needs.
        needed: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// Header checksum disagrees with the checksum of the first chain id.
    #[error("checksum mismatch: header 0x{expected:08x}, computed 0x{actual:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the header.
        expected: u32,
        /// Checksum computed over the first chain id.
        actual: u32,
    },

    /// A fixed-size identifier could not be read.
    #[error(transparent)]
    MalformedIdentifier(#[from] MalformedIdentifier),

    /// Bytes remain after a structurally complete payload.
    #[error("{remaining} trailing bytes after sc payload")]
    TrailingData {
        /// Bytes left after the last block.
        remaining: usize,
    },

    /// Request body present while the configured framing cannot carry one.
    #[error("request block {index} has a {len}-byte body but framing is unframed")]
    UnframedRequestBody {
        /// Position of the request block.
        index: usize,
        /// Body length.
        len: usize,
    },

    /// Request body longer than the configured limit.
    #[error("request block {index} body too large: {len} > {max} bytes")]
    RequestBodyTooLarge {
        /// Position of the request block.
        index: usize,
        /// Body length.
        len: usize,
        /// Configured limit.
        max: usize,
    },

    /// Codec configuration failed validation.
    #[error("invalid codec config: {0}")]
    InvalidConfig(String),
}

impl CodecError {
    /// Returns true for conditions the caller may choose to tolerate.
    ///
    /// The checksum is a fast-path filter, not an authenticity proof, and outer
    /// framing may legitimately pad the payload.
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. } | Self::TrailingData { .. }
        )
    }
}

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

// =============================================================================
// TESTS
// =============================================================================
