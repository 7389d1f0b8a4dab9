//! # Payload Header
//!
//! The 5-byte frame header: one meta byte followed by a big-endian CRC-32
//! (IEEE) of the first block's 65-byte chain id.
//!
//! ```text
//! byte 0      meta   bit 7 = has state block, bits 6..0 = request count
//! bytes 1..5  crc32  over the chain id that starts at byte 5
//! ```
//!
//! Because the first block always starts with its chain id, the checksum
//! covers bytes `5..70` of every valid payload. That is what lets
//! [`looks_like_sc_payload`] recognise SC payloads without parsing them.

use super::reader::PayloadReader;
use crate::domain::SC_ID_LENGTH;
use crate::errors::{CodecError, Result};

/// Meta byte flag for "a state block follows the header".
pub const STATE_BLOCK_MASK: u8 = 0x80;
/// Meta byte bits holding the request block count.
pub const REQUEST_COUNT_MASK: u8 = 0x7F;
/// Maximum number of request blocks in one payload.
pub const MAX_REQUEST_BLOCKS: usize = REQUEST_COUNT_MASK as usize;
/// Meta byte + checksum.
pub const HEADER_LENGTH: usize = 1 + 4;
/// Shortest byte sequence that can be an SC payload.
pub const MIN_PAYLOAD_LENGTH: usize = HEADER_LENGTH + SC_ID_LENGTH;

// =============================================================================
// META BYTE
// =============================================================================

/// Packs the state-block flag and request count into one byte.
pub fn encode_meta(has_state: bool, count: u8) -> Result<u8> {
    if usize::from(count) > MAX_REQUEST_BLOCKS {
        return Err(CodecError::BoundsExceeded {
            count: usize::from(count),
            max: MAX_REQUEST_BLOCKS,
        });
    }
    let mut meta = count;
    if has_state {
        meta |= STATE_BLOCK_MASK;
    }
    Ok(meta)
}

/// Exact inverse of [`encode_meta`].
pub fn decode_meta(meta: u8) -> (bool, u8) {
    (meta & STATE_BLOCK_MASK != 0, meta & REQUEST_COUNT_MASK)
}

// =============================================================================
// CHECKSUM
// =============================================================================

/// CRC-32 over a chain id.
pub fn encode_checksum(scid_bytes: &[u8; SC_ID_LENGTH]) -> u32 {
    crc32fast::hash(scid_bytes)
}

/// Sniff test: true if `data` plausibly is an SC payload.
///
/// Never rejects a payload produced by the encoder. May accept unrelated data
/// whose bytes collide with the checksum. Does not allocate.
pub fn looks_like_sc_payload(data: &[u8]) -> bool {
    checksum_fields(data).is_some_and(|(given, computed)| given == computed)
}

/// Returns `(header checksum, checksum of bytes 5..70)` if `data` is long
/// enough to hold both.
pub(crate) fn checksum_fields(data: &[u8]) -> Option<(u32, u32)> {
    if data.len() < MIN_PAYLOAD_LENGTH {
        return None;
    }
    let given = u32::from_be_bytes([data[1], data[2], data[3], data[4]]);
    let computed = crc32fast::hash(&data[HEADER_LENGTH..MIN_PAYLOAD_LENGTH]);
    Some((given, computed))
}

// =============================================================================
// HEADER
// =============================================================================

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    /// A state block follows the header.
    pub has_state: bool,
    /// Number of request blocks, 0 to 127.
    pub request_count: u8,
    /// CRC-32 of the first block's chain id.
    pub checksum: u32,
}

impl PayloadHeader {
    /// Builds a header for the given layout. `first_scid` is the chain id of
    /// the first block that will follow.
    pub fn new(
        has_state: bool,
        request_count: usize,
        first_scid: &[u8; SC_ID_LENGTH],
    ) -> Result<Self> {
        let count = u8::try_from(request_count)
            .ok()
            .filter(|c| usize::from(*c) <= MAX_REQUEST_BLOCKS)
            .ok_or(CodecError::BoundsExceeded {
                count: request_count,
                max: MAX_REQUEST_BLOCKS,
            })?;
        Ok(Self {
            has_state,
            request_count: count,
            checksum: encode_checksum(first_scid),
        })
    }

    /// Appends the 5 header bytes.
    pub fn encode_into(&self, out: &mut Vec<u8>) -> Result<()> {
        out.push(encode_meta(self.has_state, self.request_count)?);
        out.extend_from_slice(&self.checksum.to_be_bytes());
        Ok(())
    }

    /// Reads the 5 header bytes.
    pub fn decode(reader: &mut PayloadReader<'_>) -> Result<Self> {
        let (has_state, request_count) = decode_meta(reader.read_u8("meta byte")?);
        let checksum = reader.read_u32("checksum")?;
        Ok(Self {
            has_state,
            request_count,
            checksum,
        })
    }
}
