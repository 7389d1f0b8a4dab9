//! # State Block Codec
//!
//! ```text
//! scid                65 bytes
//! state index          4 bytes  u32 big-endian
//! timestamp            8 bytes  i64 stored as u64 big-endian
//! request id          34 bytes
//! hash flag            1 byte   0x00 absent, any other value present
//! state update hash   32 bytes  only if flag is nonzero
//! ```

use super::reader::PayloadReader;
use crate::domain::{
    HashValue, RequestId, ScId, StateBlock, HASH_LENGTH, REQUEST_ID_LENGTH, SC_ID_LENGTH,
};
use crate::errors::Result;

/// Flag byte written when the state update hash is absent.
pub const HASH_ABSENT: u8 = 0x00;
/// Flag byte written when the state update hash is present.
pub const HASH_PRESENT: u8 = 0xFF;

/// Encoded size of a state block without its optional hash.
pub const FIXED_LENGTH: usize = SC_ID_LENGTH + 4 + 8 + REQUEST_ID_LENGTH + 1;

/// Exact encoded size of `block`.
pub fn encoded_len(block: &StateBlock) -> usize {
    FIXED_LENGTH
        + if block.state_update_hash().is_some() {
            HASH_LENGTH
        } else {
            0
        }
}

/// Appends the encoded `block` to `out`.
pub fn encode_into(block: &StateBlock, out: &mut Vec<u8>) {
    out.extend_from_slice(block.scid().as_bytes());
    out.extend_from_slice(&block.state_index().to_be_bytes());
    out.extend_from_slice(&(block.timestamp() as u64).to_be_bytes());
    out.extend_from_slice(block.request_id().as_bytes());
    match block.state_update_hash() {
        Some(hash) => {
            out.push(HASH_PRESENT);
            out.extend_from_slice(hash.as_bytes());
        }
        None => out.push(HASH_ABSENT),
    }
}

/// Encodes one state block on its own.
pub fn encode(block: &StateBlock) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(block));
    encode_into(block, &mut out);
    out
}

/// Reads one state block. The flag byte alone decides whether hash bytes
/// follow.
pub fn decode(reader: &mut PayloadReader<'_>) -> Result<StateBlock> {
    let scid = ScId(reader.read_array("state block scid")?);
    let state_index = reader.read_u32("state index")?;
    let timestamp = reader.read_u64("timestamp")? as i64;
    let request_id = RequestId(reader.read_array("request id")?);
    let flag = reader.read_u8("state update hash flag")?;

    let mut block = StateBlock::new(scid, state_index, request_id).with_timestamp(timestamp);
    if flag != HASH_ABSENT {
        let hash = HashValue(reader.read_array("state update hash")?);
        block = block.with_state_update_hash(hash);
    }
    Ok(block)
}
