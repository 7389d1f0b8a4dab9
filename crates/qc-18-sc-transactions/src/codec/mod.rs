//! # Codec Module
//!
//! Byte-level framing of SC payloads.
//!
//! ```text
//! offset 0      meta byte     bit7 = has state, bits6-0 = request count
//! offset 1..5   checksum      CRC-32 of the first block's chain id
//! offset 5..    state block   iff has state
//! then          request blocks, count of them, each starting with a chain id
//! ```
//!
//! All multi-byte integers are big-endian.

pub mod header;
pub mod payload;
pub mod reader;
pub mod request_block;
pub mod state_block;


pub use header::{
    decode_meta, encode_checksum, encode_meta, looks_like_sc_payload, PayloadHeader,
    HEADER_LENGTH, MAX_REQUEST_BLOCKS, MIN_PAYLOAD_LENGTH,
};
pub use payload::{decode, encode, DecodeReport, PayloadCodec};
pub use reader::PayloadReader;
