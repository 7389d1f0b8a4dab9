//! # Request Block Codec
//!
//! Every request block starts with its 65-byte chain id regardless of body
//! framing; consumers that skip-parse may rely on nothing else.
//!
//! | Framing | Layout after the chain id |
//! |---------|---------------------------|
//! | `Unframed` | nothing; the body must be empty |
//! | `LengthPrefixed` | u16 big-endian length, then the body |

use super::reader::PayloadReader;
use crate::domain::{
    CodecConfig, RequestBlock, RequestBodyFraming, ScId, MAX_FRAMED_BODY_LEN, SC_ID_LENGTH,
};
use crate::errors::{CodecError, Result};

/// Length prefix size under `LengthPrefixed` framing.
pub const BODY_LENGTH_PREFIX: usize = 2;

/// Exact encoded size of `block` under `framing`.
pub fn encoded_len(block: &RequestBlock, framing: RequestBodyFraming) -> usize {
    match framing {
        RequestBodyFraming::Unframed => SC_ID_LENGTH,
        RequestBodyFraming::LengthPrefixed => {
            SC_ID_LENGTH + BODY_LENGTH_PREFIX + block.body().len()
        }
    }
}

/// Checks that `block` fits the configured framing. `index` is the block's
/// position in the payload, used for error reporting only.
pub fn check_body(block: &RequestBlock, index: usize, config: &CodecConfig) -> Result<()> {
    let len = block.body().len();
    let max = config.max_request_body_len.min(MAX_FRAMED_BODY_LEN);
    match config.request_body_framing {
        RequestBodyFraming::Unframed if len > 0 => {
            Err(CodecError::UnframedRequestBody { index, len })
        }
        RequestBodyFraming::LengthPrefixed if len > max => {
            Err(CodecError::RequestBodyTooLarge { index, len, max })
        }
        _ => Ok(()),
    }
}

/// Appends `block`. The body must already have passed [`check_body`].
pub(crate) fn encode_into(block: &RequestBlock, framing: RequestBodyFraming, out: &mut Vec<u8>) {
    out.extend_from_slice(block.scid().as_bytes());
    if framing == RequestBodyFraming::LengthPrefixed {
        out.extend_from_slice(&(block.body().len() as u16).to_be_bytes());
        out.extend_from_slice(block.body());
    }
}

/// Encodes one request block on its own.
pub fn encode(block: &RequestBlock, config: &CodecConfig) -> Result<Vec<u8>> {
    check_body(block, 0, config)?;
    let mut out = Vec::with_capacity(encoded_len(block, config.request_body_framing));
    encode_into(block, config.request_body_framing, &mut out);
    Ok(out)
}

/// Reads one request block.
pub fn decode(reader: &mut PayloadReader<'_>, config: &CodecConfig) -> Result<RequestBlock> {
    decode_at(reader, 0, config)
}

/// Reads the request block at payload position `index`.
pub(crate) fn decode_at(
    reader: &mut PayloadReader<'_>,
    index: usize,
    config: &CodecConfig,
) -> Result<RequestBlock> {
    let scid = ScId(reader.read_array("request block scid")?);
    match config.request_body_framing {
        RequestBodyFraming::Unframed => Ok(RequestBlock::new(scid)),
        RequestBodyFraming::LengthPrefixed => {
            let len = usize::from(reader.read_u16("request body length")?);
            if len > config.max_request_body_len {
                return Err(CodecError::RequestBodyTooLarge {
                    index,
                    len,
                    max: config.max_request_body_len,
                });
            }
            let body = reader.read_slice(len, "request body")?;
            Ok(RequestBlock::with_body(scid, body.to_vec()))
        }
    }
}
