//! # SC Payload Codec
//!
//! Composes the header, the optional state block and the ordered request
//! blocks into the data payload of one outer ledger transaction.
//!
//! ## Structural Invariants
//!
//! | Invariant | Enforced in |
//! |-----------|-------------|
//! | At least one block | [`PayloadCodec::encode`], [`PayloadCodec::decode_with_report`] |
//! | At most 127 request blocks | [`PayloadCodec::encode`] (decode is bounded by the 7-bit field) |
//! | Request order preserved | blocks are written and read in list order |
//!
//! Block-level codecs never check these.

use super::header::{PayloadHeader, HEADER_LENGTH, MAX_REQUEST_BLOCKS};
use super::reader::PayloadReader;
use super::{request_block, state_block};
use crate::domain::{CodecConfig, ScPayload, TrailingDataPolicy};
use crate::errors::{CodecError, Result};

/// Outcome of a decode before the strict-checksum and trailing-data
/// policies are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeReport {
    /// Decoded blocks.
    pub payload: ScPayload,
    /// Bytes left after the last declared block.
    pub trailing_bytes: usize,
    /// Checksum stored in the header.
    pub header_checksum: u32,
    /// Checksum of the first decoded block's chain id.
    pub computed_checksum: u32,
}

impl DecodeReport {
    /// True if the header checksum matches the first chain id.
    pub fn checksum_matches(&self) -> bool {
        self.header_checksum == self.computed_checksum
    }
}

/// SC payload encoder/decoder bound to one [`CodecConfig`].
///
/// Stateless apart from its configuration; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct PayloadCodec {
    config: CodecConfig,
}

impl PayloadCodec {
    /// Creates a codec after validating `config`.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this codec was built with.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Exact number of bytes [`encode`](Self::encode) produces for `payload`.
    pub fn encoded_len(&self, payload: &ScPayload) -> usize {
        let framing = self.config.request_body_framing;
        HEADER_LENGTH
            + payload
                .state_block
                .as_ref()
                .map_or(0, state_block::encoded_len)
            + payload
                .request_blocks
                .iter()
                .map(|block| request_block::encoded_len(block, framing))
                .sum::<usize>()
    }

    /// Serializes `payload`. Nothing is written unless every check passes.
    pub fn encode(&self, payload: &ScPayload) -> Result<Vec<u8>> {
        let first_scid = payload.first_scid().ok_or(CodecError::EmptyPayload)?;

        let count = payload.request_blocks.len();
        if count > MAX_REQUEST_BLOCKS {
            return Err(CodecError::BoundsExceeded {
                count,
                max: MAX_REQUEST_BLOCKS,
            });
        }
        for (index, block) in payload.request_blocks.iter().enumerate() {
            request_block::check_body(block, index, &self.config)?;
        }

        let header =
            PayloadHeader::new(payload.state_block.is_some(), count, first_scid.as_bytes())?;

        let mut out = Vec::with_capacity(self.encoded_len(payload));
        header.encode_into(&mut out)?;
        if let Some(state) = &payload.state_block {
            state_block::encode_into(state, &mut out);
        }
        let framing = self.config.request_body_framing;
        for block in &payload.request_blocks {
            request_block::encode_into(block, framing, &mut out);
        }
        Ok(out)
    }

    /// Parses `data` without applying the checksum or trailing-data policy.
    pub fn decode_with_report(&self, data: &[u8]) -> Result<DecodeReport> {
        let mut reader = PayloadReader::new(data);
        let header = PayloadHeader::decode(&mut reader)?;

        let state_block = if header.has_state {
            Some(state_block::decode(&mut reader)?)
        } else {
            None
        };

        let count = usize::from(header.request_count);
        let mut request_blocks = Vec::with_capacity(count);
        for index in 0..count {
            request_blocks.push(request_block::decode_at(&mut reader, index, &self.config)?);
        }

        let payload = ScPayload::new(state_block, request_blocks);
        let computed_checksum = payload
            .first_scid()
            .map(|scid| super::header::encode_checksum(scid.as_bytes()))
            .ok_or(CodecError::EmptyPayload)?;

        Ok(DecodeReport {
            payload,
            trailing_bytes: reader.remaining(),
            header_checksum: header.checksum,
            computed_checksum,
        })
    }

    /// Parses `data` and applies the configured policies.
    pub fn decode(&self, data: &[u8]) -> Result<ScPayload> {
        self.accept(self.decode_with_report(data)?)
    }

    /// Applies the strict-checksum and trailing-data policies to `report`.
    pub fn accept(&self, report: DecodeReport) -> Result<ScPayload> {
        if self.config.strict_checksum && !report.checksum_matches() {
            return Err(CodecError::ChecksumMismatch {
                expected: report.header_checksum,
                actual: report.computed_checksum,
            });
        }
        if report.trailing_bytes > 0 && self.config.trailing_data == TrailingDataPolicy::Reject {
            return Err(CodecError::TrailingData {
                remaining: report.trailing_bytes,
            });
        }
        Ok(report.payload)
    }
}

/// Encodes with the default configuration.
pub fn encode(payload: &ScPayload) -> Result<Vec<u8>> {
    PayloadCodec::default().encode(payload)
}

/// Decodes with the default configuration.
pub fn decode(data: &[u8]) -> Result<ScPayload> {
    PayloadCodec::default().decode(data)
}
