//! # Domain Entities
//!
//! The blocks carried in an SC payload.

use super::identifiers::{HashValue, RequestId, ScId};
use serde::{Deserialize, Serialize};

// =============================================================================
// STATE BLOCK
// =============================================================================

/// One state transition of a smart contract.
///
/// The previous state is determined by the chain transfer of the SC token in
/// the value part of the outer transaction, not by anything in this block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlock {
    /// Contract whose state is updated.
    scid: ScId,
    /// Monotonic state sequence; 0 for the origin transaction.
    state_index: u32,
    /// Unix timestamp; 0 means the transaction is not timestamped.
    timestamp: i64,
    /// Request whose execution produced this state. Fixed at construction.
    request_id: RequestId,
    /// Hash of the updated state. `None` marks a timestamp-only checkpoint.
    state_update_hash: Option<HashValue>,
}

impl StateBlock {
    /// Creates a state block. The originating request is mandatory and
    /// cannot be changed afterwards.
    #[must_use]
    pub fn new(scid: ScId, state_index: u32, request_id: RequestId) -> Self {
        Self {
            scid,
            state_index,
            timestamp: 0,
            request_id,
            state_update_hash: None,
        }
    }

    /// Sets the Unix timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the hash of the updated state.
    #[must_use]
    pub fn with_state_update_hash(mut self, hash: HashValue) -> Self {
        self.state_update_hash = Some(hash);
        self
    }

    /// Contract whose state is updated.
    #[must_use]
    pub const fn scid(&self) -> &ScId {
        &self.scid
    }

    /// Position of this state in the contract's chain.
    #[must_use]
    pub const fn state_index(&self) -> u32 {
        self.state_index
    }

    /// Unix timestamp, 0 if not timestamped.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Request whose execution produced this state.
    #[must_use]
    pub const fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Hash of the updated state, if the content changed.
    #[must_use]
    pub const fn state_update_hash(&self) -> Option<&HashValue> {
        self.state_update_hash.as_ref()
    }

    /// True when the block carries no content change.
    #[must_use]
    pub const fn is_checkpoint(&self) -> bool {
        self.state_update_hash.is_none()
    }

    /// True for the contract's first state.
    #[must_use]
    pub const fn is_origin(&self) -> bool {
        self.state_index == 0
    }
}

// =============================================================================
// REQUEST BLOCK
// =============================================================================

/// One request addressed to a smart contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RequestBlock {
    scid: ScId,
    /// Request arguments. Reserved extension area.
    body: Vec<u8>,
}

impl RequestBlock {
    /// Request block with an empty body.
    #[must_use]
    pub fn new(scid: ScId) -> Self {
        Self {
            scid,
            body: Vec::new(),
        }
    }

    /// Request block carrying `body`.
    #[must_use]
    pub fn with_body(scid: ScId, body: Vec<u8>) -> Self {
        Self { scid, body }
    }

    /// Contract the request is addressed to.
    #[must_use]
    pub const fn scid(&self) -> &ScId {
        &self.scid
    }

    /// Request arguments.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

// =============================================================================
// SC PAYLOAD
// =============================================================================

/// Everything an SC payload carries: at most one state block and an ordered
/// list of request blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScPayload {
    /// Optional state transition.
    pub state_block: Option<StateBlock>,
    /// Requests, in wire order.
    pub request_blocks: Vec<RequestBlock>,
}

impl ScPayload {
    /// Payload from its parts.
    #[must_use]
    pub fn new(state_block: Option<StateBlock>, request_blocks: Vec<RequestBlock>) -> Self {
        Self {
            state_block,
            request_blocks,
        }
    }

    /// True if there is nothing to encode.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state_block.is_none() && self.request_blocks.is_empty()
    }

    /// Chain id of the first block on the wire: the state block's if present,
    /// otherwise the first request block's.
    #[must_use]
    pub fn first_scid(&self) -> Option<&ScId> {
        self.state_block
            .as_ref()
            .map(StateBlock::scid)
            .or_else(|| self.request_blocks.first().map(RequestBlock::scid))
    }

    /// Splits the payload into its state block and request blocks.
    #[must_use]
    pub fn into_parts(self) -> (Option<StateBlock>, Vec<RequestBlock>) {
        (self.state_block, self.request_blocks)
    }
}
