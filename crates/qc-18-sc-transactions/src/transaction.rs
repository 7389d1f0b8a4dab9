//! # SC Transaction View
//!
//! A smart contract transaction is an ordinary ledger transaction whose data
//! payload happens to carry SC blocks. [`Transaction`] borrows the outer
//! transaction and holds the decoded (or to-be-encoded) blocks next to it;
//! it never copies or owns the outer transaction's fields.

use crate::codec::PayloadCodec;
use crate::domain::{RequestBlock, RequestId, ScPayload, StateBlock, TransactionId};
use crate::errors::CodecError;
use crate::ports::outbound::LedgerTransaction;

/// SC view over one outer ledger transaction.
#[derive(Debug, Clone)]
pub struct Transaction<'a, L: LedgerTransaction + ?Sized> {
    outer: &'a L,
    payload: ScPayload,
}

impl<'a, L: LedgerTransaction + ?Sized> Transaction<'a, L> {
    /// Empty view, to be filled with blocks before encoding.
    pub fn new(outer: &'a L) -> Self {
        Self {
            outer,
            payload: ScPayload::default(),
        }
    }

    /// Decodes the outer transaction's data payload.
    pub fn parse(outer: &'a L, codec: &PayloadCodec) -> Result<Self, CodecError> {
        let payload = codec.decode(outer.data_payload())?;
        Ok(Self { outer, payload })
    }

    /// Sets the state block, replacing any previous one.
    #[must_use]
    pub fn with_state_block(mut self, block: StateBlock) -> Self {
        self.payload.state_block = Some(block);
        self
    }

    /// Appends a request block.
    #[must_use]
    pub fn with_request_block(mut self, block: RequestBlock) -> Self {
        self.payload.request_blocks.push(block);
        self
    }

    /// The wrapped outer transaction.
    pub fn outer(&self) -> &'a L {
        self.outer
    }

    /// Identifier of the outer transaction.
    pub fn id(&self) -> TransactionId {
        self.outer.id()
    }

    /// The state block, if any.
    pub fn state(&self) -> Option<&StateBlock> {
        self.payload.state_block.as_ref()
    }

    /// Request blocks in payload order.
    pub fn requests(&self) -> &[RequestBlock] {
        &self.payload.request_blocks
    }

    /// Request block at `index`.
    pub fn request(&self, index: u16) -> Option<&RequestBlock> {
        self.payload.request_blocks.get(usize::from(index))
    }

    /// Id that other transactions use to refer to this transaction's request
    /// block at `index`. `None` if there is no such block.
    pub fn request_id(&self, index: u16) -> Option<RequestId> {
        self.request(index)
            .map(|_| RequestId::new(&self.outer.id(), index))
    }

    /// The SC blocks carried by this view.
    pub fn payload(&self) -> &ScPayload {
        &self.payload
    }

    /// Consumes the view and returns its SC blocks.
    pub fn into_payload(self) -> ScPayload {
        self.payload
    }

    /// Encodes the SC blocks for the outer transaction's data payload slot.
    pub fn data_payload_bytes(&self, codec: &PayloadCodec) -> Result<Vec<u8>, CodecError> {
        codec.encode(&self.payload)
    }
}
