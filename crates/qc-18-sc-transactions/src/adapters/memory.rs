use crate::domain::TransactionId;
use crate::ports::outbound::{LedgerTransaction, LedgerTransactionMut};

/// Minimal outer transaction: an id and a data payload slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedgerTransaction {
    id: TransactionId,
    data_payload: Vec<u8>,
}

impl InMemoryLedgerTransaction {
    /// Transaction with an empty payload slot.
    pub fn new(id: TransactionId) -> Self {
        Self {
            id,
            data_payload: Vec::new(),
        }
    }

    /// Transaction whose payload slot already holds `data_payload`.
    pub fn with_payload(id: TransactionId, data_payload: Vec<u8>) -> Self {
        Self { id, data_payload }
    }
}

impl LedgerTransaction for InMemoryLedgerTransaction {
    fn id(&self) -> TransactionId {
        self.id
    }

    fn data_payload(&self) -> &[u8] {
        &self.data_payload
    }
}

impl LedgerTransactionMut for InMemoryLedgerTransaction {
    fn set_data_payload(&mut self, payload: Vec<u8>) {
        self.data_payload = payload;
    }
}
