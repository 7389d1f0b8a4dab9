//! # Outbound Ports (Driven Ports)
//!
//! The outer ledger transaction is owned by the ledger and object-storage
//! layers. This crate only ever sees its identifier and its data payload
//! slot; validation, signing and value transfer stay on the other side of
//! this boundary.

use crate::domain::TransactionId;

/// Read access to an outer ledger transaction.
pub trait LedgerTransaction {
    /// Identifier of the transaction.
    fn id(&self) -> TransactionId;

    /// Raw bytes of the data payload slot.
    fn data_payload(&self) -> &[u8];
}

/// Write access to the data payload slot of an outer ledger transaction.
pub trait LedgerTransactionMut: LedgerTransaction {
    /// Replaces the data payload.
    fn set_data_payload(&mut self, payload: Vec<u8>);
}

impl<T: LedgerTransaction + ?Sized> LedgerTransaction for &T {
    fn id(&self) -> TransactionId {
        (**self).id()
    }

    fn data_payload(&self) -> &[u8] {
        (**self).data_payload()
    }
}
