//! # Inbound Ports (Driving Ports)
//!
//! Public API used by the ledger layer to recognise, read and write SC
//! payloads.

use crate::domain::ScPayload;
use crate::errors::CodecError;
use crate::ports::outbound::{LedgerTransaction, LedgerTransactionMut};

/// Primary API for SC payload handling.
pub trait ScPayloadApi {
    /// Decode the SC payload carried by `outer`, if it carries one.
    ///
    /// ## Returns
    ///
    /// - `Ok(None)`: the payload failed the sniff test; not SC traffic
    /// - `Ok(Some(_))`: a structurally valid SC payload
    /// - `Err(_)`: the payload looked like SC data but did not decode
    fn inspect<L: LedgerTransaction + ?Sized>(
        &self,
        outer: &L,
    ) -> Result<Option<ScPayload>, CodecError>;

    /// Encode `payload` into the data payload slot of `outer`.
    ///
    /// Returns the number of bytes written. On error the slot is untouched.
    fn attach<L: LedgerTransactionMut + ?Sized>(
        &self,
        outer: &mut L,
        payload: &ScPayload,
    ) -> Result<usize, CodecError>;
}
