//! # Ports
//!
//! - `inbound` - API this crate exposes to the ledger layer
//! - `outbound` - what it needs from the outer ledger transaction

pub mod inbound;
pub mod outbound;

pub use inbound::ScPayloadApi;
pub use outbound::{LedgerTransaction, LedgerTransactionMut};
