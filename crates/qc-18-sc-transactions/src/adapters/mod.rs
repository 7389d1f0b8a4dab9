//! # Adapters
//!
//! Implementations of the outbound ports. Production wiring supplies the
//! ledger's own transaction type; the in-memory adapter serves producers
//! that assemble transactions before handing them to the ledger, and tests.

mod memory;

pub use memory::InMemoryLedgerTransaction;
