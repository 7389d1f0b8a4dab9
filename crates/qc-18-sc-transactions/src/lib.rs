//! # QC-18 SC Transactions - Smart Contract Payload Subsystem
//!
//! **Subsystem ID:** 18
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! Embeds smart contract (SC) blocks inside the data payload of ordinary
//! ledger transactions. A payload carries an optional state block (a committed
//! state transition of one contract chain) and up to 127 request blocks
//! (requests addressed to contract chains), framed so that SC traffic can be
//! recognised without parsing it.
//!
//! ## Wire Format
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | meta byte: bit 7 = has state, bits 6..0 = request count |
//! | 1 | 4 | CRC-32 of the first block's chain id (big-endian) |
//! | 5 | 112 | state block, iff bit 7 is set |
//! | then | 65+ | request blocks, in order |
//!
//! ## Structural Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | At least one block | `codec/payload.rs` - `PayloadCodec::encode()` |
//! | At most 127 request blocks | `codec/header.rs` - `encode_meta()` |
//! | Meta byte decode inverts encode | `codec/header.rs` - `decode_meta()` |
//! | Every block starts with its 65-byte chain id | `codec/{state,request}_block.rs` |
//! | Sniff test accepts every encoder output | `codec/header.rs` - `looks_like_sc_payload()` |
//!
//! ## Outbound Dependencies
//!
//! | Layer | Trait | Purpose |
//! |-------|-------|---------|
//! | Ledger | `LedgerTransaction` | Read the outer id and data payload |
//! | Ledger | `LedgerTransactionMut` | Write the data payload slot |
//!
//! ## Usage Example
//!
//! ```
//! use qc_18_sc_transactions::prelude::*;
//!
//! let service = ScPayloadService::new(ServiceConfig::default()).unwrap();
//! let mut tx = InMemoryLedgerTransaction::new(TransactionId([7; 32]));
//!
//! let payload = ScPayload::new(None, vec![RequestBlock::new(ScId([1; 65]))]);
//! service.attach(&mut tx, &payload).unwrap();
//!
//! assert_eq!(service.inspect(&tx).unwrap(), Some(payload));
//! ```

// Crate-level lints
#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;
pub mod transaction;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use codec::{looks_like_sc_payload, PayloadCodec};
pub use domain::{RequestBlock, RequestId, ScId, ScPayload, StateBlock};
pub use errors::CodecError;
pub use transaction::Transaction;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        Address, CodecConfig, CodecConfigBuilder, Color, HashValue, RequestBlock,
        RequestBodyFraming, RequestId, ScId, ScPayload, StateBlock, TrailingDataPolicy,
        TransactionId,
    };

    // Codec
    pub use crate::codec::{looks_like_sc_payload, DecodeReport, PayloadCodec};

    // Ports
    pub use crate::ports::{LedgerTransaction, LedgerTransactionMut, ScPayloadApi};

    // Adapters
    pub use crate::adapters::InMemoryLedgerTransaction;

    // Errors
    pub use crate::errors::{CodecError, MalformedIdentifier, ParseIdentifierError};

    // Service
    pub use crate::service::{ScPayloadService, ServiceConfig, ServiceStats};

    pub use crate::transaction::Transaction;
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 18;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "SC Transactions";

// =============================================================================
// TESTS
// =============================================================================
