//! Domain Layer - Pure value types
//!
//! This layer contains:
//! - Fixed-length identifiers (`ScId`, `RequestId`, ...)
//! - SC blocks (`StateBlock`, `RequestBlock`) and the `ScPayload` they form
//! - Codec configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod config;
pub mod entities;
pub mod identifiers;

pub use config::{
    CodecConfig, CodecConfigBuilder, RequestBodyFraming, TrailingDataPolicy, MAX_FRAMED_BODY_LEN,
};
pub use entities::{RequestBlock, ScPayload, StateBlock};
pub use identifiers::{
    Address, Color, HashValue, RequestId, ScId, TransactionId, ADDRESS_LENGTH, COLOR_LENGTH,
    HASH_LENGTH, REQUEST_ID_LENGTH, SC_ID_LENGTH,
};
