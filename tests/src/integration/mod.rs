//! # Integration Tests
//!
//! Flows that cross the producer, ledger and consumer roles.

pub mod flows;
