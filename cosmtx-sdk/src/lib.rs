#![deny(missing_docs)]

//! Cosmos transaction SDK - Complete SDK.
//!
//! Re-exports all components for single-crate usage.

pub use cosmtx_primitives as primitives;
pub use cosmtx_account as account;
pub use cosmtx_proto as proto;
pub use cosmtx_transaction as transaction;
