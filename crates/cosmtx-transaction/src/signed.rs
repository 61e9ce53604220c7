//! A signed, broadcast-ready transaction.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cosmtx_proto::types::tx::TxRaw;
use cosmtx_proto::{Message, ProtoError};
use serde_json::json;

use crate::broadcaster::BroadcastMode;
use crate::TransactionError;

/// Body bytes, auth info bytes and the signer's signature.
///
/// The raw bytes and the base64 text carry identical content; either
/// decodes back to the same value.
#[derive(Clone, Debug, PartialEq)]
pub struct SignedTransaction {
    raw: TxRaw,
}

impl SignedTransaction {
    pub(crate) fn from_raw(raw: TxRaw) -> Self {
        SignedTransaction { raw }
    }

    // -----------------------------------------------------------------
    // Deserialization
    // -----------------------------------------------------------------

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let raw = TxRaw::decode(bytes).map_err(ProtoError::from)?;
        Ok(Self::from_raw(raw))
    }

    pub fn from_base64(text: &str) -> Result<Self, TransactionError> {
        let bytes = BASE64
            .decode(text.trim())
            .map_err(|e| TransactionError::Serialization(format!("invalid base64: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    // -----------------------------------------------------------------
    // Serialization
    // -----------------------------------------------------------------

    /// Binary `TxRaw` encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.raw.encode_to_vec()
    }

    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        self.to_bytes().len()
    }

    /// JSON-RPC request body for a Tendermint `broadcast_tx_*` call.
    pub fn to_rpc_request(&self, mode: BroadcastMode, id: u64) -> serde_json::Value {
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": mode.rpc_method(),
            "params": { "tx": self.to_base64() },
        })
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn body_bytes(&self) -> &[u8] {
        &self.raw.body_bytes
    }

    pub fn auth_info_bytes(&self) -> &[u8] {
        &self.raw.auth_info_bytes
    }

    /// Signatures in signer order; this crate produces exactly one.
    pub fn signatures(&self) -> &[Vec<u8>] {
        &self.raw.signatures
    }

    pub fn into_raw(self) -> TxRaw {
        self.raw
    }
}
