/// Unified error type for all primitives operations.
///
/// Covers errors from key parsing, signing, mnemonic handling,
/// hierarchical derivation, and address encoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),

    #[error("invalid address prefix: {0}")]
    InvalidPrefix(String),

    #[error("address encoding failed: {0}")]
    AddressEncoding(String),

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

impl From<coins_bip32::Bip32Error> for PrimitivesError {
    fn from(e: coins_bip32::Bip32Error) -> Self {
        PrimitivesError::Derivation(e.to_string())
    }
}
