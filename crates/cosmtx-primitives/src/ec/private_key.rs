//! secp256k1 private key.
//!
//! Wraps the k256 signing key. Signing hashes the message with a caller
//! selected [`HashAlgorithm`] and derives the RFC6979 nonce with that same
//! digest, which is what Ethereum-compatible Cosmos chains expect.

use std::fmt;

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::hash::HashAlgorithm;
use crate::PrimitivesError;

/// A secp256k1 private key used for transaction signing.
///
/// The scalar is zeroized by the underlying k256 key when dropped, and the
/// `Debug` output never reveals it.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

impl PrivateKey {
    /// Generate a new random private key using the OS random number generator.
    ///
    /// # Returns
    /// A new randomly generated `PrivateKey`.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte slice representing the private key scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the bytes represent a valid scalar on secp256k1,
    /// or an error if the scalar is zero or out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_BYTES_LEN,
                got: bytes.len(),
            });
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a hexadecimal string.
    ///
    /// An optional `0x` prefix is accepted.
    ///
    /// # Arguments
    /// * `hex_str` - A 64-character hex string representing the 32-byte scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the hex or the scalar is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        if trimmed.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = hex::decode(trimmed)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize the private key as a 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Serialize the private key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(self.inner.verifying_key().clone())
    }

    /// Sign a message.
    ///
    /// The message is hashed with `hash` and signed with a deterministic
    /// RFC6979 nonce derived from the same digest. The result is low-S.
    ///
    /// # Arguments
    /// * `message` - The raw bytes to sign (not pre-hashed).
    /// * `hash` - Digest applied to the message and used for nonce generation.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if signing fails.
    pub fn sign(&self, message: &[u8], hash: HashAlgorithm) -> Result<Signature, PrimitivesError> {
        Signature::sign(message, self, hash)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish_non_exhaustive()
    }
}
