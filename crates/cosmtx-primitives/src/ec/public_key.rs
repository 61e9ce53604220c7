//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 serialization, Hash160 and
//! signature verification under either sign-doc digest.

use std::fmt;

use k256::ecdsa::VerifyingKey;

use crate::ec::signature::Signature;
use crate::hash::{hash160, HashAlgorithm};
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
#[derive(Clone, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from raw SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Arguments
    /// * `bytes` - SEC1-encoded public key bytes.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    pub(crate) fn from_verifying_key(inner: VerifyingKey) -> Self {
        PublicKey { inner }
    }

    /// Serialize as a 33-byte compressed SEC1 point.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize as a 65-byte uncompressed SEC1 point (`0x04 || x || y`).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Hex encoding of the compressed point.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Hash160 = RIPEMD160(SHA256(compressed_pubkey)).
    ///
    /// # Returns
    /// A 20-byte hash digest.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify a signature over `message` using this public key.
    ///
    /// # Arguments
    /// * `message` - The raw bytes that were signed.
    /// * `sig` - The signature to check.
    /// * `hash` - Digest the signer applied to the message.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, message: &[u8], sig: &Signature, hash: HashAlgorithm) -> bool {
        sig.verify(message, self, hash)
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ec::PrivateKey;

    #[test]
    fn test_pub_keys() {
        let tests: Vec<(&str, &str, bool)> = vec![
            (
                "uncompressed ok",
                "0411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
                true,
            ),
            (
                "uncompressed x changed",
                "0415db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3",
                false,
            ),
            (
                "compressed ok (ybit = 0)",
                "02ce0b14fb842b1ba549fdd675c98075f12e9c510f8ef52bd021a9a1f4809d3b4d",
                true,
            ),
            (
                "compressed ok (ybit = 1)",
                "032689c7c2dab13309fb143e0e8fe396342521887e976690b6b47f5b2a4b7d448e",
                true,
            ),
            ("wrong length", "05", false),
        ];

        for (name, key_hex, is_valid) in &tests {
            let result = PublicKey::from_hex(key_hex);
            assert_eq!(result.is_ok(), *is_valid, "{}", name);
        }
    }

    #[test]
    fn test_compressed_uncompressed_agree() {
        let pk = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        let pub_key = pk.pub_key();
        assert_eq!(
            pub_key.to_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        let uncompressed = pub_key.to_uncompressed();
        assert_eq!(uncompressed[0], 0x04);
        assert_eq!(&uncompressed[1..33], &pub_key.to_compressed()[1..]);
        assert_eq!(PublicKey::from_bytes(&uncompressed).unwrap(), pub_key);
    }

    #[test]
    fn test_empty_pub_key_rejected() {
        assert!(matches!(
            PublicKey::from_bytes(&[]),
            Err(PrimitivesError::InvalidPublicKey(_))
        ));
    }
}
