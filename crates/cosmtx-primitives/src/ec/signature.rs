//! ECDSA signature with RFC6979 deterministic nonces.
//!
//! Signatures are carried on the wire as 64 bytes, `r || s`, each
//! 32-byte big-endian, always normalized to low-S.

use ecdsa::hazmat::SignPrimitive;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::Signature as K256Signature;
use k256::{FieldBytes, Scalar};
use sha2::Sha256;
use sha3::Keccak256;

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::hash::HashAlgorithm;
use crate::PrimitivesError;

/// Length of a serialized `r || s` signature.
pub const SIGNATURE_LEN: usize = 64;

/// Half of the secp256k1 curve order (N/2), big-endian.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// An ECDSA signature with R and S components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// The R component of the signature (32 bytes, big-endian).
    r: [u8; 32],
    /// The S component of the signature (32 bytes, big-endian).
    s: [u8; 32],
}

impl Signature {
    /// Create a signature from raw R and S 32-byte arrays.
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Access the R component of the signature.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// Access the S component of the signature.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Parse a 64-byte `r || s` signature.
    ///
    /// # Arguments
    /// * `bytes` - Exactly 64 bytes.
    ///
    /// # Returns
    /// `Ok(Signature)`, or an error if the length is wrong.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(PrimitivesError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature { r, s })
    }

    /// Serialize as 64 bytes, `r || s`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        let mut out = [0u8; SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// Hex encoding of [`Signature::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Returns `true` if S is at most N/2.
    pub fn is_low_s(&self) -> bool {
        self.s <= HALF_ORDER
    }

    /// Sign a message with a deterministic RFC6979 nonce.
    ///
    /// The message is hashed with `hash`, and the HMAC-DRBG that produces
    /// the nonce runs over the same digest function. For Keccak-256 this
    /// yields the signatures ethermint-based chains verify.
    ///
    /// # Arguments
    /// * `message` - The raw message bytes.
    /// * `priv_key` - The private key to sign with.
    /// * `hash` - The digest algorithm.
    ///
    /// # Returns
    /// `Ok(Signature)` with low-S normalization applied, or an error if signing fails.
    pub fn sign(
        message: &[u8],
        priv_key: &PrivateKey,
        hash: HashAlgorithm,
    ) -> Result<Self, PrimitivesError> {
        let digest = hash.digest(message);
        let z = FieldBytes::from(digest);
        let scalar: &Scalar = priv_key.signing_key().as_nonzero_scalar().as_ref();

        let (k256_sig, _recovery_id) = match hash {
            HashAlgorithm::Sha256 => scalar.try_sign_prehashed_rfc6979::<Sha256>(&z, &[]),
            HashAlgorithm::Keccak256 => scalar.try_sign_prehashed_rfc6979::<Keccak256>(&z, &[]),
        }
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let k256_sig = k256_sig.normalize_s().unwrap_or(k256_sig);

        let (r_bytes, s_bytes) = k256_sig.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);
        Ok(Signature { r, s })
    }

    /// Verify this signature over `message` against a public key.
    ///
    /// # Returns
    /// `true` if the signature is valid, `false` otherwise.
    pub fn verify(&self, message: &[u8], pub_key: &PublicKey, hash: HashAlgorithm) -> bool {
        let k256_sig =
            match K256Signature::from_scalars(FieldBytes::from(self.r), FieldBytes::from(self.s)) {
                Ok(sig) => sig,
                Err(_) => return false,
            };

        let digest = hash.digest(message);
        pub_key
            .verifying_key()
            .verify_prehash(&digest, &k256_sig)
            .is_ok()
    }
}
