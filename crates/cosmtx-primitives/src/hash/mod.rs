//! Hash function primitives.
//!
//! Provides SHA-256, RIPEMD-160, Hash160 and Keccak-256, plus the
//! [`HashAlgorithm`] selector used to pick a sign-doc digest per chain family.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute RIPEMD-160 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte RIPEMD-160 digest.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// Compute Hash160: RIPEMD-160(SHA-256(data)).
///
/// Used for standard Cosmos account addresses.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 20-byte Hash160 digest.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// Compute the legacy Keccak-256 hash (pre-NIST padding) of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte Keccak-256 digest.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Digest used when signing a sign document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256, used by standard Cosmos chains.
    Sha256,
    /// Keccak-256, used by Ethereum-compatible chains.
    Keccak256,
}

impl HashAlgorithm {
    /// Hash `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> [u8; 32] {
        match self {
            HashAlgorithm::Sha256 => sha256(data),
            HashAlgorithm::Keccak256 => keccak256(data),
        }
    }
}
