//! Chain family selector.
//!
//! A chain is either a standard Cosmos-SDK chain or an Ethereum-compatible
//! (ethermint) chain. The family fixes the address derivation, the sign-doc
//! digest and the public key type URL together so they cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::hash::HashAlgorithm;

/// The protocol family an identity or chain belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolFamily {
    /// Hash160 addresses, SHA-256 sign digest.
    #[default]
    Standard,
    /// Keccak-derived addresses, Keccak-256 sign digest.
    Ethereum,
}

impl ProtocolFamily {
    /// Digest applied to the serialized sign document before signing.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        match self {
            ProtocolFamily::Standard => HashAlgorithm::Sha256,
            ProtocolFamily::Ethereum => HashAlgorithm::Keccak256,
        }
    }

    /// Type URL used when packing the signer's public key into an `Any`.
    pub fn pub_key_type_url(&self) -> &'static str {
        match self {
            ProtocolFamily::Standard => "/cosmos.crypto.secp256k1.PubKey",
            ProtocolFamily::Ethereum => "/ethermint.crypto.v1.ethsecp256k1.PubKey",
        }
    }

    /// Returns `true` for Ethereum-compatible chains.
    pub fn is_ethereum(&self) -> bool {
        matches!(self, ProtocolFamily::Ethereum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_fixes_hash_and_type_url() {
        assert_eq!(ProtocolFamily::Standard.hash_algorithm(), HashAlgorithm::Sha256);
        assert_eq!(ProtocolFamily::Ethereum.hash_algorithm(), HashAlgorithm::Keccak256);
        assert_eq!(
            ProtocolFamily::Ethereum.pub_key_type_url(),
            "/ethermint.crypto.v1.ethsecp256k1.PubKey"
        );
        assert_eq!(ProtocolFamily::default(), ProtocolFamily::Standard);
    }

    #[test]
    fn test_family_serde_names() {
        let json = serde_json::to_string(&ProtocolFamily::Ethereum).unwrap();
        assert_eq!(json, "\"ethereum\"");
        let parsed: ProtocolFamily = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(parsed, ProtocolFamily::Standard);
    }
}
