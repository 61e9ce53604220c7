/// Hierarchical deterministic key derivation.
///
/// BIP-39 turns a mnemonic phrase into a 64-byte seed; BIP-32 walks a
/// BIP-44 path (`m/44'/coin'/account'/change/index`) from that seed down to
/// a signing key.

pub mod mnemonic;
pub mod path;

pub use mnemonic::{generate_mnemonic, mnemonic_to_seed};
pub use path::HdPath;

use coins_bip32::path::DerivationPath;
use coins_bip32::prelude::*;
use coins_bip32::Bip32Error;
use k256::ecdsa::SigningKey;
use tracing::trace;

use crate::ec::PrivateKey;
use crate::PrimitivesError;

/// Derive the private key at `path` from a BIP-39 seed.
///
/// # Arguments
/// * `seed` - The 64-byte seed produced by [`mnemonic_to_seed`].
/// * `path` - The BIP-44 path to walk.
///
/// # Returns
/// The derived `PrivateKey`, or `InvalidPath` if any segment is 2^31 or
/// above (it would otherwise be read as hardened).
pub fn derive_from_seed(seed: &[u8], path: &HdPath) -> Result<PrivateKey, PrimitivesError> {
    path.check_segments()?;
    let derivation: DerivationPath = path
        .to_string()
        .parse()
        .map_err(|e: Bip32Error| PrimitivesError::InvalidPath(e.to_string()))?;
    trace!(path = %path, "walking derivation path");
    let child = XPriv::root_from_seed(seed, None)?.derive_path(&derivation)?;
    let signing_key: &SigningKey = child.as_ref();
    PrivateKey::from_bytes(&signing_key.to_bytes())
}

/// Derive the private key at `path` from a mnemonic phrase and optional passphrase.
///
/// # Arguments
/// * `phrase` - A BIP-39 English mnemonic.
/// * `passphrase` - The BIP-39 passphrase; empty for none.
/// * `path` - The BIP-44 path to walk.
///
/// # Returns
/// The derived `PrivateKey`, or an error if the phrase or path is invalid.
pub fn derive(phrase: &str, passphrase: &str, path: &HdPath) -> Result<PrivateKey, PrimitivesError> {
    let seed = mnemonic_to_seed(phrase, passphrase)?;
    derive_from_seed(&seed[..], path)
}
