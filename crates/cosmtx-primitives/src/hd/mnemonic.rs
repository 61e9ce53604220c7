//! BIP-39 mnemonic handling.

use bip39::{Language, Mnemonic};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::PrimitivesError;

/// Entropy length for a 24-word mnemonic.
const ENTROPY_LEN: usize = 32;

/// Convert a mnemonic phrase to its 64-byte BIP-39 seed.
///
/// The phrase is validated (word list and checksum) before the PBKDF2
/// stretch runs.
///
/// # Arguments
/// * `phrase` - A BIP-39 English mnemonic.
/// * `passphrase` - The optional passphrase; empty for none.
///
/// # Returns
/// The seed, zeroized on drop.
pub fn mnemonic_to_seed(
    phrase: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; 64]>, PrimitivesError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
        .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
    Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
}

/// Generate a fresh 24-word English mnemonic from OS randomness.
pub fn generate_mnemonic() -> Result<String, PrimitivesError> {
    let mut entropy = Zeroizing::new([0u8; ENTROPY_LEN]);
    OsRng.fill_bytes(&mut entropy[..]);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..])
        .map_err(|e| PrimitivesError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}
