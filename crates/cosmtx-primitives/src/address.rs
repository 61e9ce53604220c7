//! Account address encoding.
//!
//! Standard chains address an account by `Hash160(compressed pubkey)`;
//! Ethereum-compatible chains use the last 20 bytes of
//! `Keccak256(uncompressed pubkey without its 0x04 tag)`. Either payload is
//! rendered as Bech32 under a chain prefix; the Ethereum payload can also
//! be rendered as `0x` hex.

use bech32::{Bech32, Hrp};

use crate::ec::PublicKey;
use crate::hash::keccak256;
use crate::protocol::ProtocolFamily;
use crate::PrimitivesError;

/// Length of an account address payload.
pub const ADDRESS_LEN: usize = 20;

/// Encode `data` as Bech32 under the human-readable part `hrp`.
///
/// # Arguments
/// * `hrp` - The chain prefix, e.g. `cosmos` or `osmo`.
/// * `data` - The raw payload bytes.
///
/// # Returns
/// The Bech32 string, or an error if the prefix is not a valid HRP.
pub fn bech32_encode(hrp: &str, data: &[u8]) -> Result<String, PrimitivesError> {
    let hrp = Hrp::parse(hrp).map_err(|e| PrimitivesError::InvalidPrefix(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| PrimitivesError::AddressEncoding(e.to_string()))
}

/// Decode a Bech32 string into its prefix and payload.
pub fn bech32_decode(address: &str) -> Result<(String, Vec<u8>), PrimitivesError> {
    let (hrp, data) =
        bech32::decode(address).map_err(|e| PrimitivesError::AddressEncoding(e.to_string()))?;
    Ok((hrp.to_string(), data))
}

/// The 20-byte Ethereum address payload of a public key.
pub fn eth_address_bytes(pub_key: &PublicKey) -> [u8; ADDRESS_LEN] {
    let uncompressed = pub_key.to_uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let mut out = [0u8; ADDRESS_LEN];
    out.copy_from_slice(&digest[32 - ADDRESS_LEN..]);
    out
}

/// The 20-byte address payload for `family`.
pub fn address_bytes(pub_key: &PublicKey, family: ProtocolFamily) -> [u8; ADDRESS_LEN] {
    match family {
        ProtocolFamily::Standard => pub_key.hash160(),
        ProtocolFamily::Ethereum => eth_address_bytes(pub_key),
    }
}

/// Bech32 address of `pub_key` under `prefix` for the given family.
///
/// # Arguments
/// * `pub_key` - The account public key.
/// * `prefix` - The chain's Bech32 prefix.
/// * `family` - Selects Hash160 or Keccak payload.
///
/// # Returns
/// The Bech32 address string.
pub fn encode_address(
    pub_key: &PublicKey,
    prefix: &str,
    family: ProtocolFamily,
) -> Result<String, PrimitivesError> {
    bech32_encode(prefix, &address_bytes(pub_key, family))
}

/// Ethereum-style address of `pub_key`.
///
/// With no prefix the address is `0x` followed by 40 lowercase hex chars;
/// with a prefix it is the Bech32 form of the same payload.
pub fn eth_address(pub_key: &PublicKey, prefix: Option<&str>) -> Result<String, PrimitivesError> {
    let raw = eth_address_bytes(pub_key);
    match prefix {
        Some(hrp) => bech32_encode(hrp, &raw),
        None => Ok(format!("0x{}", hex::encode(raw))),
    }
}
