//! BIP-44 derivation paths.

use std::fmt;
use std::str::FromStr;

use crate::PrimitivesError;

/// BIP-44 purpose segment.
pub const PURPOSE: u32 = 44;

/// Registered coin type for standard Cosmos chains.
pub const COSMOS_COIN_TYPE: u32 = 118;

/// Registered coin type for Ethereum-compatible chains.
pub const ETHEREUM_COIN_TYPE: u32 = 60;

/// First index reserved for hardened derivation.
const HARDENED_OFFSET: u32 = 1 << 31;

/// A BIP-44 path: `m/44'/coin_type'/account'/change/address_index`.
///
/// The first three segments are hardened; `change` and `address_index`
/// are not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HdPath {
    pub coin_type: u32,
    pub account: u32,
    pub change: u32,
    pub address_index: u32,
}

impl HdPath {
    /// Build a path with account 0 and change 0, the shape every wallet uses.
    pub fn bip44(coin_type: u32, address_index: u32) -> Self {
        HdPath {
            coin_type,
            account: 0,
            change: 0,
            address_index,
        }
    }

    /// Same path with a different final index.
    pub fn with_address_index(self, address_index: u32) -> Self {
        HdPath {
            address_index,
            ..self
        }
    }

    /// Every segment must stay below 2^31; the hardened marker is implied
    /// by position, never by the value.
    pub fn check_segments(&self) -> Result<(), PrimitivesError> {
        for segment in [self.coin_type, self.account, self.change, self.address_index] {
            if segment >= HARDENED_OFFSET {
                return Err(PrimitivesError::InvalidPath(format!(
                    "segment {} exceeds 2^31 - 1",
                    segment
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for HdPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m/{}'/{}'/{}'/{}/{}",
            PURPOSE, self.coin_type, self.account, self.change, self.address_index
        )
    }
}

impl FromStr for HdPath {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PrimitivesError::InvalidPath(s.to_string());

        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(invalid());
        }

        let mut segments = [0u32; 5];
        for (i, slot) in segments.iter_mut().enumerate() {
            let raw = parts.next().ok_or_else(invalid)?;
            let hardened = i < 3;
            let digits = match (hardened, raw.strip_suffix('\'')) {
                (true, Some(d)) => d,
                (false, None) => raw,
                _ => return Err(invalid()),
            };
            *slot = digits.parse().map_err(|_| invalid())?;
        }
        if parts.next().is_some() || segments[0] != PURPOSE {
            return Err(invalid());
        }

        let path = HdPath {
            coin_type: segments[1],
            account: segments[2],
            change: segments[3],
            address_index: segments[4],
        };
        path.check_segments()?;
        Ok(path)
    }
}
