//! Identity construction parameters.

use std::fmt;

use cosmtx_primitives::hd::path::COSMOS_COIN_TYPE;
use cosmtx_primitives::ProtocolFamily;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::chain::ChainConfig;

/// Default Bech32 prefix.
pub const DEFAULT_PREFIX: &str = "cosmos";

/// Everything needed to construct an [`Identity`](crate::Identity).
///
/// Exactly one of `seed_phrase` and `private_key` (hex) must be set; this is
/// checked once, by `Identity::new`. Secrets are zeroized on drop and never
/// appear in `Debug` output.
#[derive(Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub seed_phrase: Option<String>,
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub passphrase: String,
    #[serde(default = "default_coin_type")]
    pub coin_type: u32,
    #[serde(default)]
    pub address_index: u32,
    #[serde(default = "default_address_prefix")]
    pub address_prefix: String,
    #[serde(default)]
    pub protocol: ProtocolFamily,
}

fn default_coin_type() -> u32 {
    COSMOS_COIN_TYPE
}

fn default_address_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl IdentityConfig {
    /// Config backed by a BIP-39 mnemonic.
    pub fn from_seed_phrase(phrase: impl Into<String>) -> Self {
        Self::default().with_seed_phrase(phrase)
    }

    /// Config backed by a hex-encoded raw private key.
    pub fn from_private_key(hex_key: impl Into<String>) -> Self {
        Self::default().with_private_key(hex_key)
    }

    pub fn with_seed_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.seed_phrase = Some(phrase.into());
        self
    }

    pub fn with_private_key(mut self, hex_key: impl Into<String>) -> Self {
        self.private_key = Some(hex_key.into());
        self
    }

    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = passphrase.into();
        self
    }

    pub fn with_coin_type(mut self, coin_type: u32) -> Self {
        self.coin_type = coin_type;
        self
    }

    pub fn with_address_index(mut self, address_index: u32) -> Self {
        self.address_index = address_index;
        self
    }

    pub fn with_address_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.address_prefix = prefix.into();
        self
    }

    pub fn with_protocol(mut self, protocol: ProtocolFamily) -> Self {
        self.protocol = protocol;
        self
    }

    /// Take prefix, coin type and protocol family from a chain preset.
    pub fn with_chain(self, chain: &ChainConfig) -> Self {
        self.with_address_prefix(chain.address_prefix.to_string())
            .with_coin_type(chain.coin_type)
            .with_protocol(chain.protocol)
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            seed_phrase: None,
            private_key: None,
            passphrase: String::new(),
            coin_type: default_coin_type(),
            address_index: 0,
            address_prefix: default_address_prefix(),
            protocol: ProtocolFamily::Standard,
        }
    }
}

impl Drop for IdentityConfig {
    fn drop(&mut self) {
        self.seed_phrase.zeroize();
        self.private_key.zeroize();
        self.passphrase.zeroize();
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |set: bool| if set { "<redacted>" } else { "<none>" };
        f.debug_struct("IdentityConfig")
            .field("seed_phrase", &redact(self.seed_phrase.is_some()))
            .field("private_key", &redact(self.private_key.is_some()))
            .field("coin_type", &self.coin_type)
            .field("address_index", &self.address_index)
            .field("address_prefix", &self.address_prefix)
            .field("protocol", &self.protocol)
            .finish()
    }
}
