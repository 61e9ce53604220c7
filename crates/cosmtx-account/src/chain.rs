//! Per-chain parameters and well-known presets.

use std::borrow::Cow;

use cosmtx_primitives::hd::path::{COSMOS_COIN_TYPE, ETHEREUM_COIN_TYPE};
use cosmtx_primitives::ProtocolFamily;
use serde::{Deserialize, Serialize};

/// Network parameters an identity and a transaction need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Human-readable chain name.
    pub name: Cow<'static, str>,
    /// Chain id committed to in every sign document.
    pub chain_id: Cow<'static, str>,
    /// Bech32 human-readable part for account addresses.
    pub address_prefix: Cow<'static, str>,
    /// SLIP-44 coin type used in the derivation path.
    pub coin_type: u32,
    /// Address, digest and public key conventions.
    #[serde(default)]
    pub protocol: ProtocolFamily,
    /// Denom fees are usually paid in.
    pub fee_denom: Cow<'static, str>,
}

impl ChainConfig {
    pub const COSMOS_HUB: ChainConfig = ChainConfig {
        name: Cow::Borrowed("Cosmos Hub"),
        chain_id: Cow::Borrowed("cosmoshub-4"),
        address_prefix: Cow::Borrowed("cosmos"),
        coin_type: COSMOS_COIN_TYPE,
        protocol: ProtocolFamily::Standard,
        fee_denom: Cow::Borrowed("uatom"),
    };

    pub const OSMOSIS: ChainConfig = ChainConfig {
        name: Cow::Borrowed("Osmosis"),
        chain_id: Cow::Borrowed("osmosis-1"),
        address_prefix: Cow::Borrowed("osmo"),
        coin_type: COSMOS_COIN_TYPE,
        protocol: ProtocolFamily::Standard,
        fee_denom: Cow::Borrowed("uosmo"),
    };

    pub const EVMOS: ChainConfig = ChainConfig {
        name: Cow::Borrowed("Evmos"),
        chain_id: Cow::Borrowed("evmos_9001-2"),
        address_prefix: Cow::Borrowed("evmos"),
        coin_type: ETHEREUM_COIN_TYPE,
        protocol: ProtocolFamily::Ethereum,
        fee_denom: Cow::Borrowed("aevmos"),
    };

    pub const AGORIC: ChainConfig = ChainConfig {
        name: Cow::Borrowed("Agoric"),
        chain_id: Cow::Borrowed("agoric-3"),
        address_prefix: Cow::Borrowed("agoric"),
        coin_type: 564,
        protocol: ProtocolFamily::Standard,
        fee_denom: Cow::Borrowed("ubld"),
    };

    /// All built-in presets.
    pub const PRESETS: &'static [ChainConfig] =
        &[Self::COSMOS_HUB, Self::OSMOSIS, Self::EVMOS, Self::AGORIC];

    /// Look up a preset by chain id.
    pub fn by_chain_id(chain_id: &str) -> Option<&'static ChainConfig> {
        Self::PRESETS.iter().find(|c| c.chain_id == chain_id)
    }
}
