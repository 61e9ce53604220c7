//! Compiled message types.
//!
//! Cosmos-SDK packages are re-exported from `cosmos-sdk-proto`. IBC transfer
//! and Osmosis swaps are not part of that crate and are declared in
//! [`ibc`] and [`osmosis`] with the same `prost` derives.

pub mod ibc;
pub mod osmosis;
pub mod tx;

use crate::message::TypedMessage;

pub use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;

/// `cosmos.bank.v1beta1`.
pub mod bank {
    pub use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
}

/// `cosmos.staking.v1beta1`.
pub mod staking {
    pub use cosmos_sdk_proto::cosmos::staking::v1beta1::{MsgDelegate, MsgUndelegate};
}

/// `cosmos.distribution.v1beta1`.
pub mod distribution {
    pub use cosmos_sdk_proto::cosmos::distribution::v1beta1::{
        MsgSetWithdrawAddress, MsgWithdrawDelegatorReward,
    };
}

/// secp256k1 public key.
///
/// Standard and ethermint chains share this layout (field 1, the 33-byte
/// compressed point); only the type URL on the enclosing `Any` differs.
pub mod crypto {
    pub use cosmos_sdk_proto::cosmos::crypto::secp256k1::PubKey;
}

/// A coin from an integer amount. Amounts are decimal strings on the wire,
/// so they may exceed 64 bits.
pub fn coin(amount: u128, denom: impl Into<String>) -> Coin {
    Coin {
        denom: denom.into(),
        amount: amount.to_string(),
    }
}

macro_rules! type_urls {
    ($($ty:ty => $url:literal),* $(,)?) => {
        $(
            impl TypedMessage for $ty {
                const TYPE_URL: &'static str = $url;
            }
        )*
    };
}

type_urls! {
    bank::MsgSend => "/cosmos.bank.v1beta1.MsgSend",
    staking::MsgDelegate => "/cosmos.staking.v1beta1.MsgDelegate",
    staking::MsgUndelegate => "/cosmos.staking.v1beta1.MsgUndelegate",
    distribution::MsgWithdrawDelegatorReward => "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward",
    distribution::MsgSetWithdrawAddress => "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress",
    ibc::MsgTransfer => "/ibc.applications.transfer.v1.MsgTransfer",
    osmosis::MsgSwapExactAmountIn => "/osmosis.gamm.v1beta1.MsgSwapExactAmountIn",
}
