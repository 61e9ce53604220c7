//! Osmosis GAMM swap messages (`osmosis.gamm.v1beta1`).

use crate::types::Coin;

/// One hop of a swap: the pool to trade through and the denom received.
#[derive(Clone, PartialEq, Eq, prost::Message)]
pub struct SwapAmountInRoute {
    #[prost(uint64, tag = "1")]
    pub pool_id: u64,
    #[prost(string, tag = "2")]
    pub token_out_denom: String,
}

/// Swap an exact input amount along `routes`, failing below `token_out_min_amount`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgSwapExactAmountIn {
    #[prost(string, tag = "1")]
    pub sender: String,
    #[prost(message, repeated, tag = "2")]
    pub routes: Vec<SwapAmountInRoute>,
    #[prost(message, optional, tag = "3")]
    pub token_in: Option<Coin>,
    #[prost(string, tag = "4")]
    pub token_out_min_amount: String,
}
