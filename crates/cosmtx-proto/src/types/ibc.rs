//! IBC fungible token transfer (`ibc.applications.transfer.v1`).

use crate::types::Coin;

/// `ibc.core.client.v1.Height`: a height on the counterparty chain.
#[derive(Clone, Copy, PartialEq, Eq, prost::Message)]
pub struct Height {
    #[prost(uint64, tag = "1")]
    pub revision_number: u64,
    #[prost(uint64, tag = "2")]
    pub revision_height: u64,
}

/// Send tokens over an IBC channel.
///
/// At least one of `timeout_height` and `timeout_timestamp` (nanoseconds)
/// should be non-zero for the counterparty to accept the packet.
#[derive(Clone, PartialEq, prost::Message)]
pub struct MsgTransfer {
    #[prost(string, tag = "1")]
    pub source_port: String,
    #[prost(string, tag = "2")]
    pub source_channel: String,
    #[prost(message, optional, tag = "3")]
    pub token: Option<Coin>,
    #[prost(string, tag = "4")]
    pub sender: String,
    #[prost(string, tag = "5")]
    pub receiver: String,
    #[prost(message, optional, tag = "6")]
    pub timeout_height: Option<Height>,
    #[prost(uint64, tag = "7")]
    pub timeout_timestamp: u64,
    #[prost(string, tag = "8")]
    pub memo: String,
}
