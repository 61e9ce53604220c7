//! Interfaces to the network collaborator.
//!
//! Nothing here performs I/O. Implementors supply account counters before
//! signing and submit the signed bytes afterwards; retries and timeouts are
//! theirs to handle.

use cosmtx_account::{AccountInfo, Identity};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::signed::SignedTransaction;
use crate::TransactionError;

/// How long the node waits before answering a broadcast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastMode {
    /// Return after the mempool check.
    #[default]
    Sync,
    /// Return immediately.
    Async,
    /// Return after the transaction is committed in a block.
    Commit,
}

impl BroadcastMode {
    /// Tendermint JSON-RPC method name.
    pub fn rpc_method(&self) -> &'static str {
        match self {
            BroadcastMode::Sync => "broadcast_tx_sync",
            BroadcastMode::Async => "broadcast_tx_async",
            BroadcastMode::Commit => "broadcast_tx_commit",
        }
    }
}

/// Node response to a broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastOutcome {
    /// Transaction hash as reported by the node.
    pub hash: String,
    /// ABCI result code; 0 is success.
    pub code: u32,
    pub log: String,
}

impl BroadcastOutcome {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Source of account number and sequence for an address.
pub trait AccountInfoSource {
    fn account_info(&self, address: &str) -> Result<AccountInfo, TransactionError>;
}

/// Submits signed transactions to a node.
pub trait Broadcaster {
    fn broadcast(
        &self,
        tx: &SignedTransaction,
        mode: BroadcastMode,
    ) -> Result<BroadcastOutcome, TransactionError>;
}

/// Fetch the identity's counters from `source` and store them on it.
pub fn load_account_info<S: AccountInfoSource + ?Sized>(
    identity: &mut Identity,
    source: &S,
) -> Result<AccountInfo, TransactionError> {
    let address = identity.address()?;
    let info = source.account_info(&address)?;
    debug!(
        %address,
        account_number = info.account_number,
        sequence = info.sequence,
        "loaded account info"
    );
    identity.apply_account_info(info);
    Ok(info)
}

/// Broadcast `tx` and advance the identity's sequence if the node accepted it.
pub fn broadcast_and_advance<B: Broadcaster + ?Sized>(
    identity: &mut Identity,
    tx: &SignedTransaction,
    broadcaster: &B,
    mode: BroadcastMode,
) -> Result<BroadcastOutcome, TransactionError> {
    let outcome = broadcaster.broadcast(tx, mode)?;
    if outcome.is_success() {
        identity.increase_sequence(1)?;
    }
    debug!(hash = %outcome.hash, code = outcome.code, "broadcast finished");
    Ok(outcome)
}
