/// Cosmos transaction SDK - Transaction building and signing.
///
/// [`Transaction`] collects messages, fee and body options, then signs a
/// single-signer `SIGN_MODE_DIRECT` sign document with an [`Identity`]
/// and yields a [`SignedTransaction`] ready for a broadcaster.
///
/// [`Identity`]: cosmtx_account::Identity

pub mod transaction;
pub mod builtin;
pub mod signed;
pub mod broadcaster;

mod error;
pub use error::TransactionError;
pub use transaction::Transaction;
pub use builtin::{BuiltinCatalog, BuiltinFactory};
pub use signed::SignedTransaction;
pub use broadcaster::{AccountInfoSource, BroadcastMode, BroadcastOutcome, Broadcaster};

#[cfg(test)]
mod tests;
