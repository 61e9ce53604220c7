/// Cosmos transaction SDK - Signing identities and account state.
///
/// An [`Identity`] pairs a key source (mnemonic or raw key) with derivation
/// parameters and derives keys and addresses on demand. Replay-protection
/// counters live in a separate [`Session`]. [`ChainConfig`] presets bundle
/// the per-chain parameters.

mod error;
pub use error::AccountError;

pub mod chain;
pub mod config;
pub mod identity;
pub mod session;

pub use chain::ChainConfig;
pub use config::IdentityConfig;
pub use identity::Identity;
pub use session::{AccountInfo, Session};
