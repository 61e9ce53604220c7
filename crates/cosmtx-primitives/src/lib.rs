/// Cosmos transaction SDK - Cryptographic primitives, key derivation, and addresses.
///
/// This crate provides the foundational building blocks for the SDK:
/// - Hash functions (SHA-256, RIPEMD-160, Hash160, Keccak-256)
/// - secp256k1 keys and deterministic low-S signatures
/// - BIP-39 mnemonic seeds and BIP-32/44 hierarchical derivation
/// - Bech32 and Ethereum-style address encoding

pub mod hash;
pub mod ec;
pub mod hd;
pub mod address;
pub mod protocol;

mod error;
pub use error::PrimitivesError;
pub use protocol::ProtocolFamily;
