//! Signing identity: key source, derivation parameters and session counters.

use std::fmt;

use cosmtx_primitives::address::{encode_address, eth_address};
use cosmtx_primitives::ec::{PrivateKey, PublicKey, Signature};
use cosmtx_primitives::hd::{self, HdPath};
use cosmtx_primitives::ProtocolFamily;
use tracing::debug;
use zeroize::Zeroizing;

use crate::config::IdentityConfig;
use crate::session::{AccountInfo, Session};
use crate::AccountError;

enum KeySource {
    Seed {
        phrase: Zeroizing<String>,
        passphrase: Zeroizing<String>,
    },
    Raw(PrivateKey),
}

/// Parameters that select which key and address an identity resolves to.
#[derive(Clone, Debug)]
struct DerivationParams {
    coin_type: u32,
    address_index: u32,
    address_prefix: String,
    protocol: ProtocolFamily,
}

/// A signer on a Cosmos-SDK chain.
///
/// Keys and addresses are recomputed from the key source on every call; only
/// the [`Session`] counters are mutable state.
pub struct Identity {
    source: KeySource,
    params: DerivationParams,
    session: Session,
}

impl Identity {
    /// Build an identity from a config holding exactly one key source.
    ///
    /// # Errors
    /// `ConflictingKeySource` if both a phrase and a raw key are set,
    /// `MissingKeySource` if neither is, `IndexRequiresSeed` for a raw key
    /// with a non-zero address index, and an `InvalidPath` primitives error
    /// if the coin type or address index is 2^31 or above. Invalid phrases
    /// and keys are rejected here rather than at first use.
    pub fn new(mut config: IdentityConfig) -> Result<Self, AccountError> {
        HdPath::bip44(config.coin_type, config.address_index).check_segments()?;
        let source = match (config.seed_phrase.take(), config.private_key.take()) {
            (Some(_), Some(_)) => return Err(AccountError::ConflictingKeySource),
            (None, None) => return Err(AccountError::MissingKeySource),
            (Some(phrase), None) => {
                let phrase = Zeroizing::new(phrase);
                let passphrase = Zeroizing::new(std::mem::take(&mut config.passphrase));
                // Validate the mnemonic up front.
                hd::mnemonic_to_seed(&phrase, &passphrase)?;
                KeySource::Seed { phrase, passphrase }
            }
            (None, Some(hex_key)) => {
                let hex_key = Zeroizing::new(hex_key);
                if config.address_index != 0 {
                    return Err(AccountError::IndexRequiresSeed {
                        index: config.address_index,
                    });
                }
                KeySource::Raw(PrivateKey::from_hex(&hex_key)?)
            }
        };

        let params = DerivationParams {
            coin_type: config.coin_type,
            address_index: config.address_index,
            address_prefix: std::mem::take(&mut config.address_prefix),
            protocol: config.protocol,
        };
        debug!(
            coin_type = params.coin_type,
            address_index = params.address_index,
            prefix = %params.address_prefix,
            protocol = ?params.protocol,
            seeded = matches!(source, KeySource::Seed { .. }),
            "created identity"
        );

        Ok(Identity {
            source,
            params,
            session: Session::default(),
        })
    }

    /// Create an identity backed by a freshly generated 24-word mnemonic.
    ///
    /// Any key source already present in `config` is replaced.
    pub fn generate(mut config: IdentityConfig) -> Result<Self, AccountError> {
        let phrase = hd::generate_mnemonic()?;
        drop(config.private_key.take().map(Zeroizing::new));
        Identity::new(config.with_seed_phrase(phrase))
    }

    // ------------------------------------------------------------------
    // Configuration
    // ------------------------------------------------------------------

    /// The mnemonic, when the identity is seed-backed.
    pub fn seed_phrase(&self) -> Option<&str> {
        match &self.source {
            KeySource::Seed { phrase, .. } => Some(phrase.as_str()),
            KeySource::Raw(_) => None,
        }
    }

    pub fn coin_type(&self) -> u32 {
        self.params.coin_type
    }

    pub fn address_index(&self) -> u32 {
        self.params.address_index
    }

    pub fn address_prefix(&self) -> &str {
        &self.params.address_prefix
    }

    pub fn protocol(&self) -> ProtocolFamily {
        self.params.protocol
    }

    /// The derivation path of the current address index.
    pub fn hd_path(&self) -> HdPath {
        HdPath::bip44(self.params.coin_type, self.params.address_index)
    }

    /// Switch to another sub-account of the same seed.
    pub fn set_address_index(&mut self, address_index: u32) -> Result<(), AccountError> {
        HdPath::bip44(self.params.coin_type, address_index).check_segments()?;
        if address_index != 0 && matches!(self.source, KeySource::Raw(_)) {
            return Err(AccountError::IndexRequiresSeed {
                index: address_index,
            });
        }
        self.params.address_index = address_index;
        Ok(())
    }

    pub fn set_address_prefix(&mut self, prefix: impl Into<String>) {
        self.params.address_prefix = prefix.into();
    }

    // ------------------------------------------------------------------
    // Derived keys and addresses
    // ------------------------------------------------------------------

    pub fn private_key(&self) -> Result<PrivateKey, AccountError> {
        self.private_key_at(self.params.address_index)
    }

    /// Private key of an arbitrary address index, without changing the
    /// identity's own index.
    pub fn private_key_at(&self, address_index: u32) -> Result<PrivateKey, AccountError> {
        match &self.source {
            KeySource::Seed { phrase, passphrase } => {
                let path = HdPath::bip44(self.params.coin_type, address_index);
                debug!(path = %path, "deriving private key");
                Ok(hd::derive(phrase, passphrase, &path)?)
            }
            KeySource::Raw(key) if address_index == 0 => Ok(key.clone()),
            KeySource::Raw(_) => Err(AccountError::IndexRequiresSeed {
                index: address_index,
            }),
        }
    }

    pub fn public_key(&self) -> Result<PublicKey, AccountError> {
        Ok(self.private_key()?.pub_key())
    }

    /// Bech32 address under the identity's prefix and index.
    pub fn address(&self) -> Result<String, AccountError> {
        self.address_for(None, None)
    }

    /// Bech32 address with an optional prefix and index override.
    pub fn address_for(
        &self,
        prefix: Option<&str>,
        address_index: Option<u32>,
    ) -> Result<String, AccountError> {
        let index = address_index.unwrap_or(self.params.address_index);
        let prefix = prefix.unwrap_or(&self.params.address_prefix);
        let pub_key = self.private_key_at(index)?.pub_key();
        Ok(encode_address(&pub_key, prefix, self.params.protocol)?)
    }

    /// `0x`-prefixed hex address for ethereum-style identities, `None` otherwise.
    pub fn eth_address(&self) -> Result<Option<String>, AccountError> {
        if !self.params.protocol.is_ethereum() {
            return Ok(None);
        }
        Ok(Some(eth_address(&self.public_key()?, None)?))
    }

    /// Sign with the hash function fixed by the identity's protocol family.
    pub fn sign(&self, message: &[u8]) -> Result<Signature, AccountError> {
        let key = self.private_key()?;
        Ok(key.sign(message, self.params.protocol.hash_algorithm())?)
    }

    // ------------------------------------------------------------------
    // Session counters
    // ------------------------------------------------------------------

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sequence(&self) -> Option<u64> {
        self.session.sequence
    }

    pub fn account_number(&self) -> Option<u64> {
        self.session.account_number
    }

    pub fn set_sequence(&mut self, sequence: u64) {
        self.session.sequence = Some(sequence);
    }

    pub fn set_account_number(&mut self, account_number: u64) {
        self.session.account_number = Some(account_number);
    }

    pub fn increase_sequence(&mut self, by: u64) -> Result<u64, AccountError> {
        self.session.increase_sequence(by)
    }

    pub fn apply_account_info(&mut self, info: AccountInfo) {
        self.session.apply(info);
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            KeySource::Seed { .. } => "seed",
            KeySource::Raw(_) => "raw",
        };
        f.debug_struct("Identity")
            .field("source", &source)
            .field("params", &self.params)
            .field("session", &self.session)
            .finish()
    }
}
