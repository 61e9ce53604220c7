//! Transaction builder for Cosmos-SDK chains.
//!
//! Messages are stored as packed [`Any`] envelopes in insertion order. Fee,
//! gas and account counters are checked at signing time; nothing is
//! defaulted. Every call to [`Transaction::sign_and_serialize`] re-encodes
//! the body, auth info and sign document from the current state.

use cosmtx_account::Identity;
use cosmtx_primitives::ec::PublicKey;
use cosmtx_primitives::ProtocolFamily;
use cosmtx_proto::any;
use cosmtx_proto::dynamic::{Mapping, SchemaCheck, SchemaRegistry};
use cosmtx_proto::types::crypto::PubKey;
use cosmtx_proto::types::tx::{direct_mode_info, AuthInfo, Fee, SignDoc, SignerInfo, TxBody, TxRaw};
use cosmtx_proto::types::{coin, Coin};
use cosmtx_proto::{Any, Message, TypedMessage};
use tracing::debug;

use crate::builtin::BuiltinCatalog;
use crate::signed::SignedTransaction;
use crate::TransactionError;

/// An unsigned Cosmos transaction under construction.
///
/// # Wire layout produced by signing
///
/// | Structure | Contents                                              |
/// |-----------|-------------------------------------------------------|
/// | TxBody    | messages (in insertion order), memo, timeout height   |
/// | AuthInfo  | one signer (pubkey `Any`, DIRECT mode, sequence), fee |
/// | SignDoc   | body bytes, auth info bytes, chain id, account number |
/// | TxRaw     | body bytes, auth info bytes, `[signature]`            |
#[derive(Clone, Debug)]
pub struct Transaction {
    /// Chain the sign document is bound to.
    pub chain_id: String,

    messages: Vec<Any>,
    memo: String,
    timeout_height: u64,
    fee: Option<Coin>,
    gas: Option<u64>,
    fee_granter: Option<String>,
}

impl Transaction {
    /// Create an empty transaction for `chain_id`.
    pub fn new(chain_id: impl Into<String>) -> Self {
        Transaction {
            chain_id: chain_id.into(),
            messages: Vec::new(),
            memo: String::new(),
            timeout_height: 0,
            fee: None,
            gas: None,
            fee_granter: None,
        }
    }

    // -----------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------

    /// Append a compiled message under a caller-supplied type URL.
    pub fn add_typed_message<M: Message>(&mut self, payload: &M, type_url: &str) {
        self.add_any(any::pack(type_url, payload));
    }

    /// Append a compiled message under its own type URL.
    pub fn add_message<M: TypedMessage>(&mut self, payload: &M) {
        self.add_any(payload.to_any());
    }

    /// Append a message given only as a key/value mapping.
    ///
    /// The schema is synthesized in the process-wide registry on first use
    /// of the type name.
    pub fn add_mapping_message(
        &mut self,
        mapping: &Mapping,
        type_url: &str,
    ) -> Result<(), TransactionError> {
        self.add_mapping_message_with(
            SchemaRegistry::global(),
            mapping,
            type_url,
            SchemaCheck::Permissive,
        )
    }

    /// Like [`add_mapping_message`](Self::add_mapping_message), against an
    /// explicit registry and consistency mode.
    pub fn add_mapping_message_with(
        &mut self,
        registry: &SchemaRegistry,
        mapping: &Mapping,
        type_url: &str,
        check: SchemaCheck,
    ) -> Result<(), TransactionError> {
        let any = registry.pack(type_url, mapping, check)?;
        self.add_any(any);
        Ok(())
    }

    /// Append a message produced by a built-in operation of the default catalog.
    pub fn add_builtin(&mut self, name: &str, params: &Mapping) -> Result<(), TransactionError> {
        self.add_builtin_from(BuiltinCatalog::global(), name, params)
    }

    /// Append a message produced by an operation of `catalog`.
    pub fn add_builtin_from(
        &mut self,
        catalog: &BuiltinCatalog,
        name: &str,
        params: &Mapping,
    ) -> Result<(), TransactionError> {
        let any = catalog.build(name, params)?;
        self.add_any(any);
        Ok(())
    }

    /// Append an already packed envelope.
    pub fn add_any(&mut self, any: Any) {
        self.messages.push(any);
    }

    pub fn messages(&self) -> &[Any] {
        &self.messages
    }

    // -----------------------------------------------------------------
    // Fee and body options
    // -----------------------------------------------------------------

    pub fn set_fee(&mut self, amount: u128, denom: impl Into<String>) {
        self.fee = Some(coin(amount, denom));
    }

    pub fn set_gas(&mut self, gas_limit: u64) {
        self.gas = Some(gas_limit);
    }

    /// Let another account pay the fee.
    pub fn set_fee_granter(&mut self, granter: impl Into<String>) {
        self.fee_granter = Some(granter.into());
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
    }

    /// Block height after which the transaction is no longer valid; 0 disables it.
    pub fn set_timeout_height(&mut self, height: u64) {
        self.timeout_height = height;
    }

    // -----------------------------------------------------------------
    // Signing
    // -----------------------------------------------------------------

    /// Build, sign and assemble the transaction for `identity`.
    ///
    /// The signature hash and the public key type URL both follow the
    /// identity's protocol family.
    ///
    /// The key is derived once per call and used for both the signer's
    /// public key and the signature.
    ///
    /// # Errors
    /// `MissingFee` if the fee or gas limit is unset, `MissingAccountInfo`
    /// if the identity's account number or sequence is unset, or any key
    /// derivation error.
    pub fn sign_and_serialize(
        &self,
        identity: &Identity,
    ) -> Result<SignedTransaction, TransactionError> {
        let fee = self.fee.clone().ok_or(TransactionError::MissingFee("fee amount"))?;
        let gas_limit = self.gas.ok_or(TransactionError::MissingFee("gas limit"))?;
        let account_number = identity
            .account_number()
            .ok_or(TransactionError::MissingAccountInfo("account number"))?;
        let sequence = identity
            .sequence()
            .ok_or(TransactionError::MissingAccountInfo("sequence"))?;

        let protocol = identity.protocol();
        let key = identity.private_key()?;

        let body_bytes = self.body().encode_to_vec();
        let auth_info_bytes = self
            .auth_info(&key.pub_key(), protocol, fee, gas_limit, sequence)
            .encode_to_vec();

        let sign_doc = SignDoc {
            body_bytes,
            auth_info_bytes,
            chain_id: self.chain_id.clone(),
            account_number,
        };
        let signature = key.sign(&sign_doc.encode_to_vec(), protocol.hash_algorithm())?;

        let raw = TxRaw {
            body_bytes: sign_doc.body_bytes,
            auth_info_bytes: sign_doc.auth_info_bytes,
            signatures: vec![signature.to_bytes().to_vec()],
        };
        let signed = SignedTransaction::from_raw(raw);
        debug!(
            chain_id = %self.chain_id,
            messages = self.messages.len(),
            sequence,
            account_number,
            size = signed.size(),
            "signed transaction"
        );
        Ok(signed)
    }

    fn body(&self) -> TxBody {
        TxBody {
            messages: self.messages.clone(),
            memo: self.memo.clone(),
            timeout_height: self.timeout_height,
            ..Default::default()
        }
    }

    fn auth_info(
        &self,
        pub_key: &PublicKey,
        protocol: ProtocolFamily,
        fee: Coin,
        gas_limit: u64,
        sequence: u64,
    ) -> AuthInfo {
        let pub_key = PubKey {
            key: pub_key.to_compressed().to_vec(),
        };
        let signer = SignerInfo {
            public_key: Some(any::pack(protocol.pub_key_type_url(), &pub_key)),
            mode_info: Some(direct_mode_info()),
            sequence,
        };
        AuthInfo {
            signer_infos: vec![signer],
            fee: Some(Fee {
                amount: vec![fee],
                gas_limit,
                payer: String::new(),
                granter: self.fee_granter.clone().unwrap_or_default(),
            }),
            ..Default::default()
        }
    }
}
