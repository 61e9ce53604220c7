//! End-to-end signing tests against fixed vectors.

use std::cell::RefCell;

use cosmtx_account::{AccountInfo, ChainConfig, Identity, IdentityConfig};
use cosmtx_primitives::ec::Signature;
use cosmtx_primitives::hash::HashAlgorithm;
use cosmtx_proto::dynamic::{Mapping, SchemaCheck, SchemaRegistry};
use cosmtx_proto::types::bank::MsgSend;
use cosmtx_proto::types::tx::{Fee, SignDoc};
use cosmtx_proto::types::coin;
use cosmtx_proto::{Message, TypedMessage};

use crate::broadcaster::{broadcast_and_advance, load_account_info};
use crate::{
    AccountInfoSource, BroadcastMode, BroadcastOutcome, Broadcaster, SignedTransaction,
    Transaction, TransactionError,
};

const PHRASE: &str = "law grab theory better athlete submit awkward hawk state wedding wave monkey audit blame fury wood tag rent furnace exotic jeans drift destroy style";

const COSMOS_TX: &str = "CpABCo0BChwvY29zbW9zLmJhbmsudjFiZXRhMS5Nc2dTZW5kEm0KLWNvc21vczFxZWNuMHVqcDRydzhobjkzbDlqcHN4eXc0ZmEyOGE1MjM3YTRweBItY29zbW9zMXRrdjlycXV4cjg4cjdzbnJnNDJreGRqOWdzbmZ4eGcwMjhrdWg5Gg0KBXVhdG9tEgQxMDAwEmYKUApGCh8vY29zbW9zLmNyeXB0by5zZWNwMjU2azEuUHViS2V5EiMKIQIkQVvG9OBetDe7bYUgl2vwgbJFxmmGuquytVSEwhQ0uBIECgIIARgBEhIKDQoFdWF0b20SBDEwMDAQ6AcaQJqww3jDNgn4UMDpaFq34xPbdwTAsn4VnRvZ1rjYGCMEa6fDKnu9T5xlQV5IEpCDeMzmNBEhTo9QtcOIzjjPzes=";

const EVMOS_TX: &str = "Cr8BCpgBChwvY29zbW9zLmJhbmsudjFiZXRhMS5Nc2dTZW5kEngKLGV2bW9zMTV4cnYzcmN5cjBrcG54Y3k3aDloZXJsdXJrZW1tc21mbjA0ZXVqEixldm1vczE1eHJ2M3JjeXIwa3BueGN5N2g5aGVybHVya2VtbXNtZm4wNGV1ahoaCgZhZXZtb3MSEDM1MDAwMDAwMDAwMDAwMDASIlRoZSBmaXJzdCBtb3NweSBldm1vcyB0cmFuc2FjdGlvbiESfgpZCk8KKC9ldGhlcm1pbnQuY3J5cHRvLnYxLmV0aHNlY3AyNTZrMS5QdWJLZXkSIwohAhSo8BPAmQ3ByGd8vGBMgpWdkHTx/8uwzo9dP2dvm+SeEgQKAggBGAESIQobCgZhZXZtb3MSETQwMDAwMDAwMDAwMDAwMDAwEICJehpA6LslOemKjb3KTW3lsyKHOUjNXEwQwoQfuEXySvP7yugweWqSOQgIa5fh9KLCwTgE66bj5SNppaJAQpK0c53Ipw==";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn cosmos_identity() -> Identity {
    let mut identity = Identity::new(IdentityConfig::from_seed_phrase(PHRASE)).unwrap();
    identity.set_account_number(1);
    identity.set_sequence(1);
    identity
}

fn evmos_identity() -> Identity {
    let mut identity = Identity::new(
        IdentityConfig::from_seed_phrase(PHRASE).with_chain(&ChainConfig::EVMOS),
    )
    .unwrap();
    identity.apply_account_info(AccountInfo {
        account_number: 2154050,
        sequence: 1,
    });
    identity
}

fn transfer_params(sender: &str, recipient: &str, amount: &str, denom: &str) -> Mapping {
    Mapping::new()
        .with("sender", sender)
        .with("recipient", recipient)
        .with("amount", amount)
        .with("denom", denom)
}

fn cosmos_transaction(identity: &Identity) -> Transaction {
    let recipient = identity.address_for(None, Some(2)).unwrap();
    let mut tx = Transaction::new("cosmoshub-4");
    tx.add_builtin(
        "transfer",
        &transfer_params(&identity.address().unwrap(), &recipient, "1000", "uatom"),
    )
    .unwrap();
    tx.set_fee(1000, "uatom");
    tx.set_gas(1000);
    tx
}

// -----------------------------------------------------------------------
// Golden transactions
// -----------------------------------------------------------------------

#[test]
fn test_cosmos_golden_transaction() {
    init_tracing();
    let identity = cosmos_identity();
    let signed = cosmos_transaction(&identity)
        .sign_and_serialize(&identity)
        .unwrap();
    assert_eq!(signed.to_base64(), COSMOS_TX);
}

#[test]
fn test_evmos_golden_transaction() {
    init_tracing();
    let identity = evmos_identity();
    let address = identity.address().unwrap();
    assert_eq!(address, "evmos15xrv3rcyr0kpnxcy7h9herlurkemmsmfn04euj");

    let mut tx = Transaction::new(ChainConfig::EVMOS.chain_id.to_string());
    tx.add_builtin(
        "transfer",
        &transfer_params(&address, &address, "3500000000000000", "aevmos"),
    )
    .unwrap();
    tx.set_fee(40_000_000_000_000_000, "aevmos");
    tx.set_gas(2_000_000);
    tx.set_memo("The first mospy evmos transaction!");

    let signed = tx.sign_and_serialize(&identity).unwrap();
    assert_eq!(signed.to_base64(), EVMOS_TX);
}

#[test]
fn test_compiled_message_matches_builtin() {
    let identity = cosmos_identity();
    let msg = MsgSend {
        from_address: identity.address().unwrap(),
        to_address: identity.address_for(None, Some(2)).unwrap(),
        amount: vec![coin(1000, "uatom")],
    };

    let mut typed = Transaction::new("cosmoshub-4");
    typed.add_message(&msg);
    typed.set_fee(1000, "uatom");
    typed.set_gas(1000);

    let mut by_url = Transaction::new("cosmoshub-4");
    by_url.add_typed_message(&msg, MsgSend::TYPE_URL);
    by_url.set_fee(1000, "uatom");
    by_url.set_gas(1000);

    assert_eq!(typed.sign_and_serialize(&identity).unwrap().to_base64(), COSMOS_TX);
    assert_eq!(by_url.sign_and_serialize(&identity).unwrap().to_base64(), COSMOS_TX);
}

#[test]
fn test_mapping_message_matches_builtin() {
    let identity = cosmos_identity();
    let coin = Mapping::new().with("denom", "uatom").with("amount", "1000");
    let msg = Mapping::new()
        .with("from_address", identity.address().unwrap())
        .with("to_address", identity.address_for(None, Some(2)).unwrap())
        .with("amount", vec![coin]);

    let registry = SchemaRegistry::new();
    let mut tx = Transaction::new("cosmoshub-4");
    tx.add_mapping_message_with(&registry, &msg, MsgSend::TYPE_URL, SchemaCheck::Strict)
        .unwrap();
    tx.set_fee(1000, "uatom");
    tx.set_gas(1000);

    assert_eq!(tx.sign_and_serialize(&identity).unwrap().to_base64(), COSMOS_TX);
}

// -----------------------------------------------------------------------
// Signing semantics
// -----------------------------------------------------------------------

#[test]
fn test_signature_verifies_over_sign_doc() {
    for (identity, chain_id, hash) in [
        (cosmos_identity(), "cosmoshub-4", HashAlgorithm::Sha256),
        (evmos_identity(), "evmos_9001-2", HashAlgorithm::Keccak256),
    ] {
        let mut tx = cosmos_transaction(&identity);
        tx.chain_id = chain_id.to_string();
        let signed = tx.sign_and_serialize(&identity).unwrap();

        let sign_doc = SignDoc {
            body_bytes: signed.body_bytes().to_vec(),
            auth_info_bytes: signed.auth_info_bytes().to_vec(),
            chain_id: chain_id.to_string(),
            account_number: identity.account_number().unwrap(),
        };
        assert_eq!(signed.signatures().len(), 1);
        let signature = Signature::from_bytes(&signed.signatures()[0]).unwrap();
        assert!(signature.is_low_s());
        assert!(identity
            .public_key()
            .unwrap()
            .verify(&sign_doc.encode_to_vec(), &signature, hash));
    }
}

#[test]
fn test_pub_key_type_url_follows_protocol() {
    let standard = cosmos_identity();
    let eth = evmos_identity();
    let standard_tx = cosmos_transaction(&standard).sign_and_serialize(&standard).unwrap();
    let eth_tx = cosmos_transaction(&eth).sign_and_serialize(&eth).unwrap();

    let contains = |haystack: &[u8], needle: &str| {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    };
    assert!(contains(standard_tx.auth_info_bytes(), "/cosmos.crypto.secp256k1.PubKey"));
    assert!(contains(eth_tx.auth_info_bytes(), "/ethermint.crypto.v1.ethsecp256k1.PubKey"));
    assert!(!contains(eth_tx.auth_info_bytes(), "/cosmos.crypto.secp256k1.PubKey"));
}

#[test]
fn test_signing_derives_key_once() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    struct CountDerivations(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for CountDerivations {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            if meta.target() == "cosmtx_account::identity" && meta.fields().field("path").is_some() {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    let identity = cosmos_identity();
    let tx = cosmos_transaction(&identity);
    let derivations = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountDerivations(derivations.clone()));
    let signed =
        tracing::subscriber::with_default(subscriber, || tx.sign_and_serialize(&identity)).unwrap();

    assert_eq!(signed.to_base64(), COSMOS_TX);
    assert_eq!(derivations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_resign_after_mutation_rebuilds() {
    let identity = cosmos_identity();
    let mut tx = cosmos_transaction(&identity);
    let first = tx.sign_and_serialize(&identity).unwrap();
    assert_eq!(tx.sign_and_serialize(&identity).unwrap(), first);

    tx.set_memo("second");
    let second = tx.sign_and_serialize(&identity).unwrap();
    assert_ne!(second.body_bytes(), first.body_bytes());
    assert_ne!(second.signatures(), first.signatures());
    assert_eq!(second.auth_info_bytes(), first.auth_info_bytes());

    tx.set_gas(2000);
    let third = tx.sign_and_serialize(&identity).unwrap();
    assert_ne!(third.auth_info_bytes(), second.auth_info_bytes());
}

#[test]
fn test_fee_granter_and_timeout_height() {
    let identity = cosmos_identity();
    let mut tx = cosmos_transaction(&identity);
    let granter = identity.address_for(None, Some(1)).unwrap();
    tx.set_fee_granter(granter.clone());
    tx.set_timeout_height(12_345);
    let signed = tx.sign_and_serialize(&identity).unwrap();

    let mut expected_fee = Fee {
        amount: vec![coin(1000, "uatom")],
        gas_limit: 1000,
        ..Default::default()
    };
    expected_fee.granter = granter;
    let fee_bytes = expected_fee.encode_to_vec();
    assert!(signed
        .auth_info_bytes()
        .windows(fee_bytes.len())
        .any(|w| w == fee_bytes.as_slice()));

    // timeout_height is field 3, varint 12345 = b9 60
    assert!(signed.body_bytes().ends_with(&[0x18, 0xb9, 0x60]));
}

// -----------------------------------------------------------------------
// Preconditions
// -----------------------------------------------------------------------

#[test]
fn test_missing_fee_and_gas() {
    let identity = cosmos_identity();
    let mut tx = Transaction::new("cosmoshub-4");
    assert!(matches!(
        tx.sign_and_serialize(&identity),
        Err(TransactionError::MissingFee(_))
    ));
    tx.set_fee(1000, "uatom");
    assert!(matches!(
        tx.sign_and_serialize(&identity),
        Err(TransactionError::MissingFee("gas limit"))
    ));
}

#[test]
fn test_missing_account_info() {
    let identity = Identity::new(IdentityConfig::from_seed_phrase(PHRASE)).unwrap();
    let tx = cosmos_transaction(&identity);
    assert!(matches!(
        tx.sign_and_serialize(&identity),
        Err(TransactionError::MissingAccountInfo("account number"))
    ));

    let mut identity = identity;
    identity.set_account_number(1);
    assert!(matches!(
        tx.sign_and_serialize(&identity),
        Err(TransactionError::MissingAccountInfo("sequence"))
    ));
}

// -----------------------------------------------------------------------
// Network boundary
// -----------------------------------------------------------------------

struct FixedAccounts(AccountInfo);

impl AccountInfoSource for FixedAccounts {
    fn account_info(&self, address: &str) -> Result<AccountInfo, TransactionError> {
        if address.starts_with("cosmos1") {
            Ok(self.0)
        } else {
            Err(TransactionError::Network(format!("unknown account {}", address)))
        }
    }
}

struct RecordingBroadcaster {
    code: u32,
    sent: RefCell<Vec<String>>,
}

impl Broadcaster for RecordingBroadcaster {
    fn broadcast(
        &self,
        tx: &SignedTransaction,
        mode: BroadcastMode,
    ) -> Result<BroadcastOutcome, TransactionError> {
        let request = tx.to_rpc_request(mode, 1);
        self.sent.borrow_mut().push(request["params"]["tx"].to_string());
        Ok(BroadcastOutcome {
            hash: "ABCD".to_string(),
            code: self.code,
            log: String::new(),
        })
    }
}

#[test]
fn test_load_account_info_then_sign() {
    let mut identity = Identity::new(IdentityConfig::from_seed_phrase(PHRASE)).unwrap();
    let source = FixedAccounts(AccountInfo {
        account_number: 1,
        sequence: 1,
    });
    load_account_info(&mut identity, &source).unwrap();

    let signed = cosmos_transaction(&identity).sign_and_serialize(&identity).unwrap();
    assert_eq!(signed.to_base64(), COSMOS_TX);

    let mut foreign = evmos_identity();
    assert!(matches!(
        load_account_info(&mut foreign, &source),
        Err(TransactionError::Network(_))
    ));
}

#[test]
fn test_broadcast_advances_sequence_on_success() {
    let mut identity = cosmos_identity();
    let signed = cosmos_transaction(&identity).sign_and_serialize(&identity).unwrap();

    let accepted = RecordingBroadcaster {
        code: 0,
        sent: RefCell::new(Vec::new()),
    };
    let outcome =
        broadcast_and_advance(&mut identity, &signed, &accepted, BroadcastMode::Sync).unwrap();
    assert!(outcome.is_success());
    assert_eq!(identity.sequence(), Some(2));
    assert_eq!(accepted.sent.borrow().len(), 1);

    let rejected = RecordingBroadcaster {
        code: 5,
        sent: RefCell::new(Vec::new()),
    };
    let outcome =
        broadcast_and_advance(&mut identity, &signed, &rejected, BroadcastMode::Sync).unwrap();
    assert!(!outcome.is_success());
    assert_eq!(identity.sequence(), Some(2));
}

#[test]
fn test_wire_round_trip() {
    let decoded = SignedTransaction::from_base64(COSMOS_TX).unwrap();
    assert_eq!(decoded.to_base64(), COSMOS_TX);
    assert_eq!(
        SignedTransaction::from_bytes(&decoded.to_bytes()).unwrap(),
        decoded
    );
}
