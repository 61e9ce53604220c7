use proptest::prelude::*;

use cosmtx_proto::dynamic::{Mapping, SchemaCheck, SchemaRegistry, Value};
use cosmtx_proto::types::bank::MsgSend;
use cosmtx_proto::types::tx::TxRaw;
use cosmtx_proto::types::Coin;
use cosmtx_proto::Message;

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
    ]
}

fn mapping() -> impl Strategy<Value = Mapping> {
    prop::collection::vec(("[a-z]{1,8}", scalar_value()), 1..8)
        .prop_map(|entries| entries.into_iter().collect::<Mapping>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn mapping_decodes_as_compiled_message(
        from in "[a-z0-9]{0,20}",
        to in "[a-z0-9]{1,20}",
        coins in prop::collection::vec(("[a-z]{1,8}", any::<u64>()), 1..4),
    ) {
        let amounts = coins
            .iter()
            .map(|(denom, amount)| {
                Mapping::new()
                    .with("denom", denom.as_str())
                    .with("amount", amount.to_string())
            })
            .collect::<Vec<_>>();
        let mapping = Mapping::new()
            .with("from_address", from.as_str())
            .with("to_address", to.as_str())
            .with("amount", amounts);

        let registry = SchemaRegistry::new();
        let any = registry
            .pack("/cosmos.bank.v1beta1.MsgSend", &mapping, SchemaCheck::Permissive)
            .unwrap();
        let decoded = MsgSend::decode(any.value.as_slice()).unwrap();
        let expected = MsgSend {
            from_address: from,
            to_address: to,
            amount: coins
                .into_iter()
                .map(|(denom, amount)| Coin { denom, amount: amount.to_string() })
                .collect(),
        };
        prop_assert_eq!(&decoded, &expected);
        prop_assert_eq!(any.value, expected.encode_to_vec());
    }

    #[test]
    fn pack_from_mapping_is_idempotent(m in mapping()) {
        let registry = SchemaRegistry::new();
        let first = registry.pack("/prop.v1.MsgProp", &m, SchemaCheck::Strict).unwrap();
        let second = registry.pack("/prop.v1.MsgProp", &m, SchemaCheck::Strict).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(!registry.register("MsgProp", &m, SchemaCheck::Strict).unwrap());
    }

    #[test]
    fn tx_raw_decodes_what_it_encodes(
        body in prop::collection::vec(any::<u8>(), 0..64),
        auth in prop::collection::vec(any::<u8>(), 0..64),
        sigs in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..65), 0..3)
    ) {
        let raw = TxRaw { body_bytes: body, auth_info_bytes: auth, signatures: sigs };
        let bytes = raw.encode_to_vec();
        prop_assert_eq!(TxRaw::decode(bytes.as_slice()).unwrap(), raw);
    }
}
