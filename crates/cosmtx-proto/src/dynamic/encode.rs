//! Encoding a mapping against synthesized schemas.

use prost::encoding::{self, encode_key, encode_varint, WireType};

use crate::dynamic::schema::{FieldKind, FieldSchema, MessageSchema, SchemaSet};
use crate::dynamic::value::{Mapping, Value};
use crate::ProtoError;

/// Encode `mapping` as the message `type_name` from `schemas`.
///
/// Fields are written in field-number order regardless of mapping order.
/// Scalars holding their proto3 default are omitted; nested messages are
/// always written. An int value is accepted for a float field.
///
/// # Returns
/// The canonical encoding, or a schema error for unknown keys or values
/// whose kind does not match the registered field.
pub fn encode_message(
    schemas: &SchemaSet,
    type_name: &str,
    mapping: &Mapping,
) -> Result<Vec<u8>, ProtoError> {
    let schema = schemas
        .get(type_name)
        .ok_or_else(|| ProtoError::UnknownType(type_name.to_string()))?;

    for (key, _) in mapping.iter() {
        if schema.field(key).is_none() {
            return Err(ProtoError::UnknownField {
                message: schema.name.clone(),
                field: key.to_string(),
            });
        }
    }

    let mut buf = Vec::new();
    for field in &schema.fields {
        if let Some(value) = mapping.get(&field.name) {
            encode_field(&mut buf, schemas, schema, field, value)?;
        }
    }
    Ok(buf)
}

fn length_delimited(tag: u32, bytes: &[u8], buf: &mut Vec<u8>) {
    encode_key(tag, WireType::LengthDelimited, buf);
    encode_varint(bytes.len() as u64, buf);
    buf.extend_from_slice(bytes);
}

fn encode_field(
    buf: &mut Vec<u8>,
    schemas: &SchemaSet,
    schema: &MessageSchema,
    field: &FieldSchema,
    value: &Value,
) -> Result<(), ProtoError> {
    let path = || format!("{}.{}", schema.name, field.name);
    let tag = field.number;

    if !field.repeated {
        match &field.kind {
            FieldKind::Int => {
                let v = as_int(value, &path)?;
                if v != 0 {
                    encoding::int64::encode(tag, &v, buf);
                }
            }
            FieldKind::Float => {
                let v = as_float(value, &path)?;
                if v != 0.0 {
                    encoding::float::encode(tag, &v, buf);
                }
            }
            FieldKind::Bool => {
                if as_bool(value, &path)? {
                    encoding::bool::encode(tag, &true, buf);
                }
            }
            FieldKind::String => {
                let v = as_str(value, &path)?;
                if !v.is_empty() {
                    length_delimited(tag, v.as_bytes(), buf);
                }
            }
            FieldKind::Message(nested) => {
                let bytes = encode_message(schemas, nested, as_map(value, &path)?)?;
                length_delimited(tag, &bytes, buf);
            }
        }
        return Ok(());
    }

    let items = match value {
        Value::Seq(items) => items,
        other => return Err(mismatch(path(), "seq", other)),
    };

    match &field.kind {
        FieldKind::Int => {
            let values = items
                .iter()
                .map(|item| as_int(item, &path))
                .collect::<Result<Vec<_>, _>>()?;
            encoding::int64::encode_packed(tag, &values, buf);
        }
        FieldKind::Float => {
            let values = items
                .iter()
                .map(|item| as_float(item, &path))
                .collect::<Result<Vec<_>, _>>()?;
            encoding::float::encode_packed(tag, &values, buf);
        }
        FieldKind::Bool => {
            let values = items
                .iter()
                .map(|item| as_bool(item, &path))
                .collect::<Result<Vec<_>, _>>()?;
            encoding::bool::encode_packed(tag, &values, buf);
        }
        FieldKind::String => {
            for item in items {
                length_delimited(tag, as_str(item, &path)?.as_bytes(), buf);
            }
        }
        FieldKind::Message(nested) => {
            for item in items {
                let bytes = encode_message(schemas, nested, as_map(item, &path)?)?;
                length_delimited(tag, &bytes, buf);
            }
        }
    }
    Ok(())
}

fn mismatch(field: String, expected: &'static str, found: &Value) -> ProtoError {
    ProtoError::TypeMismatch {
        field,
        expected,
        found: found.kind_name(),
    }
}

fn as_int(value: &Value, path: &dyn Fn() -> String) -> Result<i64, ProtoError> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Err(mismatch(path(), FieldKind::Int.name(), other)),
    }
}

fn as_float(value: &Value, path: &dyn Fn() -> String) -> Result<f32, ProtoError> {
    match value {
        Value::Float(f) => Ok(*f as f32),
        Value::Int(i) => Ok(*i as f32),
        other => Err(mismatch(path(), FieldKind::Float.name(), other)),
    }
}

fn as_bool(value: &Value, path: &dyn Fn() -> String) -> Result<bool, ProtoError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch(path(), FieldKind::Bool.name(), other)),
    }
}

fn as_str<'v>(value: &'v Value, path: &dyn Fn() -> String) -> Result<&'v str, ProtoError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(mismatch(path(), FieldKind::String.name(), other)),
    }
}

fn as_map<'v>(value: &'v Value, path: &dyn Fn() -> String) -> Result<&'v Mapping, ProtoError> {
    match value {
        Value::Map(m) => Ok(m),
        other => Err(mismatch(path(), "map", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::schema::synthesize;
    use crate::types::bank::MsgSend;
    use crate::types::coin;
    use prost::Message;

    fn encode(type_name: &str, mapping: &Mapping) -> Vec<u8> {
        let set = synthesize(type_name, mapping).unwrap();
        encode_message(&set, type_name, mapping).unwrap()
    }

    #[test]
    fn test_mapping_matches_compiled_msg_send() {
        let coin = Mapping::new().with("denom", "uatom").with("amount", "1000");
        let mapping = Mapping::new()
            .with("from_address", "cosmos1from")
            .with("to_address", "cosmos1to")
            .with("amount", vec![Value::Map(coin)]);

        let compiled = MsgSend {
            from_address: "cosmos1from".into(),
            to_address: "cosmos1to".into(),
            amount: vec![crate::types::coin(1000, "uatom")],
        };
        assert_eq!(encode("MsgSend", &mapping), compiled.encode_to_vec());
    }

    #[test]
    fn test_mapping_decodes_as_compiled_msg_send() {
        let coin_map = Mapping::new().with("denom", "uosmo").with("amount", "25");
        let mapping = Mapping::new()
            .with("from_address", "osmo1from")
            .with("to_address", "osmo1to")
            .with("amount", vec![coin_map.clone(), coin_map]);
        let decoded = MsgSend::decode(encode("MsgSend", &mapping).as_slice()).unwrap();
        assert_eq!(decoded.from_address, "osmo1from");
        assert_eq!(decoded.amount, vec![coin(25, "uosmo"), coin(25, "uosmo")]);
    }

    #[test]
    fn test_scalar_encodings() {
        let mapping = Mapping::new()
            .with("n", -2)
            .with("f", 1.5)
            .with("b", true)
            .with("s", "hi");
        assert_eq!(
            hex::encode(encode("MsgScalars", &mapping)),
            concat!("08feffffffffffffffff01", "150000c03f", "1801", "22026869")
        );
    }

    #[test]
    fn test_defaults_omitted_but_nested_message_kept() {
        let mapping = Mapping::new()
            .with("n", 0)
            .with("s", "")
            .with("inner", Mapping::new().with("x", 0));
        assert_eq!(encode("MsgDefaults", &mapping), vec![0x1a, 0x00]);
    }

    #[test]
    fn test_repeated_encodings() {
        let mapping = Mapping::new()
            .with("ids", vec![1, 300])
            .with("flags", vec![true, false])
            .with("names", vec!["a", ""]);
        assert_eq!(
            hex::encode(encode("MsgRepeated", &mapping)),
            concat!("0a0301ac02", "12020100", "1a0161", "1a00")
        );
    }

    #[test]
    fn test_field_order_follows_schema_not_mapping() {
        let original = Mapping::new().with("a", "x").with("b", 7);
        let set = synthesize("MsgOrder", &original).unwrap();
        let reordered = Mapping::new().with("b", 7).with("a", "x");
        assert_eq!(
            encode_message(&set, "MsgOrder", &reordered).unwrap(),
            encode_message(&set, "MsgOrder", &original).unwrap()
        );
    }

    #[test]
    fn test_int_coerced_into_float_field() {
        let set = synthesize("MsgPrice", &Mapping::new().with("price", 0.25)).unwrap();
        let bytes = encode_message(&set, "MsgPrice", &Mapping::new().with("price", 2)).unwrap();
        assert_eq!(hex::encode(bytes), "0d00000040");
    }

    #[test]
    fn test_mismatches_and_unknown_fields() {
        let set = synthesize("MsgStrict", &Mapping::new().with("count", 1)).unwrap();

        assert!(matches!(
            encode_message(&set, "MsgStrict", &Mapping::new().with("count", "one")),
            Err(ProtoError::TypeMismatch { expected: "int", found: "string", .. })
        ));
        assert!(matches!(
            encode_message(&set, "MsgStrict", &Mapping::new().with("other", 1)),
            Err(ProtoError::UnknownField { .. })
        ));
        assert!(matches!(
            encode_message(&set, "MsgMissing", &Mapping::new()),
            Err(ProtoError::UnknownType(_))
        ));
    }
}
