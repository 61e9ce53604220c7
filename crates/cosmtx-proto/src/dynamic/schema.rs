//! Schema synthesis from example values.

use std::collections::HashMap;

use prost::encoding::WireType;

use crate::dynamic::value::{Mapping, Value};
use crate::ProtoError;

/// The scalar or message kind of a synthesized field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 64-bit signed integer, varint encoded.
    Int,
    /// Single-precision float, fixed32 encoded.
    Float,
    Bool,
    String,
    /// Nested message, by synthesized type name.
    Message(String),
}

impl FieldKind {
    /// Wire type of one (unpacked) element of this kind.
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldKind::Int | FieldKind::Bool => WireType::Varint,
            FieldKind::Float => WireType::ThirtyTwoBit,
            FieldKind::String | FieldKind::Message(_) => WireType::LengthDelimited,
        }
    }

    /// Numeric and bool elements of a repeated field are packed.
    pub fn is_packed(&self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float | FieldKind::Bool)
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
            FieldKind::String => "string",
            FieldKind::Message(_) => "map",
        }
    }
}

/// One field of a synthesized message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldSchema {
    pub name: String,
    pub number: u32,
    pub kind: FieldKind,
    pub repeated: bool,
}

/// A synthesized message layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl MessageSchema {
    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A set of message schemas keyed by type name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaSet {
    schemas: HashMap<String, MessageSchema>,
}

impl SchemaSet {
    pub fn new() -> Self {
        SchemaSet::default()
    }

    pub fn get(&self, name: &str) -> Option<&MessageSchema> {
        self.schemas.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Insert unless a schema with the same name exists. Returns `true` if inserted.
    pub fn insert_if_absent(&mut self, schema: MessageSchema) -> bool {
        if self.schemas.contains_key(&schema.name) {
            return false;
        }
        self.schemas.insert(schema.name.clone(), schema);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Type name used for a type URL: the segment after the last `.`.
///
/// `/cosmos.bank.v1beta1.MsgSend` names `MsgSend`. A URL without dots
/// falls back to the text after the last `/`.
pub fn type_name_from_url(type_url: &str) -> &str {
    match type_url.rfind('.') {
        Some(i) => &type_url[i + 1..],
        None => type_url.rsplit('/').next().unwrap_or(type_url),
    }
}

/// Infer the schema of `mapping` under `type_name`, plus every nested schema.
///
/// Field numbers follow the mapping's order starting at 1. A nested map
/// under key `k` becomes message type `<type_name>_<k>`. A sequence takes
/// its element kind from its first element.
///
/// # Returns
/// All synthesized schemas, or a schema error for an empty sequence or a
/// sequence nested directly in a sequence.
pub fn synthesize(type_name: &str, mapping: &Mapping) -> Result<SchemaSet, ProtoError> {
    let mut set = SchemaSet::new();
    synthesize_into(&mut set, type_name, mapping)?;
    Ok(set)
}

fn synthesize_into(set: &mut SchemaSet, type_name: &str, mapping: &Mapping) -> Result<(), ProtoError> {
    let mut fields = Vec::with_capacity(mapping.len());
    for (index, (key, value)) in mapping.iter().enumerate() {
        let (kind, repeated) = match value {
            Value::Seq(items) => {
                let first = items.first().ok_or_else(|| ProtoError::EmptySequence {
                    field: format!("{}.{}", type_name, key),
                })?;
                (element_kind(set, type_name, key, first)?, true)
            }
            other => (element_kind(set, type_name, key, other)?, false),
        };
        fields.push(FieldSchema {
            name: key.to_string(),
            number: index as u32 + 1,
            kind,
            repeated,
        });
    }
    set.insert_if_absent(MessageSchema {
        name: type_name.to_string(),
        fields,
    });
    Ok(())
}

fn element_kind(
    set: &mut SchemaSet,
    parent: &str,
    key: &str,
    value: &Value,
) -> Result<FieldKind, ProtoError> {
    Ok(match value {
        Value::Int(_) => FieldKind::Int,
        Value::Float(_) => FieldKind::Float,
        Value::Bool(_) => FieldKind::Bool,
        Value::String(_) => FieldKind::String,
        Value::Map(nested) => {
            let nested_name = format!("{}_{}", parent, key);
            synthesize_into(set, &nested_name, nested)?;
            FieldKind::Message(nested_name)
        }
        Value::Seq(_) => {
            return Err(ProtoError::UnsupportedValue {
                field: format!("{}.{}", parent, key),
                reason: "sequences of sequences have no protobuf representation".to_string(),
            })
        }
    })
}
