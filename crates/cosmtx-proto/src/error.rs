/// Error types for message packing and dynamic schema handling.
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    /// A mapping value has a kind that cannot be expressed as a protobuf field.
    #[error("unsupported value at {field}: {reason}")]
    UnsupportedValue { field: String, reason: String },
    /// A sequence used to infer a repeated field had no elements.
    #[error("cannot infer element type of empty sequence at {field}")]
    EmptySequence { field: String },
    /// A mapping value does not match the registered field kind.
    #[error("type mismatch at {field}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A mapping key has no field in the registered schema.
    #[error("message {message} has no field named {field}")]
    UnknownField { message: String, field: String },
    /// No schema is registered under the given type name.
    #[error("no schema registered for message type {0}")]
    UnknownType(String),
    /// Strict registration found a structure different from the registered one.
    #[error("schema mismatch for {type_name}: {reason}")]
    SchemaMismatch { type_name: String, reason: String },
    /// The shared schema registry lock was poisoned by a panicking writer.
    #[error("schema registry lock poisoned")]
    LockPoisoned,
    /// An envelope carried a different type URL than the one asked for.
    #[error("expected type url {expected}, found {found}")]
    TypeUrlMismatch { expected: String, found: String },
    /// Bytes did not decode as the requested message.
    #[error("decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}
