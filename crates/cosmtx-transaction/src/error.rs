/// Error types for transaction building, signing and serialization.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Fee amount or gas limit was not set before signing.
    #[error("missing fee: {0} is not set")]
    MissingFee(&'static str),
    /// Account number or sequence was not set on the identity before signing.
    #[error("missing account info: {0} is not set")]
    MissingAccountInfo(&'static str),
    #[error("unknown built-in operation: {0}")]
    UnknownBuiltin(String),
    #[error("{op}: missing parameter '{name}'")]
    MissingParameter { op: String, name: String },
    #[error("{op}: invalid parameter '{name}': {reason}")]
    InvalidParameter {
        op: String,
        name: String,
        reason: String,
    },
    /// Encoded transaction bytes or text could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Failure reported by a network collaborator.
    #[error("network error: {0}")]
    Network(String),
    #[error("primitives error: {0}")]
    Primitives(#[from] cosmtx_primitives::PrimitivesError),
    #[error("account error: {0}")]
    Account(#[from] cosmtx_account::AccountError),
    #[error("proto error: {0}")]
    Proto(#[from] cosmtx_proto::ProtoError),
}
