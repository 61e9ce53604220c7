/// Error types for identity construction and account state.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("both a seed phrase and a private key were supplied")]
    ConflictingKeySource,
    #[error("neither a seed phrase nor a private key was supplied")]
    MissingKeySource,
    #[error("address index {index} requires a seed phrase; a raw private key has no derivation path")]
    IndexRequiresSeed { index: u32 },
    #[error("sequence is not set")]
    SequenceUnset,
    #[error("sequence overflow")]
    SequenceOverflow,
    #[error("primitives error: {0}")]
    Primitives(#[from] cosmtx_primitives::PrimitivesError),
}
