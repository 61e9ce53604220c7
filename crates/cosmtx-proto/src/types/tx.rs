//! `cosmos.tx.v1beta1` envelope types.
//!
//! Body and auth info are encoded once and carried as opaque bytes in both
//! the [`SignDoc`] and the final [`TxRaw`], so the signed bytes and the
//! transmitted bytes cannot diverge.

pub use cosmos_sdk_proto::cosmos::tx::signing::v1beta1::SignMode;
pub use cosmos_sdk_proto::cosmos::tx::v1beta1::{
    mode_info, AuthInfo, Fee, ModeInfo, SignDoc, SignerInfo, TxBody, TxRaw,
};

/// Single-signer `SIGN_MODE_DIRECT`.
pub fn direct_mode_info() -> ModeInfo {
    ModeInfo {
        sum: Some(mode_info::Sum::Single(mode_info::Single {
            mode: SignMode::Direct as i32,
        })),
    }
}
