//! Packing messages into `google.protobuf.Any`.

use prost::Message;

use crate::{Any, ProtoError};

/// Encode `payload` and attach `type_url` unmodified.
pub fn pack<M: Message>(type_url: impl Into<String>, payload: &M) -> Any {
    Any {
        type_url: type_url.into(),
        value: payload.encode_to_vec(),
    }
}

/// Decode the payload of `any` as `M`, provided it carries `type_url`.
pub fn unpack<M: Message + Default>(any: &Any, type_url: &str) -> Result<M, ProtoError> {
    if any.type_url != type_url {
        return Err(ProtoError::TypeUrlMismatch {
            expected: type_url.to_string(),
            found: any.type_url.clone(),
        });
    }
    Ok(M::decode(any.value.as_slice())?)
}
