/// Cosmos transaction SDK - Protobuf message envelopes.
///
/// Compiled Cosmos-SDK types come from `cosmos-sdk-proto`; IBC and Osmosis
/// messages are declared here with `prost` derives. On top of those sit the
/// `Any` packing helpers and a registry that synthesizes message schemas
/// from literal key/value mappings.

pub mod any;
pub mod message;
pub mod types;
pub mod dynamic;

mod error;
pub use cosmos_sdk_proto::Any;
pub use error::ProtoError;
pub use message::TypedMessage;
pub use prost::Message;
