//! Message schemas synthesized from literal key/value mappings.
//!
//! Synthesis ([`schema::synthesize`]), encoding ([`encode::encode_message`])
//! and memoization ([`registry::SchemaRegistry`]) are independent steps; the
//! registry only composes them.

pub mod value;
pub mod schema;
pub mod encode;
pub mod registry;

pub use encode::encode_message;
pub use registry::{pack_from_mapping, SchemaCheck, SchemaRegistry};
pub use schema::{synthesize, type_name_from_url, FieldKind, FieldSchema, MessageSchema, SchemaSet};
pub use value::{Mapping, Value};
