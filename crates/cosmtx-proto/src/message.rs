//! Messages with a fixed type identifier.

use prost::Message;

use crate::any;
use crate::Any;

/// A message with a fixed `/package.path.MessageName` type identifier.
pub trait TypedMessage: Message + Sized {
    /// The fully-qualified type URL attached when this message is packed.
    const TYPE_URL: &'static str;

    /// Pack this message into an [`Any`] under [`TypedMessage::TYPE_URL`].
    fn to_any(&self) -> Any {
        any::pack(Self::TYPE_URL, self)
    }
}
