//! Conventional serialization trait for extension types.

use std::any::Any;

use super::error::HandlerError;
use crate::registry::MethodTable;

/// A type that knows how to turn itself into an extension payload and back.
///
/// Registering a type with only a tag (see
/// [`Factory::register`](crate::Factory::register)) routes encoding through
/// [`to_extension_bytes`](Self::to_extension_bytes) and decoding through
/// [`from_extension_bytes`](Self::from_extension_bytes). Both methods are
/// also published in the type's [`MethodTable`] under
/// [`DEFAULT_ENCODE_METHOD`](super::DEFAULT_ENCODE_METHOD) and
/// [`DEFAULT_DECODE_METHOD`](super::DEFAULT_DECODE_METHOD), so explicit
/// registrations can select them by name.
///
/// # Requirements
///
/// - `from_extension_bytes(&v.to_extension_bytes())` MUST reconstruct a value
///   equivalent to `v`
/// - Neither method may depend on the tag; the codec frames the payload
///
/// # Example
///
/// ```
/// use msgpack_factory::{ExtensionType, HandlerError};
///
/// struct Celsius(i32);
///
/// impl ExtensionType for Celsius {
///     fn to_extension_bytes(&self) -> Vec<u8> {
///         self.0.to_be_bytes().to_vec()
///     }
///
///     fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError> {
///         let raw: [u8; 4] = data
///             .try_into()
///             .map_err(|_| HandlerError::UnexpectedEof { expected: 4, actual: data.len() })?;
///         Ok(Celsius(i32::from_be_bytes(raw)))
///     }
/// }
/// ```
pub trait ExtensionType: Any + Send + Sync + Sized {
    /// Serialize `self` into an extension payload.
    fn to_extension_bytes(&self) -> Vec<u8>;

    /// Reconstruct a value from an extension payload.
    fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError>;

    /// Publish additional named methods selectable at registration time.
    ///
    /// The conventional methods are already present when this runs.
    fn extension_methods(methods: &mut MethodTable) {
        let _ = methods;
    }
}
