//! Encoder/decoder factory
//!
//! The factory is the single place extension types are registered. Every
//! encoder or decoder it creates receives a duplicate of the matching
//! registry as it stands at that moment, and nothing afterwards.

use tracing::{debug, trace};

use super::registration::{Registration, SimpleRegistration};
use crate::codec::{Decoder, DecoderOptions, Encoder, EncoderOptions};
use crate::core::{ExtensionType, RegistrationError};
use crate::registry::{DecodeRegistry, EncodeRegistry};

/// Produces encoders and decoders sharing one set of extension types.
///
/// # Snapshot isolation
///
/// ```
/// # use msgpack_factory::{ExtensionType, Factory, HandlerError};
/// # struct Uuid([u8; 16]);
/// # impl ExtensionType for Uuid {
/// #     fn to_extension_bytes(&self) -> Vec<u8> { self.0.to_vec() }
/// #     fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError> {
/// #         data.try_into().map(Uuid).map_err(|_| HandlerError::InvalidPayload("uuid".into()))
/// #     }
/// # }
/// let mut factory = Factory::create();
/// let before = factory.new_encoder(None);
///
/// factory.register::<Uuid>(2).unwrap();
/// let after = factory.new_encoder(None);
///
/// assert!(before.ext_registry().lookup_type::<Uuid>().is_none());
/// assert!(after.ext_registry().lookup_type::<Uuid>().is_some());
/// ```
///
/// # Concurrency
///
/// Registration takes `&mut self` and instance creation takes `&self`, so a
/// snapshot can never observe half of a registration. Share a factory
/// across threads behind a read-write lock if registrations continue after
/// startup.
#[derive(Debug, Clone, Default)]
pub struct Factory {
    /// Reserved; stored but not applied to new encoders.
    encoder_options: EncoderOptions,
    /// Reserved; stored but not applied to new decoders.
    decoder_options: DecoderOptions,
    encode_registry: EncodeRegistry,
    decode_registry: DecodeRegistry,
}

impl Factory {
    /// Create a factory with empty registries.
    pub fn create() -> Self {
        Self::default()
    }

    /// Create an encoder holding a snapshot of the encode registry.
    ///
    /// `options` are handed to [`Encoder::new`] unchanged.
    pub fn new_encoder(&self, options: Option<EncoderOptions>) -> Encoder {
        let mut encoder = Encoder::new(options.unwrap_or_default());
        encoder.replace_ext_registry(self.encode_registry.duplicate());

        trace!(
            bindings = self.encode_registry.len(),
            "encoder created from factory snapshot"
        );
        encoder
    }

    /// Create a decoder holding a snapshot of the decode registry.
    ///
    /// `options` are handed to [`Decoder::new`] unchanged.
    pub fn new_decoder(&self, options: Option<DecoderOptions>) -> Decoder {
        let mut decoder = Decoder::new(options.unwrap_or_default());
        decoder.replace_ext_registry(self.decode_registry.duplicate());

        trace!(
            bindings = self.decode_registry.len(),
            "decoder created from factory snapshot"
        );
        decoder
    }

    /// Register an extension type.
    ///
    /// The registration is validated and its selectors resolved before
    /// either registry changes; on error the factory is left untouched.
    /// A direction whose selector is [`Selector::None`](crate::Selector::None)
    /// is left unregistered: the type's encode binding or the tag's decode
    /// binding is removed if an earlier registration installed one.
    pub fn register_type(
        &mut self,
        registration: impl Into<Registration>,
    ) -> Result<(), RegistrationError> {
        let resolved = registration.into().resolve()?;

        let encodes = resolved.encode.is_some();
        let decodes = resolved.decode.is_some();

        match resolved.encode {
            Some(handler) => {
                self.encode_registry.put(resolved.type_key, resolved.tag, handler);
            }
            None => {
                self.encode_registry.remove(&resolved.type_key);
            }
        }
        match resolved.decode {
            Some(handler) => {
                self.decode_registry.put(resolved.tag, handler);
            }
            None => {
                self.decode_registry.remove(resolved.tag);
            }
        }

        debug!(
            tag = %resolved.tag,
            type_name = resolved.type_key.name(),
            encodes,
            decodes,
            "registered extension type"
        );
        Ok(())
    }

    /// Register `T` under `tag` through its conventional methods.
    pub fn register<T: ExtensionType>(
        &mut self,
        tag: impl Into<i64>,
    ) -> Result<(), RegistrationError> {
        self.register_type(SimpleRegistration::of::<T>(tag))
    }

    /// The factory's own encode registry.
    pub fn encode_registry(&self) -> &EncodeRegistry {
        &self.encode_registry
    }

    /// The factory's own decode registry.
    pub fn decode_registry(&self) -> &DecodeRegistry {
        &self.decode_registry
    }

    /// Reserved default encoder options.
    pub fn encoder_options(&self) -> &EncoderOptions {
        &self.encoder_options
    }

    /// Reserved default decoder options.
    pub fn decoder_options(&self) -> &DecoderOptions {
        &self.decoder_options
    }
}
