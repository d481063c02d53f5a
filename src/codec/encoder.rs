//! Encoder instance
//!
//! Only the extension path is implemented here; built-in types belong to the
//! surrounding codec. An encoder owns its registry outright, so nothing
//! done to the factory after construction reaches it.

use std::any::{Any, type_name};

use super::error::CodecError;
use super::frame::ExtensionValue;
use crate::core::DEFAULT_BUFFER_CAPACITY;
use crate::registry::EncodeRegistry;

/// Encoder configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Bytes reserved in the output buffer up front
    pub initial_capacity: usize,
}

impl EncoderOptions {
    /// Set the initial buffer capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// Writes extension values into an owned buffer.
#[derive(Debug, Clone)]
pub struct Encoder {
    options: EncoderOptions,
    ext_registry: EncodeRegistry,
    buffer: Vec<u8>,
}

impl Encoder {
    /// Create an encoder with an empty extension registry.
    pub fn new(options: EncoderOptions) -> Self {
        Self {
            buffer: Vec::with_capacity(options.initial_capacity),
            ext_registry: EncodeRegistry::new(),
            options,
        }
    }

    /// Options this encoder was built with.
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// This encoder's private registry.
    pub fn ext_registry(&self) -> &EncodeRegistry {
        &self.ext_registry
    }

    /// Mutable access to this encoder's private registry.
    pub fn ext_registry_mut(&mut self) -> &mut EncodeRegistry {
        &mut self.ext_registry
    }

    /// Swap in a whole registry, returning the previous one.
    pub fn replace_ext_registry(&mut self, registry: EncodeRegistry) -> EncodeRegistry {
        std::mem::replace(&mut self.ext_registry, registry)
    }

    /// Produce the tag and payload for `value` without framing it.
    pub fn encode_ext<T: Any>(&self, value: &T) -> Result<ExtensionValue, CodecError> {
        let binding = self
            .ext_registry
            .lookup_type::<T>()
            .ok_or(CodecError::UnregisteredType(type_name::<T>()))?;

        let payload = binding.encode(value)?;
        Ok(ExtensionValue::new(binding.tag, payload))
    }

    /// Encode `value` and append it as an extension frame.
    pub fn write_ext<T: Any>(&mut self, value: &T) -> Result<&mut Self, CodecError> {
        let ext = self.encode_ext(value)?;
        self.write_extension(&ext)
    }

    /// Append an already-encoded extension frame.
    pub fn write_extension(&mut self, ext: &ExtensionValue) -> Result<&mut Self, CodecError> {
        ext.encode_into(&mut self.buffer)?;
        Ok(self)
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the written bytes, leaving the buffer empty.
    pub fn take_bytes(&mut self) -> Vec<u8> {
        std::mem::replace(
            &mut self.buffer,
            Vec::with_capacity(self.options.initial_capacity),
        )
    }

    /// Consume the encoder, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncoderOptions::default())
    }
}
