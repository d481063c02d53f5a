//! Decoder instance
//!
//! Buffers fed bytes and reconstructs extension values through its private
//! [`DecodeRegistry`]. An incomplete frame is left in the buffer until more
//! bytes arrive.

use std::any::{Any, type_name};

use tracing::debug;

use super::error::CodecError;
use super::frame::{ExtensionValue, FrameError};
use crate::registry::{DecodeRegistry, DynValue};

/// Decoder configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Yield unregistered tags as [`ExtensionValue`] instead of failing
    pub allow_unknown_ext: bool,
}

impl DecoderOptions {
    /// Allow or reject unregistered tags
    pub fn with_allow_unknown_ext(mut self, allow: bool) -> Self {
        self.allow_unknown_ext = allow;
        self
    }
}

/// Reads extension values from fed bytes.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecoderOptions,
    ext_registry: DecodeRegistry,
    buffer: Vec<u8>,
    position: usize,
}

impl Decoder {
    /// Create a decoder with an empty extension registry.
    pub fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            ext_registry: DecodeRegistry::new(),
            buffer: Vec::new(),
            position: 0,
        }
    }

    /// Options this decoder was built with.
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// This decoder's private registry.
    pub fn ext_registry(&self) -> &DecodeRegistry {
        &self.ext_registry
    }

    /// Mutable access to this decoder's private registry.
    pub fn ext_registry_mut(&mut self) -> &mut DecodeRegistry {
        &mut self.ext_registry
    }

    /// Swap in a whole registry, returning the previous one.
    pub fn replace_ext_registry(&mut self, registry: DecodeRegistry) -> DecodeRegistry {
        std::mem::replace(&mut self.ext_registry, registry)
    }

    /// Append bytes to the input buffer.
    pub fn feed(&mut self, data: &[u8]) {
        if self.position > 0 {
            self.buffer.drain(..self.position);
            self.position = 0;
        }
        self.buffer.extend_from_slice(data);
    }

    /// Unread bytes.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Read the next extension frame without decoding its payload.
    pub fn read_extension(&mut self) -> Result<ExtensionValue, CodecError> {
        let (ext, consumed) = ExtensionValue::decode(&self.buffer[self.position..])?;
        self.position += consumed;
        Ok(ext)
    }

    /// Read and decode the next extension value.
    ///
    /// A complete frame is consumed even when decoding it fails with
    /// [`CodecError::UnknownExtType`] or a handler error, so the next call
    /// starts at the following frame. Incomplete frames are never consumed.
    pub fn read_ext(&mut self) -> Result<DynValue, CodecError> {
        let ext = self.read_extension()?;
        self.decode_ext(ext)
    }

    /// Read the next extension value, requiring it to be a `T`.
    ///
    /// Consumes the frame on failure, like [`read_ext`](Self::read_ext).
    pub fn read_ext_as<T: Any>(&mut self) -> Result<T, CodecError> {
        let ext = self.read_extension()?;
        let tag = ext.tag;
        self.decode_ext(ext)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| CodecError::UnexpectedType {
                tag,
                expected: type_name::<T>(),
            })
    }

    /// Decode a framed extension through this decoder's registry.
    pub fn decode_ext(&self, ext: ExtensionValue) -> Result<DynValue, CodecError> {
        match self.ext_registry.lookup(ext.tag) {
            Some(binding) => Ok(binding.decode(&ext.payload)?),
            None if self.options.allow_unknown_ext => {
                debug!(
                    tag = %ext.tag,
                    len = ext.payload.len(),
                    "passing through unknown extension"
                );
                Ok(Box::new(ext))
            }
            None => Err(CodecError::UnknownExtType(ext.tag)),
        }
    }

    /// Check if the buffer holds an incomplete frame.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            ExtensionValue::decode(&self.buffer[self.position..]),
            Err(FrameError::Incomplete { actual, .. }) if actual > 0
        )
    }
}
