//! # msgpack-factory
//!
//! Extension type registry and encoder/decoder factory for a MessagePack
//! codec.
//!
//! MessagePack distinguishes its built-in types from user-defined
//! **extension** types. An extension value travels on the wire as a signed
//! 8-bit tag followed by an opaque payload. This crate manages the mapping
//! between Rust types and `(tag, encode handler, decode handler)` triples:
//!
//! - **Registries**: [`EncodeRegistry`] maps a type to its tag and encode
//!   handler, [`DecodeRegistry`] maps a tag to its decode handler
//! - **Factory**: [`Factory`] owns one registry of each kind and hands every
//!   new [`Encoder`] / [`Decoder`] a private snapshot of them
//! - **Snapshot isolation**: registering a type on the factory never changes
//!   the behavior of instances created before the registration
//!
//! ## Modules
//!
//! - [`core`]: Constants, error types and the [`ExtensionType`] trait
//! - [`registry`]: Tags, type identities, handlers and the two registries
//! - [`factory`]: The factory, registration shapes and the dynamic argument surface
//! - [`codec`]: Encoder/decoder instances and extension framing
//!
//! ## Example Usage
//!
//! ```rust
//! use msgpack_factory::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Point {
//!     x: i16,
//!     y: i16,
//! }
//!
//! impl ExtensionType for Point {
//!     fn to_extension_bytes(&self) -> Vec<u8> {
//!         let mut out = self.x.to_be_bytes().to_vec();
//!         out.extend_from_slice(&self.y.to_be_bytes());
//!         out
//!     }
//!
//!     fn from_extension_bytes(data: &[u8]) -> Result<Self, HandlerError> {
//!         if data.len() != 4 {
//!             return Err(HandlerError::UnexpectedEof {
//!                 expected: 4,
//!                 actual: data.len(),
//!             });
//!         }
//!         Ok(Point {
//!             x: i16::from_be_bytes([data[0], data[1]]),
//!             y: i16::from_be_bytes([data[2], data[3]]),
//!         })
//!     }
//! }
//!
//! let mut factory = Factory::create();
//! factory.register::<Point>(1).unwrap();
//!
//! let mut encoder = factory.new_encoder(None);
//! encoder.write_ext(&Point { x: 3, y: -4 }).unwrap();
//!
//! let mut decoder = factory.new_decoder(None);
//! decoder.feed(encoder.as_bytes());
//! let point: Point = decoder.read_ext_as().unwrap();
//! assert_eq!(point, Point { x: 3, y: -4 });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod core;
pub mod factory;
pub mod registry;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::codec::{Decoder, DecoderOptions, Encoder, EncoderOptions, ExtensionValue};
    pub use crate::core::*;
    pub use crate::factory::{
        Arg, ExplicitRegistration, Factory, Registration, SimpleRegistration,
    };
    pub use crate::registry::{
        DecodeHandler, DecodeRegistry, DynValue, EncodeHandler, EncodeRegistry, ExtTag,
        MethodTable, Selector, TypeHandle, TypeKey,
    };
}

// Re-export commonly used items at crate root
pub use crate::codec::{CodecError, Decoder, DecoderOptions, Encoder, EncoderOptions, ExtensionValue};
pub use crate::core::{Error, ExtensionType, HandlerError, RegistrationError};
pub use crate::factory::{Arg, ExplicitRegistration, Factory, Registration, SimpleRegistration};
pub use crate::registry::{
    DecodeHandler, DecodeRegistry, DynValue, EncodeHandler, EncodeRegistry, ExtTag, Selector,
    TypeHandle, TypeKey,
};
