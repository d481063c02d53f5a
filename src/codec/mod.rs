//! Encoder and decoder instances
//!
//! The extension-facing half of the codec:
//!
//! - [`Encoder`]: looks a value's type up in its private registry, runs the
//!   handler and frames the payload
//! - [`Decoder`]: reads frames and runs the handler bound to their tag
//! - [`ExtensionValue`]: the framed `(tag, payload)` pair on the wire
//!
//! Instances are normally obtained from a [`Factory`](crate::Factory), which
//! seeds them with a snapshot of its registries. [`Encoder::new`] and
//! [`Decoder::new`] build bare instances with empty registries.

mod decoder;
mod encoder;
mod error;
mod frame;

pub use decoder::*;
pub use encoder::*;
pub use error::*;
pub use frame::*;
