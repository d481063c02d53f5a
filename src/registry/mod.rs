//! Extension type registries
//!
//! Implements the two halves of the extension mapping:
//!
//! - [`EncodeRegistry`]: application type → (tag, [`EncodeHandler`])
//! - [`DecodeRegistry`]: tag → [`DecodeHandler`]
//!
//! Both are plain owned tables. [`duplicate`](EncodeRegistry::duplicate)
//! yields a copy with its own storage, which is what gives each encoder and
//! decoder its point-in-time view of the factory's registrations.

mod decode;
mod encode;
mod handler;
mod tag;
mod types;

pub use decode::*;
pub use encode::*;
pub use handler::*;
pub use tag::*;
pub use types::*;
