//! Core constants, error types and the conventional extension trait.
//!
//! This module has no dependencies on the registries or the codec and
//! defines the vocabulary the rest of the crate shares.

mod constants;
mod error;
mod traits;

pub use constants::*;
pub use error::*;
pub use traits::*;
