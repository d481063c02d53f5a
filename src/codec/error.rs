//! Codec error types.

use thiserror::Error;

use super::frame::FrameError;
use crate::core::HandlerError;
use crate::registry::ExtTag;

/// Errors raised while encoding or decoding extension values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value's type has no encode binding.
    #[error("no extension registered for type {0}")]
    UnregisteredType(&'static str),

    /// The tag has no decode binding and unknown extensions are not allowed.
    #[error("unknown extension type: {0}")]
    UnknownExtType(ExtTag),

    /// A decoded value was not of the requested type.
    #[error("decoded extension {tag} is not a {expected}")]
    UnexpectedType {
        /// Tag of the decoded value.
        tag: ExtTag,
        /// Requested type.
        expected: &'static str,
    },

    /// The handler failed.
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),

    /// Framing failed.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}
