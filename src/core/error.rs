//! Error types for extension registration and handling.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors raised by factory construction and type registration.
///
/// Every variant is produced before any registry is touched, so a failed
/// registration leaves the factory exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Wrong number of arguments.
    #[error("wrong number of arguments ({given} for {expected})")]
    Arity {
        /// Number of arguments supplied.
        given: usize,
        /// Accepted argument counts.
        expected: &'static str,
    },

    /// Tag outside the signed 8-bit range.
    #[error("integer {0} too big to convert to `signed char'")]
    Range(i64),

    /// An argument had the wrong kind.
    #[error("expected {expected} but found {found}")]
    ArgumentType {
        /// What the argument should have been.
        expected: &'static str,
        /// What was supplied.
        found: String,
    },

    /// A named selector does not exist on the registered type.
    #[error("undefined method `{method}' for {type_name}")]
    HandlerResolution {
        /// Name of the type the lookup ran against.
        type_name: &'static str,
        /// Selector name that failed to resolve.
        method: String,
    },
}

/// Errors raised by encode and decode handlers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    /// The handler was given a value of another type.
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        /// Type the handler accepts.
        expected: &'static str,
        /// Type it was called with.
        found: &'static str,
    },

    /// The payload is malformed.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The payload is shorter than the type requires.
    #[error("unexpected end of payload: expected {expected}, got {actual}")]
    UnexpectedEof {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
}

/// Top-level errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Registration error.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// Codec error.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Handler error.
    #[error("handler error: {0}")]
    Handler(#[from] HandlerError),
}
