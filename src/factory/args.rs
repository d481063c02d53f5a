//! Dynamic argument surface
//!
//! Bindings from loosely typed hosts call the factory with positional
//! argument lists. This module checks arity and argument kinds and lowers
//! the list into a [`Registration`], so both entry points share one
//! validation path.
//!
//! ```text
//! register_type(tag, type)                              # conventional methods
//! register_type(tag, type, {encode: sel, decode: sel})  # explicit selectors
//! ```
//!
//! A selector is `nil` / absent (direction left unregistered), a method name, or a
//! handler of the matching direction.

use std::borrow::Cow;

use super::factory::Factory;
use super::registration::{ExplicitRegistration, Registration, SimpleRegistration};
use crate::core::{OPTION_DECODE, OPTION_ENCODE, RegistrationError};
use crate::registry::{DecodeHandler, EncodeHandler, Selector, TypeHandle};

/// A loosely typed argument.
#[derive(Debug, Clone)]
pub enum Arg {
    /// Absent value.
    Nil,
    /// Integer.
    Int(i64),
    /// String or symbol.
    Str(Cow<'static, str>),
    /// Type identity.
    Type(TypeHandle),
    /// Encode callable.
    Encoder(EncodeHandler),
    /// Decode callable.
    Decoder(DecodeHandler),
    /// Key/value options.
    Map(Vec<(Cow<'static, str>, Arg)>),
}

impl Arg {
    /// Build a map argument.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<Cow<'static, str>>,
        I: IntoIterator<Item = (K, Arg)>,
    {
        Arg::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Nil => "nil",
            Arg::Int(_) => "Integer",
            Arg::Str(_) => "String",
            Arg::Type(_) => "Type",
            Arg::Encoder(_) => "EncodeHandler",
            Arg::Decoder(_) => "DecodeHandler",
            Arg::Map(_) => "Map",
        }
    }

    /// Value stored under `key`, if this is a map.
    ///
    /// Duplicate keys resolve to the last entry.
    pub fn get(&self, key: &str) -> Option<&Arg> {
        match self {
            Arg::Map(entries) => entries.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<&'static str> for Arg {
    fn from(value: &'static str) -> Self {
        Arg::Str(Cow::Borrowed(value))
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Str(Cow::Owned(value))
    }
}

impl From<TypeHandle> for Arg {
    fn from(value: TypeHandle) -> Self {
        Arg::Type(value)
    }
}

impl From<EncodeHandler> for Arg {
    fn from(value: EncodeHandler) -> Self {
        Arg::Encoder(value)
    }
}

impl From<DecodeHandler> for Arg {
    fn from(value: DecodeHandler) -> Self {
        Arg::Decoder(value)
    }
}

impl TryFrom<&[Arg]> for Registration {
    type Error = RegistrationError;

    fn try_from(args: &[Arg]) -> Result<Self, Self::Error> {
        let options = match args.len() {
            2 => None,
            3 => match &args[2] {
                options @ Arg::Map(_) => Some(options),
                other => return Err(argument_type("Map", other)),
            },
            given => {
                return Err(RegistrationError::Arity {
                    given,
                    expected: "2..3",
                });
            }
        };

        let tag = match &args[0] {
            Arg::Int(tag) => *tag,
            other => return Err(argument_type("Integer", other)),
        };

        let type_handle = match &args[1] {
            Arg::Type(handle) => handle.clone(),
            other => return Err(argument_type("Type", other)),
        };

        let Some(options) = options else {
            return Ok(SimpleRegistration::new(tag, type_handle).into());
        };

        let encode = match options.get(OPTION_ENCODE) {
            None | Some(Arg::Nil) => Selector::None,
            Some(Arg::Str(name)) => Selector::ByName(name.clone()),
            Some(Arg::Encoder(handler)) => Selector::Direct(handler.clone()),
            Some(other) => return Err(argument_type("encode handler or method name", other)),
        };

        let decode = match options.get(OPTION_DECODE) {
            None | Some(Arg::Nil) => Selector::None,
            Some(Arg::Str(name)) => Selector::ByName(name.clone()),
            Some(Arg::Decoder(handler)) => Selector::Direct(handler.clone()),
            Some(other) => return Err(argument_type("decode handler or method name", other)),
        };

        let mut registration = ExplicitRegistration::new(tag, type_handle);
        registration.encode = encode;
        registration.decode = decode;
        Ok(registration.into())
    }
}

fn argument_type(expected: &'static str, found: &Arg) -> RegistrationError {
    RegistrationError::ArgumentType {
        expected,
        found: found.kind().to_string(),
    }
}

impl Factory {
    /// Create a factory from a positional argument list.
    ///
    /// No construction options exist yet, so any argument is an arity error.
    pub fn create_with_args(args: &[Arg]) -> Result<Self, RegistrationError> {
        if !args.is_empty() {
            return Err(RegistrationError::Arity {
                given: args.len(),
                expected: "0",
            });
        }
        Ok(Self::create())
    }

    /// Register an extension type from a positional argument list.
    pub fn register_type_args(&mut self, args: &[Arg]) -> Result<(), RegistrationError> {
        let registration = Registration::try_from(args)?;
        self.register_type(registration)
    }
}
