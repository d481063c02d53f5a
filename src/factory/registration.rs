//! Registration shapes
//!
//! A registration comes in two shapes:
//!
//! - [`SimpleRegistration`]: tag and type; handlers are the type's
//!   conventional methods
//! - [`ExplicitRegistration`]: tag, type and a [`Selector`] per direction
//!
//! Both resolve to the same validated form before the factory is touched.

use std::borrow::Cow;

use crate::core::{DEFAULT_DECODE_METHOD, DEFAULT_ENCODE_METHOD, ExtensionType, RegistrationError};
use crate::registry::{DecodeHandler, EncodeHandler, ExtTag, Selector, TypeHandle, TypeKey};

/// Register a type through its conventional methods.
#[derive(Debug, Clone)]
pub struct SimpleRegistration {
    /// Requested tag, validated on registration.
    pub tag: i64,
    /// Type being registered.
    pub type_handle: TypeHandle,
}

impl SimpleRegistration {
    /// Create a new simple registration.
    pub fn new(tag: impl Into<i64>, type_handle: TypeHandle) -> Self {
        Self {
            tag: tag.into(),
            type_handle,
        }
    }

    /// Simple registration for an [`ExtensionType`].
    pub fn of<T: ExtensionType>(tag: impl Into<i64>) -> Self {
        Self::new(tag, TypeHandle::of::<T>())
    }
}

/// Register a type with an explicit selector for each direction.
#[derive(Debug, Clone)]
pub struct ExplicitRegistration {
    /// Requested tag, validated on registration.
    pub tag: i64,
    /// Type being registered.
    pub type_handle: TypeHandle,
    /// Encode direction; [`Selector::None`] leaves it unregistered.
    pub encode: Selector<EncodeHandler>,
    /// Decode direction; [`Selector::None`] leaves it unregistered.
    pub decode: Selector<DecodeHandler>,
}

impl ExplicitRegistration {
    /// Create a registration that installs nothing until selectors are set.
    pub fn new(tag: impl Into<i64>, type_handle: TypeHandle) -> Self {
        Self {
            tag: tag.into(),
            type_handle,
            encode: Selector::None,
            decode: Selector::None,
        }
    }

    /// Set the encode selector.
    pub fn with_encode(mut self, selector: impl Into<Selector<EncodeHandler>>) -> Self {
        self.encode = selector.into();
        self
    }

    /// Set the decode selector.
    pub fn with_decode(mut self, selector: impl Into<Selector<DecodeHandler>>) -> Self {
        self.decode = selector.into();
        self
    }

    /// Encode through the type's method called `name`.
    pub fn with_encode_method(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.encode = Selector::by_name(name);
        self
    }

    /// Decode through the type's method called `name`.
    pub fn with_decode_method(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.decode = Selector::by_name(name);
        self
    }
}

/// Either registration shape.
#[derive(Debug, Clone)]
pub enum Registration {
    /// Conventional methods.
    Simple(SimpleRegistration),
    /// Explicit selectors.
    Explicit(ExplicitRegistration),
}

impl From<SimpleRegistration> for Registration {
    fn from(registration: SimpleRegistration) -> Self {
        Registration::Simple(registration)
    }
}

impl From<ExplicitRegistration> for Registration {
    fn from(registration: ExplicitRegistration) -> Self {
        Registration::Explicit(registration)
    }
}

/// A registration that passed validation; applying it cannot fail.
#[derive(Debug)]
pub(crate) struct ResolvedRegistration {
    pub tag: ExtTag,
    pub type_key: TypeKey,
    pub encode: Option<EncodeHandler>,
    pub decode: Option<DecodeHandler>,
}

impl Registration {
    /// Validate the tag and type, then resolve both selectors.
    pub(crate) fn resolve(self) -> Result<ResolvedRegistration, RegistrationError> {
        let explicit = match self {
            Registration::Simple(simple) => ExplicitRegistration {
                tag: simple.tag,
                type_handle: simple.type_handle,
                encode: Selector::by_name(DEFAULT_ENCODE_METHOD),
                decode: Selector::by_name(DEFAULT_DECODE_METHOD),
            },
            Registration::Explicit(explicit) => explicit,
        };

        let tag = ExtTag::try_from(explicit.tag)?;

        let type_handle = explicit.type_handle;
        let methods = type_handle
            .methods()
            .ok_or_else(|| RegistrationError::ArgumentType {
                expected: "concrete type",
                found: type_handle.name().to_string(),
            })?;

        let encode = resolve(explicit.encode, |name| methods.encoder(name), &type_handle)?;
        let decode = resolve(explicit.decode, |name| methods.decoder(name), &type_handle)?;

        Ok(ResolvedRegistration {
            tag,
            type_key: type_handle.key(),
            encode,
            decode,
        })
    }
}

fn resolve<'a, H: Clone + 'a>(
    selector: Selector<H>,
    find: impl FnOnce(&str) -> Option<&'a H>,
    type_handle: &TypeHandle,
) -> Result<Option<H>, RegistrationError> {
    match selector {
        Selector::None => Ok(None),
        Selector::Direct(handler) => Ok(Some(handler)),
        Selector::ByName(name) => match find(&*name) {
            Some(handler) => Ok(Some(handler.clone())),
            None => Err(RegistrationError::HandlerResolution {
                type_name: type_handle.name(),
                method: name.into_owned(),
            }),
        },
    }
}
