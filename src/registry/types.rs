//! Application type identities
//!
//! A [`TypeKey`] is the comparable identity registries are keyed by. A
//! [`TypeHandle`] is what callers pass to registration: the key plus what
//! the type offers (its named methods), or a marker that the type is
//! abstract and cannot carry extension values.

use std::any::{Any, TypeId, type_name};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::handler::{DecodeHandler, EncodeHandler};
use crate::core::{DEFAULT_DECODE_METHOD, DEFAULT_ENCODE_METHOD, ExtensionType};

/// Comparable identity of a Rust type.
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Identity of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Underlying [`TypeId`].
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Named encode/decode methods a type offers for selection by name.
///
/// Encode methods act on an instance; decode methods are type-level
/// constructors from a payload.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    encoders: HashMap<Cow<'static, str>, EncodeHandler>,
    decoders: HashMap<Cow<'static, str>, DecodeHandler>,
}

impl MethodTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish an instance method producing a payload.
    pub fn define_encoder(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        handler: EncodeHandler,
    ) -> &mut Self {
        self.encoders.insert(name.into(), handler);
        self
    }

    /// Publish a type-level method consuming a payload.
    pub fn define_decoder(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        handler: DecodeHandler,
    ) -> &mut Self {
        self.decoders.insert(name.into(), handler);
        self
    }

    /// Find an encode method by name.
    pub fn encoder(&self, name: &str) -> Option<&EncodeHandler> {
        self.encoders.get(name)
    }

    /// Find a decode method by name.
    pub fn decoder(&self, name: &str) -> Option<&DecodeHandler> {
        self.decoders.get(name)
    }
}

#[derive(Debug, Clone)]
enum TypeKind {
    Concrete(Arc<MethodTable>),
    Abstract,
}

/// A type as presented to registration.
#[derive(Debug, Clone)]
pub struct TypeHandle {
    key: TypeKey,
    kind: TypeKind,
}

impl TypeHandle {
    /// Handle for an [`ExtensionType`], publishing its conventional methods
    /// and whatever [`ExtensionType::extension_methods`] adds.
    pub fn of<T: ExtensionType>() -> Self {
        let name = type_name::<T>();
        let mut methods = MethodTable::new();
        methods
            .define_encoder(
                DEFAULT_ENCODE_METHOD,
                EncodeHandler::for_type::<T, _>(name, T::to_extension_bytes),
            )
            .define_decoder(
                DEFAULT_DECODE_METHOD,
                DecodeHandler::for_type(name, T::from_extension_bytes),
            );
        T::extension_methods(&mut methods);

        Self::with_methods::<T>(methods)
    }

    /// Handle for a concrete type with no named methods.
    ///
    /// Useful for foreign types registered with explicit handlers.
    pub fn concrete<T: Any + Send + Sync>() -> Self {
        Self::with_methods::<T>(MethodTable::new())
    }

    /// Handle for a concrete type with a custom method table.
    pub fn with_methods<T: Any + Send + Sync>(methods: MethodTable) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            kind: TypeKind::Concrete(Arc::new(methods)),
        }
    }

    /// Handle for a type that can never be instantiated as an extension
    /// value, such as a trait object. Registration rejects it.
    pub fn abstract_type<T: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            kind: TypeKind::Abstract,
        }
    }

    /// Type identity.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Type name, for diagnostics only.
    pub fn name(&self) -> &'static str {
        self.key.name
    }

    /// Check if the type can carry extension values.
    pub fn is_concrete(&self) -> bool {
        matches!(self.kind, TypeKind::Concrete(_))
    }

    /// Named methods, if the type is concrete.
    pub fn methods(&self) -> Option<&MethodTable> {
        match &self.kind {
            TypeKind::Concrete(methods) => Some(methods.as_ref()),
            TypeKind::Abstract => None,
        }
    }
}
