//! Encode registry
//!
//! Maps an application type to the tag it is written with and the handler
//! that produces its payload. Lookup is by exact type identity.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::handler::EncodeHandler;
use super::tag::ExtTag;
use super::types::TypeKey;
use crate::core::HandlerError;

/// One encode binding: `type -> (tag, handler)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeBinding {
    /// Bound type.
    pub type_key: TypeKey,
    /// Tag written on the wire.
    pub tag: ExtTag,
    /// Payload producer.
    pub handler: EncodeHandler,
}

impl EncodeBinding {
    /// Run the handler on `value`.
    pub fn encode(&self, value: &dyn Any) -> Result<Vec<u8>, HandlerError> {
        self.handler.call(value)
    }
}

/// Type-keyed encode bindings.
///
/// Cloning (see [`duplicate`](Self::duplicate)) copies the table; the copy
/// and the original never observe each other's later mutations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeRegistry {
    bindings: HashMap<TypeId, EncodeBinding>,
}

impl EncodeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or overwrite the binding for `type_key`.
    ///
    /// Returns the binding that was replaced, if any.
    pub fn put(
        &mut self,
        type_key: TypeKey,
        tag: ExtTag,
        handler: EncodeHandler,
    ) -> Option<EncodeBinding> {
        self.bindings.insert(
            type_key.id(),
            EncodeBinding {
                type_key,
                tag,
                handler,
            },
        )
    }

    /// Binding for a type identity.
    pub fn lookup(&self, type_key: &TypeKey) -> Option<&EncodeBinding> {
        self.bindings.get(&type_key.id())
    }

    /// Binding for the runtime type of `value`.
    pub fn lookup_value(&self, value: &dyn Any) -> Option<&EncodeBinding> {
        self.bindings.get(&value.type_id())
    }

    /// Binding for `T`.
    pub fn lookup_type<T: ?Sized + 'static>(&self) -> Option<&EncodeBinding> {
        self.bindings.get(&TypeId::of::<T>())
    }

    /// Check if a type is bound.
    pub fn contains(&self, type_key: &TypeKey) -> bool {
        self.bindings.contains_key(&type_key.id())
    }

    /// Remove the binding for a type identity.
    pub fn remove(&mut self, type_key: &TypeKey) -> Option<EncodeBinding> {
        self.bindings.remove(&type_key.id())
    }

    /// Independent copy of every binding.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Drop every binding and the handlers they hold.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// All bindings, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &EncodeBinding> {
        self.bindings.values()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Meters(f32);
    struct Feet(f32);

    fn meters_handler() -> EncodeHandler {
        EncodeHandler::for_type::<Meters, _>("meters", |m| m.0.to_be_bytes().to_vec())
    }

    #[test]
    fn test_put_and_lookup() {
        let mut registry = EncodeRegistry::new();
        assert!(registry.is_empty());

        let handler = meters_handler();
        assert!(registry.put(TypeKey::of::<Meters>(), ExtTag::new(3), handler.clone()).is_none());

        let binding = registry.lookup(&TypeKey::of::<Meters>()).unwrap();
        assert_eq!(binding.tag, ExtTag::new(3));
        assert_eq!(binding.handler, handler);
        assert_eq!(binding.encode(&Meters(1.5)).unwrap(), 1.5f32.to_be_bytes().to_vec());

        assert!(registry.lookup(&TypeKey::of::<Feet>()).is_none());
    }

    #[test]
    fn test_lookup_by_value() {
        let mut registry = EncodeRegistry::new();
        registry.put(TypeKey::of::<Meters>(), ExtTag::new(3), meters_handler());

        assert!(registry.lookup_value(&Meters(0.0)).is_some());
        assert!(registry.lookup_value(&Feet(0.0)).is_none());
        assert!(registry.lookup_type::<Meters>().is_some());
    }

    #[test]
    fn test_put_replaces() {
        let mut registry = EncodeRegistry::new();
        registry.put(TypeKey::of::<Meters>(), ExtTag::new(3), meters_handler());

        let previous = registry.put(TypeKey::of::<Meters>(), ExtTag::new(9), meters_handler());
        assert_eq!(previous.unwrap().tag, ExtTag::new(3));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup_type::<Meters>().unwrap().tag, ExtTag::new(9));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut original = EncodeRegistry::new();
        original.put(TypeKey::of::<Meters>(), ExtTag::new(3), meters_handler());

        let mut copy = original.duplicate();
        assert_eq!(copy, original);

        copy.put(
            TypeKey::of::<Feet>(),
            ExtTag::new(4),
            EncodeHandler::for_type::<Feet, _>("feet", |f| f.0.to_be_bytes().to_vec()),
        );
        original.remove(&TypeKey::of::<Meters>());

        assert!(original.is_empty());
        assert_eq!(copy.len(), 2);
        assert!(copy.lookup_type::<Meters>().is_some());
    }

    #[test]
    fn test_clear() {
        let mut registry = EncodeRegistry::new();
        registry.put(TypeKey::of::<Meters>(), ExtTag::new(3), meters_handler());

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
