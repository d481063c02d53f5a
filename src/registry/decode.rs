//! Decode registry
//!
//! Maps a tag to the handler that reconstructs values from its payload.
//! Storage is a fixed table with one slot per possible tag.

use super::handler::{DecodeHandler, DynValue};
use super::tag::ExtTag;
use crate::core::{HandlerError, TAG_COUNT};

/// One decode binding: `tag -> handler`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeBinding {
    /// Bound tag.
    pub tag: ExtTag,
    /// Payload consumer.
    pub handler: DecodeHandler,
}

impl DecodeBinding {
    /// Run the handler on `data`.
    pub fn decode(&self, data: &[u8]) -> Result<DynValue, HandlerError> {
        self.handler.call(data)
    }
}

/// Tag-keyed decode bindings. Last registration for a tag wins.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeRegistry {
    slots: Vec<Option<DecodeBinding>>,
    len: usize,
}

impl DecodeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: vec![None; TAG_COUNT],
            len: 0,
        }
    }

    /// Install or overwrite the binding for `tag`.
    ///
    /// Returns the binding that was replaced, if any.
    pub fn put(&mut self, tag: ExtTag, handler: DecodeHandler) -> Option<DecodeBinding> {
        let previous = self.slots[tag.index()].replace(DecodeBinding { tag, handler });
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Binding for a tag.
    pub fn lookup(&self, tag: ExtTag) -> Option<&DecodeBinding> {
        self.slots[tag.index()].as_ref()
    }

    /// Check if a tag is bound.
    pub fn contains(&self, tag: ExtTag) -> bool {
        self.slots[tag.index()].is_some()
    }

    /// Remove the binding for a tag.
    pub fn remove(&mut self, tag: ExtTag) -> Option<DecodeBinding> {
        let removed = self.slots[tag.index()].take();
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Independent copy of every binding.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Drop every binding and the handlers they hold.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Bound tags in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = ExtTag> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| ExtTag::from_index(index))
    }

    /// All bindings in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = &DecodeBinding> {
        self.slots.iter().flatten()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for DecodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(label: &'static str, value: u8) -> DecodeHandler {
        DecodeHandler::for_type(label, move |_: &[u8]| Ok(value))
    }

    #[test]
    fn test_put_and_lookup() {
        let mut registry = DecodeRegistry::new();
        let h = handler("seven", 7);

        assert!(registry.put(ExtTag::new(-1), h.clone()).is_none());
        assert_eq!(registry.len(), 1);

        let binding = registry.lookup(ExtTag::new(-1)).unwrap();
        assert_eq!(binding.handler, h);
        assert_eq!(binding.decode(&[]).unwrap().downcast_ref::<u8>(), Some(&7));

        assert!(registry.lookup(ExtTag::new(1)).is_none());
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = DecodeRegistry::new();
        registry.put(ExtTag::new(5), handler("a", 1));

        let replaced = registry.put(ExtTag::new(5), handler("b", 2));
        assert_eq!(replaced.unwrap().handler.label(), "a");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(ExtTag::new(5)).unwrap().handler.label(), "b");
    }

    #[test]
    fn test_extreme_tags() {
        let mut registry = DecodeRegistry::new();
        registry.put(ExtTag::new(i8::MIN), handler("min", 0));
        registry.put(ExtTag::new(i8::MAX), handler("max", 0));

        let tags: Vec<i8> = registry.tags().map(ExtTag::get).collect();
        assert_eq!(tags, vec![i8::MIN, i8::MAX]);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let mut original = DecodeRegistry::new();
        original.put(ExtTag::new(0), handler("zero", 0));

        let mut copy = original.duplicate();
        copy.put(ExtTag::new(1), handler("one", 1));
        original.put(ExtTag::new(0), handler("zero again", 0));

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.lookup(ExtTag::new(0)).unwrap().handler.label(), "zero");
    }

    #[test]
    fn test_remove_and_clear() {
        let mut registry = DecodeRegistry::new();
        registry.put(ExtTag::new(0), handler("zero", 0));
        registry.put(ExtTag::new(1), handler("one", 1));

        assert!(registry.remove(ExtTag::new(0)).is_some());
        assert!(registry.remove(ExtTag::new(0)).is_none());
        assert_eq!(registry.len(), 1);

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
