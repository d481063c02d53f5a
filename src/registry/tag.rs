//! Extension type tags

use std::fmt;

use crate::core::{RegistrationError, TAG_MAX, TAG_MIN};

/// Signed 8-bit identifier of an extension type on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtTag(i8);

impl ExtTag {
    /// Create a tag from its wire value.
    pub const fn new(tag: i8) -> Self {
        Self(tag)
    }

    /// Wire value.
    pub const fn get(self) -> i8 {
        self.0
    }

    /// Position of this tag in a 256-slot table.
    pub(crate) const fn index(self) -> usize {
        (self.0 as i16 - i8::MIN as i16) as usize
    }

    /// Inverse of [`index`](Self::index).
    pub(crate) const fn from_index(index: usize) -> Self {
        Self((index as i16 + i8::MIN as i16) as i8)
    }
}

impl From<i8> for ExtTag {
    fn from(tag: i8) -> Self {
        Self(tag)
    }
}

impl TryFrom<i64> for ExtTag {
    type Error = RegistrationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(TAG_MIN..=TAG_MAX).contains(&value) {
            return Err(RegistrationError::Range(value));
        }
        Ok(Self(value as i8))
    }
}

impl fmt::Display for ExtTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
