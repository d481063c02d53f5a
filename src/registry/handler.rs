//! Encode and decode handlers
//!
//! Handlers are immutable callables. Cloning a handler shares the callable,
//! never any registry storage, so registry snapshots stay independent.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::core::HandlerError;

/// A reconstructed extension value of any registered type.
pub type DynValue = Box<dyn Any + Send + Sync>;

type EncodeFn = dyn Fn(&dyn Any) -> Result<Vec<u8>, HandlerError> + Send + Sync;
type DecodeFn = dyn Fn(&[u8]) -> Result<DynValue, HandlerError> + Send + Sync;

/// Turns a value into an extension payload.
#[derive(Clone)]
pub struct EncodeHandler {
    label: Cow<'static, str>,
    func: Arc<EncodeFn>,
}

impl EncodeHandler {
    /// Wrap an untyped encode function.
    pub fn new<F>(label: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&dyn Any) -> Result<Vec<u8>, HandlerError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Wrap an encode function for a single type.
    ///
    /// Calling the handler with a value of any other type fails with
    /// [`HandlerError::TypeMismatch`].
    pub fn for_type<T, F>(label: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        T: Any,
        F: Fn(&T) -> Vec<u8> + Send + Sync + 'static,
    {
        Self::new(label, move |value: &dyn Any| match value.downcast_ref::<T>() {
            Some(value) => Ok(func(value)),
            None => Err(HandlerError::TypeMismatch {
                expected: type_name::<T>(),
                found: "another type",
            }),
        })
    }

    /// Encode `value`.
    pub fn call(&self, value: &dyn Any) -> Result<Vec<u8>, HandlerError> {
        (self.func)(value)
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for EncodeHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for EncodeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EncodeHandler").field(&self.label).finish()
    }
}

/// Turns an extension payload back into a value.
#[derive(Clone)]
pub struct DecodeHandler {
    label: Cow<'static, str>,
    func: Arc<DecodeFn>,
}

impl DecodeHandler {
    /// Wrap an untyped decode function.
    pub fn new<F>(label: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        F: Fn(&[u8]) -> Result<DynValue, HandlerError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Wrap a decode function producing a single type.
    pub fn for_type<T, F>(label: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&[u8]) -> Result<T, HandlerError> + Send + Sync + 'static,
    {
        Self::new(label, move |data: &[u8]| {
            func(data).map(|value| Box::new(value) as DynValue)
        })
    }

    /// Decode `data`.
    pub fn call(&self, data: &[u8]) -> Result<DynValue, HandlerError> {
        (self.func)(data)
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for DecodeHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for DecodeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecodeHandler").field(&self.label).finish()
    }
}

/// How a registration chooses the handler for one direction.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector<H> {
    /// Leave this direction unregistered.
    None,
    /// Use this handler as is.
    Direct(H),
    /// Look the handler up by name on the registered type.
    ByName(Cow<'static, str>),
}

impl<H> Selector<H> {
    /// Select a handler by method name.
    pub fn by_name(name: impl Into<Cow<'static, str>>) -> Self {
        Selector::ByName(name.into())
    }

    /// Check if this selector installs nothing.
    pub fn is_none(&self) -> bool {
        matches!(self, Selector::None)
    }
}

impl<H> Default for Selector<H> {
    fn default() -> Self {
        Selector::None
    }
}

impl From<EncodeHandler> for Selector<EncodeHandler> {
    fn from(handler: EncodeHandler) -> Self {
        Selector::Direct(handler)
    }
}

impl From<DecodeHandler> for Selector<DecodeHandler> {
    fn from(handler: DecodeHandler) -> Self {
        Selector::Direct(handler)
    }
}
