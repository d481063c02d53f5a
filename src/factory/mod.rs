//! Encoder/decoder factory
//!
//! - [`Factory`]: owns the registries and creates isolated instances
//! - [`SimpleRegistration`] / [`ExplicitRegistration`]: typed registration shapes
//! - [`Arg`]: positional arguments for loosely typed callers

mod args;
#[allow(clippy::module_inception)]
mod factory;
mod registration;

pub use args::*;
pub use factory::*;
pub use registration::{ExplicitRegistration, Registration, SimpleRegistration};
