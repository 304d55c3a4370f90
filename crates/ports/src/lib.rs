//! ports - abstraction traits
//!
//! Capability interfaces the resource core depends on

mod secret_store;

pub use secret_store::*;
