//! Resource steps

pub mod check;
pub mod fetch;
