//! Common utility functions

pub mod sanitize;
pub mod validation;

pub use sanitize::*;
pub use validation::*;
