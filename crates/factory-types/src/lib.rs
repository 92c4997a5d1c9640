//! Common types for the variant factory.
//!
//! This crate holds the pieces shared by every variant implementation and by
//! the registry that dispatches to them: the argument validation framework,
//! the registration trait, and the serializable descriptors used for
//! introspection.

/// Serializable metadata describing variants and their parameters.
pub mod descriptor;
/// Registration trait implemented by every variant.
pub mod registry;
/// Argument schemas and validation for variant constructors.
pub mod validation;

pub use descriptor::*;
pub use registry::*;
pub use validation::*;
