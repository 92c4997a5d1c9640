//! Constructible variants for the factory.
//!
//! Each variant lives in its own module under [`implementations`] and
//! registers itself through [`ImplementationRegistry`]. Constructed values
//! are returned as the [`Variant`] tagged enum so callers never need a
//! runtime type lookup.

use factory_types::{ImplementationRegistry, ValidationError, VariantDescriptor};
use serde::Serialize;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod variant_a;
	pub mod variant_b;
}

pub use implementations::variant_a::VariantA;
pub use implementations::variant_b::VariantB;

/// Errors that can occur while constructing a variant.
#[derive(Debug, Error)]
pub enum VariantError {
	/// The supplied arguments do not satisfy the constructor's parameters.
	#[error("Argument mismatch: {0}")]
	ArgumentMismatch(#[from] ValidationError),
}

/// A constructed variant.
///
/// Serializes with a `kind` tag holding the discriminator, followed by the
/// variant's fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Variant {
	A(VariantA),
	B(VariantB),
}

impl Variant {
	/// Returns the discriminator this variant is registered under.
	pub fn kind(&self) -> &'static str {
		match self {
			Variant::A(_) => implementations::variant_a::Registry::NAME,
			Variant::B(_) => implementations::variant_b::Registry::NAME,
		}
	}

	pub fn as_a(&self) -> Option<&VariantA> {
		match self {
			Variant::A(a) => Some(a),
			_ => None,
		}
	}

	pub fn as_b(&self) -> Option<&VariantB> {
		match self {
			Variant::B(b) => Some(b),
			_ => None,
		}
	}
}

impl From<VariantA> for Variant {
	fn from(value: VariantA) -> Self {
		Variant::A(value)
	}
}

impl From<VariantB> for Variant {
	fn from(value: VariantB) -> Self {
		Variant::B(value)
	}
}

/// Type alias for variant constructor functions.
///
/// Every variant provides a function with this signature that binds an
/// argument table and builds the variant.
pub type VariantFactory = fn(&toml::Value) -> Result<Variant, VariantError>;

/// Registry trait for variants.
///
/// Narrows the base [`ImplementationRegistry`] to variants that provide a
/// [`VariantFactory`].
pub trait VariantRegistry: ImplementationRegistry<Factory = VariantFactory> {}

/// Get all built-in variants.
///
/// Returns `(name, factory, descriptor)` for every variant in this crate.
/// The factory registry uses this to register the defaults.
pub fn get_all_implementations() -> Vec<(&'static str, VariantFactory, VariantDescriptor)> {
	use implementations::{variant_a, variant_b};

	vec![
		(
			variant_a::Registry::NAME,
			variant_a::Registry::factory(),
			variant_a::Registry::descriptor(),
		),
		(
			variant_b::Registry::NAME,
			variant_b::Registry::factory(),
			variant_b::Registry::descriptor(),
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	fn test_implementation_names_are_unique() {
		let implementations = get_all_implementations();
		let names: HashSet<_> = implementations.iter().map(|(name, _, _)| *name).collect();

		assert_eq!(names.len(), implementations.len());
		assert!(names.contains("A"));
		assert!(names.contains("B"));
	}

	#[test]
	fn test_descriptor_names_match_registration() {
		for (name, _, descriptor) in get_all_implementations() {
			assert_eq!(descriptor.name, name);
		}
	}

	#[test]
	fn test_kind_matches_registration() {
		let a = Variant::from(VariantA::new(1, "x", 1.0));
		let b = Variant::from(VariantB::new(toml::Value::Integer(1), 2.0));

		assert_eq!(a.kind(), "A");
		assert_eq!(b.kind(), "B");
		assert!(a.as_a().is_some() && a.as_b().is_none());
		assert!(b.as_b().is_some() && b.as_a().is_none());
	}

	#[test]
	fn test_variant_serializes_with_kind_tag() {
		let a = Variant::from(VariantA::new(1, "x", 1.0));
		let json = serde_json::to_value(&a).unwrap();

		assert_eq!(json["kind"], "A");
		assert_eq!(json["a"], 1);
		assert_eq!(json["b"], "x");
		assert_eq!(json["c"], 1.0);
	}
}
