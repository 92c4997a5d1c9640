//! Registry trait for self-registering variants.
//!
//! Every variant module exposes a `Registry` unit struct implementing this
//! trait, so the factory can discover the discriminator, the constructor and
//! the descriptor of each variant without any runtime type lookup.

use crate::VariantDescriptor;

/// Base trait for variant registrations.
pub trait ImplementationRegistry {
	/// The discriminator used to select this variant, for example `"A"`.
	const NAME: &'static str;

	/// The constructor function type this variant provides.
	type Factory;

	/// Get the constructor function for this variant.
	fn factory() -> Self::Factory;

	/// Describe the variant's parameters and extra operations.
	fn descriptor() -> VariantDescriptor;
}
