//! Registry-backed factory.
//!
//! Maps a discriminator string plus an argument table to a newly constructed
//! [`Variant`]. The [`FactoryRegistry`] holds the discriminator to
//! constructor mapping; a process-wide instance with every built-in variant
//! is available through [`get_registry`] and the free function [`create`].

use factory_types::ValidationError;
use factory_variants::VariantError;
use thiserror::Error;

pub mod registry;

pub use factory_variants::{Variant, VariantA, VariantB, VariantFactory};
pub use registry::{create, get_registry, initialize_registry, FactoryRegistry};

/// Errors that can occur while registering or creating variants.
#[derive(Debug, Error)]
pub enum FactoryError {
	/// No variant is registered under the requested discriminator.
	#[error("Unknown variant '{name}'. Available: [{}]", .available.join(", "))]
	UnknownVariant {
		name: String,
		available: Vec<String>,
	},
	/// A variant is already registered under this discriminator.
	#[error("Variant '{0}' is already registered")]
	DuplicateVariant(String),
	/// The arguments do not satisfy the chosen constructor.
	#[error("Argument mismatch for variant '{name}': {source}")]
	ArgumentMismatch {
		name: String,
		#[source]
		source: ValidationError,
	},
}

impl FactoryError {
	pub(crate) fn from_variant(name: &str, err: VariantError) -> Self {
		match err {
			VariantError::ArgumentMismatch(source) => FactoryError::ArgumentMismatch {
				name: name.to_string(),
				source,
			},
		}
	}
}
