//! Discriminator to constructor registry.
//!
//! The registry is built once, either explicitly through
//! [`FactoryRegistry::register`] or lazily for the process through
//! [`initialize_registry`], and is read-only afterwards.

use crate::FactoryError;
use factory_types::VariantDescriptor;
use factory_variants::{Variant, VariantFactory};
use std::collections::HashMap;
use std::sync::OnceLock;

struct Registration {
	factory: VariantFactory,
	descriptor: VariantDescriptor,
}

/// Mapping from discriminator to variant constructor.
#[derive(Default)]
pub struct FactoryRegistry {
	variants: HashMap<String, Registration>,
}

impl FactoryRegistry {
	/// Create a new empty registry
	pub fn new() -> Self {
		Self {
			variants: HashMap::new(),
		}
	}

	/// Create a registry holding every built-in variant.
	pub fn with_defaults() -> Result<Self, FactoryError> {
		let mut registry = Self::new();
		for (name, factory, descriptor) in factory_variants::get_all_implementations() {
			registry.register(name, factory, descriptor)?;
		}
		Ok(registry)
	}

	/// Register a variant constructor under `name`.
	///
	/// Fails with [`FactoryError::DuplicateVariant`] if the name is taken;
	/// an existing registration is never replaced.
	pub fn register(
		&mut self,
		name: impl Into<String>,
		factory: VariantFactory,
		descriptor: VariantDescriptor,
	) -> Result<(), FactoryError> {
		let name = name.into();
		if self.variants.contains_key(&name) {
			return Err(FactoryError::DuplicateVariant(name));
		}

		tracing::debug!("Registering variant: {}", name);
		self.variants.insert(
			name,
			Registration {
				factory,
				descriptor,
			},
		);
		Ok(())
	}

	/// Construct the variant registered under `name` from `args`.
	///
	/// `args` must be a table whose keys match the constructor's parameters.
	pub fn create(&self, name: &str, args: &toml::Value) -> Result<Variant, FactoryError> {
		let registration = self.lookup(name)?;
		let variant =
			(registration.factory)(args).map_err(|e| FactoryError::from_variant(name, e))?;

		tracing::debug!(variant = name, "Created variant");
		Ok(variant)
	}

	/// Returns true if a variant is registered under `name`.
	pub fn contains(&self, name: &str) -> bool {
		self.variants.contains_key(name)
	}

	/// Registered discriminators, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.variants.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Describe the variant registered under `name`.
	pub fn describe(&self, name: &str) -> Result<&VariantDescriptor, FactoryError> {
		self.lookup(name).map(|registration| &registration.descriptor)
	}

	/// Describe every registered variant, sorted by discriminator.
	pub fn describe_all(&self) -> Vec<&VariantDescriptor> {
		self.names()
			.into_iter()
			.filter_map(|name| self.variants.get(name))
			.map(|registration| &registration.descriptor)
			.collect()
	}

	fn lookup(&self, name: &str) -> Result<&Registration, FactoryError> {
		self.variants
			.get(name)
			.ok_or_else(|| FactoryError::UnknownVariant {
				name: name.to_string(),
				available: self.names().into_iter().map(String::from).collect(),
			})
	}
}

// Global registry instance
static REGISTRY: OnceLock<FactoryRegistry> = OnceLock::new();

/// Initialize the global registry with all built-in variants
pub fn initialize_registry() -> &'static FactoryRegistry {
	REGISTRY.get_or_init(|| {
		let mut registry = FactoryRegistry::new();

		for (name, factory, descriptor) in factory_variants::get_all_implementations() {
			if let Err(e) = registry.register(name, factory, descriptor) {
				tracing::error!("Skipping built-in variant: {}", e);
			}
		}

		registry
	})
}

/// Get the global factory registry
pub fn get_registry() -> &'static FactoryRegistry {
	initialize_registry()
}

/// Construct a variant through the global registry.
pub fn create(name: &str, args: &toml::Value) -> Result<Variant, FactoryError> {
	get_registry().create(name, args)
}
