//! Variant B: an untyped value and a float, plus the `make` operation.

use crate::{Variant, VariantError, VariantFactory, VariantRegistry};
use factory_types::{
	any_arg, float_arg, ArgumentSchema, Field, ImplementationRegistry, ParamType, Schema,
	VariantDescriptor,
};
use serde::Serialize;

/// B is b
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantB {
	pub a: toml::Value,
	pub c: f64,
}

impl VariantB {
	pub fn new(a: impl Into<toml::Value>, c: f64) -> Self {
		Self { a: a.into(), c }
	}

	/// Making
	///
	/// Does not change the instance and produces no value.
	pub fn make(&self) {
		tracing::trace!(c = self.c, "make called on variant B");
	}
}

/// Constructor contract for [`VariantB`].
pub struct VariantBSchema;

impl ArgumentSchema for VariantBSchema {
	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("a", ParamType::Any),
				Field::new("c", ParamType::Float),
			],
			vec![],
		)
	}
}

/// Factory function to create variant B from an argument table.
///
/// Arguments:
/// - `a` (any, required)
/// - `c` (float, required)
pub fn create_variant(args: &toml::Value) -> Result<Variant, VariantError> {
	let args = VariantBSchema.bind(args)?;

	Ok(Variant::B(VariantB::new(
		any_arg(&args, "a")?,
		float_arg(&args, "c")?,
	)))
}

/// Registry for variant B.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "B";
	type Factory = VariantFactory;

	fn factory() -> Self::Factory {
		create_variant
	}

	fn descriptor() -> VariantDescriptor {
		VariantDescriptor::new(Self::NAME, "B is b", &VariantBSchema.schema())
			.with_operation("make", "Making")
	}
}

impl VariantRegistry for Registry {}
