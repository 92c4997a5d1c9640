//! Variant A: an integer, a string and a float with a default.

use crate::{Variant, VariantError, VariantFactory, VariantRegistry};
use factory_types::{
	float_arg, int_arg, str_arg, ArgumentSchema, Field, ImplementationRegistry, ParamType, Schema,
	VariantDescriptor,
};
use serde::Serialize;

/// A is a
/// Jzzzz
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantA {
	/// apple
	pub a: i64,
	/// bus
	pub b: String,
	pub c: f64,
}

impl VariantA {
	/// Value bound to `c` when the argument is omitted.
	pub const DEFAULT_C: f64 = 1.0;

	pub fn new(a: i64, b: impl Into<String>, c: f64) -> Self {
		Self { a, b: b.into(), c }
	}
}

/// Constructor contract for [`VariantA`].
pub struct VariantASchema;

impl ArgumentSchema for VariantASchema {
	fn schema(&self) -> Schema {
		Schema::new(
			vec![
				Field::new("a", ParamType::Int).with_doc("apple"),
				Field::new("b", ParamType::Str).with_doc("bus"),
			],
			vec![Field::new("c", ParamType::Float).with_default(VariantA::DEFAULT_C)],
		)
	}
}

/// Factory function to create variant A from an argument table.
///
/// Arguments:
/// - `a` (int, required)
/// - `b` (str, required)
/// - `c` (float, optional, defaults to 1)
pub fn create_variant(args: &toml::Value) -> Result<Variant, VariantError> {
	let args = VariantASchema.bind(args)?;

	Ok(Variant::A(VariantA::new(
		int_arg(&args, "a")?,
		str_arg(&args, "b")?,
		float_arg(&args, "c")?,
	)))
}

/// Registry for variant A.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "A";
	type Factory = VariantFactory;

	fn factory() -> Self::Factory {
		create_variant
	}

	fn descriptor() -> VariantDescriptor {
		VariantDescriptor::new(Self::NAME, "A is a\nJzzzz", &VariantASchema.schema())
	}
}

impl VariantRegistry for Registry {}

#[cfg(test)]
mod tests {
	use super::*;
	use factory_types::ValidationError;

	fn args(s: &str) -> toml::Value {
		toml::Value::Table(toml::from_str(s).unwrap())
	}

	#[test]
	fn test_create_with_default_c() {
		let variant = create_variant(&args("a = 1\nb = \"x\"")).unwrap();

		assert_eq!(variant, Variant::A(VariantA::new(1, "x", 1.0)));
	}

	#[test]
	fn test_create_with_explicit_c() {
		let variant = create_variant(&args("a = 1\nb = \"x\"\nc = 2.5")).unwrap();
		let a = variant.as_a().unwrap();

		assert_eq!(a.c, 2.5);
	}

	#[test]
	fn test_missing_b() {
		let result = create_variant(&args("a = 1"));

		assert!(matches!(
			result,
			Err(VariantError::ArgumentMismatch(ValidationError::MissingField(ref f))) if f == "b"
		));
	}

	#[test]
	fn test_string_for_int_rejected() {
		let result = create_variant(&args("a = \"1\"\nb = \"x\""));

		assert!(matches!(
			result,
			Err(VariantError::ArgumentMismatch(ValidationError::TypeMismatch { .. }))
		));
	}

	#[test]
	fn test_descriptor() {
		let descriptor = Registry::descriptor();

		assert_eq!(descriptor.name, "A");
		assert_eq!(descriptor.params.len(), 3);

		let a = descriptor.param("a").unwrap();
		assert_eq!(a.param_type, ParamType::Int);
		assert_eq!(a.doc.as_deref(), Some("apple"));
		assert!(a.required);

		let b = descriptor.param("b").unwrap();
		assert_eq!(b.param_type, ParamType::Str);
		assert_eq!(b.doc.as_deref(), Some("bus"));

		let c = descriptor.param("c").unwrap();
		assert_eq!(c.param_type, ParamType::Float);
		assert!(!c.required);
		assert_eq!(c.default_value.as_deref(), Some("1"));

		assert!(descriptor.operations.is_empty());
	}
}
