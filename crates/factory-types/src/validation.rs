//! Argument validation for variant constructors.
//!
//! A variant declares its constructor parameters as a [`Schema`]. The schema
//! checks a caller-supplied argument table against the declared names and
//! types, rejects arguments it does not declare, and fills in defaults for
//! omitted optional parameters.

use crate::{render_default, ParamDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while matching arguments against a schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
	/// A required parameter was not supplied.
	#[error("Missing required argument: {0}")]
	MissingField(String),
	/// An argument was supplied that the constructor does not declare.
	#[error("Unexpected argument: {0}")]
	UnexpectedField(String),
	/// An argument has the right type but an unacceptable value.
	#[error("Invalid value for argument '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// An argument has the wrong type.
	#[error("Type mismatch for argument '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// Declared type of a constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
	/// A TOML integer.
	Int,
	/// A TOML float. Integers are accepted and widened.
	Float,
	/// A TOML string.
	Str,
	/// Any value; the parameter is untyped.
	Any,
}

impl ParamType {
	/// Returns the short name used in error messages and descriptors.
	pub fn as_str(&self) -> &'static str {
		match self {
			ParamType::Int => "int",
			ParamType::Float => "float",
			ParamType::Str => "str",
			ParamType::Any => "any",
		}
	}

	/// Checks whether a value can be bound to a parameter of this type.
	pub fn accepts(&self, value: &toml::Value) -> bool {
		match self {
			ParamType::Int => value.is_integer(),
			ParamType::Float => value.is_float() || value.is_integer(),
			ParamType::Str => value.is_str(),
			ParamType::Any => true,
		}
	}

	/// Converts an accepted value into the representation the constructor expects.
	fn normalize(&self, value: &toml::Value) -> toml::Value {
		match (self, value) {
			(ParamType::Float, toml::Value::Integer(i)) => toml::Value::Float(*i as f64),
			_ => value.clone(),
		}
	}
}

impl fmt::Display for ParamType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Type alias for custom value checks run after type checking.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A single constructor parameter.
pub struct Field {
	pub name: String,
	pub param_type: ParamType,
	pub doc: Option<String>,
	pub default: Option<toml::Value>,
	pub validator: Option<FieldValidator>,
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("param_type", &self.param_type)
			.field("doc", &self.doc)
			.field("default", &self.default)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	/// Creates a new parameter with the given name and type.
	pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
		Self {
			name: name.into(),
			param_type,
			doc: None,
			default: None,
			validator: None,
		}
	}

	/// Attaches a short human-readable description.
	pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
		self.doc = Some(doc.into());
		self
	}

	/// Sets the value bound when the argument is omitted.
	///
	/// Only meaningful for optional parameters.
	pub fn with_default(mut self, default: impl Into<toml::Value>) -> Self {
		self.default = Some(default.into());
		self
	}

	/// Adds a custom validator to this parameter.
	///
	/// The validator receives the value after type checking and returns an
	/// error message if the value is rejected.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}

	fn bind(&self, value: &toml::Value) -> Result<toml::Value, ValidationError> {
		if !self.param_type.accepts(value) {
			return Err(ValidationError::TypeMismatch {
				field: self.name.clone(),
				expected: self.param_type.to_string(),
				actual: value.type_str().to_string(),
			});
		}

		if let Some(validator) = &self.validator {
			validator(value).map_err(|message| ValidationError::InvalidValue {
				field: self.name.clone(),
				message,
			})?;
		}

		Ok(self.param_type.normalize(value))
	}

	fn describe(&self, required: bool) -> ParamDescriptor {
		ParamDescriptor {
			name: self.name.clone(),
			doc: self.doc.clone(),
			param_type: self.param_type,
			required,
			default_value: self.default.as_ref().map(render_default),
		}
	}
}

/// The parameter contract of a variant constructor.
///
/// Required parameters must be supplied; optional ones fall back to their
/// default when omitted. Arguments matching neither list are rejected.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	/// Creates a new schema with required and optional parameters.
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Returns true if `name` is a declared parameter.
	pub fn declares(&self, name: &str) -> bool {
		self.required
			.iter()
			.chain(self.optional.iter())
			.any(|field| field.name == name)
	}

	/// Validates an argument table without binding it.
	pub fn validate(&self, args: &toml::Value) -> Result<(), ValidationError> {
		self.resolve(args).map(|_| ())
	}

	/// Validates an argument table and returns the bound arguments.
	///
	/// The returned table holds every required parameter, every supplied
	/// optional parameter and the default of every omitted optional parameter
	/// that has one. Integers bound to float parameters are widened.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - `args` is not a table
	/// - an argument is not declared by the schema
	/// - a required parameter is missing
	/// - a value has the wrong type or fails its validator
	pub fn resolve(&self, args: &toml::Value) -> Result<toml::Table, ValidationError> {
		let table = args
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "arguments".to_string(),
				expected: "table".to_string(),
				actual: args.type_str().to_string(),
			})?;

		if let Some(name) = table.keys().find(|name| !self.declares(name)) {
			return Err(ValidationError::UnexpectedField(name.clone()));
		}

		let mut bound = toml::Table::new();

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			bound.insert(field.name.clone(), field.bind(value)?);
		}

		for field in &self.optional {
			match table.get(&field.name) {
				Some(value) => {
					bound.insert(field.name.clone(), field.bind(value)?);
				},
				None => {
					if let Some(default) = &field.default {
						bound.insert(field.name.clone(), field.param_type.normalize(default));
					}
				},
			}
		}

		Ok(bound)
	}

	/// Describes the parameters in declaration order, required ones first.
	pub fn describe(&self) -> Vec<ParamDescriptor> {
		self.required
			.iter()
			.map(|field| field.describe(true))
			.chain(self.optional.iter().map(|field| field.describe(false)))
			.collect()
	}
}

/// Trait implemented by each variant to expose its constructor contract.
pub trait ArgumentSchema: Send + Sync {
	/// Builds the parameter schema.
	fn schema(&self) -> Schema;

	/// Validates and binds an argument table against [`ArgumentSchema::schema`].
	fn bind(&self, args: &toml::Value) -> Result<toml::Table, ValidationError> {
		self.schema().resolve(args)
	}
}

fn bound_value<'a>(args: &'a toml::Table, name: &str) -> Result<&'a toml::Value, ValidationError> {
	args.get(name)
		.ok_or_else(|| ValidationError::MissingField(name.to_string()))
}

fn mismatch(name: &str, expected: ParamType, value: &toml::Value) -> ValidationError {
	ValidationError::TypeMismatch {
		field: name.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	}
}

/// Reads a bound integer argument.
pub fn int_arg(args: &toml::Table, name: &str) -> Result<i64, ValidationError> {
	let value = bound_value(args, name)?;
	value
		.as_integer()
		.ok_or_else(|| mismatch(name, ParamType::Int, value))
}

/// Reads a bound float argument, widening integers.
pub fn float_arg(args: &toml::Table, name: &str) -> Result<f64, ValidationError> {
	let value = bound_value(args, name)?;
	value
		.as_float()
		.or_else(|| value.as_integer().map(|i| i as f64))
		.ok_or_else(|| mismatch(name, ParamType::Float, value))
}

/// Reads a bound string argument.
pub fn str_arg(args: &toml::Table, name: &str) -> Result<String, ValidationError> {
	let value = bound_value(args, name)?;
	value
		.as_str()
		.map(str::to_string)
		.ok_or_else(|| mismatch(name, ParamType::Str, value))
}

/// Reads a bound untyped argument.
pub fn any_arg(args: &toml::Table, name: &str) -> Result<toml::Value, ValidationError> {
	bound_value(args, name).cloned()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn schema() -> Schema {
		Schema::new(
			vec![
				Field::new("count", ParamType::Int),
				Field::new("label", ParamType::Str),
			],
			vec![Field::new("ratio", ParamType::Float).with_default(1.0)],
		)
	}

	fn args(s: &str) -> toml::Value {
		toml::Value::Table(toml::from_str(s).unwrap())
	}

	#[test]
	fn test_resolve_fills_defaults() {
		let bound = schema().resolve(&args("count = 3\nlabel = \"x\"")).unwrap();

		assert_eq!(int_arg(&bound, "count").unwrap(), 3);
		assert_eq!(str_arg(&bound, "label").unwrap(), "x");
		assert_eq!(float_arg(&bound, "ratio").unwrap(), 1.0);
	}

	#[test]
	fn test_integer_widens_to_float() {
		let bound = schema()
			.resolve(&args("count = 3\nlabel = \"x\"\nratio = 4"))
			.unwrap();

		assert_eq!(bound.get("ratio"), Some(&toml::Value::Float(4.0)));
	}

	#[test]
	fn test_missing_required_field() {
		let result = schema().resolve(&args("count = 3"));
		assert_eq!(result, Err(ValidationError::MissingField("label".into())));
	}

	#[test]
	fn test_unexpected_field_rejected() {
		let result = schema().resolve(&args("count = 3\nlabel = \"x\"\nextra = true"));
		assert_eq!(result, Err(ValidationError::UnexpectedField("extra".into())));
	}

	#[test]
	fn test_type_mismatch() {
		let result = schema().resolve(&args("count = \"three\"\nlabel = \"x\""));
		match result {
			Err(ValidationError::TypeMismatch {
				field,
				expected,
				actual,
			}) => {
				assert_eq!(field, "count");
				assert_eq!(expected, "int");
				assert_eq!(actual, "string");
			},
			other => panic!("Expected type mismatch, got {:?}", other),
		}
	}

	#[test]
	fn test_non_table_arguments() {
		let result = schema().resolve(&toml::Value::Integer(1));
		assert!(matches!(result, Err(ValidationError::TypeMismatch { .. })));
	}

	#[test]
	fn test_custom_validator() {
		let schema = Schema::new(
			vec![Field::new("count", ParamType::Int).with_validator(|v| {
				if v.as_integer().unwrap_or(0) < 0 {
					Err("must not be negative".into())
				} else {
					Ok(())
				}
			})],
			vec![],
		);

		assert!(schema.validate(&args("count = 1")).is_ok());
		let err = schema.validate(&args("count = -1")).unwrap_err();
		assert!(err.to_string().contains("must not be negative"));
	}

	#[test]
	fn test_any_accepts_everything() {
		let schema = Schema::new(vec![Field::new("value", ParamType::Any)], vec![]);

		for input in ["value = 1", "value = \"s\"", "value = [1, 2]", "value = { k = 1 }"] {
			assert!(schema.validate(&args(input)).is_ok(), "rejected {}", input);
		}
	}

	#[test]
	fn test_describe_order() {
		let params = schema().describe();
		let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();

		assert_eq!(names, vec!["count", "label", "ratio"]);
		assert!(params[0].required);
		assert!(!params[2].required);
		assert_eq!(params[2].default_value.as_deref(), Some("1"));
	}
}
