//! Descriptors for variant introspection.
//!
//! A descriptor is the serializable view of a variant: its discriminator,
//! its documentation, the constructor parameters it accepts and any extra
//! operations it exposes.

use crate::{ParamType, Schema};
use serde::{Deserialize, Serialize};

/// Describes one constructor parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDescriptor {
	/// Parameter name as accepted in the argument table.
	pub name: String,
	/// Short description, if the variant documents this parameter.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub doc: Option<String>,
	/// Declared type.
	#[serde(rename = "type")]
	pub param_type: ParamType,
	/// Whether the argument must be supplied.
	pub required: bool,
	/// Rendered default value for optional parameters.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<String>,
}

/// Describes an operation a variant exposes besides construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
	pub name: String,
	pub doc: String,
}

/// Describes a registered variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantDescriptor {
	/// Discriminator the variant is registered under.
	pub name: String,
	/// Variant documentation.
	pub doc: String,
	/// Constructor parameters in declaration order.
	pub params: Vec<ParamDescriptor>,
	/// Extra operations available on constructed instances.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub operations: Vec<OperationDescriptor>,
}

impl VariantDescriptor {
	/// Builds a descriptor from a variant's schema.
	pub fn new(name: impl Into<String>, doc: impl Into<String>, schema: &Schema) -> Self {
		Self {
			name: name.into(),
			doc: doc.into(),
			params: schema.describe(),
			operations: Vec::new(),
		}
	}

	/// Adds an extra operation.
	pub fn with_operation(mut self, name: impl Into<String>, doc: impl Into<String>) -> Self {
		self.operations.push(OperationDescriptor {
			name: name.into(),
			doc: doc.into(),
		});
		self
	}

	/// Looks up a parameter by name.
	pub fn param(&self, name: &str) -> Option<&ParamDescriptor> {
		self.params.iter().find(|p| p.name == name)
	}
}

/// Renders a default value the way it would be written at a call site.
///
/// Strings are rendered without quotes and whole floats without a
/// fractional part, so a float default of `1.0` renders as `1`.
pub fn render_default(value: &toml::Value) -> String {
	match value {
		toml::Value::String(s) => s.clone(),
		toml::Value::Integer(i) => i.to_string(),
		toml::Value::Float(f) => f.to_string(),
		toml::Value::Boolean(b) => b.to_string(),
		other => other.to_string(),
	}
}
