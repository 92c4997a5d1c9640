//! Argument loading for the variant factory.
//!
//! Argument tables can come from a TOML file or from an inline string on the
//! command line. File contents have environment variables resolved before
//! parsing, so a file may contain `${NAME}` or `${NAME:-default}`.

use regex::Regex;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading arguments.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when input is rejected before parsing.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Largest input accepted by [`resolve_env_vars`].
const MAX_INPUT_SIZE: usize = 1024 * 1024;

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of `VAR_NAME` and
/// `${VAR_NAME:-default}` with the value or `default` when unset.
/// Inputs over 1 MiB are rejected.
pub fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Input too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)))
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

/// Parses an argument table from a string.
///
/// Accepts either an inline table (`{ a = 1, b = "x" }`) or a TOML document
/// body (`a = 1` on separate lines). Blank input yields an empty table.
pub fn parse_inline_args(input: &str) -> Result<toml::Value, ConfigError> {
	let trimmed = input.trim();

	let table = if trimmed.starts_with('{') {
		let mut wrapper: toml::Table = toml::from_str(&format!("args = {}", trimmed))?;
		match wrapper.remove("args") {
			Some(toml::Value::Table(table)) => table,
			_ => {
				return Err(ConfigError::Parse(
					"Inline arguments must be a table".into(),
				))
			},
		}
	} else {
		toml::from_str(trimmed)?
	};

	Ok(toml::Value::Table(table))
}

/// Loads an argument table from a TOML file.
///
/// Environment variables are resolved before parsing.
pub fn load_args_file(path: impl AsRef<Path>) -> Result<toml::Value, ConfigError> {
	let path = path.as_ref();
	let content = std::fs::read_to_string(path)?;
	let resolved = resolve_env_vars(&content)?;
	let table: toml::Table = toml::from_str(&resolved)?;

	tracing::debug!("Loaded {} arguments from {}", table.len(), path.display());
	Ok(toml::Value::Table(table))
}

/// Merges two argument tables; keys in `overlay` replace keys in `base`.
///
/// Non-table inputs are treated as empty.
pub fn merge_args(base: toml::Value, overlay: toml::Value) -> toml::Value {
	let mut merged = match base {
		toml::Value::Table(table) => table,
		_ => toml::Table::new(),
	};
	if let toml::Value::Table(overlay) = overlay {
		for (key, value) in overlay {
			merged.insert(key, value);
		}
	}
	toml::Value::Table(merged)
}
