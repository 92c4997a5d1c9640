//! Command-line front end for the variant factory.
//!
//! Lists and describes the registered variants and constructs them from
//! arguments given inline or in a TOML file.

use clap::{Parser, Subcommand};
use factory_config::{load_args_file, merge_args, parse_inline_args};
use factory_core::{FactoryRegistry, Variant};
use std::path::PathBuf;

/// Command-line arguments for the variant factory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info", global = true)]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// List registered variant names
	List,
	/// Print the descriptor of one variant, or of every variant
	Describe {
		/// Variant name; all variants when omitted
		name: Option<String>,
	},
	/// Construct a variant and print it as JSON
	Create {
		/// Variant name
		name: String,

		/// Inline arguments, e.g. '{ a = 1, b = "x" }'
		#[arg(short, long)]
		args: Option<String>,

		/// TOML file holding arguments; inline arguments take precedence
		#[arg(long)]
		args_file: Option<PathBuf>,

		/// Call `make` on the constructed variant
		#[arg(long)]
		make: bool,
	},
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_target(true)
		.with_writer(std::io::stderr)
		.init();

	let registry = factory_core::get_registry();

	match run(args.command, registry) {
		Ok(output) => {
			println!("{}", output);
			Ok(())
		},
		Err(e) => {
			tracing::error!("{}", e);
			Err(e)
		},
	}
}

/// Executes a command against `registry` and returns the text to print.
fn run(command: Command, registry: &FactoryRegistry) -> Result<String, Box<dyn std::error::Error>> {
	match command {
		Command::List => Ok(registry.names().join("\n")),
		Command::Describe { name: Some(name) } => {
			let descriptor = registry.describe(&name)?;
			Ok(serde_json::to_string_pretty(descriptor)?)
		},
		Command::Describe { name: None } => {
			Ok(serde_json::to_string_pretty(&registry.describe_all())?)
		},
		Command::Create {
			name,
			args,
			args_file,
			make,
		} => {
			let file_args = match args_file {
				Some(path) => load_args_file(&path)?,
				None => toml::Value::Table(toml::Table::new()),
			};
			let inline_args = match args {
				Some(inline) => parse_inline_args(&inline)?,
				None => toml::Value::Table(toml::Table::new()),
			};

			let variant = registry.create(&name, &merge_args(file_args, inline_args))?;
			tracing::info!("Created variant [{}]", variant.kind());

			if make {
				match &variant {
					Variant::B(b) => b.make(),
					other => {
						return Err(format!("Variant '{}' has no make operation", other.kind()).into())
					},
				}
			}

			Ok(serde_json::to_string_pretty(&variant)?)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;
	use std::io::Write;

	fn registry() -> &'static FactoryRegistry {
		factory_core::get_registry()
	}

	fn create(name: &str, args: Option<&str>) -> Command {
		Command::Create {
			name: name.to_string(),
			args: args.map(String::from),
			args_file: None,
			make: false,
		}
	}

	#[test]
	fn test_cli_definition() {
		Args::command().debug_assert();
	}

	#[test]
	fn test_parse_create_command() {
		let args = Args::parse_from([
			"variant-factory",
			"create",
			"A",
			"--args",
			"{ a = 1, b = \"x\" }",
			"--log-level",
			"debug",
		]);

		assert_eq!(args.log_level, "debug");
		match args.command {
			Command::Create { name, args, .. } => {
				assert_eq!(name, "A");
				assert_eq!(args.as_deref(), Some("{ a = 1, b = \"x\" }"));
			},
			other => panic!("Expected create command, got {:?}", other),
		}
	}

	#[test]
	fn test_list() {
		let output = run(Command::List, registry()).unwrap();
		assert_eq!(output, "A\nB");
	}

	#[test]
	fn test_describe_one() {
		let output = run(
			Command::Describe {
				name: Some("A".into()),
			},
			registry(),
		)
		.unwrap();
		let json: serde_json::Value = serde_json::from_str(&output).unwrap();

		assert_eq!(json["name"], "A");
		assert_eq!(json["params"][2]["name"], "c");
		assert_eq!(json["params"][2]["default_value"], "1");
	}

	#[test]
	fn test_describe_all() {
		let output = run(Command::Describe { name: None }, registry()).unwrap();
		let json: serde_json::Value = serde_json::from_str(&output).unwrap();

		assert_eq!(json.as_array().map(|a| a.len()), Some(2));
	}

	#[test]
	fn test_create_inline() {
		let output = run(create("A", Some("{ a = 1, b = \"x\" }")), registry()).unwrap();
		let json: serde_json::Value = serde_json::from_str(&output).unwrap();

		assert_eq!(json["kind"], "A");
		assert_eq!(json["c"], 1.0);
	}

	#[test]
	fn test_create_unknown() {
		let err = run(create("unknown", None), registry()).unwrap_err();
		assert!(err.to_string().contains("Unknown variant 'unknown'"));
	}

	#[test]
	fn test_create_from_file_with_inline_override() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "a = 1\nc = 2.0").unwrap();

		let output = run(
			Command::Create {
				name: "B".into(),
				args: Some("{ c = 3.5 }".into()),
				args_file: Some(file.path().to_path_buf()),
				make: true,
			},
			registry(),
		)
		.unwrap();
		let json: serde_json::Value = serde_json::from_str(&output).unwrap();

		assert_eq!(json["kind"], "B");
		assert_eq!(json["a"], 1);
		assert_eq!(json["c"], 3.5);
	}

	#[test]
	fn test_make_on_a_rejected() {
		let err = run(
			Command::Create {
				name: "A".into(),
				args: Some("{ a = 1, b = \"x\" }".into()),
				args_file: None,
				make: true,
			},
			registry(),
		)
		.unwrap_err();

		assert!(err.to_string().contains("no make operation"));
	}
}
