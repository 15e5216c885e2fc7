use crate::error::{Result, StrataError};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Parse a config file from the given path into a YAML mapping.
pub fn parse_file(path: &Path) -> Result<Mapping> {
	let content =
		std::fs::read_to_string(path).map_err(|source| StrataError::ConfigFileNotReadable {
			path: path.to_path_buf(),
			source,
		})?;

	parse_str(&content, path)
}

/// Parse config content from a string (useful for testing).
///
/// An empty or null document is treated as an empty mapping; any other
/// non-mapping top level (a bare scalar or sequence) is rejected.
pub fn parse_str(content: &str, path: &Path) -> Result<Mapping> {
	let value: Value =
		serde_yaml::from_str(content).map_err(|source| StrataError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	match value {
		Value::Null => Ok(Mapping::new()),
		Value::Mapping(mapping) => Ok(mapping),
		_ => Err(StrataError::NotAMapping {
			path: path.to_path_buf(),
		}),
	}
}
