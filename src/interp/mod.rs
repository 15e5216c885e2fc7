//! `%VARIABLE%` placeholder interpolation for strata.
//!
//! This module handles:
//! - Scanning string values for `%name%` placeholders
//! - Substituting environment variables and other config keys
//! - Recursive interpolation through mappings and sequences
//! - Cycle detection for keys that reference each other

use crate::env::EnvironmentSource;
use crate::error::{Result, StrataError};
use crate::resolve::resolve_path;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::sync::LazyLock;

/// Lazy match so `"%A% and %B%"` yields two placeholders, not one.
static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"%(.*?)%").expect("placeholder pattern is valid"));

/// Rewrites resolved values by substituting `%name%` placeholders.
///
/// Environment variables win over config keys. A placeholder naming a
/// config key re-enters resolution for that key, so its value arrives
/// already interpolated. Interpolation is recomputed on every call, so
/// environment changes are observed immediately.
pub struct Interpolator<'a> {
	tree: &'a Mapping,
	env: &'a dyn EnvironmentSource,
}

impl<'a> Interpolator<'a> {
	pub fn new(tree: &'a Mapping, env: &'a dyn EnvironmentSource) -> Self {
		Interpolator { tree, env }
	}

	/// Interpolate a value resolved for `requesting_key`.
	///
	/// Mappings and sequences are visited recursively with their shape
	/// preserved; non-string scalars pass through unchanged.
	pub fn interpolate(&self, requesting_key: &str, value: &Value) -> Result<Value> {
		let mut in_flight = HashSet::from([requesting_key.to_string()]);
		self.interpolate_value(requesting_key, value, &mut in_flight)
	}

	fn interpolate_value(
		&self,
		requesting_key: &str,
		value: &Value,
		in_flight: &mut HashSet<String>,
	) -> Result<Value> {
		match value {
			Value::String(s) => self
				.interpolate_string(requesting_key, s, in_flight)
				.map(Value::String),
			Value::Mapping(mapping) => {
				let mut result = Mapping::with_capacity(mapping.len());
				for (key, entry) in mapping {
					result.insert(
						key.clone(),
						self.interpolate_value(requesting_key, entry, in_flight)?,
					);
				}
				Ok(Value::Mapping(result))
			}
			Value::Sequence(items) => {
				let result = items
					.iter()
					.map(|item| self.interpolate_value(requesting_key, item, in_flight))
					.collect::<Result<Vec<_>>>()?;
				Ok(Value::Sequence(result))
			}
			other => Ok(other.clone()),
		}
	}

	/// Substitute every `%name%` placeholder in one string.
	///
	/// Per placeholder: an environment variable wins; otherwise the name is
	/// resolved as a config key (unless that key is already being
	/// interpolated somewhere up the chain, which would be a reference
	/// cycle). A placeholder still present after the attempt is an error.
	fn interpolate_string(
		&self,
		requesting_key: &str,
		input: &str,
		in_flight: &mut HashSet<String>,
	) -> Result<String> {
		let mut result = input.to_string();

		// Empty names ("%%") are not placeholders
		let names: Vec<String> = PLACEHOLDER
			.captures_iter(input)
			.map(|captures| captures[1].to_string())
			.filter(|name| !name.is_empty())
			.collect();

		for name in names {
			let token = format!("%{name}%");

			if let Some(env_value) = self.env.lookup(&name) {
				result = result.replace(&token, &env_value);
			} else if name != requesting_key && !in_flight.contains(&name) {
				if let Some(raw) = resolve_path(self.tree, &name) {
					in_flight.insert(name.clone());
					let resolved = self.interpolate_value(&name, raw, in_flight)?;
					in_flight.remove(&name);

					// Only scalars can be spliced into a string; a null or
					// structured value leaves the token unresolved
					if let Some(text) = scalar_to_string(&resolved) {
						result = result.replace(&token, &text);
					}
				}
			}

			if result.contains(&token) {
				return Err(StrataError::UndefinedConfigVariable {
					variable: name,
					key: requesting_key.to_string(),
				});
			}
		}

		Ok(result)
	}
}

/// Render a scalar for substitution into a string, without YAML quoting.
fn scalar_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Bool(b) => Some(b.to_string()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}
