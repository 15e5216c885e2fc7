//! Environment variable sources for strata.
//!
//! This module handles:
//! - The `EnvironmentSource` lookup trait used by interpolation
//! - Process environment access
//! - Dotenv-format file loading (without mutating the process environment)
//! - Layered lookup across multiple sources

use crate::error::{Result, StrataError};
use std::collections::HashMap;
use std::path::Path;

/// A source of named environment values.
///
/// Interpolation and `APP_ENV` discovery go through this trait rather than
/// reading (or mutating) the process environment directly, so tests and
/// embedders can supply their own values.
pub trait EnvironmentSource {
	/// Look up a variable by name. `None` means the source has no entry.
	fn lookup(&self, name: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvironmentSource for ProcessEnv {
	fn lookup(&self, name: &str) -> Option<String> {
		std::env::var(name).ok()
	}
}

/// Variables parsed from a dotenv-format file into an owned map.
///
/// The file is read once at construction; later edits to it are not observed.
#[derive(Debug, Default)]
pub struct FileEnv {
	vars: HashMap<String, String>,
}

impl FileEnv {
	/// Parse a dotenv-format file.
	///
	/// A missing file yields an empty source, matching the usual dotenv
	/// convention that the file is optional. Any other I/O failure or a
	/// malformed line is an error.
	pub fn from_path(path: &Path) -> Result<Self> {
		let iter = match dotenvy::from_path_iter(path) {
			Ok(iter) => iter,
			Err(err) if is_not_found(&err) => return Ok(Self::default()),
			Err(source) => {
				return Err(StrataError::EnvFileError {
					path: path.to_path_buf(),
					source,
				});
			}
		};

		let mut vars = HashMap::new();
		for item in iter {
			let (name, value) = item.map_err(|source| StrataError::EnvFileError {
				path: path.to_path_buf(),
				source,
			})?;
			vars.insert(name, value);
		}

		Ok(FileEnv { vars })
	}

	/// Build a source directly from name/value pairs (useful for testing).
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		FileEnv {
			vars: pairs
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl EnvironmentSource for FileEnv {
	fn lookup(&self, name: &str) -> Option<String> {
		self.vars.get(name).cloned()
	}
}

fn is_not_found(err: &dotenvy::Error) -> bool {
	matches!(err, dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
}

/// An ordered stack of sources; the first source with an entry wins.
#[derive(Default)]
pub struct EnvStack {
	sources: Vec<Box<dyn EnvironmentSource>>,
}

impl EnvStack {
	/// Build a stack from sources in priority order.
	pub fn new(sources: Vec<Box<dyn EnvironmentSource>>) -> Self {
		EnvStack { sources }
	}

	/// The default stack for a given env file: the process environment,
	/// then the file's entries. The file supplies defaults and never
	/// overrides a variable the process already has.
	pub fn with_env_file(path: &Path) -> Result<Self> {
		let file = FileEnv::from_path(path)?;
		Ok(EnvStack::new(vec![
			Box::new(ProcessEnv),
			Box::new(file),
		]))
	}
}

impl EnvironmentSource for EnvStack {
	fn lookup(&self, name: &str) -> Option<String> {
		self.sources.iter().find_map(|source| source.lookup(name))
	}
}
