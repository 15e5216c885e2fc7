//! The merged configuration store for strata.
//!
//! This module handles:
//! - Building the merged tree from a config directory and env file
//! - Dotted-path `get` with interpolation
//! - Top-level `set`
//! - Incremental `load_file` with double-load protection

use crate::env::{EnvStack, EnvironmentSource};
use crate::error::{Result, StrataError};
use crate::interp::Interpolator;
use crate::merge::{deep_merge_all, merge_mappings};
use crate::resolve::resolve_path;
use crate::source::{discover_files, parse_file};
use serde_yaml::{Mapping, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable naming the override subdirectory to merge last.
pub const APP_ENV: &str = "APP_ENV";

/// A merged, queryable configuration tree.
///
/// Built once from a directory of YAML files; `get` and `set` operate on
/// the live tree. Plain owned data: callers sharing a `Config` across
/// threads supply their own locking around `set`.
pub struct Config {
	tree: Mapping,
	loaded: HashSet<PathBuf>,
	env: Box<dyn EnvironmentSource>,
}

impl Config {
	/// Load a config directory, with the given dotenv file supplying
	/// defaults for variable interpolation.
	///
	/// The `APP_ENV` variable (process environment first, then the env
	/// file) selects an override subdirectory whose files merge last. Any
	/// file that fails to read or parse aborts the whole load.
	pub fn load(env_file: &Path, config_dir: &Path) -> Result<Self> {
		let env = EnvStack::with_env_file(env_file)?;
		let environment = env.lookup(APP_ENV);
		Self::with_env(config_dir, Box::new(env), environment.as_deref())
	}

	/// Load a config directory against an explicit environment source.
	///
	/// `environment` names the override subdirectory; `None` (or empty)
	/// loads only the base files.
	pub fn with_env(
		config_dir: &Path,
		env: Box<dyn EnvironmentSource>,
		environment: Option<&str>,
	) -> Result<Self> {
		let files = discover_files(config_dir, environment)?;

		let mut loaded = HashSet::new();
		let mut parsed = Vec::with_capacity(files.len());
		for path in &files {
			if loaded.insert(file_identity(path)) {
				parsed.push(parse_file(path)?);
			}
		}

		Ok(Config {
			tree: deep_merge_all(parsed),
			loaded,
			env,
		})
	}

	/// An empty store backed by the given environment source.
	pub fn empty(env: Box<dyn EnvironmentSource>) -> Self {
		Config {
			tree: Mapping::new(),
			loaded: HashSet::new(),
			env,
		}
	}

	/// Look up a dotted key and interpolate its value.
	///
	/// Interpolation runs on every call, so environment variable changes
	/// are observed on the next `get`.
	pub fn get(&self, key: &str) -> Result<Value> {
		let raw = resolve_path(&self.tree, key).ok_or_else(|| StrataError::KeyNotFoundInConfig {
			key: key.to_string(),
		})?;

		Interpolator::new(&self.tree, self.env.as_ref()).interpolate(key, raw)
	}

	/// Replace the top-level entry at `key`.
	///
	/// The value is stored verbatim: no dotted-path writes, no merge with
	/// an existing mapping, no interpolation.
	pub fn set(&mut self, key: &str, value: Value) {
		self.tree.insert(Value::String(key.to_string()), value);
	}

	/// Parse one more file and deep-merge it over the current tree.
	///
	/// A path without an extension gets `.yml` appended. Loading a path
	/// that was already merged is a no-op, so explicit lists and directory
	/// discovery can safely overlap.
	pub fn load_file(&mut self, path: &Path) -> Result<()> {
		let path = if path.extension().is_none() {
			path.with_extension("yml")
		} else {
			path.to_path_buf()
		};

		if !self.loaded.insert(file_identity(&path)) {
			return Ok(());
		}

		let parsed = parse_file(&path)?;
		let tree = std::mem::take(&mut self.tree);
		self.tree = merge_mappings(tree, parsed);
		Ok(())
	}

	/// Read access to the merged (uninterpolated) tree.
	pub fn tree(&self) -> &Mapping {
		&self.tree
	}
}

/// The identity used for double-load protection: the canonicalized absolute
/// path when the file exists, the given path otherwise.
fn file_identity(path: &Path) -> PathBuf {
	path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
