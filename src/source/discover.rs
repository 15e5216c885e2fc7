use crate::error::{Result, StrataError};
use std::path::{Path, PathBuf};

/// Discover all config files to load, in merge order.
///
/// The order is:
/// 1. Every `*.yml` file directly inside `config_dir`, sorted by name
/// 2. If `environment` is non-empty, every `*.yml` file inside
///    `config_dir/<environment>/`, sorted by name
///
/// Override files come last so their values win merges. Listings are sorted
/// lexicographically because directory iteration order is platform-dependent
/// and the merged result must be identical across runs.
pub fn discover_files(config_dir: &Path, environment: Option<&str>) -> Result<Vec<PathBuf>> {
	let mut files = list_yml_files(config_dir)?;

	if let Some(env) = environment
		&& !env.is_empty()
	{
		let override_dir = config_dir.join(env);
		// A missing override subdirectory just means no overrides
		if override_dir.is_dir() {
			files.extend(list_yml_files(&override_dir)?);
		}
	}

	Ok(files)
}

/// List the `*.yml` files directly inside a directory, sorted by path.
///
/// Subdirectories and files with other extensions are skipped.
fn list_yml_files(dir: &Path) -> Result<Vec<PathBuf>> {
	let entries = std::fs::read_dir(dir).map_err(|source| StrataError::ConfigDirNotReadable {
		path: dir.to_path_buf(),
		source,
	})?;

	let mut files = Vec::new();
	for entry in entries {
		let entry = entry.map_err(|source| StrataError::ConfigDirNotReadable {
			path: dir.to_path_buf(),
			source,
		})?;
		let path = entry.path();
		if path.is_file() && path.extension().is_some_and(|ext| ext == "yml") {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}
