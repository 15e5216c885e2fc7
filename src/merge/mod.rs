//! Deep merge for YAML configuration trees.
//!
//! This module handles:
//! - Recursive replace-or-merge of two YAML values
//! - Folding an ordered list of parsed files into one tree

use serde_yaml::{Mapping, Value};

/// Deep merge two YAML values, with `overlay` taking precedence over `base`.
///
/// - Mappings are merged recursively: keys in overlay override keys in base
/// - Everything else (scalars, sequences, null) replaces the base outright,
///   including replacing a mapping with a scalar or vice versa
///
/// Null in an overlay is a legitimate config value and replaces the base
/// entry like any other scalar.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
	match (base, overlay) {
		(Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
			Value::Mapping(merge_mappings(base_map, overlay_map))
		}
		(_, overlay) => overlay,
	}
}

/// Deep merge two mappings, key by key.
pub fn merge_mappings(mut base: Mapping, overlay: Mapping) -> Mapping {
	for (key, overlay_value) in overlay {
		let merged_value = if let Some(base_value) = base.remove(&key) {
			deep_merge(base_value, overlay_value)
		} else {
			overlay_value
		};
		base.insert(key, merged_value);
	}
	base
}

/// Fold an ordered sequence of parsed files into one tree.
///
/// Later mappings take precedence, so callers must pass files in discovery
/// order (base files before environment overrides).
pub fn deep_merge_all(mappings: impl IntoIterator<Item = Mapping>) -> Mapping {
	mappings.into_iter().fold(Mapping::new(), merge_mappings)
}
