//! Dotted-path lookup over a merged configuration tree.
//!
//! A lookup key is ambiguous between "literal key containing dots" and
//! "path through nested mappings". Config authors mix both styles, so
//! resolution tries the verbatim key first and then walks segment by
//! segment, checking at every depth whether the remaining segments exist
//! joined back together as one literal key.

use serde_yaml::{Mapping, Value};

/// Resolve a dotted key against a configuration tree.
///
/// Lookup order:
/// 1. The verbatim key as a top-level entry (handles literal dotted keys)
/// 2. Split on `.` (leading/trailing dots trimmed) and walk nested
///    mappings; after each descent, the remaining segments joined by `.`
///    are tried as a literal key of the current mapping, so the deepest
///    literal match wins
///
/// A single-segment key that misses at top level fails without entering
/// the walk.
pub fn resolve_path<'a>(tree: &'a Mapping, key: &str) -> Option<&'a Value> {
	if let Some(value) = tree.get(key) {
		return Some(value);
	}

	let trimmed = key.trim_matches('.');
	let segments: Vec<&str> = trimmed.split('.').collect();
	if segments.len() < 2 {
		return None;
	}

	let mut cursor = tree;
	for i in 0..segments.len() - 1 {
		// Descend one segment; anything but a mapping ends the walk
		let next = cursor.get(segments[i])?.as_mapping()?;

		let rest = segments[i + 1..].join(".");
		if let Some(value) = next.get(rest.as_str()) {
			return Some(value);
		}
		cursor = next;
	}

	None
}
