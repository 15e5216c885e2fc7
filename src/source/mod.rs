//! Configuration source discovery and parsing for strata.
//!
//! This module handles:
//! - Listing YAML files in a config directory and its override subdirectory
//! - Parsing individual files into YAML mappings

pub mod discover;
pub mod parser;

pub use discover::discover_files;
pub use parser::{parse_file, parse_str};
