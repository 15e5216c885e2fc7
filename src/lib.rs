//! Strata - layered YAML configuration loader.
//!
//! This library provides the core functionality for strata, including:
//! - Config directory discovery with environment-specific overrides
//! - Deep (recursive) merging of YAML files in load order
//! - Dotted-path lookup tolerating literal dotted keys and nested maps
//! - `%VARIABLE%` interpolation against environment variables and other
//!   config keys, with cycle detection
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use strata::Config;
//!
//! let config = Config::load(Path::new(".env"), Path::new("config")).unwrap();
//!
//! // Base files merged with APP_ENV overrides, placeholders resolved
//! let host = config.get("db.host").unwrap();
//! println!("connecting to {:?}", host);
//! ```

pub mod env;
pub mod error;
pub mod interp;
pub mod merge;
pub mod resolve;
pub mod source;
pub mod store;

pub use error::{Result, StrataError};
pub use store::Config;
