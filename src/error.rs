use std::path::PathBuf;

/// Library-level structured errors for strata.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum StrataError {
	#[error("Config directory not readable: {path}")]
	ConfigDirNotReadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Config file not readable: {path}")]
	ConfigFileNotReadable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Config file does not contain a top-level mapping: {path}")]
	NotAMapping { path: PathBuf },

	#[error("Failed to load environment file: {path}")]
	EnvFileError {
		path: PathBuf,
		#[source]
		source: dotenvy::Error,
	},

	#[error("Key not found in config: {key}")]
	KeyNotFoundInConfig { key: String },

	#[error("Undefined config variable %{variable}% in value of key: {key}")]
	UndefinedConfigVariable { variable: String, key: String },
}

/// Result type alias using StrataError.
pub type Result<T> = std::result::Result<T, StrataError>;
