//! Error types for configuration parsing.

use std::path::PathBuf;

use glint_primitives::ParseSeverityError;
use thiserror::Error;

/// Errors that can occur when parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing KDL syntax.
	#[error("KDL parse error: {0}")]
	Kdl(#[from] kdl::KdlError),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A setting holds a value of the wrong type or range.
	#[error("invalid value for '{key}': expected {expected}")]
	InvalidValue {
		/// The setting's KDL key.
		key: String,
		/// Description of the accepted values.
		expected: &'static str,
	},

	/// A severity name could not be parsed.
	#[error(transparent)]
	InvalidSeverity(#[from] ParseSeverityError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Non-fatal warning during configuration parsing.
///
/// Collected in [`crate::Config::warnings`] and logged at startup; the rest of
/// the file still applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// A rule block names no known analyzer.
	UnknownRule {
		/// The name as written.
		name: String,
	},
	/// A key inside a known block is not recognized.
	UnknownKey {
		/// Enclosing block, e.g. `server` or a rule name.
		section: String,
		/// The key as written.
		key: String,
	},
}

impl std::fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigWarning::UnknownRule { name } => {
				write!(f, "unknown rule '{name}' will be ignored")
			}
			ConfigWarning::UnknownKey { section, key } => {
				write!(f, "unknown key '{key}' in {section} will be ignored")
			}
		}
	}
}
