//! Configuration for glint.
//!
//! Configuration is written in KDL (v2). Glint looks for it in this order:
//!
//! 1. The path given with `--config`
//! 2. `$XDG_CONFIG_HOME/glint/config.kdl` (or `~/.config/glint/config.kdl`)
//! 3. Built-in defaults
//!
//! ```kdl
//! server {
//!     workers 10
//!     queue 256
//!     sync "full"
//! }
//!
//! rules {
//!     unchecked-pointer {
//!         assert "assert" "g_assert" "g_assert_nonnull"
//!         pointer-types "gpointer" "gconstpointer"
//!         unused-markers "G_GNUC_UNUSED"
//!         error-type "GError"
//!     }
//!     documentation {
//!         internal "static" "STATIC"
//!         severity "hint"
//!     }
//!     declaration-placement enabled=#false
//! }
//! ```
//!
//! Unknown rules and keys are collected in [`Config::warnings`] rather than
//! failing the load.

pub mod error;
pub mod kdl_util;
pub mod rules;
pub mod server;

use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigWarning, Result};
pub use rules::{RuleConfig, RulesConfig};
pub use server::{ServerConfig, SyncKind};

/// Parsed configuration from a KDL file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
	pub server: ServerConfig,
	pub rules: RulesConfig,
	/// Non-fatal warnings encountered during parsing.
	pub warnings: Vec<ConfigWarning>,
}

impl Config {
	/// Parse a KDL string into a [`Config`].
	///
	/// A document without a `rules` block enables every analyzer with defaults.
	pub fn parse(input: &str) -> Result<Self> {
		let doc: kdl::KdlDocument = input.parse()?;
		let mut warnings = Vec::new();

		let server = doc
			.get("server")
			.map(|node| server::parse_server_node(node, &mut warnings))
			.transpose()?
			.unwrap_or_default();
		let rules = doc
			.get("rules")
			.map(|node| rules::parse_rules_node(node, &mut warnings))
			.transpose()?
			.unwrap_or_default();

		Ok(Config {
			server,
			rules,
			warnings,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	/// Loads `explicit` when given, else the default path when it exists, else defaults.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match default_path() {
			Some(path) if path.is_file() => {
				tracing::debug!(path = %path.display(), "loading config");
				Self::load(path)
			}
			_ => Ok(Self::default()),
		}
	}
}

/// `$XDG_CONFIG_HOME/glint/config.kdl`, when a config directory is known.
pub fn default_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("glint").join("config.kdl"))
}

#[cfg(test)]
mod tests;
