//! `server { }` block.

use kdl::KdlNode;

use crate::error::{ConfigError, ConfigWarning, Result};
use crate::kdl_util::{positive_arg, string_arg};

/// How the client sends document changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncKind {
	/// Every change carries the whole text.
	#[default]
	Full,
	/// Changes carry ranged edits.
	Incremental,
}

impl SyncKind {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Full => "full",
			Self::Incremental => "incremental",
		}
	}
}

/// Process-level server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
	/// Name reported in the initialize response.
	pub name: String,
	/// Version reported in the initialize response.
	pub version: String,
	/// Worker thread count.
	pub workers: usize,
	/// Bounded queue capacity in front of the workers.
	pub queue: usize,
	pub sync: SyncKind,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			name: "glint".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			workers: 10,
			queue: 256,
			sync: SyncKind::Full,
		}
	}
}

pub(crate) fn parse_server_node(node: &KdlNode, warnings: &mut Vec<ConfigWarning>) -> Result<ServerConfig> {
	let mut config = ServerConfig::default();
	let Some(children) = node.children() else {
		return Ok(config);
	};

	for child in children.nodes() {
		match child.name().value() {
			"name" => config.name = string_arg(child)?,
			"version" => config.version = string_arg(child)?,
			"workers" => config.workers = positive_arg(child)?,
			"queue" => config.queue = positive_arg(child)?,
			"sync" => {
				config.sync = match string_arg(child)?.as_str() {
					"full" => SyncKind::Full,
					"incremental" => SyncKind::Incremental,
					_ => {
						return Err(ConfigError::InvalidValue {
							key: "sync".to_string(),
							expected: "\"full\" or \"incremental\"",
						});
					}
				}
			}
			other => warnings.push(ConfigWarning::UnknownKey {
				section: "server".to_string(),
				key: other.to_string(),
			}),
		}
	}

	Ok(config)
}
