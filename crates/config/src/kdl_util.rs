//! Small accessors over KDL nodes shared by the section parsers.

use kdl::KdlNode;

use crate::error::{ConfigError, Result};

/// All positional string arguments of `node`, in order.
pub fn string_args(node: &KdlNode) -> Result<Vec<String>> {
	node.entries()
		.iter()
		.filter(|entry| entry.name().is_none())
		.map(|entry| {
			entry.value().as_string().map(String::from).ok_or_else(|| ConfigError::InvalidValue {
				key: node.name().value().to_string(),
				expected: "string arguments",
			})
		})
		.collect()
}

/// The single string argument of `node`.
pub fn string_arg(node: &KdlNode) -> Result<String> {
	node.get(0)
		.and_then(|v| v.as_string())
		.map(String::from)
		.ok_or_else(|| ConfigError::InvalidValue {
			key: node.name().value().to_string(),
			expected: "a string",
		})
}

/// The single positive integer argument of `node`.
pub fn positive_arg(node: &KdlNode) -> Result<usize> {
	node.get(0)
		.and_then(|v| v.as_integer())
		.and_then(|i| usize::try_from(i).ok())
		.filter(|n| *n > 0)
		.ok_or_else(|| ConfigError::InvalidValue {
			key: node.name().value().to_string(),
			expected: "a positive integer",
		})
}

/// The `enabled=` property of `node`, defaulting to true.
pub fn enabled_prop(node: &KdlNode) -> Result<bool> {
	match node.get("enabled") {
		None => Ok(true),
		Some(value) => value.as_bool().ok_or_else(|| ConfigError::InvalidValue {
			key: format!("{}.enabled", node.name().value()),
			expected: "#true or #false",
		}),
	}
}
