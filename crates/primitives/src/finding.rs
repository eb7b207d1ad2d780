use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Span;

/// Severity of a finding, ordered from least to most severe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
	/// Style nit.
	Hint,
	/// Informational message.
	#[default]
	Information,
	/// Potential defect.
	Warning,
	/// Definite problem.
	Error,
}

impl Severity {
	/// Wire number used in diagnostics: 1 = error, 2 = warning, 3 = information.
	///
	/// Hints share the information level; clients must not reinterpret these.
	pub const fn code(self) -> u8 {
		match self {
			Self::Error => 1,
			Self::Warning => 2,
			Self::Information | Self::Hint => 3,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Hint => "hint",
			Self::Information => "info",
			Self::Warning => "warning",
			Self::Error => "error",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a severity name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity '{0}' (expected hint, info, warning or error)")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
	type Err = ParseSeverityError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"hint" => Ok(Self::Hint),
			"info" | "information" | "note" => Ok(Self::Information),
			"warning" | "warn" => Ok(Self::Warning),
			"error" | "err" => Ok(Self::Error),
			_ => Err(ParseSeverityError(s.to_string())),
		}
	}
}

/// One diagnostic produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
	pub span: Span,
	pub severity: Severity,
	pub message: String,
}

impl Finding {
	pub fn new(span: Span, severity: Severity, message: impl Into<String>) -> Self {
		Self {
			span,
			severity,
			message: message.into(),
		}
	}

	/// Finding at [`Severity::Warning`].
	pub fn warning(span: Span, message: impl Into<String>) -> Self {
		Self::new(span, Severity::Warning, message)
	}

	/// Finding at [`Severity::Information`].
	pub fn info(span: Span, message: impl Into<String>) -> Self {
		Self::new(span, Severity::Information, message)
	}
}

impl fmt::Display for Finding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}: {}", self.span, self.severity, self.message)
	}
}
