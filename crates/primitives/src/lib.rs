//! Core value types shared by the syntax layer, the rule engine and the protocol layer.

/// Lint findings and their severities.
pub mod finding;
/// Zero-based line/character positions and spans.
pub mod span;

pub use finding::{Finding, ParseSeverityError, Severity};
pub use span::{Point, Span};
