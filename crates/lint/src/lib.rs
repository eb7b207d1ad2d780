//! Rule engine for glint.
//!
//! An [`Analyzer`] inspects one parsed document and returns findings. Analyzers
//! are collected into an immutable [`AnalyzerSet`] at startup and shared by every
//! worker thread; running the set concatenates findings in registration order.

mod analyzer;
pub mod rules;

pub use analyzer::{Analyzer, AnalyzerSet, AnalyzerSetBuilder};
pub use rules::documentation::{Documentation, DocumentationOptions};
pub use rules::placement::{DeclarationPlacement, PlacementOptions};
pub use rules::unchecked_pointer::{UncheckedPointer, UncheckedPointerOptions};

/// Rule names in default registration order.
pub const RULE_NAMES: [&str; 3] = [
	rules::unchecked_pointer::NAME,
	rules::documentation::NAME,
	rules::placement::NAME,
];

/// Builds the set with every analyzer at its default options.
pub fn default_analyzers() -> AnalyzerSet {
	AnalyzerSet::builder()
		.with(UncheckedPointer::new(UncheckedPointerOptions::default()))
		.with(Documentation::new(DocumentationOptions::default()))
		.with(DeclarationPlacement::new(PlacementOptions::default()))
		.build()
}
