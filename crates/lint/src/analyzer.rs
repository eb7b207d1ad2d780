use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use glint_primitives::Finding;
use glint_syntax::{Node, SyntaxTree};

/// A structural lint rule.
///
/// Implementations are read-only over the tree. Missing structure means the rule
/// does not apply; it is never an error.
pub trait Analyzer: Send + Sync {
	/// Stable rule name used by configuration and the command line.
	fn name(&self) -> &'static str;

	/// Inspects the tree rooted at `root`, whose text is `source`.
	fn check(&self, source: &str, root: Node<'_>) -> Vec<Finding>;
}

/// Immutable, cheaply cloneable list of analyzers.
#[derive(Clone, Default)]
pub struct AnalyzerSet {
	analyzers: Arc<[Arc<dyn Analyzer>]>,
}

impl AnalyzerSet {
	pub fn builder() -> AnalyzerSetBuilder {
		AnalyzerSetBuilder::default()
	}

	pub fn len(&self) -> usize {
		self.analyzers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.analyzers.is_empty()
	}

	/// Rule names in registration order.
	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.analyzers.iter().map(|a| a.name())
	}

	pub fn get(&self, name: &str) -> Option<&Arc<dyn Analyzer>> {
		self.analyzers.iter().find(|a| a.name() == name)
	}

	/// Returns a set holding only the analyzer called `name`.
	pub fn select(&self, name: &str) -> Option<Self> {
		let analyzer = self.get(name)?;
		Some(Self {
			analyzers: Arc::from([Arc::clone(analyzer)]),
		})
	}

	/// Runs every analyzer over `tree`, concatenating findings in registration order.
	///
	/// A panicking analyzer is logged and contributes nothing.
	pub fn run(&self, tree: &SyntaxTree) -> Vec<Finding> {
		let mut findings = Vec::new();
		for analyzer in self.analyzers.iter() {
			let outcome = catch_unwind(AssertUnwindSafe(|| analyzer.check(tree.text(), tree.root())));
			match outcome {
				Ok(found) => {
					tracing::trace!(rule = analyzer.name(), findings = found.len(), "lint.analyzer");
					findings.extend(found);
				}
				Err(_) => {
					tracing::error!(rule = analyzer.name(), "analyzer panicked; findings dropped");
				}
			}
		}
		findings
	}
}

impl std::fmt::Debug for AnalyzerSet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

/// Collects analyzers before freezing them into an [`AnalyzerSet`].
#[derive(Default)]
pub struct AnalyzerSetBuilder {
	analyzers: Vec<Arc<dyn Analyzer>>,
}

impl AnalyzerSetBuilder {
	#[must_use]
	pub fn with(mut self, analyzer: impl Analyzer + 'static) -> Self {
		self.push(Arc::new(analyzer));
		self
	}

	pub fn push(&mut self, analyzer: Arc<dyn Analyzer>) {
		self.analyzers.push(analyzer);
	}

	pub fn build(self) -> AnalyzerSet {
		AnalyzerSet {
			analyzers: self.analyzers.into(),
		}
	}
}
