use std::sync::Arc;

use glint_lint::AnalyzerSet;
use glint_primitives::Finding;
use glint_syntax::{SyntaxProvider, SyntaxTree};
use tracing::warn;

use crate::document::DocumentStore;
use crate::request::Request;

/// One inbound message with its resolved text and tree, owned by a single worker.
#[derive(Debug)]
pub struct ParseHandle {
	pub request: Request,
	pub text: Option<Arc<str>>,
	pub tree: Option<SyntaxTree>,
}

impl ParseHandle {
	/// Resolves text through `store` and parses it when present.
	///
	/// A parse failure leaves the handle without a tree.
	pub fn build(request: Request, store: &DocumentStore, provider: &dyn SyntaxProvider) -> Self {
		let text: Option<Arc<str>> = request.document().and_then(|change| store.resolve(change)).map(Into::into);
		let tree = text.as_ref().and_then(|text| match provider.parse(Arc::clone(text)) {
			Ok(tree) => Some(tree),
			Err(err) => {
				warn!(uri = ?request.document().map(|c| c.uri.as_str()), error = %err, "parse failed");
				None
			}
		});
		Self { request, text, tree }
	}

	/// A handle with no text, for messages that carry no document.
	pub fn bare(request: Request) -> Self {
		Self {
			request,
			text: None,
			tree: None,
		}
	}

	pub fn uri(&self) -> Option<&str> {
		self.request.document().map(|change| change.uri.as_str())
	}

	/// Runs `analyzers` over the tree. Without a tree there is nothing to report.
	pub fn analyze(&self, analyzers: &AnalyzerSet) -> Vec<Finding> {
		self.tree.as_ref().map(|tree| analyzers.run(tree)).unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use glint_lint::default_analyzers;
	use glint_syntax::{CParser, SyntaxError};
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::request::DocumentChange;

	struct FailingParser;

	impl SyntaxProvider for FailingParser {
		fn parse(&self, _source: Arc<str>) -> Result<SyntaxTree, SyntaxError> {
			Err(SyntaxError::NoTree)
		}
	}

	const SOURCE: &str = "static void f(int *p) {}\n";

	#[test]
	fn build_parses_resolved_text() {
		let store = DocumentStore::new();
		let request = Request::DidOpen(DocumentChange::full("file:///a.c", SOURCE));
		let handle = ParseHandle::build(request, &store, &CParser::new());

		assert_eq!(handle.uri(), Some("file:///a.c"));
		assert_eq!(handle.text.as_deref(), Some(SOURCE));
		assert!(handle.tree.is_some());
		assert_eq!(
			handle.analyze(&default_analyzers())[0].message,
			"Parameter p should be asserted"
		);
	}

	#[test]
	fn unknown_document_has_no_tree() {
		let store = DocumentStore::new();
		let request = Request::Diagnostic {
			id: 1.into(),
			change: DocumentChange {
				uri: "file:///none.c".into(),
				..Default::default()
			},
		};
		let handle = ParseHandle::build(request, &store, &CParser::new());
		assert!(handle.text.is_none());
		assert!(handle.tree.is_none());
		assert!(handle.analyze(&default_analyzers()).is_empty());
	}

	#[test]
	fn parse_failure_is_not_fatal() {
		let store = DocumentStore::new();
		let request = Request::DidOpen(DocumentChange::full("file:///a.c", SOURCE));
		let handle = ParseHandle::build(request, &store, &FailingParser);
		assert!(handle.text.is_some());
		assert!(handle.tree.is_none());
		assert!(handle.analyze(&default_analyzers()).is_empty());
	}
}
