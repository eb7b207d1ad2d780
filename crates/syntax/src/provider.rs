use std::cell::RefCell;
use std::sync::Arc;

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

/// Errors raised while producing a syntax tree.
#[derive(Debug, Error)]
pub enum SyntaxError {
	/// The grammar could not be loaded into the parser.
	#[error("failed to load C grammar: {0}")]
	Language(#[from] tree_sitter::LanguageError),
	/// The parser gave up without producing a tree.
	#[error("parser produced no tree")]
	NoTree,
}

/// Source of concrete syntax trees.
///
/// Implementations are shared by every worker thread, so they must be callable
/// concurrently.
pub trait SyntaxProvider: Send + Sync {
	/// Parses `source` into a tree owning a copy of the text.
	fn parse(&self, source: Arc<str>) -> Result<SyntaxTree, SyntaxError>;
}

/// A parsed document: the text and the tree built from it.
///
/// Nodes borrow from this value, so they cannot outlive it.
pub struct SyntaxTree {
	source: Arc<str>,
	tree: Tree,
}

impl SyntaxTree {
	pub fn text(&self) -> &str {
		&self.source
	}

	pub fn root(&self) -> Node<'_> {
		self.tree.root_node()
	}

	/// Returns true when the parser had to recover from syntax errors.
	pub fn has_errors(&self) -> bool {
		self.tree.root_node().has_error()
	}
}

impl std::fmt::Debug for SyntaxTree {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SyntaxTree")
			.field("len", &self.source.len())
			.field("has_errors", &self.has_errors())
			.finish()
	}
}

thread_local! {
	static PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// tree-sitter backed provider for C.
///
/// Each thread lazily builds its own [`Parser`], since parsers are not `Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CParser;

impl CParser {
	#[must_use]
	pub const fn new() -> Self {
		Self
	}
}

impl SyntaxProvider for CParser {
	fn parse(&self, source: Arc<str>) -> Result<SyntaxTree, SyntaxError> {
		PARSER.with(|cell| {
			let mut slot = cell.borrow_mut();
			if slot.is_none() {
				let mut parser = Parser::new();
				parser.set_language(&tree_sitter_c::LANGUAGE.into())?;
				*slot = Some(parser);
			}
			let Some(parser) = slot.as_mut() else {
				return Err(SyntaxError::NoTree);
			};

			let tree = parser.parse(source.as_bytes(), None).ok_or(SyntaxError::NoTree)?;
			tracing::trace!(bytes = source.len(), "syntax.parse");
			Ok(SyntaxTree { source, tree })
		})
	}
}
