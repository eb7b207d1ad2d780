//! Syntax provider for glint.
//!
//! Wraps tree-sitter and its C grammar behind [`SyntaxProvider`]. A parse yields a
//! [`SyntaxTree`] that owns both the source text and the tree; every
//! [`Node`] handed to analyzers borrows from it and cannot outlive it.
//!
//! The [`query`] module holds the traversal helpers shared by all lint rules.

mod kind;
mod pretty_print;
mod provider;
pub mod query;

pub use kind::{NodeKind, field};
pub use pretty_print::pretty_print_tree;
pub use provider::{CParser, SyntaxError, SyntaxProvider, SyntaxTree};
pub use tree_sitter::Node;
