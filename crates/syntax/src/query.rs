//! Tree traversal helpers shared by the lint rules.
//!
//! Every helper treats missing structure as absence: lookups return `None` or an
//! empty result instead of failing.

use glint_primitives::{Point, Span};
use tree_sitter::Node;

use crate::{NodeKind, field};

/// Collects the named children of `node` in document order.
pub fn named_children<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
	let mut cursor = node.walk();
	node.named_children(&mut cursor).collect()
}

/// Finds the first node of `kind` below `node`.
///
/// Direct named children are checked first; only then does the search descend
/// into each child in order. This prefers shallow matches over the leftmost deep one.
pub fn first_descendant<'tree>(node: Node<'tree>, kind: NodeKind) -> Option<Node<'tree>> {
	let children = named_children(node);
	if let Some(hit) = children.iter().find(|child| kind.matches(child)) {
		return Some(*hit);
	}
	children.into_iter().find_map(|child| first_descendant(child, kind))
}

/// Follows the declarator chain of `node` down to the declared identifier.
///
/// `declarator` fields are preferred; nodes without one continue through their
/// first named child, as parenthesized declarators do.
pub fn declared_name<'tree>(node: Node<'tree>) -> Option<Node<'tree>> {
	let mut current = node;
	loop {
		if NodeKind::Identifier.matches(&current) {
			return Some(current);
		}
		current = match current.child_by_field_name(field::DECLARATOR) {
			Some(next) => next,
			None => named_children(current).into_iter().next()?,
		};
	}
}

/// Calls `visit` on `node` and every named descendant, parents before children.
pub fn walk_named<'tree>(node: Node<'tree>, visit: &mut impl FnMut(Node<'tree>)) {
	visit(node);
	let mut cursor = node.walk();
	for child in node.named_children(&mut cursor) {
		walk_named(child, visit);
	}
}

/// Source text covered by `node`, or `""` when the range does not fit `source`.
pub fn node_text<'src>(node: Node<'_>, source: &'src str) -> &'src str {
	source.get(node.byte_range()).unwrap_or_default()
}

/// Returns true when `node` carries one of `markers` before its declarator,
/// ignoring case.
///
/// Storage-class macros such as `STATIC` parse as the `type` of the declaration,
/// with the real type pushed into an error node, so leading type identifiers and
/// error nodes are inspected alongside real storage class specifiers.
pub fn has_storage_marker(node: Node<'_>, source: &str, markers: &[impl AsRef<str>]) -> bool {
	let declarator = node.child_by_field_name(field::DECLARATOR);
	named_children(node)
		.into_iter()
		.take_while(|child| Some(*child) != declarator)
		.filter(|child| {
			child.is_error()
				|| NodeKind::StorageClassSpecifier.matches(child)
				|| NodeKind::TypeIdentifier.matches(child)
		})
		.flat_map(|child| node_text(child, source).split_whitespace())
		.any(|word| markers.iter().any(|marker| word.eq_ignore_ascii_case(marker.as_ref())))
}

/// Span of `node` with columns in UTF-16 code units.
pub fn span(node: Node<'_>, source: &str) -> Span {
	Span::new(
		point(source, node.start_byte(), node.start_position()),
		point(source, node.end_byte(), node.end_position()),
	)
}

/// tree-sitter columns count bytes; LSP counts UTF-16 code units.
fn point(source: &str, byte: usize, pos: tree_sitter::Point) -> Point {
	let line_start = byte.saturating_sub(pos.column);
	let character = source
		.get(line_start..byte)
		.map_or(pos.column, |prefix| prefix.encode_utf16().count());
	Point::new(pos.row as u32, character as u32)
}

#[cfg(test)]
mod tests;
