use std::fmt::Write;

use crate::SyntaxTree;
use crate::query::{node_text, span};

/// Renders the named nodes of `tree`, one per line, indented by depth.
///
/// Each line shows the field name (when the node fills one), the node kind and
/// its span. Leaf nodes also show their text, which is what rule authors
/// usually match against.
pub fn pretty_print_tree(tree: &SyntaxTree) -> String {
	let mut out = String::new();
	let source = tree.text();
	let mut cursor = tree.root().walk();
	let mut depth = 0usize;

	loop {
		let node = cursor.node();
		if node.is_named() {
			let _ = write!(out, "{:indent$}", "", indent = depth * 2);
			if let Some(field) = cursor.field_name() {
				let _ = write!(out, "{field}: ");
			}
			let _ = write!(out, "{} {}", node.kind(), span(node, source));
			if node.named_child_count() == 0 {
				let _ = write!(out, " {:?}", node_text(node, source));
			}
			out.push('\n');
		}

		if cursor.goto_first_child() {
			depth += 1;
			continue;
		}
		loop {
			if cursor.goto_next_sibling() {
				break;
			}
			if !cursor.goto_parent() {
				return out;
			}
			depth -= 1;
		}
	}
}
