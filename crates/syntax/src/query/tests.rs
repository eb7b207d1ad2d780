use std::sync::Arc;

use glint_primitives::{Point, Span};
use pretty_assertions::assert_eq;

use super::*;
use crate::{CParser, SyntaxProvider, SyntaxTree};

fn parse(src: &str) -> SyntaxTree {
	CParser::new().parse(Arc::from(src)).unwrap()
}

#[test]
fn first_descendant_prefers_direct_children() {
	let tree = parse("void f(void) { int a; { int b; } }\n");
	let root = tree.root();
	let body = first_descendant(root, NodeKind::CompoundStatement).unwrap();
	let decl = first_descendant(body, NodeKind::Declaration).unwrap();
	let name = first_descendant(decl, NodeKind::Identifier).unwrap();
	assert_eq!(node_text(name, tree.text()), "a");
}

#[test]
fn first_descendant_skips_shallow_non_matches_before_descending() {
	let tree = parse("static int *f(int x) { return 0; }\n");
	let func = first_descendant(tree.root(), NodeKind::FunctionDefinition).unwrap();
	let declarator = first_descendant(func, NodeKind::FunctionDeclarator).unwrap();
	let name = first_descendant(declarator, NodeKind::Identifier).unwrap();
	assert_eq!(node_text(name, tree.text()), "f");
}

#[test]
fn first_descendant_missing_kind_is_none() {
	let tree = parse("int x;\n");
	assert!(first_descendant(tree.root(), NodeKind::CallExpression).is_none());
}

#[test]
fn storage_marker_matches_specifier_and_macro() {
	let tree = parse("static void f(void) {}\nSTATIC void g(void) {}\nvoid h(void) {}\n");
	let funcs: Vec<_> = named_children(tree.root());
	let text = tree.text();
	assert!(has_storage_marker(funcs[0], text, &["static"]));
	assert!(has_storage_marker(funcs[1], text, &["static"]));
	assert!(!has_storage_marker(funcs[2], text, &["static"]));
}

#[test]
fn storage_marker_ignores_declarator_text() {
	let tree = parse("int STATIC(void);\n");
	let decl = named_children(tree.root())[0];
	assert!(!has_storage_marker(decl, tree.text(), &["static"]));
}

#[test]
fn walk_named_visits_parents_first() {
	let tree = parse("int x;\n");
	let mut kinds = Vec::new();
	walk_named(tree.root(), &mut |node| kinds.push(node.kind()));
	assert_eq!(kinds, ["translation_unit", "declaration", "primitive_type", "identifier"]);
}

#[test]
fn span_counts_utf16_columns() {
	// "é" is two bytes in UTF-8 and one UTF-16 code unit.
	let src = "/* é */ int x;\n";
	let tree = parse(src);
	let decl = first_descendant(tree.root(), NodeKind::Declaration).unwrap();
	assert_eq!(span(decl, src), Span::new(Point::new(0, 8), Point::new(0, 14)));
}

#[test]
fn declared_name_follows_pointer_chain() {
	let tree = parse("void f(char **argv[]) {}\n");
	let param = first_descendant(tree.root(), NodeKind::ParameterDeclaration).unwrap();
	let declarator = param.child_by_field_name(field::DECLARATOR).unwrap();
	let name = declared_name(declarator).unwrap();
	assert_eq!(node_text(name, tree.text()), "argv");
}
