//! Public function prototypes and struct fields must carry doc comments.

use std::collections::BTreeSet;

use glint_primitives::{Finding, Severity};
use glint_syntax::query::{first_descendant, has_storage_marker, named_children, node_text, span, walk_named};
use glint_syntax::{Node, NodeKind, field};

use crate::Analyzer;

pub const NAME: &str = "documentation";

const POST_COMMENT_PREFIX: &str = "/**< ";
const PRE_COMMENT_PREFIX: &str = "/** ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentationOptions {
	/// Storage classes marking a prototype as internal, exempt from documentation.
	pub internal_markers: Vec<String>,
	pub severity: Severity,
}

impl Default for DocumentationOptions {
	fn default() -> Self {
		Self {
			internal_markers: vec!["static".to_string(), "STATIC".to_string()],
			severity: Severity::Information,
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct Documentation {
	options: DocumentationOptions,
}

impl Documentation {
	pub fn new(options: DocumentationOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &DocumentationOptions {
		&self.options
	}

	fn finding(&self, node: Node<'_>, source: &str, message: impl Into<String>) -> Finding {
		Finding::new(span(node, source), self.options.severity, message)
	}

	/// Checks prototypes that are direct children of `scope`, descending into
	/// conditional compilation blocks such as include guards.
	fn check_prototypes(&self, source: &str, scope: Node<'_>, out: &mut Vec<Finding>) {
		for node in named_children(scope) {
			if NodeKind::is_preproc_block(&node) {
				self.check_prototypes(source, node, out);
			} else if NodeKind::Declaration.matches(&node) {
				self.check_prototype(source, node, out);
			}
		}
	}

	fn check_prototype(&self, source: &str, decl: Node<'_>, out: &mut Vec<Finding>) {
		if has_storage_marker(decl, source, &self.options.internal_markers) {
			return;
		}
		let Some(function) = first_descendant(decl, NodeKind::FunctionDeclarator) else {
			return;
		};

		let Some(comment) = decl.prev_named_sibling().filter(|prev| NodeKind::Comment.matches(prev)) else {
			out.push(self.finding(decl, source, "Function should be documented"));
			return;
		};
		let doc = node_text(comment, source);

		if !doc.contains("@brief") {
			out.push(self.finding(comment, source, "Comment should contain a @brief"));
		}
		self.check_return(source, decl, function, doc, out);
		self.check_params(source, function, doc, out);
	}

	fn check_return(&self, source: &str, decl: Node<'_>, function: Node<'_>, doc: &str, out: &mut Vec<Finding>) {
		let Some(ty) = decl.child_by_field_name(field::TYPE) else {
			out.push(self.finding(decl, source, "Function should have a return value"));
			return;
		};

		// `void *f(void)` returns a pointer; only a bare `void f(...)` returns nothing.
		let returns_void = node_text(ty, source) == "void"
			&& decl
				.child_by_field_name(field::DECLARATOR)
				.is_some_and(|declarator| declarator.id() == function.id());
		let documents_return = doc.contains("@return");

		if returns_void && documents_return {
			out.push(self.finding(decl, source, "Void functions should not document @return"));
		} else if !returns_void && !documents_return {
			out.push(self.finding(decl, source, "Functions return value should be documented with @return"));
		}
	}

	fn check_params(&self, source: &str, function: Node<'_>, doc: &str, out: &mut Vec<Finding>) {
		let Some(list) = function.child_by_field_name(field::PARAMETERS) else {
			return;
		};
		let mut documented = documented_params(doc);

		for param in named_children(list) {
			let Some(id) = first_descendant(param, NodeKind::Identifier) else {
				continue;
			};
			let name = node_text(id, source);
			if !documented.remove(name) {
				out.push(self.finding(id, source, format!("Parameter {name} is not documented")));
			}
		}

		if !documented.is_empty() {
			tracing::trace!(extra = ?documented, "documented parameters without a match");
			out.push(self.finding(list, source, "Extra params are documented"));
		}
	}

	fn check_struct(&self, source: &str, spec: Node<'_>, out: &mut Vec<Finding>) {
		let Some(fields) = spec.child_by_field_name(field::BODY) else {
			return;
		};
		for decl in named_children(fields) {
			if !NodeKind::FieldDeclaration.matches(&decl) || has_field_comment(source, decl) {
				continue;
			}
			if let Some(id) = first_descendant(decl, NodeKind::FieldIdentifier) {
				out.push(self.finding(id, source, "Struct field should be commented"));
			}
		}
	}
}

impl Analyzer for Documentation {
	fn name(&self) -> &'static str {
		NAME
	}

	fn check(&self, source: &str, root: Node<'_>) -> Vec<Finding> {
		let mut findings = Vec::new();
		walk_named(root, &mut |node| {
			if NodeKind::StructSpecifier.matches(&node) {
				self.check_struct(source, node, &mut findings);
			}
		});
		self.check_prototypes(source, root, &mut findings);
		findings.sort_by_key(|finding| finding.span.start);
		findings
	}
}

/// Names following `@param` tags, one per line.
fn documented_params(doc: &str) -> BTreeSet<&str> {
	doc.lines()
		.filter_map(|line| {
			let mut words = line.split_whitespace();
			words.by_ref().find(|word| *word == "@param")?;
			words.next()
		})
		.collect()
}

/// A trailing `/**< ... */` on the same line, or a leading `/** ... */`.
fn has_field_comment(source: &str, decl: Node<'_>) -> bool {
	let post = decl.next_named_sibling().is_some_and(|next| {
		NodeKind::Comment.matches(&next)
			&& next.start_position().row == decl.end_position().row
			&& node_text(next, source).starts_with(POST_COMMENT_PREFIX)
	});
	let pre = decl.prev_named_sibling().is_some_and(|prev| {
		NodeKind::Comment.matches(&prev) && node_text(prev, source).starts_with(PRE_COMMENT_PREFIX)
	});
	post || pre
}
