//! Pointer parameters of file-local functions must be asserted before use.
//!
//! A parameter counts as checked when its name is the sole argument of an
//! assertion call, when a comment in the function mentions it together with
//! `null`, or when it is cast into a local that is itself checked. Error-output
//! parameters (`GError **err`) follow their own convention instead.

use std::collections::{HashMap, HashSet, VecDeque};

use glint_primitives::{Finding, Severity};
use glint_syntax::query::{declared_name, first_descendant, has_storage_marker, named_children, node_text, span, walk_named};
use glint_syntax::{Node, NodeKind, field};

use crate::Analyzer;

pub const NAME: &str = "unchecked-pointer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncheckedPointerOptions {
	/// Callees whose single argument counts as asserted.
	pub assert_functions: Vec<String>,
	/// Type names that are pointers without a `*` in the declarator.
	pub pointer_types: Vec<String>,
	/// Parameters whose text contains one of these are skipped.
	pub unused_markers: Vec<String>,
	/// Type of error-output parameters.
	pub error_type: String,
	pub severity: Severity,
}

impl Default for UncheckedPointerOptions {
	fn default() -> Self {
		Self {
			assert_functions: ["assert", "g_assert", "g_assert_nonnull"].map(String::from).to_vec(),
			pointer_types: ["gpointer", "gconstpointer"].map(String::from).to_vec(),
			unused_markers: vec!["G_GNUC_UNUSED".to_string()],
			error_type: "GError".to_string(),
			severity: Severity::Warning,
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct UncheckedPointer {
	options: UncheckedPointerOptions,
}

impl UncheckedPointer {
	pub fn new(options: UncheckedPointerOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &UncheckedPointerOptions {
		&self.options
	}

	fn check_function(&self, source: &str, func: Node<'_>, out: &mut Vec<Finding>) {
		let Some(body) = func.child_by_field_name(field::BODY) else {
			return;
		};
		let Some(params) = parameter_list(func) else {
			return;
		};

		let facts = FunctionFacts::collect(source, body, &self.options.assert_functions);

		for param in named_children(params) {
			if !NodeKind::ParameterDeclaration.matches(&param) {
				continue;
			}
			let text = parameter_extent(source, param);
			if self.options.unused_markers.iter().any(|marker| text.contains(marker.as_str())) {
				continue;
			}

			if let Some(name) = self.error_param(source, param) {
				if !checks_error_param(node_text(body, source), name) {
					out.push(Finding::new(
						span(param, source),
						self.options.severity,
						format!("Parameter {name} should be checked with {name} == NULL || *{name} == NULL"),
					));
				}
				continue;
			}

			let Some(name) = self.pointer_param(source, param) else {
				continue;
			};
			if facts.asserts.contains(name) || mentioned_with_null(source, func, name) || facts.renamed_into_assert(name) {
				continue;
			}

			tracing::trace!(param = name, "unchecked pointer parameter");
			out.push(Finding::new(
				span(param, source),
				self.options.severity,
				format!("Parameter {name} should be asserted"),
			));
		}
	}

	/// Name of a pointer parameter, either `T *name` or `gpointer name`.
	fn pointer_param<'src>(&self, source: &'src str, param: Node<'_>) -> Option<&'src str> {
		let declarator = param.child_by_field_name(field::DECLARATOR)?;
		let aliased = param
			.child_by_field_name(field::TYPE)
			.is_some_and(|ty| self.options.pointer_types.iter().any(|alias| alias == node_text(ty, source)));

		if !aliased && !NodeKind::PointerDeclarator.matches(&declarator) {
			return None;
		}
		declared_name(declarator).map(|id| node_text(id, source))
	}

	/// Name of an error-output parameter: the error type behind two pointer levels.
	fn error_param<'src>(&self, source: &'src str, param: Node<'_>) -> Option<&'src str> {
		let ty = param.child_by_field_name(field::TYPE)?;
		if node_text(ty, source) != self.options.error_type {
			return None;
		}
		let outer = param.child_by_field_name(field::DECLARATOR)?;
		let inner = outer.child_by_field_name(field::DECLARATOR)?;
		if !NodeKind::PointerDeclarator.matches(&outer) || !NodeKind::PointerDeclarator.matches(&inner) {
			return None;
		}
		let id = inner.child_by_field_name(field::DECLARATOR)?;
		NodeKind::Identifier.matches(&id).then(|| node_text(id, source))
	}
}

impl Analyzer for UncheckedPointer {
	fn name(&self) -> &'static str {
		NAME
	}

	fn check(&self, source: &str, root: Node<'_>) -> Vec<Finding> {
		let mut findings = Vec::new();
		walk_named(root, &mut |node| {
			if NodeKind::FunctionDefinition.matches(&node) && is_file_local(source, node) {
				self.check_function(source, node, &mut findings);
			}
		});
		findings
	}
}

/// Assertions and cast renames found in one function body.
#[derive(Debug, Default)]
struct FunctionFacts<'src> {
	asserts: HashSet<&'src str>,
	/// Source name to every local it was cast into.
	renames: HashMap<&'src str, Vec<&'src str>>,
}

impl<'src> FunctionFacts<'src> {
	fn collect(source: &'src str, body: Node<'_>, assert_functions: &[String]) -> Self {
		let mut facts = Self::default();
		walk_named(body, &mut |node| {
			if NodeKind::CallExpression.matches(&node) {
				if let Some(arg) = assertion_argument(source, node, assert_functions) {
					facts.asserts.insert(arg);
				}
			} else if NodeKind::Declaration.matches(&node) {
				facts.collect_renames(source, node);
			}
		});
		facts
	}

	fn collect_renames(&mut self, source: &'src str, decl: Node<'_>) {
		let type_name = decl.child_by_field_name(field::TYPE).map(|ty| node_text(ty, source));
		let mut cursor = decl.walk();
		for init in decl.children_by_field_name(field::DECLARATOR, &mut cursor) {
			if !NodeKind::InitDeclarator.matches(&init) {
				continue;
			}
			let Some(target) = init.child_by_field_name(field::DECLARATOR).and_then(declared_name) else {
				continue;
			};
			let Some(value) = init.child_by_field_name(field::VALUE) else {
				continue;
			};
			if let Some(from) = cast_source(source, value, type_name) {
				self.renames.entry(from).or_default().push(node_text(target, source));
			}
		}
	}

	/// Follows renames breadth-first from `name` until an asserted local is reached.
	fn renamed_into_assert(&self, name: &str) -> bool {
		let mut seen: HashSet<&str> = HashSet::from([name]);
		let mut queue: VecDeque<&str> = VecDeque::from([name]);
		while let Some(current) = queue.pop_front() {
			for &target in self.renames.get(current).into_iter().flatten() {
				if self.asserts.contains(target) {
					return true;
				}
				if seen.insert(target) {
					queue.push_back(target);
				}
			}
		}
		false
	}
}

/// Argument text of `call` when it is a single-argument assertion.
fn assertion_argument<'src>(source: &'src str, call: Node<'_>, assert_functions: &[String]) -> Option<&'src str> {
	let callee = node_text(call.child_by_field_name(field::FUNCTION)?, source);
	if !assert_functions.iter().any(|f| f == callee) {
		return None;
	}
	let args = named_children(call.child_by_field_name(field::ARGUMENTS)?);
	match args.as_slice() {
		[arg] => Some(node_text(*arg, source)),
		_ => None,
	}
}

/// Identifier a local is initialized from, for `(T *) name` and `T_CAST (name)`.
///
/// The call form only counts when the callee matches the declared type once both
/// are uppercased and stripped of underscores, e.g. `GObject` and `G_OBJECT`.
fn cast_source<'src>(source: &'src str, value: Node<'_>, type_name: Option<&str>) -> Option<&'src str> {
	if NodeKind::CastExpression.matches(&value) {
		let inner = value.child_by_field_name(field::VALUE)?;
		return NodeKind::Identifier.matches(&inner).then(|| node_text(inner, source));
	}

	if !NodeKind::CallExpression.matches(&value) {
		return None;
	}
	let callee = value.child_by_field_name(field::FUNCTION)?;
	if !NodeKind::Identifier.matches(&callee) || normalize_cast_name(node_text(callee, source)) != normalize_cast_name(type_name?) {
		return None;
	}
	match named_children(value.child_by_field_name(field::ARGUMENTS)?).as_slice() {
		[arg] if NodeKind::Identifier.matches(arg) => Some(node_text(*arg, source)),
		_ => None,
	}
}

fn normalize_cast_name(name: &str) -> String {
	name.chars().filter(|c| *c != '_').map(|c| c.to_ascii_uppercase()).collect()
}

/// A comment anywhere in the function naming `name` alongside `null`.
fn mentioned_with_null(source: &str, func: Node<'_>, name: &str) -> bool {
	let name = name.to_lowercase();
	let mut found = false;
	walk_named(func, &mut |node| {
		if found || !NodeKind::Comment.matches(&node) {
			return;
		}
		let comment = node_text(node, source).to_lowercase();
		found = comment.contains(&name) && comment.contains("null");
	});
	found
}

/// Text of a parameter including any unparsed tokens up to the surrounding
/// separators. Attribute macros such as `G_GNUC_UNUSED` often end up in error
/// nodes next to the declaration rather than inside it.
fn parameter_extent<'src>(source: &'src str, param: Node<'_>) -> &'src str {
	let mut first = param;
	while let Some(prev) = first.prev_sibling() {
		if matches!(prev.kind(), "," | "(") {
			break;
		}
		first = prev;
	}
	let mut last = param;
	while let Some(next) = last.next_sibling() {
		if matches!(next.kind(), "," | ")") {
			break;
		}
		last = next;
	}
	source.get(first.start_byte()..last.end_byte()).unwrap_or_default()
}

fn checks_error_param(body: &str, name: &str) -> bool {
	let compact: String = body.chars().filter(|c| !c.is_whitespace()).collect();
	compact.contains(&format!("{name}==NULL||*{name}==NULL"))
}

/// Storage class `static`, in any case; `STATIC` is a common testability macro.
fn is_file_local(source: &str, func: Node<'_>) -> bool {
	has_storage_marker(func, source, &["static"])
}

fn parameter_list(func: Node<'_>) -> Option<Node<'_>> {
	let declarator = func.child_by_field_name(field::DECLARATOR)?;
	let function = if NodeKind::FunctionDeclarator.matches(&declarator) {
		declarator
	} else {
		first_descendant(declarator, NodeKind::FunctionDeclarator)?
	};
	function.child_by_field_name(field::PARAMETERS)
}
