//! Declarations belong at the start of a block.

use glint_primitives::{Finding, Severity};
use glint_syntax::query::{declared_name, named_children, span, walk_named};
use glint_syntax::{Node, NodeKind};

use crate::Analyzer;

pub const NAME: &str = "declaration-placement";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementOptions {
	pub severity: Severity,
}

impl Default for PlacementOptions {
	fn default() -> Self {
		Self {
			severity: Severity::Information,
		}
	}
}

#[derive(Debug, Clone, Default)]
pub struct DeclarationPlacement {
	options: PlacementOptions,
}

impl DeclarationPlacement {
	pub fn new(options: PlacementOptions) -> Self {
		Self { options }
	}

	fn check_block(&self, source: &str, block: Node<'_>, out: &mut Vec<Finding>) {
		let mut seen_statement = false;
		for child in named_children(block) {
			if NodeKind::Declaration.matches(&child) {
				if !seen_statement {
					continue;
				}
				if let Some(id) = declared_name(child) {
					out.push(Finding::new(
						span(id, source),
						self.options.severity,
						"Declares should be done at the start of a body",
					));
				}
			} else if !NodeKind::Comment.matches(&child) {
				seen_statement = true;
			}
		}
	}
}

impl Analyzer for DeclarationPlacement {
	fn name(&self) -> &'static str {
		NAME
	}

	fn check(&self, source: &str, root: Node<'_>) -> Vec<Finding> {
		let mut findings = Vec::new();
		walk_named(root, &mut |node| {
			if NodeKind::CompoundStatement.matches(&node) {
				self.check_block(source, node, &mut findings);
			}
		});
		findings
	}
}
