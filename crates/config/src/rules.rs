//! `rules { }` block: per-analyzer toggles and options.

use glint_lint::rules::{documentation, placement, unchecked_pointer};
use glint_lint::{
	AnalyzerSet, DeclarationPlacement, Documentation, DocumentationOptions, PlacementOptions, UncheckedPointer,
	UncheckedPointerOptions,
};
use glint_primitives::Severity;
use kdl::KdlNode;

use crate::error::{ConfigWarning, Result};
use crate::kdl_util::{enabled_prop, string_arg, string_args};

/// A rule's options plus whether it runs at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig<T> {
	pub enabled: bool,
	pub options: T,
}

impl<T: Default> Default for RuleConfig<T> {
	fn default() -> Self {
		Self {
			enabled: true,
			options: T::default(),
		}
	}
}

/// Options for every built-in analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesConfig {
	pub unchecked_pointer: RuleConfig<UncheckedPointerOptions>,
	pub documentation: RuleConfig<DocumentationOptions>,
	pub placement: RuleConfig<PlacementOptions>,
}

impl RulesConfig {
	/// Builds the analyzer set, skipping disabled rules.
	pub fn analyzers(&self) -> AnalyzerSet {
		let mut builder = AnalyzerSet::builder();
		if self.unchecked_pointer.enabled {
			builder = builder.with(UncheckedPointer::new(self.unchecked_pointer.options.clone()));
		}
		if self.documentation.enabled {
			builder = builder.with(Documentation::new(self.documentation.options.clone()));
		}
		if self.placement.enabled {
			builder = builder.with(DeclarationPlacement::new(self.placement.options.clone()));
		}
		builder.build()
	}
}

pub(crate) fn parse_rules_node(node: &KdlNode, warnings: &mut Vec<ConfigWarning>) -> Result<RulesConfig> {
	let mut rules = RulesConfig::default();
	let Some(children) = node.children() else {
		return Ok(rules);
	};

	for rule in children.nodes() {
		match rule.name().value() {
			unchecked_pointer::NAME => parse_unchecked_pointer(rule, &mut rules.unchecked_pointer, warnings)?,
			documentation::NAME => parse_documentation(rule, &mut rules.documentation, warnings)?,
			placement::NAME => parse_placement(rule, &mut rules.placement, warnings)?,
			other => {
				tracing::warn!(rule = other, "unknown rule in config");
				warnings.push(ConfigWarning::UnknownRule { name: other.to_string() });
			}
		}
	}

	Ok(rules)
}

fn parse_unchecked_pointer(
	node: &KdlNode,
	rule: &mut RuleConfig<UncheckedPointerOptions>,
	warnings: &mut Vec<ConfigWarning>,
) -> Result<()> {
	rule.enabled = enabled_prop(node)?;
	let opts = &mut rule.options;
	for child in node.children().map(|c| c.nodes()).unwrap_or_default() {
		match child.name().value() {
			"assert" => opts.assert_functions = string_args(child)?,
			"pointer-types" => opts.pointer_types = string_args(child)?,
			"unused-markers" => opts.unused_markers = string_args(child)?,
			"error-type" => opts.error_type = string_arg(child)?,
			"severity" => opts.severity = parse_severity(child)?,
			other => warnings.push(unknown_key(unchecked_pointer::NAME, other)),
		}
	}
	Ok(())
}

fn parse_documentation(
	node: &KdlNode,
	rule: &mut RuleConfig<DocumentationOptions>,
	warnings: &mut Vec<ConfigWarning>,
) -> Result<()> {
	rule.enabled = enabled_prop(node)?;
	let opts = &mut rule.options;
	for child in node.children().map(|c| c.nodes()).unwrap_or_default() {
		match child.name().value() {
			"internal" => opts.internal_markers = string_args(child)?,
			"severity" => opts.severity = parse_severity(child)?,
			other => warnings.push(unknown_key(documentation::NAME, other)),
		}
	}
	Ok(())
}

fn parse_placement(node: &KdlNode, rule: &mut RuleConfig<PlacementOptions>, warnings: &mut Vec<ConfigWarning>) -> Result<()> {
	rule.enabled = enabled_prop(node)?;
	for child in node.children().map(|c| c.nodes()).unwrap_or_default() {
		match child.name().value() {
			"severity" => rule.options.severity = parse_severity(child)?,
			other => warnings.push(unknown_key(placement::NAME, other)),
		}
	}
	Ok(())
}

fn parse_severity(node: &KdlNode) -> Result<Severity> {
	Ok(string_arg(node)?.parse()?)
}

fn unknown_key(section: &str, key: &str) -> ConfigWarning {
	ConfigWarning::UnknownKey {
		section: section.to_string(),
		key: key.to_string(),
	}
}
