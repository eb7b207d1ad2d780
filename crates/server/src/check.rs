//! `glint check` and `glint tree`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use glint_lint::{AnalyzerSet, RULE_NAMES};
use glint_primitives::Finding;
use glint_syntax::{SyntaxProvider, pretty_print_tree};

/// Narrows `analyzers` to `rule` when given.
pub fn select_analyzers(analyzers: AnalyzerSet, rule: Option<&str>) -> anyhow::Result<AnalyzerSet> {
	let Some(rule) = rule else {
		return Ok(analyzers);
	};
	match analyzers.select(rule) {
		Some(selected) => Ok(selected),
		None if RULE_NAMES.contains(&rule) => bail!("rule '{rule}' is disabled in the configuration"),
		None => bail!("unknown rule '{rule}' (expected one of: {})", RULE_NAMES.join(", ")),
	}
}

fn read_source(path: &Path) -> anyhow::Result<Arc<str>> {
	let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	Ok(text.into())
}

/// Formats one finding as `path:line:col: severity: message`, one-based.
pub fn format_finding(path: &Path, finding: &Finding) -> String {
	format!(
		"{}:{}:{}: {}: {}",
		path.display(),
		finding.span.start.line + 1,
		finding.span.start.character + 1,
		finding.severity,
		finding.message
	)
}

/// Lints every file, printing findings to `out`. Returns the total count.
pub fn check_files(
	files: &[PathBuf],
	analyzers: &AnalyzerSet,
	provider: &dyn SyntaxProvider,
	out: &mut impl Write,
) -> anyhow::Result<usize> {
	let mut total = 0;
	for path in files {
		let tree = provider
			.parse(read_source(path)?)
			.with_context(|| format!("failed to parse {}", path.display()))?;
		let findings = analyzers.run(&tree);
		tracing::debug!(path = %path.display(), findings = findings.len(), "checked");
		for finding in &findings {
			writeln!(out, "{}", format_finding(path, finding))?;
		}
		total += findings.len();
	}
	Ok(total)
}

/// Prints the named-node tree of `path`.
pub fn print_tree(path: &Path, provider: &dyn SyntaxProvider, out: &mut impl Write) -> anyhow::Result<()> {
	let tree = provider
		.parse(read_source(path)?)
		.with_context(|| format!("failed to parse {}", path.display()))?;
	out.write_all(pretty_print_tree(&tree).as_bytes())?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use glint_lint::default_analyzers;
	use glint_syntax::CParser;
	use pretty_assertions::assert_eq;

	use super::*;

	fn write_file(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
		let path = dir.path().join(name);
		std::fs::write(&path, text).unwrap();
		path
	}

	#[test]
	fn prints_one_line_per_finding() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_file(&dir, "a.c", "static void f(int *p) {}\n");

		let mut out = Vec::new();
		let count = check_files(&[path.clone()], &default_analyzers(), &CParser::new(), &mut out).unwrap();
		assert_eq!(count, 1);
		assert_eq!(
			String::from_utf8(out).unwrap(),
			format!("{}:1:15: warning: Parameter p should be asserted\n", path.display())
		);
	}

	#[test]
	fn clean_file_prints_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_file(&dir, "ok.c", "static void f(int *p) { assert(p); }\n");

		let mut out = Vec::new();
		assert_eq!(check_files(&[path], &default_analyzers(), &CParser::new(), &mut out).unwrap(), 0);
		assert!(out.is_empty());
	}

	#[test]
	fn missing_file_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let mut out = Vec::new();
		let err = check_files(&[dir.path().join("nope.c")], &default_analyzers(), &CParser::new(), &mut out)
			.unwrap_err();
		assert!(err.to_string().contains("failed to read"));
	}

	#[test]
	fn rule_selection() {
		let only = select_analyzers(default_analyzers(), Some("documentation")).unwrap();
		assert_eq!(only.names().collect::<Vec<_>>(), ["documentation"]);

		assert_eq!(select_analyzers(default_analyzers(), None).unwrap().len(), 3);
		assert!(select_analyzers(default_analyzers(), Some("bogus")).is_err());

		let without_docs = AnalyzerSet::builder().build();
		let err = select_analyzers(without_docs, Some("documentation")).unwrap_err();
		assert!(err.to_string().contains("disabled"));
	}

	#[test]
	fn tree_output_names_the_root() {
		let dir = tempfile::tempdir().unwrap();
		let path = write_file(&dir, "t.c", "int x;\n");
		let mut out = Vec::new();
		print_tree(&path, &CParser::new(), &mut out).unwrap();
		assert!(String::from_utf8(out).unwrap().starts_with("translation_unit"));
	}
}
