use std::io::Write;

use glint_primitives::Severity;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_document_uses_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config, Config::default());
	assert_eq!(config.server.workers, 10);
	assert_eq!(config.rules.analyzers().names().collect::<Vec<_>>(), glint_lint::RULE_NAMES);
}

#[test]
fn server_block() {
	let config = Config::parse(
		r#"
server {
    name "glib_lsp"
    version "0.0.1"
    workers 4
    queue 8
    sync "incremental"
}
"#,
	)
	.unwrap();
	assert_eq!(config.server.name, "glib_lsp");
	assert_eq!(config.server.version, "0.0.1");
	assert_eq!(config.server.workers, 4);
	assert_eq!(config.server.queue, 8);
	assert_eq!(config.server.sync, SyncKind::Incremental);
	assert!(config.warnings.is_empty());
}

#[test]
fn rule_options_and_toggles() {
	let config = Config::parse(
		r#"
rules {
    unchecked-pointer {
        assert "CHECK" "g_return_if_fail"
        error-type "Error"
        severity "error"
    }
    documentation {
        internal "static"
    }
    declaration-placement enabled=#false
}
"#,
	)
	.unwrap();

	let up = &config.rules.unchecked_pointer.options;
	assert_eq!(up.assert_functions, ["CHECK", "g_return_if_fail"]);
	assert_eq!(up.error_type, "Error");
	assert_eq!(up.severity, Severity::Error);
	assert_eq!(up.pointer_types, ["gpointer", "gconstpointer"]);
	assert_eq!(config.rules.documentation.options.internal_markers, ["static"]);
	assert!(!config.rules.placement.enabled);

	let names: Vec<_> = config.rules.analyzers().names().collect();
	assert_eq!(names, ["unchecked-pointer", "documentation"]);
}

#[test]
fn unknown_rules_and_keys_are_warnings() {
	let config = Config::parse(
		r#"
server { colour "blue" }
rules {
    no-goto
    documentation { style "doxygen" }
}
"#,
	)
	.unwrap();
	assert_eq!(
		config.warnings,
		[
			ConfigWarning::UnknownKey {
				section: "server".into(),
				key: "colour".into()
			},
			ConfigWarning::UnknownRule { name: "no-goto".into() },
			ConfigWarning::UnknownKey {
				section: "documentation".into(),
				key: "style".into()
			},
		]
	);
	assert_eq!(config.rules.analyzers().len(), 3);
}

#[test]
fn invalid_values_are_errors() {
	assert!(matches!(
		Config::parse("server { workers 0 }"),
		Err(ConfigError::InvalidValue { .. })
	));
	assert!(matches!(
		Config::parse(r#"server { sync "partial" }"#),
		Err(ConfigError::InvalidValue { .. })
	));
	assert!(matches!(
		Config::parse(r#"rules { documentation { severity "fatal" } }"#),
		Err(ConfigError::InvalidSeverity(_))
	));
	assert!(matches!(Config::parse("server {"), Err(ConfigError::Kdl(_))));
}

#[test]
fn load_from_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "server {{ workers 2 }}").unwrap();

	let config = Config::load(file.path()).unwrap();
	assert_eq!(config.server.workers, 2);

	let explicit = Config::discover(Some(file.path())).unwrap();
	assert_eq!(explicit, config);
}

#[test]
fn load_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.kdl");
	match Config::load(&path) {
		Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("expected io error, got {other:?}"),
	}
}
