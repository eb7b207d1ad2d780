//! Outbound payloads: responses, the pull diagnostic report and push notifications.

use glint_primitives::{Finding, Severity, Span};
use lsp_types::{
	Diagnostic, DiagnosticOptions, DiagnosticServerCapabilities, DiagnosticSeverity, InitializeResult, Position,
	Range, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, WorkDoneProgressOptions,
};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use crate::ServerOptions;
use crate::types::{RequestId, ResponseError};

/// Value of the `source` field on every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "glint";

pub fn to_range(span: Span) -> Range {
	Range::new(
		Position::new(span.start.line, span.start.character),
		Position::new(span.end.line, span.end.character),
	)
}

pub fn to_severity(severity: Severity) -> DiagnosticSeverity {
	match severity {
		Severity::Error => DiagnosticSeverity::ERROR,
		Severity::Warning => DiagnosticSeverity::WARNING,
		Severity::Information | Severity::Hint => DiagnosticSeverity::INFORMATION,
	}
}

pub fn to_diagnostic(finding: &Finding) -> Diagnostic {
	Diagnostic::new(
		to_range(finding.span),
		Some(to_severity(finding.severity)),
		None,
		Some(DIAGNOSTIC_SOURCE.to_string()),
		finding.message.clone(),
		None,
		None,
	)
}

fn diagnostics(findings: &[Finding]) -> Vec<Diagnostic> {
	findings.iter().map(to_diagnostic).collect()
}

/// Capabilities and identity announced in the `initialize` response.
pub fn initialize_result(options: &ServerOptions) -> InitializeResult {
	InitializeResult {
		capabilities: ServerCapabilities {
			text_document_sync: Some(TextDocumentSyncCapability::Kind(options.sync)),
			diagnostic_provider: Some(DiagnosticServerCapabilities::Options(DiagnosticOptions {
				identifier: Some(options.name.clone()),
				inter_file_dependencies: false,
				workspace_diagnostics: false,
				work_done_progress_options: WorkDoneProgressOptions::default(),
			})),
			..Default::default()
		},
		server_info: Some(ServerInfo {
			name: options.name.clone(),
			version: Some(options.version.clone()),
		}),
	}
}

/// A successful response. Unserializable results degrade to `null`.
pub fn response(id: &RequestId, result: impl Serialize) -> JsonValue {
	let result = serde_json::to_value(result).unwrap_or_else(|err| {
		tracing::error!(%id, error = %err, "failed to serialize result");
		JsonValue::Null
	});
	json!({ "jsonrpc": "2.0", "id": id, "result": result })
}

pub fn error_response(id: &RequestId, error: ResponseError) -> JsonValue {
	json!({ "jsonrpc": "2.0", "id": id, "error": error })
}

/// Full document diagnostic report answering `textDocument/diagnostic`.
pub fn diagnostic_report(id: &RequestId, findings: &[Finding]) -> JsonValue {
	response(id, json!({ "kind": "full", "items": diagnostics(findings) }))
}

/// `textDocument/publishDiagnostics` notification for `uri`.
pub fn publish_diagnostics(uri: &str, version: Option<i32>, findings: &[Finding]) -> JsonValue {
	let mut params = json!({ "uri": uri, "diagnostics": diagnostics(findings) });
	if let Some(version) = version {
		params["version"] = json!(version);
	}
	json!({ "jsonrpc": "2.0", "method": "textDocument/publishDiagnostics", "params": params })
}

#[cfg(test)]
mod tests {
	use glint_primitives::Point;
	use lsp_types::TextDocumentSyncKind;
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::types::ErrorCode;

	fn finding(severity: Severity) -> Finding {
		Finding::new(Span::new(Point::new(2, 4), Point::new(2, 7)), severity, "Parameter p should be asserted")
	}

	#[test]
	fn findings_serialize_with_numeric_severity() {
		let value = serde_json::to_value(to_diagnostic(&finding(Severity::Warning))).unwrap();
		assert_eq!(
			value,
			json!({
				"range": {"start": {"line": 2, "character": 4}, "end": {"line": 2, "character": 7}},
				"severity": 2,
				"source": "glint",
				"message": "Parameter p should be asserted"
			})
		);
		assert_eq!(to_severity(Severity::Hint), DiagnosticSeverity::INFORMATION);
		assert_eq!(to_severity(Severity::Error), DiagnosticSeverity::ERROR);
	}

	#[test]
	fn report_wraps_items_in_result() {
		let report = diagnostic_report(&RequestId::Number(3), &[finding(Severity::Information)]);
		assert_eq!(report["id"], json!(3));
		assert_eq!(report["result"]["kind"], json!("full"));
		assert_eq!(report["result"]["items"][0]["severity"], json!(3));
	}

	#[test]
	fn publish_carries_uri_and_version() {
		let note = publish_diagnostics("file:///a.c", Some(4), &[]);
		assert_eq!(
			note,
			json!({
				"jsonrpc": "2.0",
				"method": "textDocument/publishDiagnostics",
				"params": {"uri": "file:///a.c", "diagnostics": [], "version": 4}
			})
		);
		assert!(publish_diagnostics("file:///a.c", None, &[])["params"].get("version").is_none());
	}

	#[test]
	fn initialize_announces_name_version_and_sync() {
		let options = ServerOptions {
			name: "glint".into(),
			version: "1.2.3".into(),
			sync: TextDocumentSyncKind::INCREMENTAL,
			..Default::default()
		};
		let value = response(&RequestId::Number(1), initialize_result(&options));
		assert_eq!(value["result"]["serverInfo"], json!({"name": "glint", "version": "1.2.3"}));
		assert_eq!(value["result"]["capabilities"]["textDocumentSync"], json!(2));
		assert_eq!(value["result"]["capabilities"]["diagnosticProvider"]["identifier"], json!("glint"));
	}

	#[test]
	fn errors_and_null_results() {
		let id = RequestId::String("x".into());
		assert_eq!(response(&id, ()), json!({"jsonrpc": "2.0", "id": "x", "result": null}));
		assert_eq!(
			error_response(&id, ResponseError::new(ErrorCode::METHOD_NOT_FOUND, "unhandled method foo")),
			json!({"jsonrpc": "2.0", "id": "x", "error": {"code": -32601, "message": "unhandled method foo"}})
		);
	}
}
