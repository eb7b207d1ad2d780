use glint_lint::default_analyzers;
use glint_syntax::CParser;
use pretty_assertions::assert_eq;
use serde_json::json;

use super::*;
use crate::test_util::{SharedBuf, framed};

const UNCHECKED: &str = "static void f(int *p) {}\n";

fn run(messages: &[JsonValue], options: &ServerOptions) -> (SessionEnd, Vec<JsonValue>) {
	let out = SharedBuf::default();
	let end = serve(framed(messages), out.clone(), options, default_analyzers(), &CParser::new()).unwrap();
	(end, out.payloads())
}

fn small() -> ServerOptions {
	ServerOptions {
		workers: 1,
		queue: 16,
		..Default::default()
	}
}

fn sorted_by_kind(payloads: Vec<JsonValue>) -> (Vec<JsonValue>, Vec<JsonValue>) {
	payloads.into_iter().partition(|p| p.get("method").is_some())
}

#[test]
fn full_session() {
	let messages = [
		json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {"capabilities": {}}}),
		json!({"jsonrpc": "2.0", "method": "initialized", "params": {}}),
		json!({"jsonrpc": "2.0", "method": "textDocument/didOpen", "params": {
			"textDocument": {"uri": "file:///a.c", "languageId": "c", "version": 1, "text": UNCHECKED}
		}}),
		json!({"jsonrpc": "2.0", "id": 2, "method": "textDocument/diagnostic", "params": {
			"textDocument": {"uri": "file:///a.c"}
		}}),
		json!({"jsonrpc": "2.0", "id": 3, "method": "shutdown"}),
		json!({"jsonrpc": "2.0", "method": "exit"}),
	];
	let (end, payloads) = run(&messages, &small());
	assert_eq!(
		end,
		SessionEnd {
			shutdown_requested: true,
			exited: true
		}
	);

	let (notifications, responses) = sorted_by_kind(payloads);
	assert_eq!(notifications.len(), 1);
	assert_eq!(notifications[0]["params"]["uri"], "file:///a.c");
	assert_eq!(
		notifications[0]["params"]["diagnostics"][0]["message"],
		"Parameter p should be asserted"
	);

	let ids: Vec<&JsonValue> = responses.iter().map(|r| &r["id"]).collect();
	assert_eq!(ids, [&json!(1), &json!(2), &json!(3)]);
	assert_eq!(responses[0]["result"]["serverInfo"]["name"], "glint");
	assert_eq!(responses[1]["result"]["items"][0]["severity"], 2);
	assert_eq!(responses[2]["result"], JsonValue::Null);
}

#[test]
fn incremental_change_is_applied_before_analysis() {
	let messages = [
		json!({"jsonrpc": "2.0", "method": "textDocument/didOpen", "params": {
			"textDocument": {"uri": "file:///a.c", "languageId": "c", "version": 1, "text": UNCHECKED}
		}}),
		json!({"jsonrpc": "2.0", "method": "textDocument/didChange", "params": {
			"textDocument": {"uri": "file:///a.c", "version": 2},
			"contentChanges": [{
				"range": {"start": {"line": 0, "character": 22}, "end": {"line": 0, "character": 24}},
				"text": "{ assert(p); }"
			}]
		}}),
	];
	let (end, payloads) = run(&messages, &small());
	assert_eq!(
		end,
		SessionEnd {
			shutdown_requested: false,
			exited: false
		}
	);

	assert_eq!(payloads.len(), 2);
	let last = &payloads[1]["params"];
	assert_eq!(last["version"], 2);
	assert_eq!(last["diagnostics"], json!([]));
}

#[test]
fn inline_text_on_diagnostic_request() {
	let messages = [json!({"jsonrpc": "2.0", "id": "x", "method": "textDocument/diagnostic", "params": {
		"textDocument": {"uri": "file:///b.c", "text": UNCHECKED}
	}})];
	let (_, payloads) = run(&messages, &small());
	assert_eq!(payloads.len(), 1);
	assert_eq!(payloads[0]["id"], "x");
	assert_eq!(payloads[0]["result"]["items"].as_array().map(Vec::len), Some(1));
}

#[test]
fn unknown_and_invalid_requests_get_errors() {
	let messages = [
		json!({"jsonrpc": "2.0", "id": 1, "method": "textDocument/hover", "params": {}}),
		json!({"jsonrpc": "2.0", "id": 2, "method": "textDocument/didOpen", "params": {"textDocument": 5}}),
		json!({"jsonrpc": "2.0", "method": "$/cancelRequest", "params": {"id": 1}}),
		json!({"jsonrpc": "2.0", "id": 99, "result": null}),
	];
	let (_, payloads) = run(&messages, &small());
	let mut codes: Vec<i64> = payloads.iter().filter_map(|p| p["error"]["code"].as_i64()).collect();
	codes.sort_unstable();
	assert_eq!(payloads.len(), 2);
	assert_eq!(codes, [-32602, -32601]);
}

#[test]
fn eof_without_exit_still_flushes() {
	let messages: Vec<JsonValue> = (0..5)
		.map(|i| {
			json!({"jsonrpc": "2.0", "method": "textDocument/didOpen", "params": {
				"textDocument": {"uri": format!("file:///{i}.c"), "text": UNCHECKED}
			}})
		})
		.collect();
	let options = ServerOptions {
		workers: 3,
		..small()
	};
	let (end, payloads) = run(&messages, &options);
	assert!(!end.exited);
	assert_eq!(payloads.len(), 5);
}

#[test]
fn oversized_frame_is_skipped_and_session_continues() {
	let mut input = b"Content-Length: 18446744073709551615\r\n\r\n".to_vec();
	input.extend(
		framed(&[
			json!({"jsonrpc": "2.0", "id": 1, "method": "shutdown"}),
			json!({"jsonrpc": "2.0", "method": "exit"}),
		])
		.into_inner(),
	);
	let out = SharedBuf::default();
	let end = serve(std::io::Cursor::new(input), out.clone(), &small(), default_analyzers(), &CParser::new()).unwrap();
	assert_eq!(
		end,
		SessionEnd {
			shutdown_requested: true,
			exited: true
		}
	);
	let payloads = out.payloads();
	assert_eq!(payloads.len(), 1);
	assert_eq!(payloads[0]["id"], 1);
	assert_eq!(payloads[0]["result"], JsonValue::Null);
}
