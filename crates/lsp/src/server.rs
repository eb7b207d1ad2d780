//! The blocking serve loop.
//!
//! One thread reads and classifies messages, updates the document store and
//! submits parse handles. It never waits for analysis. The loop ends on `exit`
//! or when the input closes, after which every accepted payload is flushed.

use std::io::{BufRead, Write};

use glint_lint::AnalyzerSet;
use glint_syntax::SyntaxProvider;
use serde_json::Value as JsonValue;
use tracing::{debug, error, info, trace, warn};

use crate::document::DocumentStore;
use crate::handle::ParseHandle;
use crate::message::read_message;
use crate::pipeline::Pipeline;
use crate::request::{Request, request_id};
use crate::response::error_response;
use crate::types::{ErrorCode, ResponseError};
use crate::{Error, Result, ServerOptions};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
	/// A `shutdown` request arrived before the loop ended.
	pub shutdown_requested: bool,
	/// The client sent `exit`, as opposed to closing the input.
	pub exited: bool,
}

/// Serves one client until `exit` or end of input.
pub fn serve<R, W>(
	mut input: R,
	output: W,
	options: &ServerOptions,
	analyzers: AnalyzerSet,
	provider: &dyn SyntaxProvider,
) -> Result<SessionEnd>
where
	R: BufRead,
	W: Write + Send + 'static,
{
	let store = DocumentStore::new();
	let mut pipeline = Pipeline::start(output, analyzers, options)?;
	let mut end = SessionEnd {
		shutdown_requested: false,
		exited: false,
	};
	info!(name = %options.name, version = %options.version, workers = options.workers, "serving");

	let mut buf = String::new();
	loop {
		let msg = match read_message(&mut input, &mut buf) {
			Ok(Some(msg)) => msg,
			Ok(None) => {
				info!("input closed");
				break;
			}
			Err(Error::Eof) => {
				warn!("input closed in the middle of a message");
				break;
			}
			Err(Error::Io(err)) => {
				error!(error = %err, "failed to read input");
				break;
			}
			Err(err) => {
				warn!(error = %err, "skipping malformed message");
				continue;
			}
		};

		let Some(request) = classify(&msg, &pipeline) else {
			continue;
		};
		trace!(method = request.method(), "received");

		match &request {
			Request::Exit => {
				end.exited = true;
				info!(shutdown_requested = end.shutdown_requested, "exit");
				break;
			}
			Request::Initialized | Request::DidSave { .. } | Request::DidClose { .. } => {
				debug!(method = request.method(), "accepted");
				continue;
			}
			Request::Shutdown { .. } => end.shutdown_requested = true,
			_ => {}
		}

		let handle = ParseHandle::build(request, &store, provider);
		if let Err(rejected) = pipeline.submit(handle) {
			warn!(reason = %rejected, "request rejected");
			let handle = rejected.into_inner();
			if let Some(id) = handle.request.id() {
				pipeline.deliver(error_response(
					id,
					ResponseError::new(ErrorCode::REQUEST_FAILED, "server is busy"),
				));
			}
		}
	}

	pipeline.shutdown();
	Ok(end)
}

/// Classifies `msg`, answering requests whose parameters cannot be decoded.
fn classify(msg: &JsonValue, pipeline: &Pipeline) -> Option<Request> {
	match Request::from_json(msg) {
		Ok(request) => Some(request),
		Err(err) => {
			match request_id(msg) {
				Some(id) if msg.get("method").is_some() => {
					warn!(%id, error = %err, "invalid request");
					pipeline.deliver(error_response(&id, ResponseError::new(ErrorCode::INVALID_PARAMS, &err)));
				}
				_ => debug!(error = %err, "ignoring message"),
			}
			None
		}
	}
}

#[cfg(test)]
mod tests;
