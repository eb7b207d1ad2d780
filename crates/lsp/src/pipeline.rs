//! Analysis pipeline: a bounded worker pool feeding one writer thread.
//!
//! Workers turn a [`ParseHandle`] into at most one payload and push it onto an
//! unbounded delivery queue. The writer pops payloads in queue order and frames
//! them onto the output stream. Write failures are logged and skipped.

use std::io::{self, Write};
use std::thread::JoinHandle;

use glint_lint::AnalyzerSet;
use glint_worker::{Rejected, TaskClass, WorkerPool, spawn_named_thread};
use serde_json::Value as JsonValue;
use tokio::sync::mpsc;
use tracing::{debug, error, trace, warn};

use crate::ServerOptions;
use crate::handle::ParseHandle;
use crate::message::write_message;
use crate::request::Request;
use crate::response::{diagnostic_report, error_response, initialize_result, publish_diagnostics, response};
use crate::types::{ErrorCode, ResponseError};

/// Running worker pool plus writer thread.
pub struct Pipeline {
	pool: WorkerPool<ParseHandle>,
	outbox: Option<mpsc::UnboundedSender<JsonValue>>,
	writer: Option<JoinHandle<()>>,
}

impl Pipeline {
	/// Starts `options.workers` analysis threads and the writer thread over `output`.
	pub fn start<W>(output: W, analyzers: AnalyzerSet, options: &ServerOptions) -> io::Result<Self>
	where
		W: Write + Send + 'static,
	{
		let (outbox, inbox) = mpsc::unbounded_channel();
		let writer = spawn_named_thread(TaskClass::IoBlocking, "glint-writer", move || {
			writer_loop(inbox, output);
		})?;

		let worker_outbox = outbox.clone();
		let handler_options = options.clone();
		let pool = WorkerPool::new("glint-worker", options.workers, options.queue, move |handle: ParseHandle| {
			if let Some(payload) = render(&handle, &analyzers, &handler_options)
				&& worker_outbox.send(payload).is_err()
			{
				warn!("delivery queue closed, payload dropped");
			}
		})?;

		debug!(workers = pool.size(), queue = pool.capacity(), "pipeline started");
		Ok(Self {
			pool,
			outbox: Some(outbox),
			writer: Some(writer),
		})
	}

	/// Schedules `handle` onto a worker without blocking.
	///
	/// When the queue is full or closed the handle comes back inside the error.
	pub fn submit(&self, handle: ParseHandle) -> Result<(), Rejected<ParseHandle>> {
		self.pool.try_submit(handle)
	}

	/// Queues a payload for the writer directly, bypassing analysis.
	pub fn deliver(&self, payload: JsonValue) {
		match &self.outbox {
			Some(outbox) if outbox.send(payload).is_ok() => {}
			_ => warn!("delivery queue closed, payload dropped"),
		}
	}

	/// Drains the workers, then flushes every queued payload and stops the writer.
	pub fn shutdown(&mut self) {
		self.pool.shutdown();
		self.outbox = None;
		if let Some(writer) = self.writer.take()
			&& writer.join().is_err()
		{
			error!("writer thread exited by panic");
		}
	}
}

impl Drop for Pipeline {
	fn drop(&mut self) {
		self.shutdown();
	}
}

/// Produces the payload answering `handle`, if its message expects one.
pub fn render(handle: &ParseHandle, analyzers: &AnalyzerSet, options: &ServerOptions) -> Option<JsonValue> {
	match &handle.request {
		Request::Initialize { id, client } => {
			debug!(
				client = client.as_ref().map(|c| c.name.as_str()).unwrap_or("<unknown>"),
				"initialize"
			);
			Some(response(id, initialize_result(options)))
		}
		Request::DidOpen(change) | Request::DidChange(change) => {
			let findings = handle.analyze(analyzers);
			debug!(uri = %change.uri, findings = findings.len(), "publishing diagnostics");
			Some(publish_diagnostics(&change.uri, change.version, &findings))
		}
		Request::Diagnostic { id, change } => {
			let findings = handle.analyze(analyzers);
			debug!(uri = %change.uri, %id, findings = findings.len(), "diagnostic report");
			Some(diagnostic_report(id, &findings))
		}
		Request::Shutdown { id } => Some(response(id, ())),
		Request::Unknown { id: Some(id), method } => Some(error_response(
			id,
			ResponseError::new(ErrorCode::METHOD_NOT_FOUND, format!("unhandled method {method}")),
		)),
		Request::Unknown { id: None, method } => {
			trace!(method = %method, "ignoring notification");
			None
		}
		Request::Initialized | Request::DidSave { .. } | Request::DidClose { .. } | Request::Exit => None,
	}
}

fn writer_loop<W: Write>(mut inbox: mpsc::UnboundedReceiver<JsonValue>, mut output: W) {
	while let Some(payload) = inbox.blocking_recv() {
		if let Err(err) = write_message(&mut output, &payload) {
			error!(error = %err, "failed to write payload");
		}
	}
	debug!("writer stopped");
}
