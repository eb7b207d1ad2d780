//! Language Server Protocol front end for glint.
//!
//! The serve loop reads `Content-Length` framed JSON-RPC from a blocking reader,
//! resolves document text through the [`DocumentStore`], parses it into a
//! [`ParseHandle`] and hands the handle to the [`Pipeline`]. Workers run the
//! analyzers and queue payloads for a single writer thread, so the reader never
//! waits for analysis.
//!
//! - [`message`]: framing codec.
//! - [`request`]: inbound message classification.
//! - [`response`]: outbound payloads.
//! - [`document`]: per-URI text cache with incremental edits.
//! - [`pipeline`]: worker pool and writer thread.
//! - [`server`]: the blocking serve loop.
use std::io;

/// Re-export of the [`lsp_types`] dependency of this crate.
pub use lsp_types;
use lsp_types::TextDocumentSyncKind;
pub use serde_json::Value as JsonValue;

pub mod document;
mod handle;
pub mod message;
pub mod pipeline;
pub mod position;
pub mod request;
pub mod response;
pub mod server;
mod types;

pub use document::{DocumentRecord, DocumentStore};
pub use handle::ParseHandle;
pub use pipeline::Pipeline;
pub use request::{ContentEdit, DocumentChange, Request};
pub use server::{SessionEnd, serve};
pub use types::{ErrorCode, RequestId, ResponseError};

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Possible errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The peer sent undecodable JSON or parameters of the wrong shape.
	#[error("deserialization failed: {0}")]
	Deserialize(#[from] serde_json::Error),
	/// The peer violates the Language Server Protocol.
	#[error("protocol error: {0}")]
	Protocol(String),
	/// Input/output errors from the underlying streams.
	#[error("{0}")]
	Io(#[from] io::Error),
	/// The input stream ended in the middle of a message.
	#[error("the underlying channel reached EOF")]
	Eof,
}

/// Identity and sizing of a running server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOptions {
	/// Name reported in `serverInfo`.
	pub name: String,
	/// Version reported in `serverInfo`.
	pub version: String,
	/// Number of analysis worker threads.
	pub workers: usize,
	/// Bound of the analysis queue.
	pub queue: usize,
	/// Text synchronization mode announced to clients.
	pub sync: TextDocumentSyncKind,
}

impl Default for ServerOptions {
	fn default() -> Self {
		Self {
			name: "glint".to_string(),
			version: env!("CARGO_PKG_VERSION").to_string(),
			workers: 10,
			queue: 256,
			sync: TextDocumentSyncKind::FULL,
		}
	}
}
