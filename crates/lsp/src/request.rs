//! Inbound message classification.
//!
//! Only the handful of methods glint acts on are modelled; everything else
//! becomes [`Request::Unknown`] so requests can still be answered.

use lsp_types::{ClientInfo, Range};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::types::RequestId;
use crate::{Error, Result};

/// A classified inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
	Initialize {
		id: RequestId,
		client: Option<ClientInfo>,
	},
	Initialized,
	DidOpen(DocumentChange),
	DidChange(DocumentChange),
	DidSave {
		uri: String,
	},
	DidClose {
		uri: String,
	},
	/// Pull diagnostics; `change.text` carries inline text when the client sent it.
	Diagnostic {
		id: RequestId,
		change: DocumentChange,
	},
	Shutdown {
		id: RequestId,
	},
	Exit,
	Unknown {
		id: Option<RequestId>,
		method: String,
	},
}

/// Document content carried by an open, change or diagnostic message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentChange {
	pub uri: String,
	pub language: Option<String>,
	pub version: Option<i32>,
	/// Full replacement text.
	pub text: Option<String>,
	/// Ranged edits to apply in order, used when `text` is absent.
	pub edits: Vec<ContentEdit>,
}

impl DocumentChange {
	/// A change carrying full text.
	pub fn full(uri: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			uri: uri.into(),
			text: Some(text.into()),
			..Default::default()
		}
	}
}

/// One `contentChanges` entry. A missing range replaces the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEdit {
	#[serde(default)]
	pub range: Option<Range>,
	pub text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
	#[serde(default)]
	client_info: Option<ClientInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentItem {
	uri: String,
	#[serde(default)]
	language_id: Option<String>,
	#[serde(default)]
	version: Option<i32>,
	#[serde(default)]
	text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentParams {
	text_document: DocumentItem,
	#[serde(default)]
	content_changes: Vec<ContentEdit>,
}

impl DocumentParams {
	fn into_change(self) -> DocumentChange {
		let item = self.text_document;
		let mut text = item.text;
		let mut edits = Vec::new();
		if text.is_none() {
			if self.content_changes.iter().all(|c| c.range.is_none()) {
				text = self.content_changes.into_iter().last().map(|c| c.text);
			} else {
				edits = self.content_changes;
			}
		}
		DocumentChange {
			uri: item.uri,
			language: item.language_id,
			version: item.version,
			text,
			edits,
		}
	}
}

/// Extracts the id of a request message, if it has a usable one.
pub fn request_id(msg: &JsonValue) -> Option<RequestId> {
	msg.get("id").and_then(|id| RequestId::deserialize(id).ok())
}

impl Request {
	/// Classifies a decoded JSON-RPC message.
	pub fn from_json(msg: &JsonValue) -> Result<Self> {
		let id = request_id(msg);
		let method = msg
			.get("method")
			.and_then(|m| m.as_str())
			.ok_or_else(|| Error::Protocol("message without method".into()))?;
		let params = msg.get("params").unwrap_or(&JsonValue::Null);

		let require_id = || id.clone().ok_or_else(|| Error::Protocol(format!("{method} without id")));

		Ok(match method {
			"initialize" => {
				let params: Option<InitializeParams> = Option::deserialize(params)?;
				Request::Initialize {
					id: require_id()?,
					client: params.and_then(|p| p.client_info),
				}
			}
			"initialized" => Request::Initialized,
			"textDocument/didOpen" => Request::DidOpen(DocumentParams::deserialize(params)?.into_change()),
			"textDocument/didChange" => Request::DidChange(DocumentParams::deserialize(params)?.into_change()),
			"textDocument/didSave" => Request::DidSave {
				uri: DocumentParams::deserialize(params)?.text_document.uri,
			},
			"textDocument/didClose" => Request::DidClose {
				uri: DocumentParams::deserialize(params)?.text_document.uri,
			},
			"textDocument/diagnostic" => Request::Diagnostic {
				id: require_id()?,
				change: DocumentParams::deserialize(params)?.into_change(),
			},
			"shutdown" => Request::Shutdown { id: require_id()? },
			"exit" => Request::Exit,
			other => Request::Unknown {
				id,
				method: other.to_string(),
			},
		})
	}

	/// The id to answer, for requests.
	pub fn id(&self) -> Option<&RequestId> {
		match self {
			Request::Initialize { id, .. } | Request::Diagnostic { id, .. } | Request::Shutdown { id } => Some(id),
			Request::Unknown { id, .. } => id.as_ref(),
			_ => None,
		}
	}

	pub fn method(&self) -> &str {
		match self {
			Request::Initialize { .. } => "initialize",
			Request::Initialized => "initialized",
			Request::DidOpen(_) => "textDocument/didOpen",
			Request::DidChange(_) => "textDocument/didChange",
			Request::DidSave { .. } => "textDocument/didSave",
			Request::DidClose { .. } => "textDocument/didClose",
			Request::Diagnostic { .. } => "textDocument/diagnostic",
			Request::Shutdown { .. } => "shutdown",
			Request::Exit => "exit",
			Request::Unknown { method, .. } => method,
		}
	}

	/// Document content this message carries, if any.
	pub fn document(&self) -> Option<&DocumentChange> {
		match self {
			Request::DidOpen(change) | Request::DidChange(change) | Request::Diagnostic { change, .. } => Some(change),
			_ => None,
		}
	}
}
