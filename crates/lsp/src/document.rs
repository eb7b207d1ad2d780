//! Authoritative text per open document.
//!
//! Records are replaced on open and change and are kept for the lifetime of the
//! process. Workers only ever see the text captured in their own handle.

use std::collections::HashMap;

use parking_lot::Mutex;
use ropey::Rope;
use tracing::{debug, warn};

use crate::position::apply_edits;
use crate::request::DocumentChange;

/// Last known state of one document.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
	pub uri: String,
	pub text: Rope,
	pub language: Option<String>,
	pub version: Option<i32>,
}

/// Map from document URI to its current record.
#[derive(Debug, Default)]
pub struct DocumentStore {
	records: Mutex<HashMap<String, DocumentRecord>>,
}

impl DocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the text to analyze for `change`, updating the store first.
	///
	/// Full text overwrites the record. Ranged edits are applied to the stored
	/// text. Without either, the stored text is returned unchanged, or `None` if
	/// the document was never seen.
	pub fn resolve(&self, change: &DocumentChange) -> Option<String> {
		let mut records = self.records.lock();

		if let Some(text) = &change.text {
			let language = change
				.language
				.clone()
				.or_else(|| records.get(&change.uri).and_then(|r| r.language.clone()));
			records.insert(
				change.uri.clone(),
				DocumentRecord {
					uri: change.uri.clone(),
					text: Rope::from_str(text),
					language,
					version: change.version,
				},
			);
			debug!(uri = %change.uri, version = ?change.version, "document stored");
			return Some(text.clone());
		}

		let Some(record) = records.get_mut(&change.uri) else {
			if !change.edits.is_empty() {
				warn!(uri = %change.uri, "edits for unknown document dropped");
			} else {
				debug!(uri = %change.uri, "no text for unknown document");
			}
			return None;
		};

		if !change.edits.is_empty() {
			apply_edits(&mut record.text, &change.edits);
			if change.version.is_some() {
				record.version = change.version;
			}
			debug!(uri = %change.uri, edits = change.edits.len(), version = ?record.version, "document edited");
		}
		Some(record.text.to_string())
	}

	pub fn get(&self, uri: &str) -> Option<DocumentRecord> {
		self.records.lock().get(uri).cloned()
	}

	pub fn len(&self) -> usize {
		self.records.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.lock().is_empty()
	}
}
