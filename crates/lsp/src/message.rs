//! `Content-Length` framed JSON-RPC messages over blocking byte streams.

use std::io::{BufRead, Write};

use serde_json::Value as JsonValue;

use crate::{Error, Result};

const CONTENT_LENGTH: &str = "content-length";

/// Largest body accepted from a peer.
pub const MAX_CONTENT_LENGTH: usize = 64 * 1024 * 1024;

/// Reads one framed message.
///
/// Returns `Ok(None)` on a clean EOF before any header. Headers other than
/// `Content-Length` are ignored.
pub fn read_message(reader: &mut impl BufRead, buf: &mut String) -> Result<Option<JsonValue>> {
	let mut content_length: Option<usize> = None;
	let mut saw_header = false;
	loop {
		buf.clear();
		let bytes_read = reader.read_line(buf)?;
		if bytes_read == 0 {
			return if saw_header { Err(Error::Eof) } else { Ok(None) };
		}

		let line = buf.trim();
		if line.is_empty() {
			if saw_header {
				break;
			}
			continue;
		}
		saw_header = true;

		if let Some((name, value)) = line.split_once(':')
			&& name.trim().eq_ignore_ascii_case(CONTENT_LENGTH)
		{
			content_length = Some(
				value
					.trim()
					.parse()
					.map_err(|_| Error::Protocol(format!("invalid Content-Length: {}", value.trim())))?,
			);
		}
	}

	let length = content_length.ok_or_else(|| Error::Protocol("missing Content-Length".into()))?;
	if length > MAX_CONTENT_LENGTH {
		return Err(Error::Protocol(format!(
			"Content-Length {length} exceeds the {MAX_CONTENT_LENGTH} byte limit"
		)));
	}

	let mut body = vec![0u8; length];
	reader.read_exact(&mut body).map_err(|e| match e.kind() {
		std::io::ErrorKind::UnexpectedEof => Error::Eof,
		_ => e.into(),
	})?;

	let json: JsonValue = serde_json::from_slice(&body)?;
	Ok(Some(json))
}

/// Writes one framed message and flushes.
pub fn write_message(writer: &mut impl Write, payload: &JsonValue) -> Result<()> {
	let json = serde_json::to_string(payload)?;
	write!(writer, "Content-Length: {}\r\n\r\n{}", json.len(), json)?;
	writer.flush()?;
	Ok(())
}
