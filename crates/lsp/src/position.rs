//! Conversion between LSP positions (UTF-16 code units) and rope char indices.

use lsp_types::{Position, Range};
use ropey::Rope;

use crate::request::ContentEdit;

/// Converts an LSP position to a char index.
///
/// Columns past the end of a line clamp to the line end, excluding the line
/// terminator. Returns `None` when the line is past the end of the text.
pub fn lsp_position_to_char(text: &Rope, pos: Position) -> Option<usize> {
	let line = pos.line as usize;
	if line >= text.len_lines() {
		return None;
	}
	let line_start = text.line_to_char(line);
	let slice = text.line(line);
	let content_chars = slice.len_chars() - line_ending_chars(slice);
	let content = slice.slice(..content_chars);
	let column = (pos.character as usize).min(content.len_utf16_cu());
	Some(line_start + content.utf16_cu_to_char(column))
}

/// Converts a char index to an LSP position. Returns `None` past the end.
pub fn char_to_lsp_position(text: &Rope, char_idx: usize) -> Option<Position> {
	if char_idx > text.len_chars() {
		return None;
	}
	let line = text.char_to_line(char_idx);
	let line_start = text.line_to_char(line);
	let column = text.slice(line_start..char_idx).len_utf16_cu();
	Some(Position::new(line as u32, column as u32))
}

/// Converts an LSP range to a `(start, end)` char range.
pub fn lsp_range_to_char_range(text: &Rope, range: Range) -> Option<(usize, usize)> {
	let start = lsp_position_to_char(text, range.start)?;
	let end = lsp_position_to_char(text, range.end)?;
	Some((start.min(end), start.max(end)))
}

/// Resolves a position that may point past the last line to the end of text.
fn clamped_position_to_char(text: &Rope, pos: Position) -> usize {
	lsp_position_to_char(text, pos).unwrap_or_else(|| text.len_chars())
}

/// Applies `contentChanges` entries in order.
///
/// An entry without a range replaces the whole text.
pub fn apply_edits(text: &mut Rope, edits: &[ContentEdit]) {
	for edit in edits {
		let Some(range) = edit.range else {
			*text = Rope::from_str(&edit.text);
			continue;
		};
		let start = clamped_position_to_char(text, range.start);
		let end = clamped_position_to_char(text, range.end).max(start);
		text.remove(start..end);
		text.insert(start, &edit.text);
	}
}

fn line_ending_chars(slice: ropey::RopeSlice<'_>) -> usize {
	let len = slice.len_chars();
	if len == 0 || slice.char(len - 1) != '\n' {
		return 0;
	}
	if len >= 2 && slice.char(len - 2) == '\r' { 2 } else { 1 }
}

#[cfg(test)]
mod tests;
