use pretty_assertions::assert_eq;

use super::*;

fn edit(start: (u32, u32), end: (u32, u32), text: &str) -> ContentEdit {
	ContentEdit {
		range: Some(Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))),
		text: text.into(),
	}
}

#[test]
fn ascii_round_trip() {
	let text = Rope::from("hello\nworld\n");

	let pos = Position::new(1, 2);
	let char_idx = lsp_position_to_char(&text, pos).unwrap();
	assert_eq!(char_idx, 8);
	assert_eq!(char_to_lsp_position(&text, char_idx).unwrap(), pos);
}

#[test]
fn utf16_columns_count_surrogate_pairs() {
	// U+1F600 is one char but two UTF-16 code units.
	let text = Rope::from("a\u{1F600}b\n");

	assert_eq!(lsp_position_to_char(&text, Position::new(0, 1)), Some(1));
	assert_eq!(lsp_position_to_char(&text, Position::new(0, 3)), Some(2));
	assert_eq!(char_to_lsp_position(&text, 2).unwrap().character, 3);
}

#[test]
fn out_of_bounds() {
	let text = Rope::from("hello\n");
	assert_eq!(lsp_position_to_char(&text, Position::new(5, 0)), None);
	assert_eq!(char_to_lsp_position(&text, 100), None);
}

#[test]
fn column_clamps_to_line_content() {
	let text = Rope::from("hi\r\nthere");
	assert_eq!(lsp_position_to_char(&text, Position::new(0, 100)), Some(2));
	assert_eq!(lsp_position_to_char(&text, Position::new(1, 100)), Some(9));
}

#[test]
fn range_conversion_orders_endpoints() {
	let text = Rope::from("hello\nworld\n");
	let range = Range::new(Position::new(1, 3), Position::new(0, 1));
	assert_eq!(lsp_range_to_char_range(&text, range), Some((1, 9)));
}

#[test]
fn edits_apply_in_order() {
	let mut text = Rope::from("int x;\nint y;\n");
	apply_edits(
		&mut text,
		&[
			edit((0, 4), (0, 5), "count"),
			edit((1, 0), (1, 0), "static "),
		],
	);
	assert_eq!(text.to_string(), "int count;\nstatic int y;\n");
}

#[test]
fn edit_spanning_lines_and_past_end() {
	let mut text = Rope::from("a\nb\nc");
	apply_edits(&mut text, &[edit((0, 1), (2, 0), "")]);
	assert_eq!(text.to_string(), "ac");

	apply_edits(&mut text, &[edit((9, 0), (9, 0), "\nd")]);
	assert_eq!(text.to_string(), "ac\nd");
}

#[test]
fn rangeless_edit_replaces_everything() {
	let mut text = Rope::from("old");
	apply_edits(
		&mut text,
		&[
			ContentEdit {
				range: None,
				text: "new text".into(),
			},
			edit((0, 0), (0, 3), "old"),
		],
	);
	assert_eq!(text.to_string(), "old text");
}
