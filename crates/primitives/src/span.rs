use std::fmt;

/// Position in line/character coordinates.
///
/// Both components are zero-based. `character` counts UTF-16 code units, which is
/// what editors speaking LSP expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
	/// Zero-based line index.
	pub line: u32,
	/// Zero-based character offset in the line.
	pub character: u32,
}

impl Point {
	/// Creates a new point.
	pub const fn new(line: u32, character: u32) -> Self {
		Self { line, character }
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.line, self.character)
	}
}

/// Half-open source span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
	/// Start position (inclusive).
	pub start: Point,
	/// End position (exclusive).
	pub end: Point,
}

impl Span {
	/// Creates a new span.
	pub const fn new(start: Point, end: Point) -> Self {
		Self { start, end }
	}

	/// Creates a zero-length span at a point.
	pub const fn point(pos: Point) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns true when the span covers no text.
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}
}

impl fmt::Display for Span {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({}) -> ({})", self.start, self.end)
	}
}
