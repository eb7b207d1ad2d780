/// Execution classes used for thread naming and observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// CPU-intensive work such as parsing and analysis.
	CpuBlocking,
	/// Blocking I/O such as writing to the protocol channel.
	IoBlocking,
}

impl TaskClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::CpuBlocking => "cpu_blocking",
			Self::IoBlocking => "io_blocking",
		}
	}
}
