//! Worker runtime primitives for glint.
//!
//! * [`WorkerPool`]: fixed OS threads behind a bounded queue with non-blocking submission.
//! * [`spawn_named_thread`]: dedicated threads tagged with a [`TaskClass`] for tracing.

mod class;
mod pool;
mod spawn;

pub use class::TaskClass;
pub use pool::{RejectReason, Rejected, WorkerPool};
pub use spawn::{panic_message, spawn_named_thread};
