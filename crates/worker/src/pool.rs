//! Fixed-size pool of OS threads fed by a bounded queue.
//!
//! Submission never blocks: when the queue is full or the pool is shutting down
//! the job comes back to the caller inside [`Rejected`].

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread::JoinHandle;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::{TaskClass, panic_message, spawn_named_thread};

/// Why a job was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
	/// Queue is at capacity.
	Full,
	/// Pool is shut down.
	Closed,
}

/// A job the pool refused, handed back to the caller.
pub struct Rejected<T> {
	job: T,
	reason: RejectReason,
}

impl<T> Rejected<T> {
	pub fn reason(&self) -> RejectReason {
		self.reason
	}

	/// Returns the refused job.
	pub fn into_inner(self) -> T {
		self.job
	}
}

impl<T> fmt::Debug for Rejected<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Rejected").field("reason", &self.reason).finish_non_exhaustive()
	}
}

impl<T> fmt::Display for Rejected<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.reason {
			RejectReason::Full => f.write_str("worker queue is full"),
			RejectReason::Closed => f.write_str("worker pool is closed"),
		}
	}
}

impl<T> std::error::Error for Rejected<T> {}

/// Bounded pool running `handler` on every accepted job.
pub struct WorkerPool<T> {
	name: String,
	capacity: usize,
	tx: Option<mpsc::Sender<T>>,
	workers: Vec<JoinHandle<()>>,
}

impl<T: Send + 'static> WorkerPool<T> {
	/// Starts `size` threads named `{name}-{index}` sharing a queue of `capacity` jobs.
	///
	/// Zero sizes are raised to one.
	pub fn new<H>(name: &str, size: usize, capacity: usize, handler: H) -> std::io::Result<Self>
	where
		H: Fn(T) + Send + Sync + 'static,
	{
		let size = size.max(1);
		let capacity = capacity.max(1);
		let (tx, rx) = mpsc::channel(capacity);
		let rx = Arc::new(Mutex::new(rx));
		let handler = Arc::new(handler);

		let mut workers = Vec::with_capacity(size);
		for index in 0..size {
			let rx = Arc::clone(&rx);
			let handler = Arc::clone(&handler);
			let thread_name = format!("{name}-{index}");
			workers.push(spawn_named_thread(TaskClass::CpuBlocking, thread_name, move || {
				worker_loop(&rx, &*handler);
			})?);
		}

		tracing::debug!(pool = name, size, capacity, "worker pool started");
		Ok(Self {
			name: name.to_string(),
			capacity,
			tx: Some(tx),
			workers,
		})
	}

	/// Queues `job` without blocking.
	pub fn try_submit(&self, job: T) -> Result<(), Rejected<T>> {
		let Some(tx) = &self.tx else {
			return Err(Rejected {
				job,
				reason: RejectReason::Closed,
			});
		};
		tx.try_send(job).map_err(|err| match err {
			TrySendError::Full(job) => Rejected {
				job,
				reason: RejectReason::Full,
			},
			TrySendError::Closed(job) => Rejected {
				job,
				reason: RejectReason::Closed,
			},
		})
	}
}

impl<T> WorkerPool<T> {
	pub fn size(&self) -> usize {
		self.workers.len()
	}

	pub fn capacity(&self) -> usize {
		self.capacity
	}

	pub fn is_closed(&self) -> bool {
		self.tx.is_none()
	}

	/// Closes the queue and waits for workers to finish every accepted job.
	pub fn shutdown(&mut self) {
		if self.tx.take().is_none() {
			return;
		}
		for worker in self.workers.drain(..) {
			if worker.join().is_err() {
				tracing::error!(pool = %self.name, "worker thread exited by panic");
			}
		}
		tracing::debug!(pool = %self.name, "worker pool stopped");
	}
}

impl<T> Drop for WorkerPool<T> {
	fn drop(&mut self) {
		self.shutdown();
	}
}

fn worker_loop<T>(rx: &Mutex<mpsc::Receiver<T>>, handler: &(dyn Fn(T) + Send + Sync)) {
	loop {
		let next = rx.lock().blocking_recv();
		let Some(job) = next else {
			break;
		};
		if let Err(payload) = catch_unwind(AssertUnwindSafe(|| handler(job))) {
			tracing::error!(
				panic = panic_message(&*payload).unwrap_or("<non-string payload>"),
				"worker job panicked"
			);
		}
	}
}
