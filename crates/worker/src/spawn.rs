use std::any::Any;
use std::thread::JoinHandle;

use crate::TaskClass;

/// Spawns a dedicated named OS thread with worker classification metadata.
pub fn spawn_named_thread<F, R>(class: TaskClass, name: impl Into<String>, f: F) -> std::io::Result<JoinHandle<R>>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	let name = name.into();
	tracing::trace!(worker_class = class.as_str(), thread = %name, "worker.spawn_named_thread");
	std::thread::Builder::new().name(name).spawn(f)
}

/// Extracts the message from a panic payload, if it carries one.
pub fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
	payload
		.downcast_ref::<&'static str>()
		.copied()
		.or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn named_thread_carries_name() {
		let handle = spawn_named_thread(TaskClass::CpuBlocking, "glint-test", || {
			std::thread::current().name().map(String::from)
		})
		.unwrap();
		assert_eq!(handle.join().unwrap().as_deref(), Some("glint-test"));
	}

	fn boom_str() {
		panic!("boom-str");
	}

	fn boom_string() {
		panic!("{}", String::from("boom-string"));
	}

	fn boom_opaque() {
		std::panic::panic_any(7u32);
	}

	#[test]
	fn extracts_static_str_payload() {
		let err = std::thread::spawn(boom_str).join().unwrap_err();
		assert_eq!(panic_message(&*err), Some("boom-str"));
	}

	#[test]
	fn extracts_string_payload() {
		let err = std::thread::spawn(boom_string).join().unwrap_err();
		assert_eq!(panic_message(&*err), Some("boom-string"));
	}

	#[test]
	fn opaque_payload_has_no_message() {
		let err = std::thread::spawn(boom_opaque).join().unwrap_err();
		assert_eq!(panic_message(&*err), None);
	}
}
