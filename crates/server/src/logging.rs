use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn env_filter(verbose: bool) -> EnvFilter {
	EnvFilter::try_from_env("GLINT_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("glint=debug,info")
			} else {
				EnvFilter::new("glint=info,warn")
			}
		})
}

/// Logs to `$GLINT_LOG_DIR/glint.<pid>.log` when set, else to stderr.
///
/// Stdout carries the protocol and is never written to.
pub fn setup_tracing(verbose: bool) {
	if let Some(log_dir) = std::env::var("GLINT_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("glint.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry()
				.with(env_filter(verbose))
				.with(file_layer)
				.init();

			tracing::info!(path = ?log_path, "tracing initialized");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(env_filter(verbose))
		.with_writer(std::io::stderr)
		.init();
}
