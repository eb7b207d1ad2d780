//! glint binary.
//!
//! `glint serve` speaks LSP on stdio. `glint check` and `glint tree` run the
//! same analyzers and parser from the command line.

mod check;
mod cli;
mod logging;

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use glint_config::{Config, SyncKind};
use glint_lsp::ServerOptions;
use glint_lsp::lsp_types::TextDocumentSyncKind;
use glint_syntax::CParser;
use tracing::{info, warn};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	logging::setup_tracing(cli.verbose);

	let config = Config::discover(cli.config.as_deref()).context("failed to load configuration")?;
	for warning in &config.warnings {
		warn!(%warning, "configuration");
	}

	match cli.command.unwrap_or(Command::Serve) {
		Command::Serve => serve(&config, cli.workers),
		Command::Check { rule, files } => {
			let analyzers = check::select_analyzers(config.rules.analyzers(), rule.as_deref())?;
			let findings = check::check_files(&files, &analyzers, &CParser::new(), &mut io::stdout().lock())?;
			Ok(if findings > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS })
		}
		Command::Tree { file } => {
			check::print_tree(&file, &CParser::new(), &mut io::stdout().lock())?;
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn server_options(config: &Config, workers: Option<usize>) -> ServerOptions {
	let server = &config.server;
	ServerOptions {
		name: server.name.clone(),
		version: server.version.clone(),
		workers: workers.unwrap_or(server.workers),
		queue: server.queue,
		sync: match server.sync {
			SyncKind::Full => TextDocumentSyncKind::FULL,
			SyncKind::Incremental => TextDocumentSyncKind::INCREMENTAL,
		},
	}
}

fn serve(config: &Config, workers: Option<usize>) -> anyhow::Result<ExitCode> {
	let options = server_options(config, workers);
	let analyzers = config.rules.analyzers();
	info!(analyzers = ?analyzers.names().collect::<Vec<_>>(), "starting glint");

	let end = glint_lsp::serve(io::stdin().lock(), io::stdout(), &options, analyzers, &CParser::new())
		.context("language server failed")?;

	// An `exit` without a preceding `shutdown` is an abnormal termination.
	if end.exited && !end.shutdown_requested {
		return Ok(ExitCode::FAILURE);
	}
	Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn cli_workers_override_config() {
		let config = Config::parse("server { workers 3; queue 9; sync \"incremental\" }").unwrap();
		let options = server_options(&config, None);
		assert_eq!(options.workers, 3);
		assert_eq!(options.queue, 9);
		assert_eq!(options.sync, TextDocumentSyncKind::INCREMENTAL);

		assert_eq!(server_options(&config, Some(12)).workers, 12);
	}
}
