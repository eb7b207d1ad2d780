use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// glint command line arguments.
#[derive(Parser, Debug)]
#[command(name = "glint", version)]
#[command(about = "Structural lint language server for C")]
pub struct Cli {
	/// Configuration file (defaults to $XDG_CONFIG_HOME/glint/config.kdl)
	#[arg(short, long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Number of analysis worker threads
	#[arg(short, long, value_name = "N", global = true)]
	pub workers: Option<usize>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Run the language server on stdio (default)
	Serve,
	/// Lint files and print findings, exiting with status 1 when any are found
	Check {
		/// Run only this rule
		#[arg(short, long, value_name = "NAME")]
		rule: Option<String>,
		/// C source files
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Print the named-node syntax tree of a file
	Tree {
		/// C source file
		file: PathBuf,
	},
}
