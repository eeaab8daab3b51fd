#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "p4g", about = "Perforce commands over p4 -G marshalled output")]
struct Cli {
	#[command(flatten)]
	connection: cmd::connection::Connection,
	/// Log spawned commands and decode summaries to stderr.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Run any p4 command with -G and print the decoded records.
	Run(cmd::run::Args),
	/// Run any p4 command without -G and print its output verbatim.
	Raw(cmd::raw::Args),
	/// Decode a captured p4 -G output file.
	Decode(cmd::decode::Args),
	/// Describe a change.
	Describe(cmd::describe::Args),
	/// List job fixes.
	Fixes(cmd::fixes::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> p4g::p4::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);
	let p4 = cli.connection.p4();

	match cli.command {
		Commands::Run(args) => cmd::run::run(&p4, args),
		Commands::Raw(args) => cmd::raw::run(&p4, args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Describe(args) => cmd::describe::run(&p4, args),
		Commands::Fixes(args) => cmd::fixes::run(&p4, args),
	}
}

fn init_tracing(verbose: bool) {
	let env_filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	let _ = tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}
