mod config;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{ErrorLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Export GeoJSON features as a KML document
	Export(tools::export::Subcommand),

	/// Import a KML document as GeoJSON
	Import(tools::import::Subcommand),

	/// Show which layer type a placemark name and folder classify as
	Classify(tools::classify::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::Export(arguments) => tools::export::run(arguments),
		Commands::Import(arguments) => tools::import::run(arguments),
		Commands::Classify(arguments) => tools::classify::run(arguments),
	}
}
