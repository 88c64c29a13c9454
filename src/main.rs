use std::path::{ Path, PathBuf };
use std::process::exit;

use clap::Parser;
use colored::Colorize;
use simplelog::{ Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode };

use bbgen::{ generate, Catalog };

/// Generates the BBCPU backend's TableGen instruction definitions from an instruction catalog.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
	/// Configuration file for instructions.
	#[arg(long)]
	config: PathBuf,
}

const OUTPUT: &str = "BBCPUInstrInfo.td";

fn main() {
	better_panic::install();

	if TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed).is_err() {
		let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
	}

	let cli = Cli::parse();

	if let Err(e) = run(&cli.config, Path::new(OUTPUT)) {
		eprintln!("{} {}", "error:".red().bold(), e);
		exit(1);
	}
}

fn run(config: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let catalog = Catalog::load(config)?;
	let generated = generate(&catalog)?;

	std::fs::write(output, &generated.text)?;
	log::info!("wrote {}", output.display());
	Ok(())
}
