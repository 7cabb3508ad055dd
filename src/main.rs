use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use sbor_harmonizer::{config, decode, observability, pipeline};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "sbor", about = "Merge, decode and report training-camp planning spreadsheets")]
struct Cli {
	/// Directory for generated workbooks (overrides configuration)
	#[arg(long, global = true, env = "SBOR_OUTPUT_DIR")]
	out_dir: Option<PathBuf>,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Merge spreadsheets from several units into one canonical workbook
	Merge {
		/// Input spreadsheets (xlsx, xls, ods or delimited text), in merge order
		#[arg(required = true)]
		files: Vec<PathBuf>,
	},
	/// Replace specialty and position names using the code lookup tables
	Decode {
		/// A workbook produced by `merge`
		file: PathBuf,
	},
	/// Build the summary report with totals
	Report {
		/// A workbook produced by `merge` or `decode`
		file: PathBuf,
	},
	/// Show how a spreadsheet's header is detected and mapped
	Inspect { file: PathBuf },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Enforce input bounds before any file is parsed.
fn check_inputs(files: &[PathBuf], settings: &config::Settings) -> anyhow::Result<()> {
	if files.len() > settings.max_files {
		bail!(
			"{} files supplied, at most {} are accepted",
			files.len(),
			settings.max_files
		);
	}
	for file in files {
		let meta = std::fs::metadata(file).with_context(|| format!("cannot access '{}'", file.display()))?;
		if meta.len() > settings.max_file_bytes {
			bail!(
				"'{}' is {} bytes, the limit is {}",
				file.display(),
				meta.len(),
				settings.max_file_bytes
			);
		}
	}
	Ok(())
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let settings = match config::load() {
		Ok(s) => s,
		Err(e) => {
			eprintln!("failed to load config, using defaults: {}", e);
			config::Settings::default()
		}
	};
	if let Err(e) = observability::init_logging(settings.log_level, settings.log_json) {
		eprintln!("Warning: {}", e);
	}

	let output_dir = cli.out_dir.clone().unwrap_or_else(|| settings.output_dir.clone());

	match cli.command {
		Commands::Merge { files } => {
			check_inputs(&files, &settings)?;
			let summary = pipeline::merge_files(&files, &output_dir)?;
			print_json(&summary)
		}
		Commands::Decode { file } => {
			check_inputs(std::slice::from_ref(&file), &settings)?;
			let decoder = decode::Decoder::new(decode::LookupTables::builtin(), settings.officer_marker.as_str());
			let summary = pipeline::decode_file(&file, &output_dir, &decoder)?;
			print_json(&summary)
		}
		Commands::Report { file } => {
			check_inputs(std::slice::from_ref(&file), &settings)?;
			let outcome = pipeline::report_file(&file, &output_dir)?;
			print_json(&outcome)
		}
		Commands::Inspect { file } => {
			check_inputs(std::slice::from_ref(&file), &settings)?;
			let layout = pipeline::inspect_file(&file)?;
			print_json(&layout)
		}
	}
}
