//! File-level entry points: each reads its inputs, runs one engine stage
//! and writes exactly one workbook under a unique name.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::decode::{DecodeStats, Decoder};
use crate::error::EngineError;
use crate::ingest::{RawSheet, SheetLayout, TableLoader, read_sheet_file};
use crate::merge::{CountCoercer, MergeEngine};
use crate::render::{self, ReportSummary};
use crate::schema::CanonicalTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
	pub path: PathBuf,
	pub rows: usize,
	/// (source name, rows contributed) in input order
	pub sources: Vec<(String, usize)>,
	pub coerced_cells: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeSummary {
	pub path: PathBuf,
	pub rows: usize,
	pub officer_rows: usize,
	pub specialty_misses: usize,
	pub position_misses: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
	pub path: PathBuf,
	#[serde(flatten)]
	pub summary: ReportSummary,
}

/// Read every input, merge and write the grouped-header workbook.
/// Fails before writing anything if the list is empty or any input cannot
/// be read.
pub fn merge_files(inputs: &[PathBuf], output_dir: &Path) -> Result<MergeSummary, EngineError> {
	if inputs.is_empty() {
		return Err(EngineError::NoFiles);
	}
	let sheets = inputs
		.iter()
		.map(|path| read_sheet_file(path))
		.collect::<Result<Vec<RawSheet>, _>>()?;

	let outcome = MergeEngine::default().merge_into(&sheets, output_dir)?;
	Ok(MergeSummary {
		path: outcome.path,
		rows: outcome.table.len(),
		sources: sheets
			.iter()
			.map(|s| s.name.clone())
			.zip(outcome.stats.rows_per_source)
			.collect(),
		coerced_cells: outcome.stats.coerced_cells,
	})
}

/// Load a previously written canonical workbook (or any single input
/// sheet) back into a canonical table.
pub fn read_canonical(path: &Path) -> Result<CanonicalTable, EngineError> {
	let sheet = read_sheet_file(path)?;
	let records = TableLoader::default().load(&sheet);
	let mut coercer = CountCoercer::default();
	let records = coercer.coerce_all(records);
	if coercer.coerced_cells > 0 {
		tracing::warn!(
			source = sheet.name.as_str(),
			cells = coercer.coerced_cells,
			"non-numeric headcount cells were set to 0"
		);
	}
	Ok(CanonicalTable::new(records))
}

/// Decode specialty and position names of a merged workbook into a new
/// workbook with the same layout.
pub fn decode_file(path: &Path, output_dir: &Path, decoder: &Decoder) -> Result<DecodeSummary, EngineError> {
	let table = read_canonical(path)?;
	let (decoded, DecodeStats { officer_rows, specialty_misses, position_misses }) = decoder.decode(&table);
	let out = render::unique_output_path(output_dir, "decoded")?;
	render::write_canonical(&decoded, &out)?;
	Ok(DecodeSummary {
		path: out,
		rows: decoded.len(),
		officer_rows,
		specialty_misses,
		position_misses,
	})
}

/// Render the summary report of a merged (or decoded) workbook.
pub fn report_file(path: &Path, output_dir: &Path) -> Result<ReportOutcome, EngineError> {
	let table = read_canonical(path)?;
	let out = render::unique_output_path(output_dir, "report")?;
	let summary = render::write_report(&table, &out)?;
	Ok(ReportOutcome { path: out, summary })
}

/// Describe how a file's header would be interpreted, without loading rows.
pub fn inspect_file(path: &Path) -> Result<SheetLayout, EngineError> {
	let sheet = read_sheet_file(path)?;
	Ok(TableLoader::default().layout(&sheet))
}
