//! Multi-sheet merge: load every sheet into the canonical schema, concatenate
//! in input order and coerce the planned-headcount columns to integers.

use std::path::{Path, PathBuf};

use crate::error::EngineError;
use crate::ingest::{RawSheet, TableLoader};
use crate::render;
use crate::schema::{CanonicalRecord, CanonicalTable, SourceRecord};

/// Largest headcount accepted from a cell. Above 2^53 an `f64` no longer
/// holds every integer, so the value could not be written back exactly.
pub const MAX_COUNT: u64 = 1 << 53;

/// Parse a headcount cell. Blank, non-numeric, negative, non-finite and
/// out-of-range (above [`MAX_COUNT`]) values give `None`; fractional values
/// are truncated.
pub fn parse_count(raw: &str) -> Option<u64> {
	let value: f64 = raw.trim().parse().ok()?;
	if !value.is_finite() || value < 0.0 || value > MAX_COUNT as f64 {
		return None;
	}
	Some(value.trunc() as u64)
}

/// Per-merge bookkeeping of absorbed soft errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
	/// Rows contributed by each source, in input order.
	pub rows_per_source: Vec<usize>,
	/// Non-blank headcount cells that could not be parsed and became 0.
	pub coerced_cells: usize,
}

/// Converts loader output into canonical records, counting cells that
/// fell back to zero.
#[derive(Debug, Default)]
pub struct CountCoercer {
	pub coerced_cells: usize,
}

impl CountCoercer {
	pub fn coerce(&mut self, record: SourceRecord) -> CanonicalRecord {
		record.map_counts(|raw| match parse_count(&raw) {
			Some(n) => n,
			None => {
				if !raw.trim().is_empty() {
					self.coerced_cells += 1;
				}
				0
			}
		})
	}

	pub fn coerce_all(&mut self, records: Vec<SourceRecord>) -> Vec<CanonicalRecord> {
		records.into_iter().map(|r| self.coerce(r)).collect()
	}
}

/// Result of writing a merged table to disk.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
	pub path: PathBuf,
	pub table: CanonicalTable,
	pub stats: MergeStats,
}

#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
	loader: TableLoader,
}

impl MergeEngine {
	pub fn new(loader: TableLoader) -> Self {
		Self { loader }
	}

	/// Merge sheets into one table. Row order is input-sheet order, then
	/// row order within each sheet. An empty input is rejected.
	pub fn merge(&self, sheets: &[RawSheet]) -> Result<(CanonicalTable, MergeStats), EngineError> {
		if sheets.is_empty() {
			return Err(EngineError::NoFiles);
		}

		let mut stats = MergeStats::default();
		let mut coercer = CountCoercer::default();
		let mut records = Vec::new();
		for sheet in sheets {
			let loaded = self.loader.load(sheet);
			stats.rows_per_source.push(loaded.len());
			records.extend(coercer.coerce_all(loaded));
		}
		stats.coerced_cells = coercer.coerced_cells;

		if stats.coerced_cells > 0 {
			tracing::warn!(
				cells = stats.coerced_cells,
				"non-numeric headcount cells were set to 0"
			);
		}
		tracing::info!(
			sources = sheets.len(),
			rows = records.len(),
			"merged sheets into canonical table"
		);

		Ok((CanonicalTable::new(records), stats))
	}

	/// Merge and render the result as a grouped-header workbook under a
	/// fresh unique name in `output_dir`.
	pub fn merge_into(&self, sheets: &[RawSheet], output_dir: &Path) -> Result<MergeOutcome, EngineError> {
		let (table, stats) = self.merge(sheets)?;
		let path = render::unique_output_path(output_dir, "merged")?;
		render::write_canonical(&table, &path)?;
		Ok(MergeOutcome { path, table, stats })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn flat_sheet(name: &str, rows: &[(&str, &str, &str)]) -> RawSheet {
		let mut grid = vec![vec![
			"Наименование ВУЗа".to_string(),
			"Планируем студентов".to_string(),
			"Планируем преподавателей".to_string(),
		]];
		for (vuz, students, instructors) in rows {
			grid.push(vec![vuz.to_string(), students.to_string(), instructors.to_string()]);
		}
		RawSheet::new(name, grid)
	}

	#[test]
	fn parse_count_fallbacks() {
		assert_eq!(parse_count("12"), Some(12));
		assert_eq!(parse_count(" 7.9 "), Some(7));
		assert_eq!(parse_count("1e2"), Some(100));
		assert_eq!(parse_count(""), None);
		assert_eq!(parse_count("двадцать"), None);
		assert_eq!(parse_count("-3"), None);
		assert_eq!(parse_count("NaN"), None);
		assert_eq!(parse_count("inf"), None);
		assert_eq!(parse_count("9007199254740992"), Some(MAX_COUNT));
		assert_eq!(parse_count("9007199254740993.5"), None);
		assert_eq!(parse_count("1e19"), None);
	}

	#[test]
	fn oversized_counts_fall_back_to_zero() {
		let sheet = flat_sheet("big.xlsx", &[("A", "1e19", "2"), ("B", "1e19", "3")]);
		let (table, stats) = MergeEngine::default().merge(&[sheet]).expect("merge");
		let students: Vec<u64> = table.iter().map(|r| r.planiruetsya_studentov).collect();
		assert_eq!(students, vec![0, 0]);
		assert_eq!(stats.coerced_cells, 2);
		assert_eq!(table.total_students(), 0);
		assert_eq!(table.total_instructors(), 5);
	}

	#[test]
	fn empty_input_fails_fast() {
		let err = MergeEngine::default().merge(&[]).expect_err("no files");
		assert!(matches!(err, EngineError::NoFiles));
	}

	#[test]
	fn merge_is_ordered_and_additive() {
		let a = flat_sheet("a.xlsx", &[("A1", "10", "1"), ("A2", "x", "")]);
		let b = flat_sheet("b.xlsx", &[("B1", "3.7", "2"), ("B2", "", "4"), ("B3", "5", "-1")]);
		let (table, stats) = MergeEngine::default().merge(&[a, b]).expect("merge");

		assert_eq!(table.len(), 5);
		assert_eq!(stats.rows_per_source, vec![2, 3]);
		let names: Vec<&str> = table.iter().map(|r| r.nazvanie_vuza.as_str()).collect();
		assert_eq!(names, vec!["A1", "A2", "B1", "B2", "B3"]);

		let students: Vec<u64> = table.iter().map(|r| r.planiruetsya_studentov).collect();
		assert_eq!(students, vec![10, 0, 3, 0, 5]);
		let instructors: Vec<u64> = table.iter().map(|r| r.planiruetsya_prepodavatelej).collect();
		assert_eq!(instructors, vec![1, 0, 2, 4, 0]);
		// "x" and "-1" fell back; blanks are not counted
		assert_eq!(stats.coerced_cells, 2);
	}
}
