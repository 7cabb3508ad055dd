//! Header-depth detection and multi-row header flattening.
//!
//! Grouped headers in these plans end with a row of column ordinals
//! (1, 2, 3, ... 16). Finding that row tells how many rows the header block
//! spans. Group labels above it are stored once per merged cell, so they are
//! forward-filled before each column's fragments are joined into one label.

use once_cell::sync::Lazy;
use regex::Regex;

/// Only this many leading rows are inspected for the ordinal marker row.
pub const MAX_HEADER_ROWS: usize = 6;

/// Minimum number of pure-digit cells in an ordinal marker row.
pub const MIN_ORDINAL_CELLS: usize = 5;

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("static regex"));

/// Number of rows forming the header block, counting the ordinal marker
/// row. Returns 1 when no marker row appears in the first
/// [`MAX_HEADER_ROWS`] rows, meaning a plain single header row.
pub fn detect_header_depth(rows: &[Vec<String>]) -> usize {
	rows.iter()
		.take(MAX_HEADER_ROWS)
		.position(|row| is_ordinal_row(row))
		.map(|idx| idx + 1)
		.unwrap_or(1)
}

/// A row with at least [`MIN_ORDINAL_CELLS`] digit-only cells, one of which
/// is exactly `1`.
pub fn is_ordinal_row(row: &[String]) -> bool {
	let mut numeric = 0;
	let mut has_one = false;
	for cell in row {
		let cell = cell.trim();
		if DIGITS.is_match(cell) {
			numeric += 1;
			has_one |= cell == "1";
		}
	}
	numeric >= MIN_ORDINAL_CELLS && has_one
}

/// Collapse the header rows above the ordinal marker into one label per
/// column.
///
/// Every row except the last is forward-filled left to right. Each column
/// then joins its distinct non-empty fragments, top to bottom, with a single
/// space.
pub fn flatten_header(header_rows: &[Vec<String>], width: usize) -> Vec<String> {
	let last = header_rows.len().saturating_sub(1);
	let filled: Vec<Vec<String>> = header_rows
		.iter()
		.enumerate()
		.map(|(idx, row)| {
			let mut padded: Vec<String> = (0..width)
				.map(|col| row.get(col).map(|c| c.trim().to_string()).unwrap_or_default())
				.collect();
			if idx < last {
				forward_fill(&mut padded);
			}
			padded
		})
		.collect();

	(0..width)
		.map(|col| {
			let mut fragments: Vec<&str> = Vec::new();
			for row in &filled {
				let cell = row[col].as_str();
				if !cell.is_empty() && !fragments.contains(&cell) {
					fragments.push(cell);
				}
			}
			fragments.join(" ")
		})
		.collect()
}

fn forward_fill(row: &mut [String]) {
	let mut current: Option<String> = None;
	for cell in row.iter_mut() {
		if cell.is_empty() {
			if let Some(value) = &current {
				cell.clone_from(value);
			}
		} else {
			current = Some(cell.clone());
		}
	}
}
