use serde::Serialize;

use crate::ingest::header::{detect_header_depth, flatten_header};
use crate::ingest::raw_sheet::{RawSheet, is_blank_row};
use crate::schema::{AliasTable, CanonicalField, SourceRecord};

/// One source column and the canonical field it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
	pub index: usize,
	pub label: String,
	pub field: Option<CanonicalField>,
}

/// How a raw sheet's header was interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
	pub source: String,
	/// Header rows including the ordinal marker row; 1 for a plain header.
	pub depth: usize,
	/// Index of the first body row in the sheet grid.
	pub body_start: usize,
	pub columns: Vec<ColumnMapping>,
}

impl SheetLayout {
	/// Non-blank source labels that matched no canonical field.
	pub fn unmapped_labels(&self) -> Vec<&str> {
		self.columns
			.iter()
			.filter(|c| c.field.is_none() && !c.label.is_empty())
			.map(|c| c.label.as_str())
			.collect()
	}

	/// Canonical fields no source column feeds; they load as empty text.
	pub fn missing_fields(&self) -> Vec<CanonicalField> {
		CanonicalField::ALL
			.into_iter()
			.filter(|f| !self.columns.iter().any(|c| c.field == Some(*f)))
			.collect()
	}
}

/// Turns raw sheets into rows of the canonical schema.
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
	aliases: AliasTable,
}

impl TableLoader {
	pub fn new(aliases: AliasTable) -> Self {
		Self { aliases }
	}

	pub fn aliases(&self) -> &AliasTable {
		&self.aliases
	}

	/// Detect header depth, build one label per column and resolve it.
	pub fn layout(&self, sheet: &RawSheet) -> SheetLayout {
		let depth = detect_header_depth(&sheet.rows);
		let width = sheet.width();

		let (labels, body_start) = if depth <= 1 {
			let labels = (0..width)
				.map(|col| {
					sheet
						.rows
						.first()
						.and_then(|row| row.get(col))
						.map(|c| c.trim().to_string())
						.unwrap_or_default()
				})
				.collect::<Vec<_>>();
			(labels, 1)
		} else {
			// Rows above the ordinal marker carry the labels.
			(flatten_header(&sheet.rows[..depth - 1], width), depth)
		};

		let columns = labels
			.into_iter()
			.enumerate()
			.map(|(index, label)| {
				let field = self.aliases.resolve(&label);
				ColumnMapping { index, label, field }
			})
			.collect();

		SheetLayout {
			source: sheet.name.clone(),
			depth,
			body_start,
			columns,
		}
	}

	/// Load the body rows into records carrying all canonical fields, one
	/// record per row. Blank rows inside the body become empty records;
	/// only trailing blank rows are cut. Unresolved columns are dropped and
	/// fields without a source column stay empty. When several columns
	/// resolve to one field the rightmost wins.
	pub fn load(&self, sheet: &RawSheet) -> Vec<SourceRecord> {
		let layout = self.layout(sheet);

		let unmapped = layout.unmapped_labels();
		if !unmapped.is_empty() {
			tracing::warn!(
				source = sheet.name.as_str(),
				columns = ?unmapped,
				"source columns matched no canonical field and were dropped"
			);
		}
		let missing = layout.missing_fields();
		if !missing.is_empty() {
			tracing::debug!(
				source = sheet.name.as_str(),
				fields = ?missing.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
				"canonical fields without a source column are left empty"
			);
		}

		let body = sheet.rows.get(layout.body_start..).unwrap_or_default();
		let end = body
			.iter()
			.rposition(|row| !is_blank_row(row))
			.map_or(0, |last| last + 1);
		let records: Vec<SourceRecord> = body[..end]
			.iter()
			.map(|row| {
				let mut record = SourceRecord::default();
				for column in &layout.columns {
					if let Some(field) = column.field {
						let value = row.get(column.index).map(|c| c.trim()).unwrap_or_default();
						record.set(field, value.to_string());
					}
				}
				record
			})
			.collect();

		tracing::debug!(
			source = sheet.name.as_str(),
			depth = layout.depth,
			rows = records.len(),
			"loaded sheet"
		);
		records
	}
}
