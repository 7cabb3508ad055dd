use calamine::{Data, Reader, open_workbook_auto_from_rs};
use chrono::{NaiveDateTime, Timelike};
use std::io::{Read, Seek};

use crate::error::EngineError;
use crate::ingest::RawSheet;

/// Read the first worksheet of a workbook (xlsx, xlsm, xls, ods) into a
/// raw grid of cell text.
pub fn parse_workbook<R: Read + Seek + Clone>(name: &str, reader: R) -> Result<RawSheet, EngineError> {
	let mut workbook = open_workbook_auto_from_rs(reader)
		.map_err(|e| EngineError::unreadable(name, format!("failed to open workbook: {e}")))?;

	let sheet_names = workbook.sheet_names().to_vec();
	let Some(sheet_name) = sheet_names.first() else {
		return Err(EngineError::EmptyWorkbook {
			name: name.to_string(),
		});
	};

	let range = workbook
		.worksheet_range(sheet_name)
		.map_err(|e| EngineError::unreadable(name, format!("failed to read worksheet: {e}")))?;

	let rows = range
		.rows()
		.map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
		.collect();
	let sheet = RawSheet::new(name, rows);
	if sheet.is_empty() {
		return Err(EngineError::EmptyWorkbook {
			name: name.to_string(),
		});
	}

	tracing::debug!(
		source = name,
		sheet = sheet_name.as_str(),
		rows = sheet.rows.len(),
		"read workbook sheet"
	);
	Ok(sheet)
}

/// Render a cell the way a person reading the sheet would type it.
pub fn cell_text(cell: &Data) -> String {
	match cell {
		Data::Empty | Data::Error(_) => String::new(),
		Data::String(s) => s.clone(),
		Data::Int(i) => i.to_string(),
		Data::Float(f) => float_text(*f),
		Data::Bool(b) => b.to_string(),
		Data::DateTime(dt) => dt
			.as_datetime()
			.map(date_text)
			.unwrap_or_else(|| float_text(dt.as_f64())),
		Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
	}
}

/// Integral floats lose the fractional part so ordinal markers read as
/// `"1"` rather than `"1.0"`.
fn float_text(f: f64) -> String {
	if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
		format!("{}", f as i64)
	} else {
		f.to_string()
	}
}

fn date_text(dt: NaiveDateTime) -> String {
	if dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0 {
		dt.format("%d.%m.%Y").to_string()
	} else {
		dt.format("%d.%m.%Y %H:%M").to_string()
	}
}
