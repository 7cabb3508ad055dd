pub mod csv;
pub mod xlsx;

pub use csv::parse_delimited;
pub use xlsx::{cell_text, parse_workbook};

use std::io::Cursor;
use std::path::Path;

use crate::error::EngineError;
use crate::ingest::RawSheet;
use crate::ingest::format_detection::{FormatType, detect_format};

/// Peek this many bytes for format detection.
const MAX_PEEK: usize = 64 * 1024;

/// Read one uploaded sheet from memory. `hint` is usually the file
/// extension and only matters when the bytes themselves are ambiguous.
pub fn read_sheet(name: &str, bytes: Vec<u8>, hint: Option<&str>) -> Result<RawSheet, EngineError> {
	let peek = &bytes[..bytes.len().min(MAX_PEEK)];
	let format = detect_format(peek, hint);
	tracing::debug!(source = name, format = format.as_str(), bytes = bytes.len(), "detected input format");

	match format {
		FormatType::Xlsx | FormatType::Xls => parse_workbook(name, Cursor::new(bytes)),
		FormatType::Delimited(delimiter) => parse_delimited(name, bytes.as_slice(), delimiter),
		FormatType::Binary if hinted_workbook(hint) => Err(EngineError::unreadable(
			name,
			"workbook extension but no xlsx/xls/ods signature",
		)),
		FormatType::Binary => Err(EngineError::UnsupportedFormat {
			name: name.to_string(),
			kind: format.as_str().to_string(),
		}),
	}
}

fn hinted_workbook(hint: Option<&str>) -> bool {
	hint.and_then(FormatType::from_hint)
		.is_some_and(|format| format.is_workbook())
}

/// Read a sheet from disk, using the extension as the format hint.
pub fn read_sheet_file(path: &Path) -> Result<RawSheet, EngineError> {
	let name = path
		.file_name()
		.map(|n| n.to_string_lossy().into_owned())
		.unwrap_or_else(|| path.display().to_string());
	let bytes = std::fs::read(path).map_err(|e| EngineError::unreadable(&name, e))?;
	let hint = path.extension().and_then(|e| e.to_str());
	read_sheet(&name, bytes, hint)
}
