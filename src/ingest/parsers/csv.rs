use std::io::Read;

use crate::error::EngineError;
use crate::ingest::RawSheet;

/// Read delimited text into a raw grid. No row is treated as a header
/// here; header depth is decided later from the grid itself. Rows may have
/// differing lengths and invalid UTF-8 is decoded lossily.
pub fn parse_delimited<R: Read>(name: &str, reader: R, delimiter: u8) -> Result<RawSheet, EngineError> {
	let mut rdr = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.delimiter(delimiter)
		.trim(csv::Trim::All)
		.from_reader(reader);

	let mut rows = Vec::new();
	for result in rdr.byte_records() {
		let record = result.map_err(|e| EngineError::unreadable(name, e))?;
		rows.push(
			record
				.iter()
				.map(|field| String::from_utf8_lossy(field).into_owned())
				.collect::<Vec<_>>(),
		);
	}

	let sheet = RawSheet::new(name, rows);
	if sheet.is_empty() {
		return Err(EngineError::EmptyWorkbook {
			name: name.to_string(),
		});
	}
	Ok(sheet)
}
