use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::error::EngineError;
use crate::schema::{CanonicalField, CanonicalTable, CellValue};

pub const CANONICAL_SHEET_NAME: &str = "Сводный план";

/// Rows taken by the grouped header: group, title, ordinal.
pub const HEADER_ROWS: u32 = 3;

struct Formats {
	header: Format,
	ordinal: Format,
	text: Format,
	count: Format,
}

impl Formats {
	fn new() -> Self {
		let header = Format::new()
			.set_bold()
			.set_align(FormatAlign::Center)
			.set_align(FormatAlign::VerticalCenter)
			.set_text_wrap()
			.set_background_color(0xD9E1C6)
			.set_border(FormatBorder::Thin);
		let ordinal = Format::new()
			.set_align(FormatAlign::Center)
			.set_italic()
			.set_border(FormatBorder::Thin);
		let text = Format::new().set_text_wrap().set_border(FormatBorder::Thin);
		let count = Format::new()
			.set_num_format("0")
			.set_align(FormatAlign::Center)
			.set_border(FormatBorder::Thin);
		Self {
			header,
			ordinal,
			text,
			count,
		}
	}
}

/// Write `table` as a workbook with a three-row grouped header: group
/// labels (adjacent equal groups merged), column titles, then ordinals
/// 1..16. One row per record follows.
pub fn write_canonical(table: &CanonicalTable, path: &Path) -> Result<(), EngineError> {
	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	sheet.set_name(CANONICAL_SHEET_NAME)?;
	let formats = Formats::new();

	write_grouped_header(sheet, &formats)?;

	for (idx, record) in table.iter().enumerate() {
		let row = HEADER_ROWS + idx as u32;
		for (col, field) in CanonicalField::ALL.iter().enumerate() {
			let col = col as u16;
			match record.cell(*field) {
				CellValue::Text(text) => {
					sheet.write_string_with_format(row, col, text, &formats.text)?;
				}
				CellValue::Count(n) => {
					sheet.write_number_with_format(row, col, n as f64, &formats.count)?;
				}
			}
		}
	}

	for (col, field) in CanonicalField::ALL.iter().enumerate() {
		let width = if field.is_count() { 14 } else { 22 };
		sheet.set_column_width(col as u16, width)?;
	}
	sheet.set_freeze_panes(HEADER_ROWS, 0)?;

	workbook.save(path)?;
	tracing::info!(
		path = %path.display(),
		rows = table.len(),
		"wrote canonical workbook"
	);
	Ok(())
}

fn write_grouped_header(sheet: &mut Worksheet, formats: &Formats) -> Result<(), EngineError> {
	let fields = CanonicalField::ALL;
	let mut start = 0;
	while start < fields.len() {
		let group = fields[start].group();
		let end = fields[start..]
			.iter()
			.position(|f| f.group() != group)
			.map(|offset| start + offset)
			.unwrap_or(fields.len());
		let (first, last) = (start as u16, (end - 1) as u16);
		if first == last {
			sheet.write_string_with_format(0, first, group, &formats.header)?;
		} else {
			sheet.merge_range(0, first, 0, last, group, &formats.header)?;
		}
		start = end;
	}

	for (col, field) in fields.iter().enumerate() {
		let col = col as u16;
		sheet.write_string_with_format(1, col, field.title(), &formats.header)?;
		sheet.write_number_with_format(2, col, field.ordinal() as f64, &formats.ordinal)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ingest::{TableLoader, read_sheet_file};
	use crate::schema::CanonicalRecord;

	#[test]
	fn rendered_workbook_reloads_through_the_loader() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("canonical.xlsx");
		let table = CanonicalTable::new(vec![
			CanonicalRecord {
				okrug_vuza: "ЗВО".into(),
				vus_no: "021500".into(),
				programma_podgotovki: "Сержанты".into(),
				planiruetsya_prepodavatelej: 2,
				planiruetsya_studentov: 25,
				mobilnyy: "+7 900 000-00-00".into(),
				..Default::default()
			},
			CanonicalRecord {
				nazvanie_vuza: "МГУ".into(),
				planiruetsya_studentov: 7,
				..Default::default()
			},
		]);
		write_canonical(&table, &path).expect("write");

		let raw = read_sheet_file(&path).expect("read back");
		assert_eq!(raw.rows[0][0], "Образовательная организация");
		assert_eq!(raw.rows[1][3], "№ ВУС");
		assert_eq!(raw.rows[2][0], "1");
		assert_eq!(raw.rows[2][15], "16");

		let loader = TableLoader::default();
		assert_eq!(loader.layout(&raw).depth, 3);
		let records = loader.load(&raw);
		assert_eq!(records.len(), 2);
		assert_eq!(records[0].okrug_vuza, "ЗВО");
		assert_eq!(records[0].vus_no, "021500");
		assert_eq!(records[0].planiruetsya_studentov, "25");
		assert_eq!(records[0].planiruetsya_prepodavatelej, "2");
		assert_eq!(records[0].mobilnyy, "+7 900 000-00-00");
		assert_eq!(records[1].nazvanie_vuza, "МГУ");
		assert_eq!(records[1].planiruetsya_studentov, "7");
	}
}
