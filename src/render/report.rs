use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use serde::Serialize;

use crate::error::EngineError;
use crate::schema::{CanonicalRecord, CanonicalTable};

pub const REPORT_SHEET_NAME: &str = "Отчёт";
pub const REPORT_TITLE: &str = "ИТОГОВЫЙ ПЛАН СБОРОВ";
pub const TOTAL_LABEL: &str = "ИТОГО";

const HEADERS: [&str; 8] = [
	"Округ",
	"ОВУ",
	"ВУЗ",
	"ВУС",
	"Наименование ВУС",
	"Программа",
	"Студентов",
	"Преподавателей",
];

/// Totals row values, as written to the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
	pub rows: usize,
	pub total_students: u64,
	pub total_instructors: u64,
}

impl ReportSummary {
	pub fn of(table: &CanonicalTable) -> Self {
		Self {
			rows: table.len(),
			total_students: table.total_students(),
			total_instructors: table.total_instructors(),
		}
	}
}

enum ReportCell<'a> {
	Text(&'a str),
	Number(u64),
}

fn report_row(record: &CanonicalRecord) -> [ReportCell<'_>; 8] {
	[
		ReportCell::Text(&record.okrug_vuza),
		ReportCell::Text(&record.ovu_otv_podgotovku),
		ReportCell::Text(&record.nazvanie_vuza),
		ReportCell::Text(&record.vus_no),
		ReportCell::Text(&record.vus_naimenovanie),
		ReportCell::Text(&record.programma_podgotovki),
		ReportCell::Number(record.planiruetsya_studentov),
		ReportCell::Number(record.planiruetsya_prepodavatelej),
	]
}

/// Write the eight-column summary sheet: a merged title band, a styled
/// header row, one row per record and a totals row summing students and
/// instructors.
pub fn write_report(table: &CanonicalTable, path: &Path) -> Result<ReportSummary, EngineError> {
	let summary = ReportSummary::of(table);

	let border = Format::new().set_border(FormatBorder::Thin);
	let center = border
		.clone()
		.set_align(FormatAlign::Center)
		.set_align(FormatAlign::VerticalCenter)
		.set_text_wrap();
	let title = Format::new()
		.set_bold()
		.set_font_size(14)
		.set_font_color(0xFFFFFF)
		.set_background_color(0x4B5320)
		.set_align(FormatAlign::Center)
		.set_align(FormatAlign::VerticalCenter)
		.set_text_wrap();
	let header = center
		.clone()
		.set_bold()
		.set_font_color(0xFFFFFF)
		.set_background_color(0x6B8E23);
	let total = center.clone().set_bold();

	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	sheet.set_name(REPORT_SHEET_NAME)?;

	sheet.merge_range(0, 0, 0, 7, REPORT_TITLE, &title)?;
	for (col, text) in HEADERS.iter().enumerate() {
		sheet.write_string_with_format(1, col as u16, *text, &header)?;
	}

	let mut row = 2u32;
	for record in table.iter() {
		for (col, cell) in report_row(record).into_iter().enumerate() {
			let col = col as u16;
			match cell {
				ReportCell::Text(text) => sheet.write_string_with_format(row, col, text, &center)?,
				ReportCell::Number(n) => sheet.write_number_with_format(row, col, n as f64, &center)?,
			};
		}
		row += 1;
	}

	for col in 0..8u16 {
		sheet.write_blank(row, col, &total)?;
	}
	sheet.write_string_with_format(row, 5, TOTAL_LABEL, &total)?;
	sheet.write_number_with_format(row, 6, summary.total_students as f64, &total)?;
	sheet.write_number_with_format(row, 7, summary.total_instructors as f64, &total)?;

	for col in 0..8u16 {
		sheet.set_column_width(col, 24)?;
	}

	workbook.save(path)?;
	tracing::info!(
		path = %path.display(),
		rows = summary.rows,
		total_students = summary.total_students,
		total_instructors = summary.total_instructors,
		"wrote report workbook"
	);
	Ok(summary)
}
