//! Common fixtures for integration tests: workbooks in both header dialects
//! written with `rust_xlsxwriter`, the same way a unit would save them.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook};

/// Headers of the single-row dialect, in the unit's own wording.
pub const FLAT_HEADERS: [&str; 16] = [
	"Округ ВУЗа",
	"ОВУ, отв. за подготовку",
	"Наименование ВУЗа",
	"Код ВУС",
	"Наименование ВУС",
	"№ должности",
	"Наименование должности",
	"Сбор/стаж",
	"Программа подготовки",
	"Место проведения сбора",
	"Планируем преподавателей",
	"Планируем студентов",
	"Начало",
	"Окончание",
	"ФИО ответственного",
	"Мобильный",
];

/// (group, title) pairs of the grouped dialect. Group labels are written
/// once per merged span.
pub const GROUPED_HEADERS: [(&str, &str); 16] = [
	("Сведения о ВУЗе", "Округ ВУЗа"),
	("Сведения о ВУЗе", "ОВУ, отв. за подготовку"),
	("Сведения о ВУЗе", "Наименование ВУЗа"),
	("ВУС", "Код ВУС"),
	("ВУС", "Наименование ВУС"),
	("Должность", "Номер должности"),
	("Должность", "Наименование должности"),
	("Сбор", "Сбор/стажировка"),
	("Сбор", "Программа подготовки"),
	("Сбор", "Место проведения сбора"),
	("Планируется", "преподавателей"),
	("Планируется", "студентов"),
	("Срок проведения", "начало"),
	("Срок проведения", "окончание"),
	("Ответственный", "ФИО ответственного"),
	("Ответственный", "Мобильный"),
];

/// Columns in front of the 16 data columns of the grouped dialect; they have
/// no ordinal and resolve to nothing.
pub const GROUPED_LEADING: [&str; 2] = ["№ п/п", "Код подразделения"];

/// Plain cell value for fixture rows: numbers are written as numbers.
pub enum Cell<'a> {
	Text(&'a str),
	Number(f64),
}

fn write_row(sheet: &mut rust_xlsxwriter::Worksheet, row: u32, first_col: u16, cells: &[Cell<'_>]) {
	for (idx, cell) in cells.iter().enumerate() {
		let col = first_col + idx as u16;
		match cell {
			Cell::Text(text) => {
				sheet.write_string(row, col, *text).expect("write string");
			}
			Cell::Number(n) => {
				sheet.write_number(row, col, *n).expect("write number");
			}
		}
	}
}

/// Workbook with one header row followed by `rows`.
pub fn flat_workbook(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	for (col, header) in FLAT_HEADERS.iter().enumerate() {
		sheet.write_string(0, col as u16, *header).expect("header");
	}
	for (idx, row) in rows.iter().enumerate() {
		write_row(sheet, 1 + idx as u32, 0, row);
	}
	workbook.save_to_buffer().expect("save flat workbook")
}

/// Workbook with a three-row grouped header ending in ordinals 1..16 and
/// two leading unnumbered columns. `rows` hold the 16 data columns only.
pub fn grouped_workbook(rows: &[Vec<Cell<'_>>]) -> Vec<u8> {
	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	let merged = Format::new().set_bold();
	let lead = GROUPED_LEADING.len() as u16;

	for (col, title) in GROUPED_LEADING.iter().enumerate() {
		sheet
			.merge_range(0, col as u16, 1, col as u16, *title, &merged)
			.expect("leading header");
	}

	let mut start = 0;
	while start < GROUPED_HEADERS.len() {
		let group = GROUPED_HEADERS[start].0;
		let mut end = start;
		while end + 1 < GROUPED_HEADERS.len() && GROUPED_HEADERS[end + 1].0 == group {
			end += 1;
		}
		sheet
			.merge_range(0, lead + start as u16, 0, lead + end as u16, group, &merged)
			.expect("group header");
		start = end + 1;
	}

	for (idx, (_, title)) in GROUPED_HEADERS.iter().enumerate() {
		let col = lead + idx as u16;
		sheet.write_string(1, col, *title).expect("title");
		sheet.write_number(2, col, (idx + 1) as f64).expect("ordinal");
	}

	for (idx, row) in rows.iter().enumerate() {
		let sheet_row = 3 + idx as u32;
		sheet.write_number(sheet_row, 0, (idx + 1) as f64).expect("row number");
		sheet.write_string(sheet_row, 1, "в/ч 00000").expect("unit code");
		write_row(sheet, sheet_row, lead, row);
	}
	workbook.save_to_buffer().expect("save grouped workbook")
}

/// A full 16-column data row.
#[allow(clippy::too_many_arguments)]
pub fn plan_row<'a>(
	okrug: &'a str,
	vuz: &'a str,
	vus: &'a str,
	position: &'a str,
	program: &'a str,
	instructors: Cell<'a>,
	students: Cell<'a>,
	person: &'a str,
) -> Vec<Cell<'a>> {
	vec![
		Cell::Text(okrug),
		Cell::Text("ОВУ СВ"),
		Cell::Text(vuz),
		Cell::Text(vus),
		Cell::Text("как в источнике"),
		Cell::Text(position),
		Cell::Text(""),
		Cell::Text("сбор"),
		Cell::Text(program),
		Cell::Text("Полигон Алабино"),
		instructors,
		students,
		Cell::Text("01.07.2025"),
		Cell::Text("30.07.2025"),
		Cell::Text(person),
		Cell::Text("+7 900 000-00-00"),
	]
}

pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("write fixture");
	path
}

/// Names of the files currently in `dir` (empty when it does not exist).
pub fn files_in(dir: &Path) -> Vec<String> {
	match std::fs::read_dir(dir) {
		Ok(entries) => entries
			.filter_map(Result::ok)
			.map(|e| e.file_name().to_string_lossy().into_owned())
			.collect(),
		Err(_) => Vec::new(),
	}
}
