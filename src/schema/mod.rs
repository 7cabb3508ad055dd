//! The canonical schema every harmonized record carries.
//!
//! Field order is part of the contract with the renderers: it defines the
//! output column order and the ordinal numbering of grouped headers.

pub mod alias;

use serde::Serialize;

pub use alias::{AliasTable, normalize_header};

/// One of the 16 canonical columns, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
	OkrugVuza,
	OvuOtvPodgotovku,
	NazvanieVuza,
	VusNo,
	VusNaimenovanie,
	DoljnostNo,
	DoljnostNaimenovanie,
	SborStazhirovka,
	ProgrammaPodgotovki,
	MestoProvedeniyaUchebnogoSbora,
	PlaniruetsyaPrepodavatelej,
	PlaniruetsyaStudentov,
	SrokProvedeniyaNachalo,
	SrokProvedeniyaOkonchanie,
	FioOtvetstvennogo,
	Mobilnyy,
}

impl CanonicalField {
	pub const COUNT: usize = 16;

	pub const ALL: [CanonicalField; Self::COUNT] = [
		CanonicalField::OkrugVuza,
		CanonicalField::OvuOtvPodgotovku,
		CanonicalField::NazvanieVuza,
		CanonicalField::VusNo,
		CanonicalField::VusNaimenovanie,
		CanonicalField::DoljnostNo,
		CanonicalField::DoljnostNaimenovanie,
		CanonicalField::SborStazhirovka,
		CanonicalField::ProgrammaPodgotovki,
		CanonicalField::MestoProvedeniyaUchebnogoSbora,
		CanonicalField::PlaniruetsyaPrepodavatelej,
		CanonicalField::PlaniruetsyaStudentov,
		CanonicalField::SrokProvedeniyaNachalo,
		CanonicalField::SrokProvedeniyaOkonchanie,
		CanonicalField::FioOtvetstvennogo,
		CanonicalField::Mobilnyy,
	];

	/// Stable identifier used in flat files and as the exact-match key.
	pub fn as_str(&self) -> &'static str {
		match self {
			CanonicalField::OkrugVuza => "okrug_vuza",
			CanonicalField::OvuOtvPodgotovku => "ovu_otv_podgotovku",
			CanonicalField::NazvanieVuza => "nazvanie_vuza",
			CanonicalField::VusNo => "vus_no",
			CanonicalField::VusNaimenovanie => "vus_naimenovanie",
			CanonicalField::DoljnostNo => "doljnost_no",
			CanonicalField::DoljnostNaimenovanie => "doljnost_naimenovanie",
			CanonicalField::SborStazhirovka => "sbor_stazhirovka",
			CanonicalField::ProgrammaPodgotovki => "programma_podgotovki",
			CanonicalField::MestoProvedeniyaUchebnogoSbora => "mesto_provedeniya_uchebnogo_sbora",
			CanonicalField::PlaniruetsyaPrepodavatelej => "planiruetsya_prepodavatelej",
			CanonicalField::PlaniruetsyaStudentov => "planiruetsya_studentov",
			CanonicalField::SrokProvedeniyaNachalo => "srok_provedeniya_nachalo",
			CanonicalField::SrokProvedeniyaOkonchanie => "srok_provedeniya_okonchanie",
			CanonicalField::FioOtvetstvennogo => "fio_otvetstvennogo",
			CanonicalField::Mobilnyy => "mobilnyy",
		}
	}

	/// Group label shown in the first row of a grouped header.
	pub fn group(&self) -> &'static str {
		match self {
			CanonicalField::OkrugVuza
			| CanonicalField::OvuOtvPodgotovku
			| CanonicalField::NazvanieVuza => "Образовательная организация",
			CanonicalField::VusNo | CanonicalField::VusNaimenovanie => "ВУС",
			CanonicalField::DoljnostNo | CanonicalField::DoljnostNaimenovanie => "Должность",
			CanonicalField::SborStazhirovka
			| CanonicalField::ProgrammaPodgotovki
			| CanonicalField::MestoProvedeniyaUchebnogoSbora => "Учебный сбор",
			CanonicalField::PlaniruetsyaPrepodavatelej | CanonicalField::PlaniruetsyaStudentov => {
				"Планируется"
			}
			CanonicalField::SrokProvedeniyaNachalo | CanonicalField::SrokProvedeniyaOkonchanie => {
				"Срок проведения"
			}
			CanonicalField::FioOtvetstvennogo | CanonicalField::Mobilnyy => "Ответственный",
		}
	}

	/// Column title shown under the group label.
	pub fn title(&self) -> &'static str {
		match self {
			CanonicalField::OkrugVuza => "Округ ВУЗа",
			CanonicalField::OvuOtvPodgotovku => "ОВУ, отв. за подготовку",
			CanonicalField::NazvanieVuza => "Наименование ВУЗа",
			CanonicalField::VusNo => "№ ВУС",
			CanonicalField::VusNaimenovanie => "Наименование ВУС",
			CanonicalField::DoljnostNo => "№ должности",
			CanonicalField::DoljnostNaimenovanie => "Наименование должности",
			CanonicalField::SborStazhirovka => "Сбор/стажировка",
			CanonicalField::ProgrammaPodgotovki => "Программа подготовки",
			CanonicalField::MestoProvedeniyaUchebnogoSbora => "Место проведения учебного сбора",
			CanonicalField::PlaniruetsyaPrepodavatelej => "Преподавателей",
			CanonicalField::PlaniruetsyaStudentov => "Студентов",
			CanonicalField::SrokProvedeniyaNachalo => "Начало",
			CanonicalField::SrokProvedeniyaOkonchanie => "Окончание",
			CanonicalField::FioOtvetstvennogo => "ФИО ответственного",
			CanonicalField::Mobilnyy => "Мобильный телефон",
		}
	}

	/// 1-based ordinal printed in the marker row.
	pub fn ordinal(&self) -> usize {
		*self as usize + 1
	}

	pub fn is_count(&self) -> bool {
		matches!(
			self,
			CanonicalField::PlaniruetsyaPrepodavatelej | CanonicalField::PlaniruetsyaStudentov
		)
	}
}

/// A harmonized row. The two planned-headcount fields are generic so the
/// same shape serves the loader (raw text) and the merged table (integers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record<N> {
	pub okrug_vuza: String,
	pub ovu_otv_podgotovku: String,
	pub nazvanie_vuza: String,
	pub vus_no: String,
	pub vus_naimenovanie: String,
	pub doljnost_no: String,
	pub doljnost_naimenovanie: String,
	pub sbor_stazhirovka: String,
	pub programma_podgotovki: String,
	pub mesto_provedeniya_uchebnogo_sbora: String,
	pub planiruetsya_prepodavatelej: N,
	pub planiruetsya_studentov: N,
	pub srok_provedeniya_nachalo: String,
	pub srok_provedeniya_okonchanie: String,
	pub fio_otvetstvennogo: String,
	pub mobilnyy: String,
}

/// Loader output: every cell still text.
pub type SourceRecord = Record<String>;

/// Merge and decode output: headcounts coerced to non-negative integers.
pub type CanonicalRecord = Record<u64>;

impl<N> Record<N> {
	/// Text value of a non-count field; `None` for the two count fields.
	pub fn text(&self, field: CanonicalField) -> Option<&str> {
		let value = match field {
			CanonicalField::OkrugVuza => &self.okrug_vuza,
			CanonicalField::OvuOtvPodgotovku => &self.ovu_otv_podgotovku,
			CanonicalField::NazvanieVuza => &self.nazvanie_vuza,
			CanonicalField::VusNo => &self.vus_no,
			CanonicalField::VusNaimenovanie => &self.vus_naimenovanie,
			CanonicalField::DoljnostNo => &self.doljnost_no,
			CanonicalField::DoljnostNaimenovanie => &self.doljnost_naimenovanie,
			CanonicalField::SborStazhirovka => &self.sbor_stazhirovka,
			CanonicalField::ProgrammaPodgotovki => &self.programma_podgotovki,
			CanonicalField::MestoProvedeniyaUchebnogoSbora => {
				&self.mesto_provedeniya_uchebnogo_sbora
			}
			CanonicalField::SrokProvedeniyaNachalo => &self.srok_provedeniya_nachalo,
			CanonicalField::SrokProvedeniyaOkonchanie => &self.srok_provedeniya_okonchanie,
			CanonicalField::FioOtvetstvennogo => &self.fio_otvetstvennogo,
			CanonicalField::Mobilnyy => &self.mobilnyy,
			CanonicalField::PlaniruetsyaPrepodavatelej | CanonicalField::PlaniruetsyaStudentov => {
				return None;
			}
		};
		Some(value.as_str())
	}

	fn text_mut(&mut self, field: CanonicalField) -> Option<&mut String> {
		let value = match field {
			CanonicalField::OkrugVuza => &mut self.okrug_vuza,
			CanonicalField::OvuOtvPodgotovku => &mut self.ovu_otv_podgotovku,
			CanonicalField::NazvanieVuza => &mut self.nazvanie_vuza,
			CanonicalField::VusNo => &mut self.vus_no,
			CanonicalField::VusNaimenovanie => &mut self.vus_naimenovanie,
			CanonicalField::DoljnostNo => &mut self.doljnost_no,
			CanonicalField::DoljnostNaimenovanie => &mut self.doljnost_naimenovanie,
			CanonicalField::SborStazhirovka => &mut self.sbor_stazhirovka,
			CanonicalField::ProgrammaPodgotovki => &mut self.programma_podgotovki,
			CanonicalField::MestoProvedeniyaUchebnogoSbora => {
				&mut self.mesto_provedeniya_uchebnogo_sbora
			}
			CanonicalField::SrokProvedeniyaNachalo => &mut self.srok_provedeniya_nachalo,
			CanonicalField::SrokProvedeniyaOkonchanie => &mut self.srok_provedeniya_okonchanie,
			CanonicalField::FioOtvetstvennogo => &mut self.fio_otvetstvennogo,
			CanonicalField::Mobilnyy => &mut self.mobilnyy,
			CanonicalField::PlaniruetsyaPrepodavatelej | CanonicalField::PlaniruetsyaStudentov => {
				return None;
			}
		};
		Some(value)
	}

	/// Convert the headcount fields, leaving every text field untouched.
	pub fn map_counts<M>(self, mut f: impl FnMut(N) -> M) -> Record<M> {
		Record {
			okrug_vuza: self.okrug_vuza,
			ovu_otv_podgotovku: self.ovu_otv_podgotovku,
			nazvanie_vuza: self.nazvanie_vuza,
			vus_no: self.vus_no,
			vus_naimenovanie: self.vus_naimenovanie,
			doljnost_no: self.doljnost_no,
			doljnost_naimenovanie: self.doljnost_naimenovanie,
			sbor_stazhirovka: self.sbor_stazhirovka,
			programma_podgotovki: self.programma_podgotovki,
			mesto_provedeniya_uchebnogo_sbora: self.mesto_provedeniya_uchebnogo_sbora,
			planiruetsya_prepodavatelej: f(self.planiruetsya_prepodavatelej),
			planiruetsya_studentov: f(self.planiruetsya_studentov),
			srok_provedeniya_nachalo: self.srok_provedeniya_nachalo,
			srok_provedeniya_okonchanie: self.srok_provedeniya_okonchanie,
			fio_otvetstvennogo: self.fio_otvetstvennogo,
			mobilnyy: self.mobilnyy,
		}
	}
}

impl SourceRecord {
	/// Every field as text, in canonical order.
	pub fn get(&self, field: CanonicalField) -> &str {
		match field {
			CanonicalField::PlaniruetsyaPrepodavatelej => &self.planiruetsya_prepodavatelej,
			CanonicalField::PlaniruetsyaStudentov => &self.planiruetsya_studentov,
			other => self.text(other).unwrap_or_default(),
		}
	}

	pub fn set(&mut self, field: CanonicalField, value: String) {
		match field {
			CanonicalField::PlaniruetsyaPrepodavatelej => self.planiruetsya_prepodavatelej = value,
			CanonicalField::PlaniruetsyaStudentov => self.planiruetsya_studentov = value,
			other => {
				if let Some(slot) = self.text_mut(other) {
					*slot = value;
				}
			}
		}
	}
}

/// Cell value as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue<'a> {
	Text(&'a str),
	Count(u64),
}

impl CanonicalRecord {
	pub fn cell(&self, field: CanonicalField) -> CellValue<'_> {
		match field {
			CanonicalField::PlaniruetsyaPrepodavatelej => {
				CellValue::Count(self.planiruetsya_prepodavatelej)
			}
			CanonicalField::PlaniruetsyaStudentov => CellValue::Count(self.planiruetsya_studentov),
			other => CellValue::Text(self.text(other).unwrap_or_default()),
		}
	}
}

/// Ordered sequence of harmonized records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalTable {
	pub records: Vec<CanonicalRecord>,
}

impl CanonicalTable {
	pub fn new(records: Vec<CanonicalRecord>) -> Self {
		Self { records }
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
		self.records.iter()
	}

	/// Sum of planned students; saturates at `u64::MAX` instead of wrapping.
	pub fn total_students(&self) -> u64 {
		self.records
			.iter()
			.fold(0u64, |acc, r| acc.saturating_add(r.planiruetsya_studentov))
	}

	pub fn total_instructors(&self) -> u64 {
		self.records
			.iter()
			.fold(0u64, |acc, r| acc.saturating_add(r.planiruetsya_prepodavatelej))
	}
}
