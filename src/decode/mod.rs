//! Rewrites the specialty and position names of a canonical table from
//! their codes.
//!
//! Rows whose training program names an officer track have no position:
//! both position fields are cleared. Clearing drops the code, so decoding
//! the output a second time cannot bring a position name back for those
//! rows.

pub mod lookup;

pub use lookup::LookupTables;

use crate::schema::{CanonicalRecord, CanonicalTable};

/// Marker word in the program field that identifies officer rows.
pub const DEFAULT_OFFICER_MARKER: &str = "офицер";

/// Lookup misses and officer rows seen during one decode pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
	pub officer_rows: usize,
	/// Rows whose specialty code had no entry; the original name was kept.
	pub specialty_misses: usize,
	/// Non-officer rows whose position code had no entry; the name was
	/// cleared.
	pub position_misses: usize,
}

#[derive(Debug, Clone)]
pub struct Decoder {
	lookups: LookupTables,
	officer_marker: String,
}

impl Default for Decoder {
	fn default() -> Self {
		Self::builtin()
	}
}

impl Decoder {
	pub fn new(lookups: LookupTables, officer_marker: impl Into<String>) -> Self {
		Self {
			lookups,
			officer_marker: officer_marker.into().to_lowercase(),
		}
	}

	pub fn builtin() -> Self {
		Self::new(LookupTables::builtin(), DEFAULT_OFFICER_MARKER)
	}

	pub fn is_officer(&self, record: &CanonicalRecord) -> bool {
		!self.officer_marker.is_empty()
			&& record
				.programma_podgotovki
				.to_lowercase()
				.contains(&self.officer_marker)
	}

	/// Produce a decoded copy of `table`; the input is left untouched.
	pub fn decode(&self, table: &CanonicalTable) -> (CanonicalTable, DecodeStats) {
		let mut stats = DecodeStats::default();
		let records = table
			.iter()
			.map(|record| self.decode_record(record, &mut stats))
			.collect();

		if stats.specialty_misses > 0 || stats.position_misses > 0 {
			tracing::warn!(
				specialty_misses = stats.specialty_misses,
				position_misses = stats.position_misses,
				"codes without a lookup entry"
			);
		}
		tracing::info!(
			rows = table.len(),
			officer_rows = stats.officer_rows,
			"decoded specialty and position names"
		);
		(CanonicalTable::new(records), stats)
	}

	fn decode_record(&self, record: &CanonicalRecord, stats: &mut DecodeStats) -> CanonicalRecord {
		let mut out = record.clone();

		match self.lookups.specialty(&record.vus_no) {
			Some(name) => out.vus_naimenovanie = name.to_string(),
			None => stats.specialty_misses += 1,
		}

		if self.is_officer(record) {
			stats.officer_rows += 1;
			out.doljnost_no.clear();
			out.doljnost_naimenovanie.clear();
		} else {
			out.doljnost_naimenovanie = match self.lookups.position(&record.doljnost_no) {
				Some(name) => name.to_string(),
				None => {
					stats.position_misses += 1;
					String::new()
				}
			};
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(vus: &str, vus_name: &str, pos: &str, pos_name: &str, program: &str) -> CanonicalRecord {
		CanonicalRecord {
			vus_no: vus.into(),
			vus_naimenovanie: vus_name.into(),
			doljnost_no: pos.into(),
			doljnost_naimenovanie: pos_name.into(),
			programma_podgotovki: program.into(),
			planiruetsya_studentov: 10,
			..Default::default()
		}
	}

	#[test]
	fn decodes_specialty_and_keeps_unknown_names() {
		let table = CanonicalTable::new(vec![
			record(" 021500", "старое", "001", "", "Сержанты"),
			record("999999", "как было", "002", "", "Сержанты"),
		]);
		let (decoded, stats) = Decoder::builtin().decode(&table);
		assert_eq!(
			decoded.records[0].vus_naimenovanie,
			"Командир мотострелкового подразделения"
		);
		assert_eq!(decoded.records[1].vus_naimenovanie, "как было");
		assert_eq!(stats.specialty_misses, 1);
		assert_eq!(table.records[0].vus_naimenovanie, "старое", "input untouched");
	}

	#[test]
	fn officer_rows_lose_position_fields() {
		let table = CanonicalTable::new(vec![
			record("101000", "", "001", "что-то", "Подготовка ОФИЦЕРОВ запаса"),
			record("101000", "", " 003 ", "что-то", "Сержанты запаса"),
			record("101000", "", "777", "что-то", "Солдаты"),
		]);
		let (decoded, stats) = Decoder::builtin().decode(&table);

		assert_eq!(decoded.records[0].doljnost_no, "");
		assert_eq!(decoded.records[0].doljnost_naimenovanie, "");
		assert_eq!(decoded.records[1].doljnost_no, " 003 ");
		assert_eq!(decoded.records[1].doljnost_naimenovanie, "Старшина роты");
		assert_eq!(decoded.records[2].doljnost_naimenovanie, "");
		assert_eq!(stats.officer_rows, 1);
		assert_eq!(stats.position_misses, 1);
		assert_eq!(decoded.records[0].planiruetsya_studentov, 10);
	}

	#[test]
	fn second_pass_does_not_restore_officer_positions() {
		let table = CanonicalTable::new(vec![record("201200", "", "002", "", "Офицеры")]);
		let decoder = Decoder::builtin();
		let (once, _) = decoder.decode(&table);
		let (twice, _) = decoder.decode(&once);
		assert_eq!(twice.records[0].doljnost_no, "");
		assert_eq!(twice.records[0].doljnost_naimenovanie, "");
		assert_eq!(twice.records[0].vus_naimenovanie, "Инженер вооружения");
	}

	#[test]
	fn substituted_tables_and_marker() {
		let decoder = Decoder::new(
			LookupTables::new([("X1", "Икс")], [("P1", "Пэ")]),
			"Officer",
		);
		let table = CanonicalTable::new(vec![
			record("X1", "", "P1", "", "reserve officer course"),
			record("X1", "", "P1", "", "офицеры"),
		]);
		let (decoded, _) = decoder.decode(&table);
		assert_eq!(decoded.records[0].vus_naimenovanie, "Икс");
		assert_eq!(decoded.records[0].doljnost_naimenovanie, "");
		assert_eq!(decoded.records[1].doljnost_naimenovanie, "Пэ");
	}
}
