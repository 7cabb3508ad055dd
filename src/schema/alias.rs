//! Header normalization and alias resolution.
//!
//! Source sheets label the same column in many ways ("Код ВУС", "№ ВУС",
//! "ВУС № ВУС" once a grouped header is flattened). A header is normalized
//! and then resolved in two steps: an exact match against the normalized
//! canonical identifiers, then a substring scan over an ordered alias list
//! where the first hit wins. The order of the built-in list is part of the
//! contract: specific phrases come before the short words they contain.

use std::collections::HashMap;

use super::CanonicalField;

/// Built-in aliases in priority order.
const BUILTIN_ALIASES: &[(&str, CanonicalField)] = &[
	("наименование вус", CanonicalField::VusNaimenovanie),
	("код вус", CanonicalField::VusNo),
	("наименование должности", CanonicalField::DoljnostNaimenovanie),
	("номер должности", CanonicalField::DoljnostNo),
	("округ вуза", CanonicalField::OkrugVuza),
	("ову, отв. за подготовку", CanonicalField::OvuOtvPodgotovku),
	("наименование вуза", CanonicalField::NazvanieVuza),
	("сбор/стажировка", CanonicalField::SborStazhirovka),
	("сбор/стаж", CanonicalField::SborStazhirovka),
	("программа подготовки", CanonicalField::ProgrammaPodgotovki),
	("место проведения сбора", CanonicalField::MestoProvedeniyaUchebnogoSbora),
	("место проведения", CanonicalField::MestoProvedeniyaUchebnogoSbora),
	("планируем преподавателей", CanonicalField::PlaniruetsyaPrepodavatelej),
	("планируем студентов", CanonicalField::PlaniruetsyaStudentov),
	("фио ответ", CanonicalField::FioOtvetstvennogo),
	("мобильный", CanonicalField::Mobilnyy),
	("преподавателей", CanonicalField::PlaniruetsyaPrepodavatelej),
	("студентов", CanonicalField::PlaniruetsyaStudentov),
	("окончание", CanonicalField::SrokProvedeniyaOkonchanie),
	("начало", CanonicalField::SrokProvedeniyaNachalo),
	("программа", CanonicalField::ProgrammaPodgotovki),
	("№ должности", CanonicalField::DoljnostNo),
	("№ вус", CanonicalField::VusNo),
	("вуз", CanonicalField::NazvanieVuza),
];

/// Lowercase a header and keep only alphanumerics and single spaces.
///
/// Any whitespace (line breaks inside a cell included) counts as a space.
/// Runs of spaces collapse and the result is trimmed, so `"ОВУ,\nотв. за"`
/// becomes `"ову отв за"`.
pub fn normalize_header(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	let mut pending_space = false;
	for ch in value.chars().flat_map(char::to_lowercase) {
		if ch.is_alphanumeric() {
			if pending_space && !out.is_empty() {
				out.push(' ');
			}
			pending_space = false;
			out.push(ch);
		} else if ch.is_whitespace() {
			pending_space = true;
		}
	}
	out
}

/// Ordered alias list plus the exact-match index over canonical identifiers.
#[derive(Debug, Clone)]
pub struct AliasTable {
	exact: HashMap<String, CanonicalField>,
	aliases: Vec<(String, CanonicalField)>,
}

impl AliasTable {
	/// Build a table from aliases in priority order. Aliases are normalized
	/// here; any that normalize to nothing are dropped.
	pub fn new<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = (S, CanonicalField)>,
		S: AsRef<str>,
	{
		let exact = CanonicalField::ALL
			.iter()
			.map(|f| (normalize_header(f.as_str()), *f))
			.collect();
		let aliases = entries
			.into_iter()
			.map(|(alias, field)| (normalize_header(alias.as_ref()), field))
			.filter(|(alias, _)| !alias.is_empty())
			.collect();
		Self { exact, aliases }
	}

	pub fn builtin() -> Self {
		Self::new(BUILTIN_ALIASES.iter().copied())
	}

	/// Resolve a raw header cell.
	pub fn resolve(&self, header: &str) -> Option<CanonicalField> {
		self.resolve_token(&normalize_header(header))
	}

	/// Resolve an already normalized token. `None` means the column is
	/// dropped.
	pub fn resolve_token(&self, token: &str) -> Option<CanonicalField> {
		if token.is_empty() {
			return None;
		}
		if let Some(field) = self.exact.get(token) {
			return Some(*field);
		}
		self.aliases
			.iter()
			.find(|(alias, _)| token.contains(alias.as_str()))
			.map(|(_, field)| *field)
	}

	/// Normalized aliases in scan order.
	pub fn aliases(&self) -> impl Iterator<Item = (&str, CanonicalField)> {
		self.aliases.iter().map(|(a, f)| (a.as_str(), *f))
	}
}

impl Default for AliasTable {
	fn default() -> Self {
		Self::builtin()
	}
}
