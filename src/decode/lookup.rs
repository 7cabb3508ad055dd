use std::collections::BTreeMap;

const VUS_DECODING: &[(&str, &str)] = &[
	("021500", "Командир мотострелкового подразделения"),
	("101000", "Специалист связи"),
	("201200", "Инженер вооружения"),
];

const POSITION_DECODING: &[(&str, &str)] = &[
	("001", "Командир отделения"),
	("002", "Заместитель командира взвода"),
	("003", "Старшина роты"),
];

/// Code to description tables used when decoding. Constructed once and
/// handed to the [`Decoder`](super::Decoder); never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTables {
	pub specialty: BTreeMap<String, String>,
	pub position: BTreeMap<String, String>,
}

impl LookupTables {
	pub fn new<S, P, K, V>(specialty: S, position: P) -> Self
	where
		S: IntoIterator<Item = (K, V)>,
		P: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			specialty: specialty
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
			position: position
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	pub fn builtin() -> Self {
		Self::new(VUS_DECODING.iter().copied(), POSITION_DECODING.iter().copied())
	}

	pub fn specialty(&self, code: &str) -> Option<&str> {
		self.specialty.get(code.trim()).map(String::as_str)
	}

	pub fn position(&self, code: &str) -> Option<&str> {
		self.position.get(code.trim()).map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builtin_lookups_trim_codes() {
		let tables = LookupTables::builtin();
		assert_eq!(tables.specialty(" 101000 "), Some("Специалист связи"));
		assert_eq!(tables.position("003"), Some("Старшина роты"));
		assert_eq!(tables.position("3"), None);
		assert_eq!(tables.specialty(""), None);
	}
}
