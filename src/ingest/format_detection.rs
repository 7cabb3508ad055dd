/// Detected container format of an uploaded sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
	/// Office Open XML or OpenDocument workbook (ZIP container)
	Xlsx,
	/// Legacy BIFF workbook (OLE2 compound file)
	Xls,
	/// Delimited text with the given separator
	Delimited(u8),
	Binary,
}

impl FormatType {
	pub fn as_str(&self) -> &str {
		match self {
			FormatType::Xlsx => "xlsx",
			FormatType::Xls => "xls",
			FormatType::Delimited(b'\t') => "tsv",
			FormatType::Delimited(_) => "csv",
			FormatType::Binary => "binary",
		}
	}

	pub fn is_workbook(&self) -> bool {
		matches!(self, FormatType::Xlsx | FormatType::Xls)
	}

	/// Parse a format hint (usually a file extension) into a FormatType.
	/// Delimited hints leave the separator to be sniffed from the data.
	pub fn from_hint(hint: &str) -> Option<Self> {
		match hint.trim_start_matches('.').to_lowercase().as_str() {
			"xlsx" | "xlsm" | "xlsb" | "ods" | "excel" => Some(FormatType::Xlsx),
			"xls" => Some(FormatType::Xls),
			"tsv" => Some(FormatType::Delimited(b'\t')),
			_ => None,
		}
	}
}

const OLE2_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detect the format of data from a sample (peek buffer).
///
/// Magic bytes win over the hint, so a workbook uploaded with a wrong
/// extension is still read as a workbook.
pub fn detect_format(peek: &[u8], hint: Option<&str>) -> FormatType {
	// ZIP local file header: xlsx, xlsm, ods
	if peek.len() >= 4 && peek[..4] == [0x50, 0x4b, 0x03, 0x04] {
		return FormatType::Xlsx;
	}
	if peek.len() >= OLE2_MAGIC.len() && peek[..OLE2_MAGIC.len()] == OLE2_MAGIC {
		return FormatType::Xls;
	}

	match hint.and_then(FormatType::from_hint) {
		// A workbook extension without a workbook signature is a damaged or
		// mislabeled file, never text to sniff.
		Some(format) if format.is_workbook() => return FormatType::Binary,
		Some(format) => return format,
		None => {}
	}

	// Text detection: UTF-8 (Cyrillic headers are multi-byte) with few
	// control characters.
	let text = String::from_utf8_lossy(peek);
	let total = text.chars().count();
	let printable = text.chars().filter(|c| is_printable(*c)).count();
	let printable_ratio = if total == 0 {
		1.0
	} else {
		printable as f64 / total as f64
	};
	if printable_ratio < 0.7 {
		return FormatType::Binary;
	}

	let first_line = text.lines().next().unwrap_or("");
	FormatType::Delimited(sniff_delimiter(first_line))
}

/// Pick the separator occurring most often in the first line. Ties and
/// lines without any separator fall back to a comma.
pub fn sniff_delimiter(line: &str) -> u8 {
	let mut best = (b',', line.matches(',').count());
	for candidate in [b';', b'\t'] {
		let count = line.matches(candidate as char).count();
		if count > best.1 {
			best = (candidate, count);
		}
	}
	best.0
}

fn is_printable(c: char) -> bool {
	match c {
		'\t' | '\n' | '\r' => true,
		char::REPLACEMENT_CHARACTER => false,
		c => !c.is_control(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn detect_xlsx_zip() {
		let peek = [0x50_u8, 0x4b, 0x03, 0x04, 0x14, 0x00];
		assert_eq!(detect_format(&peek, None), FormatType::Xlsx);
		assert_eq!(detect_format(&peek, Some("csv")), FormatType::Xlsx);
	}

	#[test]
	fn detect_xls_ole2() {
		let mut peek = OLE2_MAGIC.to_vec();
		peek.extend_from_slice(&[0, 0, 0, 0]);
		assert_eq!(detect_format(&peek, None), FormatType::Xls);
	}

	#[test]
	fn detect_csv_variants() {
		assert_eq!(
			detect_format("Округ ВУЗа,Наименование ВУЗа\nЗВО,МГУ\n".as_bytes(), None),
			FormatType::Delimited(b',')
		);
		assert_eq!(
			detect_format("Округ ВУЗа;Наименование ВУЗа;Код ВУС, доп.\n".as_bytes(), None),
			FormatType::Delimited(b';')
		);
		assert_eq!(
			detect_format(b"a\tb\tc\n1\t2\t3\n", None),
			FormatType::Delimited(b'\t')
		);
	}

	#[test]
	fn detect_with_hint() {
		let (format, name) = (detect_format(b"a,b\n", Some("tsv")), "tsv");
		assert_eq!(format, FormatType::Delimited(b'\t'));
		assert_eq!(format.as_str(), name);
		assert_eq!(FormatType::from_hint(".XLSX"), Some(FormatType::Xlsx));
	}

	#[test]
	fn workbook_hint_without_signature_is_binary() {
		let page = b"<html><body>Error 500</body></html>\n";
		assert_eq!(detect_format(page, Some("xlsx")), FormatType::Binary);
		assert_eq!(detect_format(page, Some("xls")), FormatType::Binary);
		assert_eq!(detect_format(page, Some("ods")), FormatType::Binary);
		assert_eq!(detect_format(page, None), FormatType::Delimited(b','));
	}

	#[test]
	fn detect_binary() {
		let binary = vec![0xff_u8, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
		assert_eq!(detect_format(&binary, None), FormatType::Binary);
	}
}
