/// Untyped grid of cell text as read from one source sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
	/// Source name used in logs and errors (file name, sheet name)
	pub name: String,
	pub rows: Vec<Vec<String>>,
}

impl RawSheet {
	pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
		let mut sheet = Self {
			name: name.into(),
			rows,
		};
		sheet.drop_leading_blank_rows();
		sheet
	}

	/// Convenience for tests and callers holding string literals.
	pub fn from_rows<R, C>(name: impl Into<String>, rows: R) -> Self
	where
		R: IntoIterator<Item = C>,
		C: IntoIterator,
		C::Item: Into<String>,
	{
		Self::new(
			name,
			rows.into_iter()
				.map(|row| row.into_iter().map(Into::into).collect())
				.collect(),
		)
	}

	/// Widest row, which is the column count of the grid.
	pub fn width(&self) -> usize {
		self.rows.iter().map(Vec::len).max().unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	fn drop_leading_blank_rows(&mut self) {
		let first = self
			.rows
			.iter()
			.position(|row| !is_blank_row(row))
			.unwrap_or(self.rows.len());
		self.rows.drain(..first);
	}
}

pub fn is_blank_row(row: &[String]) -> bool {
	row.iter().all(|cell| cell.trim().is_empty())
}
