use thiserror::Error;

/// Failures that abort a merge, decode or report request.
///
/// Only input-class problems and output I/O are errors. Unmapped columns,
/// unparseable counts and unknown lookup codes are absorbed by the engine
/// with a fallback value and only logged.
#[derive(Debug, Error)]
pub enum EngineError {
	#[error("no files supplied")]
	NoFiles,
	#[error("failed to read '{name}': {reason}")]
	Unreadable { name: String, reason: String },
	#[error("'{name}' is not a supported spreadsheet (detected {kind})")]
	UnsupportedFormat { name: String, kind: String },
	#[error("'{name}' contains no sheet with data")]
	EmptyWorkbook { name: String },
	#[error("i/o error: {0}")]
	Io(#[from] std::io::Error),
	#[error("failed to write workbook: {0}")]
	Render(#[from] rust_xlsxwriter::XlsxError),
}

impl EngineError {
	pub(crate) fn unreadable(name: &str, reason: impl std::fmt::Display) -> Self {
		EngineError::Unreadable {
			name: name.to_string(),
			reason: reason.to_string(),
		}
	}
}
