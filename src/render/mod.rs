pub mod canonical;
pub mod report;

pub use canonical::{CANONICAL_SHEET_NAME, write_canonical};
pub use report::{REPORT_SHEET_NAME, ReportSummary, write_report};

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::EngineError;

/// Fresh `<kind>_<uuid>.xlsx` path inside `dir`, creating the directory if
/// needed. Names come from random v4 UUIDs so concurrent requests writing
/// into the same directory never collide.
pub fn unique_output_path(dir: &Path, kind: &str) -> Result<PathBuf, EngineError> {
	std::fs::create_dir_all(dir)?;
	Ok(dir.join(format!("{kind}_{}.xlsx", Uuid::new_v4().simple())))
}
