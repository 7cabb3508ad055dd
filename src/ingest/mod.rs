pub mod format_detection;
pub mod header;
pub mod loader;
pub mod parsers;
pub mod raw_sheet;

pub use format_detection::{FormatType, detect_format};
pub use header::{detect_header_depth, flatten_header, is_ordinal_row};
pub use loader::{ColumnMapping, SheetLayout, TableLoader};
pub use parsers::{read_sheet, read_sheet_file};
pub use raw_sheet::RawSheet;
