pub mod column_matcher;
pub mod layout;
pub mod wind_csv_reader;

pub use column_matcher::{resolve_columns, ColumnMatcher, LogicalColumn, ResolvedColumns};
pub use layout::{decode_text, detect_delimiter, locate_header};
pub use wind_csv_reader::{ParsedTable, WindCsvReader};
