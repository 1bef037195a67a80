pub mod columns;
pub mod reader;
pub mod units;

pub use columns::{ColumnResolver, ColumnTarget};
pub use reader::{read_csv, read_csv_path, CsvBatch};
pub use units::Unit;
