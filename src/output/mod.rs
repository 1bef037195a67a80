pub mod formatter;
pub mod summary;
pub mod writer;

pub use formatter::{
    format_record_detail, format_rules, format_score, format_score_table, format_tsv,
    should_use_colors, ScoredRow,
};
pub use summary::{format_summary, summarize, ColumnSummary, Stats, Summary};
pub use writer::{to_csv_string, to_json, write_csv, write_output};
