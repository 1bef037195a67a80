use std::path::PathBuf;

use thiserror::Error;

/// Failures of the CSV input adapter.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("columns '{first}' and '{second}' both map to component '{component_id}'")]
    DuplicateColumn {
        component_id: String,
        first: String,
        second: String,
    },
}

/// Failures writing score output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
