use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use super::columns::{ColumnResolver, ColumnTarget};
use crate::error::InputError;
use crate::scoring::{InputRecord, ScoreEngine};

/// Records read from one CSV file, ready for [`ScoreEngine::score_batch`].
#[derive(Debug, Clone, Default)]
pub struct CsvBatch {
    /// Row ids from the `id` column, parallel to `records`
    pub ids: Vec<Option<String>>,
    pub records: Vec<InputRecord>,
    /// Headers that matched no component
    pub unmapped_columns: Vec<String>,
    /// Non-numeric cells read as missing
    pub coerced_cells: usize,
}

impl CsvBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id for row `index`, falling back to its 1-based row number.
    pub fn row_label(&self, index: usize) -> String {
        self.ids
            .get(index)
            .cloned()
            .flatten()
            .unwrap_or_else(|| (index + 1).to_string())
    }
}

pub fn read_csv_path(path: &Path, engine: &ScoreEngine) -> Result<CsvBatch, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, engine)
}

/// Read nutrient rows from CSV.
///
/// Blank cells become explicit missing markers, never zero. Cells that do not
/// parse as numbers are treated the same way and counted in
/// [`CsvBatch::coerced_cells`].
pub fn read_csv<R: Read>(reader: R, engine: &ScoreEngine) -> Result<CsvBatch, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let resolver = ColumnResolver::new(engine.rules());
    let headers = csv_reader.headers()?.clone();

    let mut targets = Vec::with_capacity(headers.len());
    let mut claimed: HashMap<String, String> = HashMap::new();
    let mut unmapped_columns = Vec::new();

    for header in headers.iter() {
        let target = resolver.resolve(header);
        match &target {
            ColumnTarget::Component { component_id, .. } => {
                if let Some(first) = claimed.insert(component_id.clone(), header.to_string()) {
                    return Err(InputError::DuplicateColumn {
                        component_id: component_id.clone(),
                        first,
                        second: header.to_string(),
                    });
                }
            }
            ColumnTarget::Unmapped => unmapped_columns.push(header.to_string()),
            ColumnTarget::Id => {}
        }
        targets.push(target);
    }

    if !unmapped_columns.is_empty() {
        info!(columns = ?unmapped_columns, "columns left unmapped");
    }
    let unused: Vec<&str> = engine
        .component_ids()
        .filter(|id| !claimed.contains_key(*id))
        .collect();
    if !unused.is_empty() {
        info!(components = ?unused, "components with no input column");
    }

    let mut batch = CsvBatch {
        unmapped_columns,
        ..CsvBatch::default()
    };

    for (row_idx, row) in csv_reader.records().enumerate() {
        let row = row?;
        let mut id = None;
        let mut record = InputRecord::new();

        for (cell, target) in row.iter().zip(&targets) {
            match target {
                ColumnTarget::Id => {
                    if !cell.is_empty() {
                        id = Some(cell.to_string());
                    }
                }
                ColumnTarget::Component {
                    component_id,
                    scale,
                } => {
                    if cell.is_empty() {
                        record.insert_missing(component_id.clone());
                        continue;
                    }
                    match cell.parse::<f64>() {
                        Ok(value) if !value.is_nan() => {
                            record.insert(component_id.clone(), value * scale)
                        }
                        _ => {
                            warn!(
                                row = row_idx + 1,
                                component = %component_id,
                                value = cell,
                                "non-numeric value read as missing"
                            );
                            batch.coerced_cells += 1;
                            record.insert_missing(component_id.clone());
                        }
                    }
                }
                ColumnTarget::Unmapped => {}
            }
        }

        batch.ids.push(id);
        batch.records.push(record);
    }

    Ok(batch)
}
