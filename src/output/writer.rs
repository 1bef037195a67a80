use std::io::Write;
use std::path::Path;

use atomic_write_file::AtomicWriteFile;
use serde::Serialize;

use crate::error::OutputError;
use crate::scoring::{ScoreEngine, ScoreRecord};

#[derive(Serialize)]
struct JsonRow<'a> {
    id: &'a str,
    #[serde(flatten)]
    record: &'a ScoreRecord,
}

/// Write scores as CSV: `id`, one column per component in rule order, then
/// `total_score`. Missing sub-scores are empty cells.
pub fn write_csv<W: Write>(
    writer: W,
    labels: &[String],
    records: &[ScoreRecord],
    engine: &ScoreEngine,
) -> Result<(), OutputError> {
    let precision = engine.precision() as usize;
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["id"];
    header.extend(engine.component_ids());
    header.push("total_score");
    csv_writer.write_record(&header)?;

    for (label, record) in labels.iter().zip(records) {
        let mut row = Vec::with_capacity(record.components().len() + 2);
        row.push(label.clone());
        row.extend(record.components().iter().map(|c| match c.score {
            Some(value) => format!("{:.*}", precision, value),
            None => String::new(),
        }));
        row.push(format!("{:.*}", precision, record.total_score()));
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn to_csv_string(
    labels: &[String],
    records: &[ScoreRecord],
    engine: &ScoreEngine,
) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, labels, records, engine)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Pretty JSON array of `{"id", "scores", "total_score"}` objects.
pub fn to_json(labels: &[String], records: &[ScoreRecord]) -> Result<String, OutputError> {
    let rows: Vec<JsonRow> = labels
        .iter()
        .zip(records)
        .map(|(id, record)| JsonRow { id, record })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Write `contents` to `path` atomically. A newline is appended if missing.
pub fn write_output(path: &Path, contents: &str) -> Result<(), OutputError> {
    let wrap = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = AtomicWriteFile::open(path).map_err(wrap)?;
    file.write_all(contents.as_bytes()).map_err(wrap)?;
    if !contents.ends_with('\n') {
        file.write_all(b"\n").map_err(wrap)?;
    }
    file.commit().map_err(wrap)?;
    Ok(())
}
