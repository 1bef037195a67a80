use crate::scoring::{round_half_even, ScoreEngine, ScoreRecord};

/// Summary statistics are always reported to two decimals.
const SUMMARY_PRECISION: u32 = 2;

const QUINTILES: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Descriptive statistics for one column of non-missing scores.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub median: f64,
    /// 20th, 40th, 60th and 80th percentiles
    pub quintiles: [f64; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: String,
    /// Number of non-missing values
    pub count: usize,
    /// `None` when every value was missing
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub records: usize,
    pub total: ColumnSummary,
    pub components: Vec<ColumnSummary>,
}

/// Linear-interpolated quantile of sorted values.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn describe(name: &str, mut values: Vec<f64>) -> ColumnSummary {
    let count = values.len();
    if count == 0 {
        return ColumnSummary {
            name: name.to_string(),
            count,
            stats: None,
        };
    }

    values.sort_by(f64::total_cmp);
    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (count > 1).then(|| {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    });

    let round = |v: f64| round_half_even(v, SUMMARY_PRECISION);
    ColumnSummary {
        name: name.to_string(),
        count,
        stats: Some(Stats {
            mean: round(mean),
            std: std.map(round),
            min: round(values[0]),
            max: round(values[count - 1]),
            median: round(quantile(&values, 0.5)),
            quintiles: QUINTILES.map(|q| round(quantile(&values, q))),
        }),
    }
}

/// Summarize totals and each component over a batch, skipping missing
/// sub-scores.
pub fn summarize(records: &[ScoreRecord], engine: &ScoreEngine) -> Summary {
    let total = describe(
        "total_score",
        records.iter().map(ScoreRecord::total_score).collect(),
    );
    let components = engine
        .component_ids()
        .enumerate()
        .map(|(idx, id)| {
            let values = records
                .iter()
                .filter_map(|r| r.components().get(idx).and_then(|c| c.score))
                .collect();
            describe(id, values)
        })
        .collect();

    Summary {
        records: records.len(),
        total,
        components,
    }
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Render a summary as an aligned text table, total first.
pub fn format_summary(summary: &Summary) -> String {
    const HEADERS: [&str; 10] = [
        "n", "mean", "std", "min", "p20", "p40", "median", "p60", "p80", "max",
    ];

    let columns: Vec<&ColumnSummary> = std::iter::once(&summary.total)
        .chain(summary.components.iter())
        .collect();

    let rows: Vec<(String, Vec<String>)> = columns
        .iter()
        .map(|col| {
            let cells = match &col.stats {
                Some(s) => vec![
                    col.count.to_string(),
                    format_stat(Some(s.mean)),
                    format_stat(s.std),
                    format_stat(Some(s.min)),
                    format_stat(Some(s.quintiles[0])),
                    format_stat(Some(s.quintiles[1])),
                    format_stat(Some(s.median)),
                    format_stat(Some(s.quintiles[2])),
                    format_stat(Some(s.quintiles[3])),
                    format_stat(Some(s.max)),
                ],
                None => {
                    let mut cells = vec![col.count.to_string()];
                    cells.resize(HEADERS.len(), "-".to_string());
                    cells
                }
            };
            (col.name.clone(), cells)
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|(_, cells)| cells[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |name: &str, cells: &[String]| {
        let mut line = format!("{:<width$}", name, width = name_width);
        for (cell, width) in cells.iter().zip(&widths) {
            line.push_str(&format!("  {:>width$}", cell, width = width));
        }
        line.trim_end().to_string()
    };

    let header_cells: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![
        format!("{} records", summary.records),
        render("", &header_cells),
    ];
    lines.extend(rows.iter().map(|(name, cells)| render(name, cells)));
    lines.join("\n")
}
