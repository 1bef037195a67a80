use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{ScoreEngine, ScoreRecord};

/// A score record with the row label it came from, for display.
pub struct ScoredRow<'a> {
    pub label: String,
    pub record: &'a ScoreRecord,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with the engine's precision, or "-" when missing.
/// If incomplete is true, appends asterisk to indicate partial scoring.
pub fn format_score(score: Option<f64>, precision: u32, incomplete: bool) -> String {
    let formatted = match score {
        Some(value) => format!("{:.*}", precision as usize, value),
        None => "-".to_string(),
    };
    if incomplete {
        format!("{}*", formatted)
    } else {
        formatted
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format rows as a table with columns: Index, Total, Coverage, Label.
/// Totals of rows with missing components carry an asterisk.
pub fn format_score_table(rows: &[ScoredRow], engine: &ScoreEngine, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No records found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = format!("{}.", rows.len()).len();
    let score_width = rows
        .iter()
        .map(|r| format_score(Some(r.record.total_score()), engine.precision(), true).len())
        .max()
        .unwrap_or(0);
    let component_count = engine.rules().len();
    let coverage_width = format!("{}/{}", component_count, component_count).len();
    let separator = "  ";

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>width$}", format!("{}.", idx + 1), width = index_width);
            let score_str = format_score(
                Some(row.record.total_score()),
                engine.precision(),
                row.record.is_incomplete(),
            );
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let coverage = format!(
                "{:>width$}",
                format!("{}/{}", row.record.scored_count(), component_count),
                width = coverage_width
            );

            let fixed_width = index_width + 1 + score_width + coverage_width + separator.len() * 2;
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => truncate_label(&row.label, width - fixed_width),
                Some(_) => truncate_label(&row.label, 20),
                None => row.label.clone(),
            };

            if use_colors {
                let coverage = if row.record.is_incomplete() {
                    coverage.yellow().to_string()
                } else {
                    coverage.green().to_string()
                };
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    coverage,
                    separator,
                    label
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, coverage, separator, label
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one row with every component on its own line (for verbose mode)
pub fn format_record_detail(row: &ScoredRow, engine: &ScoreEngine, use_colors: bool) -> String {
    let precision = engine.precision();
    let id_width = engine
        .component_ids()
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(engine.rules().len() + 1);
    let total = format_score(Some(row.record.total_score()), precision, false);
    let max = format_score(Some(engine.max_total()), precision, false);
    if use_colors {
        lines.push(format!("{}  {} / {}", row.label.bold(), total.bold(), max));
    } else {
        lines.push(format!("{}  {} / {}", row.label, total, max));
    }

    for (rule, component) in engine.rules().iter().zip(row.record.components()) {
        let score = format_score(component.score, precision, false);
        let max_score = format_score(Some(rule.max_score()), precision, false);
        let line = format!(
            "  {:<width$}  {} / {}",
            component.component_id,
            score,
            max_score,
            width = id_width
        );
        if use_colors && component.score.is_none() {
            lines.push(line.dimmed().to_string());
        } else {
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// Format rows as tab-separated values for scripting
/// Columns match the CSV writer: label, one column per component, total
/// (no headers, no colors)
pub fn format_tsv(rows: &[ScoredRow], precision: u32) -> String {
    if rows.is_empty() {
        return String::new();
    }

    rows.iter()
        .map(|row| {
            let mut fields = vec![row.label.clone()];
            fields.extend(row.record.components().iter().map(|c| match c.score {
                Some(value) => format!("{:.*}", precision as usize, value),
                None => String::new(),
            }));
            fields.push(format_score(Some(row.record.total_score()), precision, false));
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the rule table, one rule per line
pub fn format_rules(engine: &ScoreEngine, use_colors: bool) -> String {
    let id_width = engine
        .component_ids()
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0);

    engine
        .rules()
        .iter()
        .map(|rule| {
            let thresholds = rule
                .thresholds()
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let unit = rule.unit().map(|u| format!(" {}", u)).unwrap_or_default();
            let weight = if rule.weight() != 1.0 {
                format!("  x{}", rule.weight())
            } else {
                String::new()
            };
            let id = format!("{:<width$}", rule.component_id(), width = id_width);
            let id = if use_colors { id.cyan().to_string() } else { id };
            format!(
                "{}  {:<6}  [{}]{}  {}-{}{}",
                id,
                rule.direction().label(),
                thresholds,
                unit,
                rule.min_score(),
                rule.max_score(),
                weight
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
