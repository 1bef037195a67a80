//! End-to-end tests: rule file + CSV in, scored CSV/JSON out.

use diet_index::config::{load_engine, write_starter_rules};
use diet_index::indices;
use diet_index::input::read_csv;
use diet_index::output::{summarize, to_csv_string, to_json, write_output};
use diet_index::scoring::ScoreEngine;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const RULES: &str = "\
name: demo
rules:
  - component: fiber
    direction: higher
    thresholds: [0, 25]
    unit: g
  - component: sodium
    direction: lower
    thresholds: [2300, 1500]
    unit: mg
    aliases: [NA]
  - component: alcohol
    direction: range
    thresholds: [0, 0.5, 2.0, 3.5]
    weight: 0.5
";

fn demo_engine(dir: &TempDir) -> ScoreEngine {
    let path = dir.path().join("rules.yaml");
    fs::write(&path, RULES).unwrap();
    let (name, engine) = load_engine(&path).unwrap();
    assert_eq!(name, "demo");
    engine
}

#[test]
fn test_csv_to_scored_csv() {
    let dir = TempDir::new().unwrap();
    let engine = demo_engine(&dir);

    let input = "\
id,fiber_g,NA,alcohol,notes
a,12.5,1900,1.0,ok
b,,2.3,,
c,30,n/a,5,x
";
    let batch = read_csv(input.as_bytes(), &engine).unwrap();
    assert_eq!(batch.len(), 3);
    assert_eq!(batch.unmapped_columns, vec!["notes".to_string()]);
    assert_eq!(batch.coerced_cells, 1);

    let records = engine.score_batch(&batch.records);
    let labels: Vec<String> = (0..batch.len()).map(|i| batch.row_label(i)).collect();
    let csv = to_csv_string(&labels, &records, &engine).unwrap();

    assert_eq!(
        csv,
        "\
id,fiber,sodium,alcohol,total_score
a,5.00,5.00,10.00,15.00
b,,10.00,,10.00
c,10.00,,0.00,10.00
"
    );
}

#[test]
fn test_json_output_written_atomically() {
    let dir = TempDir::new().unwrap();
    let engine = demo_engine(&dir);

    let batch = read_csv("fiber,sodium\n25,1500\n".as_bytes(), &engine).unwrap();
    let records = engine.score_batch(&batch.records);
    let labels: Vec<String> = (0..batch.len()).map(|i| batch.row_label(i)).collect();

    let out = dir.path().join("scores.json");
    write_output(&out, &to_json(&labels, &records).unwrap()).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value[0]["id"], "1");
    assert_eq!(value[0]["total_score"], 20.0);
    assert!(value[0]["scores"]["alcohol"].is_null());
}

#[test]
fn test_starter_rules_score_builtin_columns() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rules.yaml");
    write_starter_rules(&path, false).unwrap();
    let (_, engine) = load_engine(&path).unwrap();
    assert_eq!(engine.max_total(), 90.0);

    let ids: Vec<&str> = engine.component_ids().collect();
    let header = ids.join(",");
    let zeros = vec!["0"; ids.len()].join(",");
    let input = format!("{}\n{}\n", header, zeros);

    let batch = read_csv(input.as_bytes(), &engine).unwrap();
    let records = engine.score_batch(&batch.records);
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_incomplete());
}

#[test]
fn test_summary_over_builtin_index() {
    let engine = ScoreEngine::new(indices::builtin("dashi").unwrap()).unwrap();
    let input = "\
id,FIBER_DASHI,SODIUM_DASHI
p1,8.6,2857
p2,29.5,2286
p3,19.05,
";
    let batch = read_csv(input.as_bytes(), &engine).unwrap();
    let records = engine.score_batch(&batch.records);
    let summary = summarize(&records, &engine);

    assert_eq!(summary.records, 3);
    let fiber = summary
        .components
        .iter()
        .find(|c| c.name == "FIBER_DASHI")
        .unwrap();
    assert_eq!(fiber.count, 3);
    assert_eq!(fiber.stats.as_ref().unwrap().median, 0.5);

    let sodium = summary
        .components
        .iter()
        .find(|c| c.name == "SODIUM_DASHI")
        .unwrap();
    assert_eq!(sodium.count, 2);
}
