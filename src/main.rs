use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use diet_index::output::{self, ScoredRow};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Tsv,
    Csv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every row of a nutrient CSV file
    Score {
        /// CSV with one row per record and one column per component
        csv: PathBuf,

        /// Built-in index to score with (see `indices`)
        #[arg(short, long)]
        index: Option<String>,

        /// YAML rule table to score with
        #[arg(short, long, conflicts_with = "index")]
        rules: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Write results to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append mean, std and quintiles of every column
        #[arg(short, long)]
        summary: bool,
    },
    /// Print the rule table that would be used for scoring
    Rules {
        #[arg(short, long)]
        index: Option<String>,

        #[arg(short, long, conflicts_with = "index")]
        rules: Option<PathBuf>,
    },
    /// Check a YAML rule table and list every problem found
    Validate {
        file: PathBuf,
    },
    /// List built-in indices
    Indices,
    /// Write a starter rule table (defaults to ~/.config/diet-index/rules.yaml)
    Init {
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "diet-index")]
#[command(about = "Score dietary intake records against diet-quality indices", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = diet_index::telemetry::init(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    let code = match cli.command {
        Commands::Score {
            csv,
            index,
            rules,
            format,
            output,
            summary,
        } => run_score(
            &csv,
            index.as_deref(),
            rules.as_deref(),
            format,
            output.as_deref(),
            summary,
            cli.verbose,
        ),
        Commands::Rules { index, rules } => run_rules(index.as_deref(), rules.as_deref()),
        Commands::Validate { file } => run_validate(&file),
        Commands::Indices => {
            for index in diet_index::indices::all() {
                println!("{:<8}  {}", index.name, index.description);
            }
            EXIT_SUCCESS
        }
        Commands::Init { path, force } => run_init(path, force),
    };

    std::process::exit(code);
}

fn run_score(
    csv: &std::path::Path,
    index: Option<&str>,
    rules: Option<&std::path::Path>,
    format: Format,
    output_path: Option<&std::path::Path>,
    summary: bool,
    verbose: bool,
) -> i32 {
    let start_time = Instant::now();

    let (name, engine) = match diet_index::config::resolve_engine(index, rules) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    let batch = match diet_index::input::read_csv_path(csv, &engine) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Input error: {:#}", anyhow::Error::from(e));
            return EXIT_INPUT;
        }
    };

    if verbose {
        eprintln!("Scoring {} records with {}", batch.len(), name);
        if !batch.unmapped_columns.is_empty() {
            eprintln!("  Ignored columns: {}", batch.unmapped_columns.join(", "));
        }
    }
    if batch.coerced_cells > 0 {
        eprintln!(
            "Warning: {} non-numeric cells were treated as missing",
            batch.coerced_cells
        );
    }

    let records = engine.score_batch(&batch.records);
    let labels: Vec<String> = (0..batch.len()).map(|i| batch.row_label(i)).collect();

    // Colors only when printing straight to a terminal
    let use_colors = output_path.is_none() && output::should_use_colors();

    let rendered = match format {
        Format::Table => {
            let rows: Vec<ScoredRow> = labels
                .iter()
                .zip(&records)
                .map(|(label, record)| ScoredRow {
                    label: label.clone(),
                    record,
                })
                .collect();
            if verbose && !rows.is_empty() {
                Ok(rows
                    .iter()
                    .map(|row| output::format_record_detail(row, &engine, use_colors))
                    .collect::<Vec<_>>()
                    .join("\n\n"))
            } else {
                Ok(output::format_score_table(&rows, &engine, use_colors))
            }
        }
        Format::Tsv => {
            let rows: Vec<ScoredRow> = labels
                .iter()
                .zip(&records)
                .map(|(label, record)| ScoredRow {
                    label: label.clone(),
                    record,
                })
                .collect();
            Ok(output::format_tsv(&rows, engine.precision()))
        }
        Format::Csv => output::to_csv_string(&labels, &records, &engine),
        Format::Json => output::to_json(&labels, &records),
    };

    let mut rendered = match rendered {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Output error: {:#}", anyhow::Error::from(e));
            return EXIT_OUTPUT;
        }
    };

    if summary {
        let text = output::format_summary(&output::summarize(&records, &engine));
        match format {
            // Keep machine-readable output parseable
            Format::Csv | Format::Json => eprintln!("{}", text),
            Format::Table | Format::Tsv => {
                rendered.push_str("\n\n");
                rendered.push_str(&text);
            }
        }
    }

    match output_path {
        Some(path) => {
            if let Err(e) = output::write_output(path, &rendered) {
                eprintln!("Output error: {:#}", anyhow::Error::from(e));
                return EXIT_OUTPUT;
            }
            if verbose {
                eprintln!("Wrote {} records to {}", records.len(), path.display());
            }
        }
        None => println!("{}", rendered.trim_end_matches('\n')),
    }

    if verbose {
        eprintln!("Total: {} records in {:?}", records.len(), start_time.elapsed());
    }

    EXIT_SUCCESS
}

fn run_rules(index: Option<&str>, rules: Option<&std::path::Path>) -> i32 {
    match diet_index::config::resolve_engine(index, rules) {
        Ok((name, engine)) => {
            let use_colors = output::should_use_colors();
            println!("{} (max {})", name, engine.max_total());
            println!("{}", output::format_rules(&engine, use_colors));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}

fn run_validate(file: &std::path::Path) -> i32 {
    let table = match diet_index::config::load_rule_table(file) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    match table.build_engine() {
        Ok(engine) => {
            println!(
                "{}: {} rules OK (max total {})",
                file.display(),
                engine.rules().len(),
                engine.max_total()
            );
            EXIT_SUCCESS
        }
        Err(errors) => {
            eprintln!("Rule table errors in {}:", file.display());
            for issue in errors.issues() {
                eprintln!("  - {}", issue);
            }
            EXIT_CONFIG
        }
    }
}

fn run_init(path: Option<PathBuf>, force: bool) -> i32 {
    let path = match path.map_or_else(diet_index::config::get_rules_path, Ok) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    match diet_index::config::write_starter_rules(&path, force) {
        Ok(()) => {
            println!("Rules written to {}", path.display());
            println!("Run `diet-index score <CSV> --rules {}` to use them.", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}
