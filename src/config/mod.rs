mod init;

pub use init::write_starter_rules;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::indices;
use crate::scoring::{RuleTableConfig, ScoreEngine};

/// Get the config directory path (~/.config/diet-index/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("diet-index"))
}

/// Get the default rules file path (~/.config/diet-index/rules.yaml)
pub fn get_rules_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("rules.yaml"))
}

/// Load a rule table from a YAML file
///
/// Only parses the file; thresholds and score ranges are checked when the
/// table is turned into an engine.
///
/// # Errors
///
/// Returns an error if:
/// - The rules file does not exist
/// - The rules file cannot be read
/// - The YAML cannot be parsed
pub fn load_rule_table(path: &Path) -> Result<RuleTableConfig> {
    if !path.exists() {
        anyhow::bail!(
            "Rules file not found at {}. Run `diet-index init` to create one",
            path.display()
        );
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file at {}", path.display()))?;

    let table: RuleTableConfig = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse rules: invalid YAML in {}", path.display()))?;

    debug!(path = %path.display(), rules = table.rules.len(), "loaded rule table");
    Ok(table)
}

/// Load and validate a rule table, returning its display name and engine.
pub fn load_engine(path: &Path) -> Result<(String, ScoreEngine)> {
    let table = load_rule_table(path)?;
    let engine = table
        .build_engine()
        .with_context(|| format!("Rules in {} are invalid", path.display()))?;
    let name = table
        .name
        .unwrap_or_else(|| path.display().to_string());
    Ok((name, engine))
}

/// Pick the rule table for a run.
///
/// An explicit rules file wins, then a named built-in index, then the user's
/// `~/.config/diet-index/rules.yaml` if present, then the default index.
pub fn resolve_engine(index: Option<&str>, rules: Option<&Path>) -> Result<(String, ScoreEngine)> {
    if let Some(path) = rules {
        return load_engine(path);
    }

    if let Some(name) = index {
        return builtin_engine(name);
    }

    if let Some(path) = get_rules_path().ok().filter(|p| p.exists()) {
        info!(path = %path.display(), "using rules from config directory");
        return load_engine(&path);
    }

    builtin_engine(indices::DEFAULT_INDEX)
}

fn builtin_engine(name: &str) -> Result<(String, ScoreEngine)> {
    let index = indices::find(name).with_context(|| {
        format!(
            "Unknown index '{}'. Available: {}",
            name,
            indices::names().collect::<Vec<_>>().join(", ")
        )
    })?;
    let engine = ScoreEngine::new(index.rules())
        .with_context(|| format!("Built-in index '{}' is invalid", index.name))?;
    Ok((index.name.to_string(), engine))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_yaml(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_rule_table() {
        let file = write_yaml(
            "name: fiber-demo\nrules:\n  - component: fiber\n    direction: higher\n    thresholds: [0, 25]\n",
        );
        let table = load_rule_table(file.path()).unwrap();
        assert_eq!(table.name.as_deref(), Some("fiber-demo"));
        assert_eq!(table.rules.len(), 1);
        assert_eq!(table.rules[0].max_score, 10.0);
    }

    #[test]
    fn test_load_rule_table_missing_file() {
        let err = load_rule_table(Path::new("/nonexistent/rules.yaml")).unwrap_err();
        assert!(err.to_string().contains("Rules file not found"));
    }

    #[test]
    fn test_load_rule_table_bad_yaml() {
        let file = write_yaml("rules:\n  - component: fiber\n    colour: blue\n");
        let err = load_rule_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));
    }

    #[test]
    fn test_load_engine_reports_invalid_rules() {
        let file = write_yaml(
            "rules:\n  - component: fiber\n    direction: higher\n    thresholds: [25, 0]\n",
        );
        let err = load_engine(file.path()).unwrap_err();
        assert!(err.to_string().contains("are invalid"));
        assert!(err.downcast_ref::<crate::scoring::ConfigError>().is_some());
    }

    #[test]
    fn test_load_engine_falls_back_to_path_name() {
        let file = write_yaml(
            "rules:\n  - component: fiber\n    direction: higher\n    thresholds: [0, 25]\n",
        );
        let (name, engine) = load_engine(file.path()).unwrap();
        assert_eq!(name, file.path().display().to_string());
        assert_eq!(engine.rules().len(), 1);
    }

    #[test]
    fn test_resolve_engine_prefers_rules_file() {
        let file = write_yaml(
            "name: custom\nrules:\n  - component: fiber\n    direction: higher\n    thresholds: [0, 25]\n",
        );
        let (name, _) = resolve_engine(Some("dashi"), Some(file.path())).unwrap();
        assert_eq!(name, "custom");
    }

    #[test]
    fn test_resolve_engine_builtin() {
        let (name, engine) = resolve_engine(Some("DASHI"), None).unwrap();
        assert_eq!(name, "dashi");
        assert_eq!(engine.rules().len(), 9);
    }

    #[test]
    fn test_resolve_engine_unknown_index() {
        let err = resolve_engine(Some("mind"), None).unwrap_err();
        assert!(err.to_string().contains("Unknown index 'mind'"));
    }
}
