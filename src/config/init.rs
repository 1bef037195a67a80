use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use crate::indices;

const HEADER: &str = "\
# Diet index rule table.
# direction: higher | lower | range
# thresholds run from the min_score end toward the max_score end;
# range rules take four: [a, b, c, d] with full score on [b, c].
";

/// Write the default built-in index as a starter rules file.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn write_starter_rules(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Rules file already exists at {}. Use --force to overwrite",
            path.display()
        );
    }

    let table = indices::builtin_config(indices::DEFAULT_INDEX)
        .context("Default index is not registered")?;
    let yaml = serde_saphyr::to_string(&table)
        .map_err(|e| anyhow::anyhow!("Failed to serialize rules: {}", e))?;

    // Create parent directories
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write rules to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save rules to {}", path.display()))?;

    Ok(())
}
