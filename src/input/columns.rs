use std::collections::HashMap;

use super::units::{split_unit_suffix, Unit};
use crate::scoring::ScoringRule;

/// Where a CSV column's values go.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnTarget {
    /// Row identifier, carried through to the output untouched
    Id,
    /// Values for a component, multiplied by `scale` on the way in
    Component { component_id: String, scale: f64 },
    /// Not used by the rule table
    Unmapped,
}

/// Resolves CSV headers against a rule table.
///
/// Lookup order for each header: `id`, exact component id, case-insensitive
/// component id, alias, then the same three after stripping a unit suffix
/// (`_g`, `_mg`, `_mcg`, `_kcal`, `_kj`). A suffixed column is converted to
/// the rule's unit when the rule declares one.
#[derive(Debug, Clone)]
pub struct ColumnResolver {
    exact: HashMap<String, usize>,
    folded: HashMap<String, usize>,
    units: Vec<Option<Unit>>,
    ids: Vec<String>,
}

impl ColumnResolver {
    pub fn new(rules: &[ScoringRule]) -> Self {
        let mut exact = HashMap::new();
        let mut folded = HashMap::new();

        for (idx, rule) in rules.iter().enumerate() {
            exact.insert(rule.component_id().to_string(), idx);
            folded
                .entry(rule.component_id().to_ascii_lowercase())
                .or_insert(idx);
        }
        // Aliases never shadow a real component id
        for (idx, rule) in rules.iter().enumerate() {
            for alias in rule.aliases() {
                folded.entry(alias.to_ascii_lowercase()).or_insert(idx);
            }
        }

        Self {
            exact,
            folded,
            units: rules.iter().map(|r| r.unit()).collect(),
            ids: rules.iter().map(|r| r.component_id().to_string()).collect(),
        }
    }

    pub fn resolve(&self, header: &str) -> ColumnTarget {
        let header = header.trim();
        if header.eq_ignore_ascii_case("id") {
            return ColumnTarget::Id;
        }

        if let Some(idx) = self.lookup(header) {
            return self.component(idx, 1.0);
        }

        if let Some((stem, unit)) = split_unit_suffix(header) {
            if let Some(idx) = self.lookup(stem) {
                let scale = match self.units[idx] {
                    Some(target) => match unit.factor_to(target) {
                        Some(factor) => factor,
                        None => return ColumnTarget::Unmapped,
                    },
                    None => 1.0,
                };
                return self.component(idx, scale);
            }
        }

        ColumnTarget::Unmapped
    }

    fn lookup(&self, name: &str) -> Option<usize> {
        self.exact
            .get(name)
            .or_else(|| self.folded.get(&name.to_ascii_lowercase()))
            .copied()
    }

    fn component(&self, idx: usize, scale: f64) -> ColumnTarget {
        ColumnTarget::Component {
            component_id: self.ids[idx].clone(),
            scale,
        }
    }
}
