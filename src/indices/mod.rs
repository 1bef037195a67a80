//! Built-in rule tables for published diet-quality indices.
//!
//! Only indices whose components are scored per record are included.
//! Population-relative scores (aMED medians, ACS2020 quartiles, DII
//! standardization) depend on the whole cohort and don't fit the engine.
//! MIND and MEDI award 0, 0.5 or 1 point per step band; a piecewise-linear
//! curve can't reproduce those jumps, so they are left out too.
//!
//! Where a published index has sex-specific cut points, the female value is
//! used.

mod ahei;
mod dashi;
mod hei;
mod phdi;

use crate::scoring::{RuleTableConfig, ScoringRule};

/// A built-in index: name, one-line description and rule table.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinIndex {
    pub name: &'static str,
    pub description: &'static str,
    rules: fn() -> Vec<ScoringRule>,
}

impl BuiltinIndex {
    pub fn rules(&self) -> Vec<ScoringRule> {
        (self.rules)()
    }

    pub fn config(&self) -> RuleTableConfig {
        RuleTableConfig::from_rules(Some(self.name.to_string()), &self.rules())
    }
}

const BUILTINS: &[BuiltinIndex] = &[
    BuiltinIndex {
        name: "ahei-p",
        description: "Alternative Healthy Eating Index for Pregnancy, serving based (0-90)",
        rules: ahei::aheip_rules,
    },
    BuiltinIndex {
        name: "ahei",
        description: "Alternative Healthy Eating Index without sodium; alcohol has no 2.5 non-drinker floor (0-100)",
        rules: ahei::ahei_rules,
    },
    BuiltinIndex {
        name: "hei",
        description: "Simplified Healthy Eating Index: fruit, whole grains, sodium (0-30)",
        rules: hei::hei_rules,
    },
    BuiltinIndex {
        name: "dash",
        description: "Simplified DASH score: fruit, vegetables, whole grains, sodium, saturated fat (0-50)",
        rules: hei::dash_rules,
    },
    BuiltinIndex {
        name: "dashi",
        description: "DASH Index from DASH trial nutrient targets (0-9)",
        rules: dashi::dashi_rules,
    },
    BuiltinIndex {
        name: "phdi",
        description: "Planetary Health Diet Index, gram based (0-140)",
        rules: phdi::phdi_rules,
    },
];

/// Name of the table used when neither an index nor a rules file is given.
pub const DEFAULT_INDEX: &str = "ahei-p";

pub fn all() -> &'static [BuiltinIndex] {
    BUILTINS
}

pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|b| b.name)
}

/// Look up a built-in index by name, case-insensitively.
pub fn find(name: &str) -> Option<&'static BuiltinIndex> {
    let name = name.trim();
    BUILTINS.iter().find(|b| b.name.eq_ignore_ascii_case(name))
}

pub fn builtin(name: &str) -> Option<Vec<ScoringRule>> {
    find(name).map(BuiltinIndex::rules)
}

pub fn builtin_config(name: &str) -> Option<RuleTableConfig> {
    find(name).map(BuiltinIndex::config)
}
