use rayon::prelude::*;
use tracing::debug;

use super::record::{round_half_even, ComponentScore, InputRecord, ScoreRecord};
use super::rule::ScoringRule;
use super::validation::{validate_rules, ConfigError};

/// Decimal digits sub-scores and totals are rounded to unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 2;

/// Immutable, validated rule table plus the evaluator.
///
/// A `ScoreEngine` only exists if its rule table passed validation, so
/// scoring never fails. It holds no mutable state and can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    rules: Vec<ScoringRule>,
    precision: u32,
}

impl ScoreEngine {
    pub fn new(rules: Vec<ScoringRule>) -> Result<Self, ConfigError> {
        Self::with_precision(rules, DEFAULT_PRECISION)
    }

    pub fn with_precision(rules: Vec<ScoringRule>, precision: u32) -> Result<Self, ConfigError> {
        validate_rules(&rules, precision)?;
        debug!(rules = rules.len(), precision, "score engine ready");
        Ok(Self { rules, precision })
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.component_id())
    }

    /// Best attainable total: every component at its max score.
    pub fn max_total(&self) -> f64 {
        let total = self
            .rules
            .iter()
            .map(|r| r.weight() * r.max_score())
            .sum::<f64>();
        round_half_even(total, self.precision)
    }

    /// Score one record.
    ///
    /// Components without data keep their key with a `None` sub-score and
    /// are left out of the total. The total is the weighted sum of the
    /// remaining rounded sub-scores, with no renormalization.
    pub fn score(&self, record: &InputRecord) -> ScoreRecord {
        let mut total = 0.0;
        let components = self
            .rules
            .iter()
            .map(|rule| {
                let score = record
                    .get(rule.component_id())
                    .map(|value| round_half_even(rule.evaluate(value), self.precision));
                if let Some(s) = score {
                    total += rule.weight() * s;
                }
                ComponentScore {
                    component_id: rule.component_id().to_string(),
                    score,
                }
            })
            .collect();

        ScoreRecord::new(components, round_half_even(total, self.precision))
    }

    /// Score every record independently. Output order matches input order.
    pub fn score_batch(&self, records: &[InputRecord]) -> Vec<ScoreRecord> {
        debug!(records = records.len(), "scoring batch");
        records.par_iter().map(|record| self.score(record)).collect()
    }
}
