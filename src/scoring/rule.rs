use serde::{Deserialize, Serialize};

use crate::input::units::Unit;

/// Which end of a component's raw value range is rewarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Direction {
    #[serde(rename = "higher", alias = "higher_is_better", alias = "HIGHER_IS_BETTER")]
    HigherIsBetter,
    #[serde(rename = "lower", alias = "lower_is_better", alias = "LOWER_IS_BETTER")]
    LowerIsBetter,
    #[serde(rename = "range", alias = "range_is_better", alias = "RANGE_IS_BETTER")]
    RangeIsBetter,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::HigherIsBetter => "higher",
            Direction::LowerIsBetter => "lower",
            Direction::RangeIsBetter => "range",
        }
    }
}

/// Scoring curve for a single dietary component.
///
/// Thresholds are listed from the breakpoint that yields `min_score` toward
/// the breakpoint that yields `max_score`:
/// - `HigherIsBetter`: strictly increasing, e.g. `[0, 25]`
/// - `LowerIsBetter`: strictly decreasing, e.g. `[4.0, 0.5]`
/// - `RangeIsBetter`: `[a, b, c, d]` with `a < b <= c < d`
///
/// A rule is only checked when it is handed to
/// [`ScoreEngine::new`](super::ScoreEngine::new); construction here never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRule {
    component_id: String,
    direction: Direction,
    thresholds: Vec<f64>,
    min_score: f64,
    max_score: f64,
    weight: f64,
    unit: Option<Unit>,
    aliases: Vec<String>,
}

impl ScoringRule {
    pub fn new(
        component_id: impl Into<String>,
        direction: Direction,
        thresholds: Vec<f64>,
        min_score: f64,
        max_score: f64,
    ) -> Self {
        Self {
            component_id: component_id.into(),
            direction,
            thresholds,
            min_score,
            max_score,
            weight: 1.0,
            unit: None,
            aliases: Vec::new(),
        }
    }

    /// Shorthand for the common 0-10 higher-is-better curve.
    pub fn higher(component_id: impl Into<String>, low: f64, high: f64) -> Self {
        Self::new(component_id, Direction::HigherIsBetter, vec![low, high], 0.0, 10.0)
    }

    /// Shorthand for the common 0-10 lower-is-better curve. `worst` scores 0, `best` scores 10.
    pub fn lower(component_id: impl Into<String>, worst: f64, best: f64) -> Self {
        Self::new(component_id, Direction::LowerIsBetter, vec![worst, best], 0.0, 10.0)
    }

    pub fn with_score_range(mut self, min_score: f64, max_score: f64) -> Self {
        self.min_score = min_score;
        self.max_score = max_score;
        self
    }

    /// Multiplier applied to this component's sub-score in the total.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Canonical unit the thresholds are expressed in.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Alternative column names the input adapter maps onto this component.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn component_id(&self) -> &str {
        &self.component_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn unit(&self) -> Option<Unit> {
        self.unit
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Map a raw intake value onto `[min_score, max_score]`, unrounded.
    ///
    /// Assumes the rule already passed validation.
    pub fn evaluate(&self, value: f64) -> f64 {
        let span = self.max_score - self.min_score;
        let fraction = match self.direction {
            Direction::HigherIsBetter => ascending_fraction(&self.thresholds, value),
            Direction::LowerIsBetter => descending_fraction(&self.thresholds, value),
            Direction::RangeIsBetter => trapezoid_fraction(&self.thresholds, value),
        };
        (self.min_score + span * fraction).clamp(self.min_score, self.max_score)
    }
}

/// Fraction of the score span reached by `value` on an increasing breakpoint list.
/// Breakpoint `i` of `n + 1` sits at level `i / n`.
fn ascending_fraction(thresholds: &[f64], value: f64) -> f64 {
    let last = thresholds.len() - 1;
    if value <= thresholds[0] {
        return 0.0;
    }
    if value >= thresholds[last] {
        return 1.0;
    }
    let segment = thresholds
        .windows(2)
        .position(|pair| value < pair[1])
        .unwrap_or(last - 1);
    let (lo, hi) = (thresholds[segment], thresholds[segment + 1]);
    (segment as f64 + (value - lo) / (hi - lo)) / last as f64
}

fn descending_fraction(thresholds: &[f64], value: f64) -> f64 {
    let last = thresholds.len() - 1;
    if value >= thresholds[0] {
        return 0.0;
    }
    if value <= thresholds[last] {
        return 1.0;
    }
    let segment = thresholds
        .windows(2)
        .position(|pair| value > pair[1])
        .unwrap_or(last - 1);
    let (lo, hi) = (thresholds[segment], thresholds[segment + 1]);
    (segment as f64 + (lo - value) / (lo - hi)) / last as f64
}

fn trapezoid_fraction(thresholds: &[f64], value: f64) -> f64 {
    let (a, b, c, d) = (thresholds[0], thresholds[1], thresholds[2], thresholds[3]);
    if value <= a || value >= d {
        0.0
    } else if value < b {
        (value - a) / (b - a)
    } else if value <= c {
        1.0
    } else {
        (d - value) / (d - c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_higher_is_better_bounds_and_midpoint() {
        let rule = ScoringRule::higher("fiber", 0.0, 25.0);
        assert_eq!(rule.evaluate(-3.0), 0.0);
        assert_eq!(rule.evaluate(0.0), 0.0);
        assert!(approx(rule.evaluate(12.5), 5.0));
        assert_eq!(rule.evaluate(25.0), 10.0);
        assert_eq!(rule.evaluate(30.0), 10.0);
    }

    #[test]
    fn test_lower_is_better_mirrors() {
        let rule = ScoringRule::lower("trans_fat", 4.0, 0.5);
        assert_eq!(rule.evaluate(5.0), 0.0);
        assert_eq!(rule.evaluate(4.0), 0.0);
        assert!(approx(rule.evaluate(2.25), 5.0));
        assert_eq!(rule.evaluate(0.5), 10.0);
        assert_eq!(rule.evaluate(0.0), 10.0);
    }

    #[test]
    fn test_multi_breakpoint_levels_are_evenly_spaced() {
        let rule = ScoringRule::new(
            "veg",
            Direction::HigherIsBetter,
            vec![0.0, 1.0, 5.0],
            0.0,
            10.0,
        );
        assert!(approx(rule.evaluate(0.5), 2.5));
        assert!(approx(rule.evaluate(1.0), 5.0));
        assert!(approx(rule.evaluate(3.0), 7.5));
        assert_eq!(rule.evaluate(5.0), 10.0);
    }

    #[test]
    fn test_multi_breakpoint_descending() {
        let rule = ScoringRule::new(
            "sugar",
            Direction::LowerIsBetter,
            vec![50.0, 25.0, 5.0],
            0.0,
            10.0,
        );
        assert!(approx(rule.evaluate(37.5), 2.5));
        assert!(approx(rule.evaluate(25.0), 5.0));
        assert!(approx(rule.evaluate(15.0), 7.5));
        assert_eq!(rule.evaluate(1.0), 10.0);
    }

    #[test]
    fn test_range_trapezoid() {
        let rule = ScoringRule::new(
            "alcohol",
            Direction::RangeIsBetter,
            vec![0.0, 0.5, 2.0, 3.5],
            0.0,
            10.0,
        );
        assert_eq!(rule.evaluate(0.0), 0.0);
        assert!(approx(rule.evaluate(0.25), 5.0));
        assert_eq!(rule.evaluate(0.5), 10.0);
        assert_eq!(rule.evaluate(1.2), 10.0);
        assert_eq!(rule.evaluate(2.0), 10.0);
        assert!(approx(rule.evaluate(2.75), 5.0));
        assert_eq!(rule.evaluate(3.5), 0.0);
        assert_eq!(rule.evaluate(9.0), 0.0);
    }

    #[test]
    fn test_range_triangle_peak() {
        let rule = ScoringRule::new(
            "protein_pct",
            Direction::RangeIsBetter,
            vec![10.0, 15.0, 15.0, 20.0],
            0.0,
            1.0,
        );
        assert_eq!(rule.evaluate(15.0), 1.0);
        assert!(approx(rule.evaluate(12.5), 0.5));
        assert!(approx(rule.evaluate(17.5), 0.5));
    }

    #[test]
    fn test_non_zero_min_score() {
        let rule = ScoringRule::higher("fruit", 0.0, 4.0).with_score_range(2.0, 6.0);
        assert_eq!(rule.evaluate(0.0), 2.0);
        assert!(approx(rule.evaluate(2.0), 4.0));
        assert_eq!(rule.evaluate(10.0), 6.0);
    }

    #[test]
    fn test_infinite_values_clamp() {
        let rule = ScoringRule::higher("fiber", 0.0, 25.0);
        assert_eq!(rule.evaluate(f64::INFINITY), 10.0);
        assert_eq!(rule.evaluate(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_direction_serde_names() {
        let parsed: Direction = serde_json::from_str("\"lower\"").unwrap();
        assert_eq!(parsed, Direction::LowerIsBetter);
        let parsed: Direction = serde_json::from_str("\"RANGE_IS_BETTER\"").unwrap();
        assert_eq!(parsed, Direction::RangeIsBetter);
        assert_eq!(serde_json::to_string(&Direction::HigherIsBetter).unwrap(), "\"higher\"");
    }
}
