use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use super::rule::{Direction, ScoringRule};

/// Largest supported rounding precision (decimal digits).
pub const MAX_PRECISION: u32 = 9;

/// A single problem found in a rule table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleIssue {
    #[error("rules[{index}]: component id must not be empty")]
    EmptyComponentId { index: usize },

    #[error("rules[{index}] '{component_id}': duplicate component id")]
    DuplicateComponent { index: usize, component_id: String },

    #[error("rules[{index}] '{component_id}': {direction} rule needs {expected} thresholds, got {actual}")]
    ThresholdCount {
        index: usize,
        component_id: String,
        direction: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("rules[{index}] '{component_id}': threshold {value} is not finite")]
    NonFiniteThreshold {
        index: usize,
        component_id: String,
        value: f64,
    },

    #[error("rules[{index}] '{component_id}': thresholds {thresholds:?} must be {expected}")]
    NonMonotonicThresholds {
        index: usize,
        component_id: String,
        thresholds: Vec<f64>,
        expected: &'static str,
    },

    #[error("rules[{index}] '{component_id}': thresholds {thresholds:?} span too wide to interpolate")]
    ThresholdSpanOverflow {
        index: usize,
        component_id: String,
        thresholds: Vec<f64>,
    },

    #[error("rules[{index}] '{component_id}': min_score {min_score} exceeds max_score {max_score}")]
    InvertedScoreRange {
        index: usize,
        component_id: String,
        min_score: f64,
        max_score: f64,
    },

    #[error("rules[{index}] '{component_id}': score range [{min_score}, {max_score}] must be finite")]
    NonFiniteScoreRange {
        index: usize,
        component_id: String,
        min_score: f64,
        max_score: f64,
    },

    #[error("rules[{index}] '{component_id}': weight {weight} must be finite and non-negative")]
    InvalidWeight {
        index: usize,
        component_id: String,
        weight: f64,
    },

    #[error("precision {precision} exceeds the supported maximum of {max}")]
    InvalidPrecision { precision: u32, max: u32 },
}

/// Rejected rule table. Carries every issue found, not just the first.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ConfigError {
    issues: Vec<RuleIssue>,
}

impl ConfigError {
    pub fn new(issues: Vec<RuleIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[RuleIssue] {
        &self.issues
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid rule table ({} issue", self.issues.len())?;
        if self.issues.len() != 1 {
            write!(f, "s")?;
        }
        write!(f, ")")?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue)?;
        }
        Ok(())
    }
}

/// Validate a rule table and precision.
/// Returns all validation errors at once (not just the first).
pub fn validate_rules(rules: &[ScoringRule], precision: u32) -> Result<(), ConfigError> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    if precision > MAX_PRECISION {
        issues.push(RuleIssue::InvalidPrecision {
            precision,
            max: MAX_PRECISION,
        });
    }

    for (index, rule) in rules.iter().enumerate() {
        let id = rule.component_id();
        if id.trim().is_empty() {
            issues.push(RuleIssue::EmptyComponentId { index });
        } else if !seen.insert(id) {
            issues.push(RuleIssue::DuplicateComponent {
                index,
                component_id: id.to_string(),
            });
        }

        validate_score_range(index, rule, &mut issues);
        validate_thresholds(index, rule, &mut issues);

        let weight = rule.weight();
        if !weight.is_finite() || weight < 0.0 {
            issues.push(RuleIssue::InvalidWeight {
                index,
                component_id: id.to_string(),
                weight,
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::new(issues))
    }
}

fn validate_score_range(index: usize, rule: &ScoringRule, issues: &mut Vec<RuleIssue>) {
    let (min_score, max_score) = (rule.min_score(), rule.max_score());
    if !min_score.is_finite() || !max_score.is_finite() {
        issues.push(RuleIssue::NonFiniteScoreRange {
            index,
            component_id: rule.component_id().to_string(),
            min_score,
            max_score,
        });
    } else if min_score > max_score {
        issues.push(RuleIssue::InvertedScoreRange {
            index,
            component_id: rule.component_id().to_string(),
            min_score,
            max_score,
        });
    }
}

fn validate_thresholds(index: usize, rule: &ScoringRule, issues: &mut Vec<RuleIssue>) {
    let thresholds = rule.thresholds();
    let direction = rule.direction();

    let (count_ok, expected_count) = match direction {
        Direction::HigherIsBetter | Direction::LowerIsBetter => (thresholds.len() >= 2, "at least 2"),
        Direction::RangeIsBetter => (thresholds.len() == 4, "exactly 4"),
    };
    if !count_ok {
        issues.push(RuleIssue::ThresholdCount {
            index,
            component_id: rule.component_id().to_string(),
            direction: direction.label(),
            expected: expected_count,
            actual: thresholds.len(),
        });
        return;
    }

    if let Some(&value) = thresholds.iter().find(|t| !t.is_finite()) {
        issues.push(RuleIssue::NonFiniteThreshold {
            index,
            component_id: rule.component_id().to_string(),
            value,
        });
        return;
    }

    let (ordered, expected) = match direction {
        Direction::HigherIsBetter => (
            thresholds.windows(2).all(|w| w[0] < w[1]),
            "strictly increasing",
        ),
        Direction::LowerIsBetter => (
            thresholds.windows(2).all(|w| w[0] > w[1]),
            "strictly decreasing",
        ),
        Direction::RangeIsBetter => (
            thresholds[0] < thresholds[1]
                && thresholds[1] <= thresholds[2]
                && thresholds[2] < thresholds[3],
            "shaped [a, b, c, d] with a < b <= c < d",
        ),
    };
    if !ordered {
        issues.push(RuleIssue::NonMonotonicThresholds {
            index,
            component_id: rule.component_id().to_string(),
            thresholds: thresholds.to_vec(),
            expected,
        });
        return;
    }

    // Every segment width is bounded by the full span
    let span = thresholds[thresholds.len() - 1] - thresholds[0];
    if !span.is_finite() {
        issues.push(RuleIssue::ThresholdSpanOverflow {
            index,
            component_id: rule.component_id().to_string(),
            thresholds: thresholds.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rules() {
        let rules = vec![
            ScoringRule::higher("fiber", 0.0, 25.0),
            ScoringRule::lower("sodium", 2300.0, 1500.0),
            ScoringRule::new(
                "alcohol",
                Direction::RangeIsBetter,
                vec![0.0, 0.5, 2.0, 3.5],
                0.0,
                10.0,
            ),
        ];
        assert!(validate_rules(&rules, 2).is_ok());
    }

    #[test]
    fn test_empty_table_is_valid() {
        assert!(validate_rules(&[], 2).is_ok());
    }

    #[test]
    fn test_decreasing_thresholds_rejected_for_higher() {
        let rules = vec![ScoringRule::higher("fiber", 5.0, 3.0)];
        let err = validate_rules(&rules, 2).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(matches!(
            err.issues()[0],
            RuleIssue::NonMonotonicThresholds { index: 0, .. }
        ));
    }

    #[test]
    fn test_increasing_thresholds_rejected_for_lower() {
        let rules = vec![ScoringRule::lower("sodium", 1500.0, 2300.0)];
        let err = validate_rules(&rules, 2).unwrap_err();
        assert!(err.to_string().contains("strictly decreasing"));
    }

    #[test]
    fn test_equal_thresholds_rejected() {
        let rules = vec![ScoringRule::higher("fiber", 5.0, 5.0)];
        assert!(validate_rules(&rules, 2).is_err());
    }

    #[test]
    fn test_range_shape() {
        let bad = ScoringRule::new(
            "alcohol",
            Direction::RangeIsBetter,
            vec![0.0, 2.0, 1.0, 3.0],
            0.0,
            10.0,
        );
        let err = validate_rules(&[bad], 2).unwrap_err();
        assert!(err.to_string().contains("a < b <= c < d"));

        let wrong_count = ScoringRule::new(
            "alcohol",
            Direction::RangeIsBetter,
            vec![0.0, 1.0, 2.0],
            0.0,
            10.0,
        );
        let err = validate_rules(&[wrong_count], 2).unwrap_err();
        assert!(matches!(
            err.issues()[0],
            RuleIssue::ThresholdCount { actual: 3, .. }
        ));
    }

    #[test]
    fn test_single_threshold_rejected() {
        let rule = ScoringRule::new("fiber", Direction::HigherIsBetter, vec![1.0], 0.0, 10.0);
        let err = validate_rules(&[rule], 2).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let rule = ScoringRule::higher("fiber", 0.0, f64::NAN);
        let err = validate_rules(&[rule], 2).unwrap_err();
        assert!(matches!(err.issues()[0], RuleIssue::NonFiniteThreshold { .. }));
    }

    #[test]
    fn test_overflowing_span_rejected() {
        let rule = ScoringRule::higher("fiber", -1e308, 1e308);
        let err = validate_rules(&[rule], 2).unwrap_err();
        assert!(matches!(
            err.issues()[0],
            RuleIssue::ThresholdSpanOverflow { .. }
        ));

        let rule = ScoringRule::lower("sodium", f64::MAX, -f64::MAX);
        let err = validate_rules(&[rule], 2).unwrap_err();
        assert!(err.to_string().contains("span too wide"));
    }

    #[test]
    fn test_wide_but_finite_span_accepted() {
        let rule = ScoringRule::higher("fiber", -1e307, 1e307);
        assert!(validate_rules(&[rule], 2).is_ok());
    }

    #[test]
    fn test_inverted_score_range() {
        let rule = ScoringRule::higher("fiber", 0.0, 25.0).with_score_range(10.0, 0.0);
        let err = validate_rules(&[rule], 2).unwrap_err();
        assert!(matches!(err.issues()[0], RuleIssue::InvertedScoreRange { .. }));
    }

    #[test]
    fn test_duplicate_component() {
        let rules = vec![
            ScoringRule::higher("fiber", 0.0, 25.0),
            ScoringRule::higher("fiber", 0.0, 30.0),
        ];
        let err = validate_rules(&rules, 2).unwrap_err();
        assert_eq!(
            err.issues(),
            &[RuleIssue::DuplicateComponent {
                index: 1,
                component_id: "fiber".to_string()
            }]
        );
    }

    #[test]
    fn test_negative_weight() {
        let rule = ScoringRule::higher("fiber", 0.0, 25.0).with_weight(-1.0);
        let err = validate_rules(&[rule], 2).unwrap_err();
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_precision_limit() {
        let err = validate_rules(&[], 12).unwrap_err();
        assert!(matches!(
            err.issues()[0],
            RuleIssue::InvalidPrecision { precision: 12, .. }
        ));
    }

    #[test]
    fn test_collects_all_errors() {
        let rules = vec![
            ScoringRule::higher("", 0.0, 25.0),                            // Error 1
            ScoringRule::higher("fiber", 5.0, 3.0),                        // Error 2
            ScoringRule::higher("fruit", 0.0, 4.0).with_score_range(5.0, 1.0), // Error 3
            ScoringRule::higher("fiber", 0.0, 25.0),                       // Error 4
        ];
        let err = validate_rules(&rules, 2).unwrap_err();
        assert_eq!(err.issues().len(), 4);
        assert!(err.to_string().starts_with("invalid rule table (4 issues)"));
    }
}
