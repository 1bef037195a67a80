use serde::{Deserialize, Serialize};

use super::engine::{ScoreEngine, DEFAULT_PRECISION};
use super::rule::{Direction, ScoringRule};
use super::validation::ConfigError;
use crate::input::units::Unit;

/// Rule table as written in a YAML file.
///
/// Example YAML:
/// ```yaml
/// name: fiber-demo
/// precision: 2
/// rules:
///   - component: fiber
///     direction: higher
///     thresholds: [0, 25]
///   - component: sodium
///     direction: lower
///     thresholds: [2300, 1500]
///     unit: mg
///   - component: alcohol
///     direction: range
///     thresholds: [0, 0.5, 2.0, 3.5]
///     weight: 0.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleTableConfig {
    /// Display name of the index (e.g. "AHEI-P")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Decimal digits for sub-scores and totals (default: 2)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    pub rules: Vec<RuleConfig>,
}

/// One component rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Component id, matched against input keys
    pub component: String,

    /// higher | lower | range
    pub direction: Direction,

    /// Breakpoints, listed from the min-score end toward the max-score end
    pub thresholds: Vec<f64>,

    #[serde(default = "default_min_score")]
    pub min_score: f64,

    #[serde(default = "default_max_score")]
    pub max_score: f64,

    /// Multiplier in the total (default: 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Unit the thresholds are expressed in (g, mg, mcg, kcal, kj)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,

    /// Extra input column names for this component
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

fn default_min_score() -> f64 {
    0.0
}

fn default_max_score() -> f64 {
    10.0
}

impl RuleConfig {
    pub fn to_rule(&self) -> ScoringRule {
        let mut rule = ScoringRule::new(
            self.component.clone(),
            self.direction,
            self.thresholds.clone(),
            self.min_score,
            self.max_score,
        )
        .with_aliases(self.aliases.iter().cloned());
        if let Some(weight) = self.weight {
            rule = rule.with_weight(weight);
        }
        if let Some(unit) = self.unit {
            rule = rule.with_unit(unit);
        }
        rule
    }
}

impl From<&ScoringRule> for RuleConfig {
    fn from(rule: &ScoringRule) -> Self {
        Self {
            component: rule.component_id().to_string(),
            direction: rule.direction(),
            thresholds: rule.thresholds().to_vec(),
            min_score: rule.min_score(),
            max_score: rule.max_score(),
            weight: (rule.weight() != 1.0).then_some(rule.weight()),
            unit: rule.unit(),
            aliases: rule.aliases().to_vec(),
        }
    }
}

impl RuleTableConfig {
    pub fn from_rules(name: Option<String>, rules: &[ScoringRule]) -> Self {
        Self {
            name,
            precision: None,
            rules: rules.iter().map(RuleConfig::from).collect(),
        }
    }

    pub fn to_rules(&self) -> Vec<ScoringRule> {
        self.rules.iter().map(RuleConfig::to_rule).collect()
    }

    /// Validate the table and build an engine from it.
    pub fn build_engine(&self) -> Result<ScoreEngine, ConfigError> {
        ScoreEngine::with_precision(
            self.to_rules(),
            self.precision.unwrap_or(DEFAULT_PRECISION),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_rule_parse() {
        let yaml = r#"
rules:
  - component: fiber
    direction: higher
    thresholds: [0, 25]
"#;
        let config: RuleTableConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.name.is_none());
        assert!(config.precision.is_none());
        let rule = &config.rules[0];
        assert_eq!(rule.component, "fiber");
        assert_eq!(rule.direction, Direction::HigherIsBetter);
        assert_eq!(rule.min_score, 0.0);
        assert_eq!(rule.max_score, 10.0);
        assert!(rule.weight.is_none());
    }

    #[test]
    fn test_full_rule_table_parse() {
        let yaml = r#"
name: demo
precision: 3
rules:
  - component: sodium
    direction: lower
    thresholds: [2300, 1500]
    min_score: 0
    max_score: 5
    weight: 2
    unit: mg
    aliases: [SODIUM, na]
  - component: alcohol
    direction: range
    thresholds: [0, 0.5, 2.0, 3.5]
"#;
        let config: RuleTableConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("demo"));
        assert_eq!(config.precision, Some(3));
        let sodium = &config.rules[0];
        assert_eq!(sodium.direction, Direction::LowerIsBetter);
        assert_eq!(sodium.unit, Some(Unit::Mg));
        assert_eq!(sodium.aliases, vec!["SODIUM".to_string(), "na".to_string()]);
        assert_eq!(config.rules[1].direction, Direction::RangeIsBetter);

        let engine = config.build_engine().unwrap();
        assert_eq!(engine.precision(), 3);
        assert_eq!(engine.rules()[0].weight(), 2.0);
        assert_eq!(engine.rules()[0].max_score(), 5.0);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
rules:
  - component: fiber
    direction: higher
    thresholds: [0, 25]
    colour: blue
"#;
        assert!(serde_saphyr::from_str::<RuleTableConfig>(yaml).is_err());
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let yaml = r#"
rules:
  - component: fiber
    direction: sideways
    thresholds: [0, 25]
"#;
        assert!(serde_saphyr::from_str::<RuleTableConfig>(yaml).is_err());
    }

    #[test]
    fn test_invalid_table_fails_engine_build() {
        let yaml = r#"
rules:
  - component: fiber
    direction: higher
    thresholds: [5, 3]
"#;
        let config: RuleTableConfig = serde_saphyr::from_str(yaml).unwrap();
        assert!(config.build_engine().is_err());
    }

    #[test]
    fn test_rule_table_serde_roundtrip() {
        let rules = vec![
            ScoringRule::higher("fiber", 0.0, 25.0).with_unit(Unit::G),
            ScoringRule::lower("sodium", 2300.0, 1500.0).with_weight(0.5),
        ];
        let config = RuleTableConfig::from_rules(Some("demo".to_string()), &rules);
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: RuleTableConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
        assert_eq!(parsed.to_rules(), rules);
    }
}
