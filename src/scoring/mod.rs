pub mod config;
pub mod engine;
pub mod record;
pub mod rule;
pub mod validation;

pub use config::{RuleConfig, RuleTableConfig};
pub use engine::{ScoreEngine, DEFAULT_PRECISION};
pub use record::{round_half_even, ComponentScore, InputRecord, ScoreRecord};
pub use rule::{Direction, ScoringRule};
pub use validation::{validate_rules, ConfigError, RuleIssue};
