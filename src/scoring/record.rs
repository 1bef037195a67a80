use std::collections::HashMap;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Nutrient intake for one subject, keyed by component name.
///
/// A key can be absent, present with a value, or present with an explicit
/// missing marker. The engine treats absent and missing the same way: no
/// data, which is never the same as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    values: HashMap<String, Option<f64>>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present value.
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert of an explicit missing marker.
    pub fn with_missing(mut self, key: impl Into<String>) -> Self {
        self.insert_missing(key);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.values.insert(key.into(), Some(value));
    }

    pub fn insert_missing(&mut self, key: impl Into<String>) {
        self.values.insert(key.into(), None);
    }

    /// Usable value for `key`. `None` for absent keys, missing markers and NaN.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values
            .get(key)
            .copied()
            .flatten()
            .filter(|v| !v.is_nan())
    }

    /// True when the key was supplied, even if only as a missing marker.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<f64>)> for InputRecord {
    fn from_iter<T: IntoIterator<Item = (K, Option<f64>)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Sub-score of one component. `score` is `None` when the input had no data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentScore {
    pub component_id: String,
    pub score: Option<f64>,
}

/// Scores for one input record, components in rule-table order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    components: Vec<ComponentScore>,
    total_score: f64,
}

impl ScoreRecord {
    pub(crate) fn new(components: Vec<ComponentScore>, total_score: f64) -> Self {
        Self {
            components,
            total_score,
        }
    }

    pub fn components(&self) -> &[ComponentScore] {
        &self.components
    }

    /// `None` if the component is not in the rule table, `Some(None)` if it
    /// is but the input had no data for it.
    pub fn get(&self, component_id: &str) -> Option<Option<f64>> {
        self.components
            .iter()
            .find(|c| c.component_id == component_id)
            .map(|c| c.score)
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Number of components that produced a sub-score.
    pub fn scored_count(&self) -> usize {
        self.components.iter().filter(|c| c.score.is_some()).count()
    }

    /// Component ids the input had no data for.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter(|c| c.score.is_none())
            .map(|c| c.component_id.as_str())
    }

    pub fn is_incomplete(&self) -> bool {
        self.scored_count() < self.components.len()
    }

    /// True when no component could be scored at all.
    pub fn is_empty(&self) -> bool {
        self.scored_count() == 0
    }
}

/// Serializes as `{"scores": {id: score|null, ...}, "total_score": n}` with
/// score keys in rule-table order.
impl Serialize for ScoreRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScoreRecord", 2)?;
        state.serialize_field("scores", &OrderedScores(&self.components))?;
        state.serialize_field("total_score", &self.total_score)?;
        state.end()
    }
}

struct OrderedScores<'a>(&'a [ComponentScore]);

impl Serialize for OrderedScores<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for component in self.0 {
            map.serialize_entry(&component.component_id, &component.score)?;
        }
        map.end()
    }
}

/// Round to `precision` decimal digits, ties to even.
///
/// The tie is decided on `value * 10^precision` in binary floating point, so
/// `0.125` (exactly representable) rounds to `0.12` while `2.675` (stored as
/// 2.67499...) rounds to `2.67`.
pub fn round_half_even(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round_ties_even() / factor;
    // normalise -0.0 so output is bit-identical for equal scores
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
