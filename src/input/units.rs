use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Units the input adapter can convert between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    G,
    Mg,
    Mcg,
    Kcal,
    Kj,
}

impl Unit {
    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::G => "g",
            Unit::Mg => "mg",
            Unit::Mcg => "mcg",
            Unit::Kcal => "kcal",
            Unit::Kj => "kj",
        }
    }

    /// Multiplier converting a value in `self` into `target`.
    /// `None` when the units measure different things (mass vs energy).
    pub fn factor_to(&self, target: Unit) -> Option<f64> {
        if *self == target {
            return Some(1.0);
        }
        match (self.mass_in_mcg(), target.mass_in_mcg()) {
            (Some(from), Some(to)) => return Some(from / to),
            (None, None) => {}
            _ => return None,
        }
        match (self, target) {
            (Unit::Kj, Unit::Kcal) => Some(1.0 / 4.184),
            (Unit::Kcal, Unit::Kj) => Some(4.184),
            _ => None,
        }
    }

    fn mass_in_mcg(&self) -> Option<f64> {
        match self {
            Unit::G => Some(1_000_000.0),
            Unit::Mg => Some(1_000.0),
            Unit::Mcg => Some(1.0),
            Unit::Kcal | Unit::Kj => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" => Ok(Unit::G),
            "mg" => Ok(Unit::Mg),
            "mcg" | "ug" => Ok(Unit::Mcg),
            "kcal" => Ok(Unit::Kcal),
            "kj" => Ok(Unit::Kj),
            other => Err(format!("unknown unit '{}'", other)),
        }
    }
}

/// Split a column header like `sodium_mg` into (`sodium`, `Mg`).
/// Headers without a recognised unit suffix return `None`.
pub fn split_unit_suffix(header: &str) -> Option<(&str, Unit)> {
    let (stem, suffix) = header.rsplit_once('_')?;
    if stem.is_empty() {
        return None;
    }
    suffix.parse::<Unit>().ok().map(|unit| (stem, unit))
}
