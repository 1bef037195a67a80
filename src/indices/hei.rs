use crate::input::units::Unit;
use crate::scoring::ScoringRule;

fn sodium() -> ScoringRule {
    ScoringRule::lower("sodium", 2300.0, 1500.0).with_unit(Unit::Mg)
}

fn whole_grains() -> ScoringRule {
    ScoringRule::higher("whole_grains", 0.0, 75.0).with_unit(Unit::G)
}

/// Simplified HEI: fruit, whole grains and sodium moderation, 0-10 each.
pub(super) fn hei_rules() -> Vec<ScoringRule> {
    vec![
        ScoringRule::higher("total_fruits", 0.0, 200.0).with_unit(Unit::G),
        whole_grains(),
        sodium(),
    ]
}

/// Simplified DASH score. Saturated fat is read as percent of energy, so
/// inputs must carry it precomputed (`sat_fat_g * 9 / kcal * 100`).
pub(super) fn dash_rules() -> Vec<ScoringRule> {
    vec![
        ScoringRule::higher("total_fruits", 0.0, 400.0).with_unit(Unit::G),
        ScoringRule::higher("vegetables", 0.0, 400.0).with_unit(Unit::G),
        whole_grains(),
        sodium(),
        ScoringRule::lower("sat_fat_pct_energy", 15.0, 5.0),
    ]
}
