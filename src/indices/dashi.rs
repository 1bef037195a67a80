use crate::input::units::Unit;
use crate::scoring::ScoringRule;

fn point(rule: ScoringRule) -> ScoringRule {
    rule.with_score_range(0.0, 1.0)
}

/// DASH Index: nine nutrient targets, each worth up to one point.
pub(super) fn dashi_rules() -> Vec<ScoringRule> {
    vec![
        point(ScoringRule::lower("TOTAL_FAT_DASHI", 37.0, 27.0)),
        point(ScoringRule::lower("SAT_FAT_DASHI", 16.0, 6.0)),
        point(ScoringRule::higher("PROTEIN_DASHI", 15.0, 18.0)),
        point(ScoringRule::lower("CHOLESTEROL_DASHI", 285.7, 142.8).with_unit(Unit::Mg)),
        point(ScoringRule::higher("FIBER_DASHI", 8.6, 29.5).with_unit(Unit::G)),
        point(ScoringRule::higher("POTASSIUM_DASHI", 1619.0, 4476.0).with_unit(Unit::Mg)),
        point(ScoringRule::higher("MAGNESIUM_DASHI", 157.0, 476.0).with_unit(Unit::Mg)),
        point(ScoringRule::higher("CALCIUM_DASHI", 429.0, 1181.0).with_unit(Unit::Mg)),
        point(ScoringRule::lower("SODIUM_DASHI", 2857.0, 2286.0).with_unit(Unit::Mg)),
    ]
}
