use crate::input::units::Unit;
use crate::scoring::ScoringRule;

fn grams(rule: ScoringRule) -> ScoringRule {
    rule.with_unit(Unit::G)
}

/// Planetary Health Diet Index. Food groups in g/day, added fats and sugar in
/// percent of energy. Legumes and soy are worth 5 points, the rest 10.
///
/// Sex-specific cut points use the female value, as in the AHEI table: whole
/// grains max out at 75 g/day rather than the male 90 g.
pub(super) fn phdi_rules() -> Vec<ScoringRule> {
    vec![
        grams(ScoringRule::higher("wgrain_serv_phdi", 0.0, 75.0)),
        grams(ScoringRule::lower("starchy_veg_serv_phdi", 200.0, 50.0)),
        grams(ScoringRule::higher("veg_serv_phdi", 0.0, 300.0)),
        grams(ScoringRule::higher("frt_serv_phdi", 0.0, 200.0)),
        grams(ScoringRule::lower("dairy_serv_phdi", 1000.0, 250.0)),
        grams(ScoringRule::lower("redproc_meat_serv_phdi", 100.0, 14.0)),
        grams(ScoringRule::lower("poultry_serv_phdi", 100.0, 29.0)),
        grams(ScoringRule::lower("egg_serv_phdi", 120.0, 13.0)),
        grams(ScoringRule::higher("fish_serv_phdi", 0.0, 28.0)),
        grams(ScoringRule::higher("nuts_serv_phdi", 0.0, 50.0)),
        grams(ScoringRule::higher("legumes_serv_phdi", 0.0, 100.0)).with_score_range(0.0, 5.0),
        grams(ScoringRule::higher("soy_serv_phdi", 0.0, 50.0)).with_score_range(0.0, 5.0),
        ScoringRule::higher("added_fat_unsat_serv_phdi", 3.5, 21.0),
        ScoringRule::lower("added_fat_sat_trans_serv_phdi", 10.0, 0.0),
        ScoringRule::lower("added_sugar_serv_phdi", 25.0, 5.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{InputRecord, ScoreEngine};

    #[test]
    fn test_half_point_components() {
        let engine = ScoreEngine::new(phdi_rules()).unwrap();
        let result = engine.score(
            &InputRecord::new()
                .with("legumes_serv_phdi", 50.0)
                .with("soy_serv_phdi", 80.0),
        );
        assert_eq!(result.get("legumes_serv_phdi"), Some(Some(2.5)));
        assert_eq!(result.get("soy_serv_phdi"), Some(Some(5.0)));
        assert_eq!(result.total_score(), 7.5);
        assert_eq!(result.scored_count(), 2);
    }

    #[test]
    fn test_whole_grain_uses_female_cut_point() {
        let engine = ScoreEngine::new(phdi_rules()).unwrap();
        let score = |grams: f64| {
            engine
                .score(&InputRecord::new().with("wgrain_serv_phdi", grams))
                .get("wgrain_serv_phdi")
                .flatten()
        };
        assert_eq!(score(37.5), Some(5.0));
        assert_eq!(score(75.0), Some(10.0));
    }
}
