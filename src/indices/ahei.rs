use crate::input::units::Unit;
use crate::scoring::{Direction, ScoringRule};

/// Serving-based AHEI-P, nine components scored 0-10.
pub(super) fn aheip_rules() -> Vec<ScoringRule> {
    vec![
        ScoringRule::higher("VEG_SERV_AHEIP", 0.0, 5.0),
        ScoringRule::higher("FRT_SERV_AHEIP", 0.0, 4.0),
        ScoringRule::higher("WHITERED_RT_SERV_AHEIP", 0.0, 4.0),
        ScoringRule::higher("FIBER_SERV_AHEIP", 0.0, 25.0).with_unit(Unit::G),
        ScoringRule::lower("TRANS_SERV_AHEIP", 4.0, 0.5),
        ScoringRule::higher("POLYSAT_RT_SERV_AHEIP", 0.1, 1.0),
        ScoringRule::higher("CALCIUM_SERV_AHEIP", 0.0, 1200.0).with_unit(Unit::Mg),
        ScoringRule::higher("FOLATE_SERV_AHEIP", 0.0, 600.0).with_unit(Unit::Mcg),
        ScoringRule::higher("IRON_SERV_AHEIP", 0.0, 27.0).with_unit(Unit::Mg),
    ]
}

/// AHEI-2010 without its energy-adjusted sodium decile.
///
/// Sex-specific cut points use the female value, so whole grains max out at
/// 75 g/day. Alcohol is a trapezoid: full marks for 0.5-2.0 drinks/day,
/// falling to zero at 3.5.
///
/// The published alcohol component gives non-drinkers a flat 2.5 points up to
/// 0.125 drinks/day. A trapezoid has one floor on both sides, so here the
/// rising edge runs all the way down to 0 at zero drinks. Intakes above
/// 0.125 drinks/day score exactly as published (`drinks / 0.5 * 10`).
pub(super) fn ahei_rules() -> Vec<ScoringRule> {
    vec![
        ScoringRule::higher("veg_serv", 0.0, 5.0),
        ScoringRule::higher("fruit_serv", 0.0, 4.0),
        ScoringRule::higher("whole_grain", 0.0, 75.0).with_unit(Unit::G),
        ScoringRule::higher("nuts_legumes_serv", 0.0, 1.0),
        ScoringRule::higher("n3_fat", 0.0, 250.0).with_unit(Unit::Mg),
        ScoringRule::higher("pufa_pct_energy", 2.0, 10.0),
        ScoringRule::lower("ssb_fruit_juice_serv", 1.0, 0.0),
        ScoringRule::lower("red_processed_meat_serv", 1.5, 0.0),
        ScoringRule::lower("trans_fat_pct", 4.0, 0.5),
        ScoringRule::new(
            "alcohol_serv",
            Direction::RangeIsBetter,
            vec![0.0, 0.5, 2.0, 3.5],
            0.0,
            10.0,
        ),
    ]
}
