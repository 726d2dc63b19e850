//! Load/deload microcycle
//!
//! Three ascending weeks followed by a deload. Each tier scales the
//! experience baseline by the week multiplier and never drops below its floor:
//!
//! ```text
//! sets = max(floor, round(baseline × multiplier))
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PeriodizationConfig, TierSets};
use crate::metabolic::round_whole;
use crate::models::Experience;

/// Set-count role of an exercise slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Heavy,
    Moderate,
    Light,
}

/// Set counts and rep hint for one cycle week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScheme {
    pub week: u8,
    pub heavy: u32,
    pub moderate: u32,
    pub light: u32,
    pub rep_hint: String,
    pub is_deload: bool,
}

impl SetScheme {
    pub fn sets_for(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Heavy => self.heavy,
            Tier::Moderate => self.moderate,
            Tier::Light => self.light,
        }
    }
}

/// Periodization scheduler over injected cycle tables
#[derive(Debug, Clone, Copy)]
pub struct PeriodizationScheduler<'a> {
    config: &'a PeriodizationConfig,
}

impl<'a> PeriodizationScheduler<'a> {
    /// Week whose multiplier is 1.0, used for single-week plans
    pub const BASELINE_WEEK: u8 = 2;

    pub fn new(config: &'a PeriodizationConfig) -> Self {
        Self { config }
    }

    /// Number of weeks in the cycle
    pub fn cycle_len(&self) -> u8 {
        u8::try_from(self.config.weeks.len()).unwrap_or(u8::MAX)
    }

    /// Scheme for a 1-based cycle week, clamped into the cycle
    pub fn scheme(&self, week: u8, experience: Experience) -> SetScheme {
        let week = week.clamp(1, self.cycle_len().max(1));
        let baseline = self.config.baseline(experience);
        let floors = self.config.floors;

        let Some(cycle_week) = self.config.weeks.get(usize::from(week - 1)) else {
            return SetScheme {
                week,
                heavy: baseline.heavy.max(floors.heavy),
                moderate: baseline.moderate.max(floors.moderate),
                light: baseline.light.max(floors.light),
                rep_hint: String::new(),
                is_deload: false,
            };
        };

        let scale = |base: u32, floor: u32| -> u32 {
            let scaled = round_whole(Decimal::from(base) * cycle_week.multiplier);
            scaled.to_u32().unwrap_or(0).max(floor)
        };

        SetScheme {
            week,
            heavy: scale(baseline.heavy, floors.heavy),
            moderate: scale(baseline.moderate, floors.moderate),
            light: scale(baseline.light, floors.light),
            rep_hint: cycle_week.rep_hint.clone(),
            is_deload: cycle_week.deload,
        }
    }

    /// Every week of the cycle in order
    pub fn cycle(&self, experience: Experience) -> Vec<SetScheme> {
        (1..=self.cycle_len())
            .map(|week| self.scheme(week, experience))
            .collect()
    }

    /// Unscaled experience baseline
    pub fn baseline(&self, experience: Experience) -> TierSets {
        self.config.baseline(experience)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tiers(scheme: &SetScheme) -> (u32, u32, u32) {
        (scheme.heavy, scheme.moderate, scheme.light)
    }

    #[test]
    fn test_intermediate_cycle() {
        let config = PeriodizationConfig::default();
        let scheduler = PeriodizationScheduler::new(&config);
        let cycle = scheduler.cycle(Experience::Intermediate);

        assert_eq!(cycle.len(), 4);
        // 4×0.9=3.6, 3×0.9=2.7
        assert_eq!(tiers(&cycle[0]), (4, 3, 3));
        assert_eq!(tiers(&cycle[1]), (4, 3, 3));
        // 3×1.1=3.3
        assert_eq!(tiers(&cycle[2]), (4, 3, 3));
        // 4×0.6=2.4, 3×0.6=1.8
        assert_eq!(tiers(&cycle[3]), (2, 2, 2));
        assert!(cycle[3].is_deload);
        assert_eq!(cycle[3].rep_hint, "10–12 (deload)");
    }

    #[test]
    fn test_advanced_peak_rounds_half_up() {
        let config = PeriodizationConfig::default();
        let scheduler = PeriodizationScheduler::new(&config);

        // 5×0.9 = 4.5 → 5, 5×1.1 = 5.5 → 6
        assert_eq!(scheduler.scheme(1, Experience::Advanced).heavy, 5);
        assert_eq!(scheduler.scheme(3, Experience::Advanced).heavy, 6);
        assert_eq!(scheduler.scheme(3, Experience::Advanced).moderate, 4);
    }

    #[test]
    fn test_beginner_deload_hits_floors() {
        let config = PeriodizationConfig::default();
        let scheduler = PeriodizationScheduler::new(&config);
        let deload = scheduler.scheme(4, Experience::Beginner);

        // 3×0.6 = 1.8 → 2, 2×0.6 = 1.2 → 1
        assert_eq!(tiers(&deload), (2, 2, 1));
    }

    #[test]
    fn test_rep_hints_follow_the_cycle() {
        let config = PeriodizationConfig::default();
        let scheduler = PeriodizationScheduler::new(&config);
        let hints: Vec<String> = scheduler
            .cycle(Experience::Beginner)
            .into_iter()
            .map(|s| s.rep_hint)
            .collect();

        assert_eq!(hints, vec!["12–15", "8–12", "6–10", "10–12 (deload)"]);
    }

    #[test]
    fn test_out_of_range_week_is_clamped() {
        let config = PeriodizationConfig::default();
        let scheduler = PeriodizationScheduler::new(&config);

        assert_eq!(scheduler.scheme(0, Experience::Advanced).week, 1);
        assert_eq!(scheduler.scheme(9, Experience::Advanced).week, 4);
    }

    #[test]
    fn test_baseline_week_matches_unscaled_baseline() {
        let config = PeriodizationConfig::default();
        let scheduler = PeriodizationScheduler::new(&config);

        for experience in [Experience::Beginner, Experience::Intermediate, Experience::Advanced] {
            let scheme = scheduler.scheme(PeriodizationScheduler::BASELINE_WEEK, experience);
            let baseline = scheduler.baseline(experience);
            assert_eq!(tiers(&scheme), (baseline.heavy, baseline.moderate, baseline.light));
        }
    }

    proptest! {
        #[test]
        fn test_tiers_respect_floors(week in 0u8..10, exp in 0usize..3) {
            let experience = [Experience::Beginner, Experience::Intermediate, Experience::Advanced][exp];
            let config = PeriodizationConfig::default();
            let scheme = PeriodizationScheduler::new(&config).scheme(week, experience);

            prop_assert!(scheme.heavy >= config.floors.heavy);
            prop_assert!(scheme.moderate >= config.floors.moderate);
            prop_assert!(scheme.light >= config.floors.light);
        }
    }
}
