//! Energy expenditure and macronutrient targets
//!
//! BMR uses the Mifflin-St Jeor equation (Mifflin et al., 1990):
//!
//! ```text
//! BMR = 10·weight_kg + 6.25·height_cm − 5·age + s    (s = +5 male, −161 female)
//! ```
//!
//! TDEE scales BMR by an activity factor and the calorie target scales TDEE
//! by a goal multiplier. All arithmetic is exact decimal; whole-number
//! results round half away from zero.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::MetabolicConfig;
use crate::models::{ActivityLevel, Gender, Goal, GramRange, Nutrition, Profile, Rationale};

/// Round to the nearest whole number, halves away from zero
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Whole grams or kcal, negative values clamp to zero
fn to_count(value: Decimal) -> u32 {
    round_whole(value).max(Decimal::ZERO).to_u32().unwrap_or(0)
}

/// Body mass index: weight / height² (height in meters)
pub fn bmi(weight_kg: Decimal, height_cm: Decimal) -> Decimal {
    let height_m = height_cm / dec!(100);
    let denominator = height_m * height_m;
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    weight_kg / denominator
}

/// WHO adult BMI categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify an unrounded BMI value
    pub fn classify(bmi: Decimal) -> Self {
        if bmi < dec!(18.5) {
            BmiCategory::Underweight
        } else if bmi < dec!(25) {
            BmiCategory::Normal
        } else if bmi < dec!(30) {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

/// BMI for display (one decimal) with its category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmiReading {
    pub value: Decimal,
    pub category: BmiCategory,
}

impl BmiReading {
    pub fn from_measurements(weight_kg: Decimal, height_cm: Decimal) -> Self {
        let exact = bmi(weight_kg, height_cm);
        Self {
            value: exact.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            category: BmiCategory::classify(exact),
        }
    }
}

/// Single-value macro estimate shown next to the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEstimate {
    pub bmr: u32,
    pub tdee: u32,
    pub calories: u32,
    pub protein_g: u32,
    pub fat_g: u32,
    pub carbs_g: u32,
}

/// Calculator over an injected set of metabolic constants
#[derive(Debug, Clone, Copy)]
pub struct MetabolicCalculator<'a> {
    config: &'a MetabolicConfig,
}

impl<'a> MetabolicCalculator<'a> {
    pub fn new(config: &'a MetabolicConfig) -> Self {
        Self { config }
    }

    /// Age from the profile or the configured default
    pub fn effective_age(&self, age: Option<u32>) -> u32 {
        age.unwrap_or(self.config.default_age)
    }

    /// Basal metabolic rate in kcal/day, unrounded
    pub fn bmr(&self, weight_kg: Decimal, height_cm: Decimal, age: Option<u32>, gender: Gender) -> Decimal {
        let sex_constant = match gender {
            Gender::Male => dec!(5),
            Gender::Female => dec!(-161),
        };
        let age = Decimal::from(self.effective_age(age));

        dec!(10) * weight_kg + dec!(6.25) * height_cm - dec!(5) * age + sex_constant
    }

    /// Total daily energy expenditure, rounded to whole kcal
    pub fn tdee(&self, bmr: Decimal, activity: ActivityLevel) -> u32 {
        to_count(bmr * self.config.activity_factors.factor(activity))
    }

    /// Goal-adjusted daily calorie target
    pub fn calorie_target(&self, tdee: u32, goal: Goal) -> u32 {
        to_count(Decimal::from(tdee) * self.config.goal_multipliers.multiplier(goal))
    }

    /// Protein and fat ranges plus residual carbohydrates.
    ///
    /// Carbs fill whatever the high protein and low fat bounds leave of the
    /// calorie target (4 kcal/g protein and carbs, 9 kcal/g fat).
    pub fn macros(&self, weight_kg: Decimal, calories: u32) -> (GramRange, GramRange, u32) {
        let ratios = &self.config.macros;
        let protein = GramRange {
            low: to_count(weight_kg * ratios.protein_low),
            high: to_count(weight_kg * ratios.protein_high),
        };
        let fat = GramRange {
            low: to_count(weight_kg * ratios.fat_low),
            high: to_count(weight_kg * ratios.fat_high),
        };

        let residual = Decimal::from(calories)
            - dec!(4) * Decimal::from(protein.high)
            - dec!(9) * Decimal::from(fat.low);
        let carbs = to_count(residual / dec!(4));

        (protein, fat, carbs)
    }

    /// Full nutrition block for a profile
    pub fn nutrition(&self, profile: &Profile) -> Nutrition {
        let bmr = self.bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender);
        let tdee = self.tdee(bmr, profile.activity);
        let calories = self.calorie_target(tdee, profile.goal);
        let (protein_g, fat_g, carbs_g) = self.macros(profile.weight_kg, calories);

        tracing::debug!(%bmr, tdee, calories, carbs_g, "Computed nutrition targets");

        Nutrition {
            tdee,
            calories,
            protein_g,
            fat_g,
            carbs_g,
            rationale: Rationale::for_goal(profile.goal),
        }
    }

    /// Quick estimate: rounded BMR, conservative bulk surplus, a single
    /// protein target by goal and fat as a fixed share of calories.
    pub fn profile_estimate(&self, profile: &Profile) -> ProfileEstimate {
        let estimate = &self.config.estimate;

        let bmr = to_count(self.bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender));
        let tdee = self.tdee(Decimal::from(bmr), profile.activity);
        let calories = to_count(Decimal::from(tdee) * estimate.goal_multipliers.multiplier(profile.goal));

        let protein_g = to_count(estimate.protein_per_kg(profile.goal) * profile.weight_kg);
        let fat_g = to_count(Decimal::from(calories) * estimate.fat_calorie_share / dec!(9));
        let carbs_g = to_count(
            (Decimal::from(calories) - dec!(4) * Decimal::from(protein_g) - dec!(9) * Decimal::from(fat_g))
                / dec!(4),
        );

        ProfileEstimate {
            bmr,
            tdee,
            calories,
            protein_g,
            fat_g,
            carbs_g,
        }
    }
}

/// Weekly weight change (kg/week, two decimals) needed to reach `target_kg`
/// by `target_date`. `None` when the date is not after `today`.
pub fn weekly_pace(
    current_kg: Decimal,
    target_kg: Decimal,
    target_date: NaiveDate,
    today: NaiveDate,
) -> Option<Decimal> {
    let days = (target_date - today).num_days();
    if days <= 0 {
        return None;
    }
    let weeks = Decimal::from(days) / dec!(7);
    Some(((target_kg - current_kg) / weeks).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoalMultipliers;
    use crate::models::sample_profile;

    fn calculator(config: &MetabolicConfig) -> MetabolicCalculator<'_> {
        MetabolicCalculator::new(config)
    }

    #[test]
    fn test_reference_scenario() {
        let config = MetabolicConfig::default();
        let calc = calculator(&config);
        let profile = sample_profile();

        let bmr = calc.bmr(profile.weight_kg, profile.height_cm, profile.age, profile.gender);
        // 800 + 1125 − 150 + 5
        assert_eq!(bmr, dec!(1780));

        let nutrition = calc.nutrition(&profile);
        assert_eq!(nutrition.tdee, 2759);
        assert_eq!(nutrition.calories, 2345);
        assert_eq!(nutrition.protein_g, GramRange { low: 128, high: 176 });
        assert_eq!(nutrition.fat_g, GramRange { low: 56, high: 80 });
        // (2345 - 704 - 504) / 4 = 284.25
        assert_eq!(nutrition.carbs_g, 284);
        assert_eq!(nutrition.rationale, Rationale::DeficitPreserveLeanMass);
    }

    #[test]
    fn test_female_bmr_and_default_age() {
        let config = MetabolicConfig::default();
        let calc = calculator(&config);

        // 10·60 + 6.25·165 − 5·28 − 161
        let bmr = calc.bmr(dec!(60), dec!(165), None, Gender::Female);
        assert_eq!(bmr, dec!(1330.25));
    }

    #[test]
    fn test_activity_factors() {
        let config = MetabolicConfig::default();
        let calc = calculator(&config);

        assert_eq!(calc.tdee(dec!(1500), ActivityLevel::Sedentary), 1800);
        assert_eq!(calc.tdee(dec!(1500), ActivityLevel::Light), 2063);
        assert_eq!(calc.tdee(dec!(1500), ActivityLevel::High), 2588);
        assert_eq!(calc.tdee(dec!(1500), ActivityLevel::VeryHigh), 2850);
    }

    #[test]
    fn test_goal_multipliers() {
        let config = MetabolicConfig::default();
        let calc = calculator(&config);

        assert_eq!(calc.calorie_target(2000, Goal::Maintain), 2000);
        assert_eq!(calc.calorie_target(2000, Goal::Cut), 1700);
        assert_eq!(calc.calorie_target(2000, Goal::Bulk), 2200);
        assert_eq!(calc.calorie_target(2000, Goal::Strength), 2060);

        let conservative = MetabolicConfig {
            goal_multipliers: GoalMultipliers::conservative_bulk(),
            ..MetabolicConfig::default()
        };
        assert_eq!(calculator(&conservative).calorie_target(2000, Goal::Bulk), 2140);
    }

    #[test]
    fn test_carbs_clamp_to_zero() {
        let config = MetabolicConfig::default();
        let calc = calculator(&config);

        // 150 kg on 1200 kcal: protein alone exceeds the target
        let (_, _, carbs) = calc.macros(dec!(150), 1200);
        assert_eq!(carbs, 0);
    }

    #[test]
    fn test_half_values_round_away_from_zero() {
        assert_eq!(round_whole(dec!(2.5)), dec!(3));
        assert_eq!(round_whole(dec!(4.4)), dec!(4));
        assert_eq!(round_whole(dec!(-2.5)), dec!(-3));
    }

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(BmiCategory::classify(dec!(18.49)), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(dec!(18.5)), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(dec!(24.99)), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(dec!(25.0)), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(dec!(29.99)), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(dec!(30.0)), BmiCategory::Obese);
    }

    #[test]
    fn test_bmi_reading_rounds_for_display_only() {
        let reading = BmiReading::from_measurements(dec!(80), dec!(180));
        assert_eq!(reading.value, dec!(24.7));
        assert_eq!(reading.category, BmiCategory::Normal);

        // 24.96 displays as 25.0 but is still classified on the exact value
        let reading = BmiReading::from_measurements(dec!(24.96), dec!(100));
        assert_eq!(reading.value, dec!(25.0));
        assert_eq!(reading.category, BmiCategory::Normal);
    }

    #[test]
    fn test_profile_estimate() {
        let config = MetabolicConfig::default();
        let calc = calculator(&config);
        let profile = sample_profile();

        let estimate = calc.profile_estimate(&profile);
        assert_eq!(estimate.bmr, 1780);
        assert_eq!(estimate.tdee, 2759);
        assert_eq!(estimate.calories, 2345);
        assert_eq!(estimate.protein_g, 152);
        // 2345 · 0.25 / 9 = 65.1
        assert_eq!(estimate.fat_g, 65);
        // (2345 - 608 - 585) / 4 = 288
        assert_eq!(estimate.carbs_g, 288);

        let mut bulking = profile.clone();
        bulking.goal = Goal::Bulk;
        assert_eq!(calc.profile_estimate(&bulking).calories, 2952);
    }

    #[test]
    fn test_weekly_pace() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let target = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap(); // 12 weeks

        assert_eq!(weekly_pace(dec!(80), dec!(74), target, today), Some(dec!(-0.5)));
        assert_eq!(weekly_pace(dec!(80), dec!(74), today, today), None);
        assert_eq!(weekly_pace(dec!(80), dec!(74), today, target), None);
    }
}
