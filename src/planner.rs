//! Plan assembly
//!
//! Composes the metabolic calculator, split selector, periodization
//! scheduler, constraint resolver, exercise pools and time trimmer into a
//! four-week plan. Generation is a pure function of the profile and the
//! injected configuration.

use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::constraints::Capabilities;
use crate::error::Result;
use crate::exercises::ExercisePoolBuilder;
use crate::metabolic::MetabolicCalculator;
use crate::models::{AdvisoryNote, Day, Goal, Microcycle, Nutrition, Plan, PlanSummary, Profile, Week};
use crate::periodization::{PeriodizationScheduler, SetScheme};
use crate::split::{Split, SplitSelector};
use crate::trimmer::TimeTrimmer;

/// Plan generator over an immutable, validated configuration
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: PlannerConfig,
}

impl PlanGenerator {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Full four-week plan
    pub fn generate(&self, profile: &Profile) -> Plan {
        let split = self.split(profile);
        let capabilities = Capabilities::resolve(profile.equipment, &profile.injuries);
        let scheduler = PeriodizationScheduler::new(&self.config.periodization);

        let weeks: Vec<Week> = scheduler
            .cycle(profile.experience)
            .iter()
            .map(|scheme| self.build_week(profile, &split, capabilities, scheme))
            .collect();

        let nutrition = self.nutrition(profile);
        let notes = self.advisory_notes(profile);

        info!(
            split = %split.name,
            calories = nutrition.calories,
            weeks = weeks.len(),
            notes = notes.len(),
            "Generated plan"
        );

        Plan {
            summary: PlanSummary {
                split: split.name,
                microcycle: Microcycle::ThreeUpOneDown,
                notes,
            },
            nutrition,
            weeks,
        }
    }

    /// One week of the cycle. Week 2 is the unscaled baseline.
    pub fn generate_week(&self, profile: &Profile, week: u8) -> Week {
        let split = self.split(profile);
        let capabilities = Capabilities::resolve(profile.equipment, &profile.injuries);
        let scheme = PeriodizationScheduler::new(&self.config.periodization).scheme(week, profile.experience);

        self.build_week(profile, &split, capabilities, &scheme)
    }

    pub fn nutrition(&self, profile: &Profile) -> Nutrition {
        MetabolicCalculator::new(&self.config.metabolic).nutrition(profile)
    }

    pub fn split(&self, profile: &Profile) -> Split {
        SplitSelector::new(&self.config.splits).select(profile.days_per_week, profile.experience)
    }

    /// Summary notes in fixed order: high-BMI bulk caution, injury
    /// adaptation, then the preferences echo.
    pub fn advisory_notes(&self, profile: &Profile) -> Vec<AdvisoryNote> {
        let mut notes = Vec::new();

        if profile.goal == Goal::Bulk && profile.bmi() >= self.config.metabolic.high_bmi_bulk_threshold {
            notes.push(AdvisoryNote::HighBmiBeforeBulk);
        }
        if profile.injuries.any() {
            notes.push(AdvisoryNote::InjuryAdaptation);
        }
        if let Some(text) = profile.preferences_text() {
            notes.push(AdvisoryNote::PreferencesNoted(text.to_string()));
        }

        notes
    }

    fn build_week(&self, profile: &Profile, split: &Split, capabilities: Capabilities, scheme: &SetScheme) -> Week {
        let builder = ExercisePoolBuilder::new(capabilities, scheme);
        let trimmer = TimeTrimmer::new(&self.config.session_caps);

        let days: Vec<Day> = (0u8..)
            .zip(split.blocks.iter())
            .map(|(day, &block)| Day {
                day,
                block,
                items: trimmer.trim(block, builder.build(block), profile.session_length_min),
            })
            .collect();

        let week = Week {
            week: scheme.week,
            rep_hint: scheme.rep_hint.clone(),
            is_deload: scheme.is_deload,
            days,
        };

        debug!(
            week = week.week,
            deload = week.is_deload,
            heavy = scheme.heavy,
            total_sets = week.total_sets(),
            "Built week"
        );

        week
    }
}
