use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Session lengths the planner is calibrated for (minutes)
pub const SESSION_LENGTHS: [u32; 5] = [30, 45, 60, 75, 90];

/// Biological sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Body-composition goal driving the calorie target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Maintain,
    Cut,
    Bulk,
    Strength,
}

impl std::str::FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maintain" | "maintenance" => Ok(Goal::Maintain),
            "cut" => Ok(Goal::Cut),
            "bulk" => Ok(Goal::Bulk),
            "strength" => Ok(Goal::Strength),
            _ => Err(format!("Unknown goal: {}", s)),
        }
    }
}

/// Daily activity level outside of planned training
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    High,
    #[serde(alias = "veryHigh", alias = "very_high")]
    VeryHigh,
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            "very-high" | "veryhigh" | "very_high" => Ok(ActivityLevel::VeryHigh),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Where the athlete trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Equipment {
    Home,
    Gym,
}

impl std::str::FromStr for Equipment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Equipment::Home),
            "gym" => Ok(Equipment::Gym),
            _ => Err(format!("Unknown equipment: {}", s)),
        }
    }
}

/// Training experience, which sets the baseline volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for Experience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Experience::Beginner),
            "intermediate" => Ok(Experience::Intermediate),
            "advanced" => Ok(Experience::Advanced),
            _ => Err(format!("Unknown experience level: {}", s)),
        }
    }
}

/// Injury flags. All flags unset means no restrictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Injuries {
    #[serde(default)]
    pub knees: bool,
    #[serde(default)]
    pub back: bool,
    #[serde(default)]
    pub shoulders: bool,
}

impl Injuries {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.knees || self.back || self.shoulders
    }
}

/// Personal fitness profile, the single input of plan generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Age in years (defaults to the configured age when absent)
    #[serde(default)]
    pub age: Option<u32>,

    pub gender: Gender,

    /// Body weight in kilograms
    pub weight_kg: Decimal,

    /// Height in centimeters
    pub height_cm: Decimal,

    pub goal: Goal,

    pub activity: ActivityLevel,

    pub equipment: Equipment,

    pub experience: Experience,

    /// Requested training days; clamped to 2..=7 by the split selector
    #[serde(deserialize_with = "deserialize_day_count")]
    pub days_per_week: u8,

    /// Session budget in minutes (one of 30/45/60/75/90)
    pub session_length_min: u32,

    #[serde(default)]
    pub injuries: Injuries,

    /// Free-text preferences echoed into the plan notes
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Accepts any integer day count. Values outside the `u8` range saturate so
/// the split selector can clamp them instead of the profile failing to load.
fn deserialize_day_count<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, i64::from(u8::MAX)) as u8)
}

impl Profile {
    /// Caller-side validation. The engine itself never re-validates.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.weight_kg <= Decimal::ZERO {
            return Err(ProfileError::NonPositive {
                field: "weight_kg".to_string(),
                value: self.weight_kg.to_string(),
            });
        }
        if self.height_cm <= Decimal::ZERO {
            return Err(ProfileError::NonPositive {
                field: "height_cm".to_string(),
                value: self.height_cm.to_string(),
            });
        }
        if self.age == Some(0) {
            return Err(ProfileError::NonPositive {
                field: "age".to_string(),
                value: "0".to_string(),
            });
        }
        if !SESSION_LENGTHS.contains(&self.session_length_min) {
            return Err(ProfileError::InvalidSessionLength(self.session_length_min));
        }
        Ok(())
    }

    /// Body mass index, unrounded
    pub fn bmi(&self) -> Decimal {
        crate::metabolic::bmi(self.weight_kg, self.height_cm)
    }

    /// Preferences text when supplied and non-empty, verbatim
    pub fn preferences_text(&self) -> Option<&str> {
        self.preferences.as_deref().filter(|text| !text.is_empty())
    }
}

/// Training category of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Upper,
    Legs,
    BackShoulders,
    CardioCore,
    Hiit,
    ActiveRest,
    Rest,
}

impl BlockType {
    pub const ALL: [BlockType; 7] = [
        BlockType::Upper,
        BlockType::Legs,
        BlockType::BackShoulders,
        BlockType::CardioCore,
        BlockType::Hiit,
        BlockType::ActiveRest,
        BlockType::Rest,
    ];

    /// Canonical identifier, identical to the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            BlockType::Upper => "upper",
            BlockType::Legs => "legs",
            BlockType::BackShoulders => "backShoulders",
            BlockType::CardioCore => "cardioCore",
            BlockType::Hiit => "hiit",
            BlockType::ActiveRest => "activeRest",
            BlockType::Rest => "rest",
        }
    }

    /// Resistance blocks, the only ones scaled by periodization and trimmed by time
    pub fn is_strength(&self) -> bool {
        matches!(
            self,
            BlockType::Upper | BlockType::Legs | BlockType::BackShoulders
        )
    }

    /// Days that count toward the requested training frequency
    pub fn is_training(&self) -> bool {
        !matches!(self, BlockType::Rest | BlockType::ActiveRest)
    }
}

/// Canonical exercise identifiers. This is a closed vocabulary; display
/// strings live in the localization catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKey {
    BarbellBenchPress,
    DumbbellBenchPressOrPushUps,
    PullUpsOrLatPulldown,
    OneArmDbRow,
    ShoulderPress,
    LightFrontSideRaises,
    BicepsCurls,
    TricepsExtensions,
    BackHackSquat,
    GobletSquatOrLegPress,
    HipHingeStepUps,
    RomanianDeadlift,
    HipThrustGluteBridge,
    LungesSplitSquat,
    CalfRaises,
    CorePlankAbs,
    Row,
    FacePullsRearDelt,
    ScapDrillsYtwl,
    LatFocusPull,
    LateralRaises,
    ExternalRotationsBand,
    BikeBriskWalk,
    AbsCircuit,
    MobilityHipsShoulders,
    #[serde(rename = "intervals_30_30")]
    Intervals3030,
    CoolDownMobility,
    Walk,
    StretchingFoamRoll,
    RestRecovery,
}

impl ExerciseKey {
    pub const ALL: [ExerciseKey; 30] = [
        ExerciseKey::BarbellBenchPress,
        ExerciseKey::DumbbellBenchPressOrPushUps,
        ExerciseKey::PullUpsOrLatPulldown,
        ExerciseKey::OneArmDbRow,
        ExerciseKey::ShoulderPress,
        ExerciseKey::LightFrontSideRaises,
        ExerciseKey::BicepsCurls,
        ExerciseKey::TricepsExtensions,
        ExerciseKey::BackHackSquat,
        ExerciseKey::GobletSquatOrLegPress,
        ExerciseKey::HipHingeStepUps,
        ExerciseKey::RomanianDeadlift,
        ExerciseKey::HipThrustGluteBridge,
        ExerciseKey::LungesSplitSquat,
        ExerciseKey::CalfRaises,
        ExerciseKey::CorePlankAbs,
        ExerciseKey::Row,
        ExerciseKey::FacePullsRearDelt,
        ExerciseKey::ScapDrillsYtwl,
        ExerciseKey::LatFocusPull,
        ExerciseKey::LateralRaises,
        ExerciseKey::ExternalRotationsBand,
        ExerciseKey::BikeBriskWalk,
        ExerciseKey::AbsCircuit,
        ExerciseKey::MobilityHipsShoulders,
        ExerciseKey::Intervals3030,
        ExerciseKey::CoolDownMobility,
        ExerciseKey::Walk,
        ExerciseKey::StretchingFoamRoll,
        ExerciseKey::RestRecovery,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ExerciseKey::BarbellBenchPress => "barbell_bench_press",
            ExerciseKey::DumbbellBenchPressOrPushUps => "dumbbell_bench_press_or_push_ups",
            ExerciseKey::PullUpsOrLatPulldown => "pull_ups_or_lat_pulldown",
            ExerciseKey::OneArmDbRow => "one_arm_db_row",
            ExerciseKey::ShoulderPress => "shoulder_press",
            ExerciseKey::LightFrontSideRaises => "light_front_side_raises",
            ExerciseKey::BicepsCurls => "biceps_curls",
            ExerciseKey::TricepsExtensions => "triceps_extensions",
            ExerciseKey::BackHackSquat => "back_hack_squat",
            ExerciseKey::GobletSquatOrLegPress => "goblet_squat_or_leg_press",
            ExerciseKey::HipHingeStepUps => "hip_hinge_step_ups",
            ExerciseKey::RomanianDeadlift => "romanian_deadlift",
            ExerciseKey::HipThrustGluteBridge => "hip_thrust_glute_bridge",
            ExerciseKey::LungesSplitSquat => "lunges_split_squat",
            ExerciseKey::CalfRaises => "calf_raises",
            ExerciseKey::CorePlankAbs => "core_plank_abs",
            ExerciseKey::Row => "row",
            ExerciseKey::FacePullsRearDelt => "face_pulls_rear_delt",
            ExerciseKey::ScapDrillsYtwl => "scap_drills_ytwl",
            ExerciseKey::LatFocusPull => "lat_focus_pull",
            ExerciseKey::LateralRaises => "lateral_raises",
            ExerciseKey::ExternalRotationsBand => "external_rotations_band",
            ExerciseKey::BikeBriskWalk => "bike_brisk_walk",
            ExerciseKey::AbsCircuit => "abs_circuit",
            ExerciseKey::MobilityHipsShoulders => "mobility_hips_shoulders",
            ExerciseKey::Intervals3030 => "intervals_30_30",
            ExerciseKey::CoolDownMobility => "cool_down_mobility",
            ExerciseKey::Walk => "walk",
            ExerciseKey::StretchingFoamRoll => "stretching_foam_roll",
            ExerciseKey::RestRecovery => "rest_recovery",
        }
    }
}

/// Canonical identifiers for per-exercise notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKey {
    PainFree,
    KneeFriendly,
    SleepHydration,
}

impl NoteKey {
    pub const ALL: [NoteKey; 3] = [NoteKey::PainFree, NoteKey::KneeFriendly, NoteKey::SleepHydration];

    pub fn key(&self) -> &'static str {
        match self {
            NoteKey::PainFree => "pain_free",
            NoteKey::KneeFriendly => "knee_friendly",
            NoteKey::SleepHydration => "sleep_hydration",
        }
    }
}

/// A prescribed exercise entry. Zero sets marks a rest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: ExerciseKey,
    pub sets: u32,
    /// Rep range or duration hint, e.g. "8–12" or "25–35 min"
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_sec: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteKey>,
}

impl Exercise {
    pub fn is_rest(&self) -> bool {
        self.sets == 0
    }
}

/// One calendar day of the plan (index 0 = Sunday)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub day: u8,
    pub block: BlockType,
    pub items: Vec<Exercise>,
}

/// One week of the microcycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub week: u8,
    /// Target rep range for the week's resistance work
    pub rep_hint: String,
    pub is_deload: bool,
    pub days: Vec<Day>,
}

impl Week {
    pub fn training_days(&self) -> usize {
        self.days.iter().filter(|d| d.block.is_training()).count()
    }

    pub fn total_sets(&self) -> u32 {
        self.days
            .iter()
            .flat_map(|d| d.items.iter())
            .map(|e| e.sets)
            .sum()
    }
}

/// Low/high bounds of a daily macronutrient target in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GramRange {
    pub low: u32,
    pub high: u32,
}

/// Goal-specific nutrition rationale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    DeficitPreserveLeanMass,
    SurplusHypertrophy,
    SurplusStrength,
    MaintenanceRecomposition,
}

impl Rationale {
    pub const ALL: [Rationale; 4] = [
        Rationale::DeficitPreserveLeanMass,
        Rationale::SurplusHypertrophy,
        Rationale::SurplusStrength,
        Rationale::MaintenanceRecomposition,
    ];

    pub fn for_goal(goal: Goal) -> Self {
        match goal {
            Goal::Cut => Rationale::DeficitPreserveLeanMass,
            Goal::Bulk => Rationale::SurplusHypertrophy,
            Goal::Strength => Rationale::SurplusStrength,
            Goal::Maintain => Rationale::MaintenanceRecomposition,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Rationale::DeficitPreserveLeanMass => "deficit_preserve_lean_mass",
            Rationale::SurplusHypertrophy => "surplus_hypertrophy",
            Rationale::SurplusStrength => "surplus_strength",
            Rationale::MaintenanceRecomposition => "maintenance_recomposition",
        }
    }
}

/// Daily energy and macronutrient targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub tdee: u32,
    pub calories: u32,
    pub protein_g: GramRange,
    pub fat_g: GramRange,
    pub carbs_g: u32,
    pub rationale: Rationale,
}

/// Advisory notes attached to the plan summary.
///
/// Every note serializes as a single string: the canonical key for fixed
/// notes, `preferences_noted: <text>` for the preferences echo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvisoryNote {
    /// Bulking with a BMI at or above the caution threshold
    HighBmiBeforeBulk,
    /// At least one injury flag changed exercise selection
    InjuryAdaptation,
    /// Free-text preferences, echoed verbatim
    PreferencesNoted(String),
}

impl AdvisoryNote {
    pub const KEYS: [&'static str; 3] = ["high_bmi_before_bulk", "injury_adaptation", "preferences_noted"];

    pub fn key(&self) -> &'static str {
        match self {
            AdvisoryNote::HighBmiBeforeBulk => Self::KEYS[0],
            AdvisoryNote::InjuryAdaptation => Self::KEYS[1],
            AdvisoryNote::PreferencesNoted(_) => Self::KEYS[2],
        }
    }
}

const PREFERENCES_PREFIX: &str = "preferences_noted: ";

impl std::fmt::Display for AdvisoryNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisoryNote::PreferencesNoted(text) => write!(f, "{}{}", PREFERENCES_PREFIX, text),
            other => f.write_str(other.key()),
        }
    }
}

impl std::str::FromStr for AdvisoryNote {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix(PREFERENCES_PREFIX) {
            return Ok(AdvisoryNote::PreferencesNoted(text.to_string()));
        }
        match s {
            "high_bmi_before_bulk" => Ok(AdvisoryNote::HighBmiBeforeBulk),
            "injury_adaptation" => Ok(AdvisoryNote::InjuryAdaptation),
            _ => Err(format!("Unknown advisory note: {}", s)),
        }
    }
}

impl Serialize for AdvisoryNote {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AdvisoryNote {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Periodization pattern tag. Only one pattern exists today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Microcycle {
    #[default]
    #[serde(rename = "3-up-1-down")]
    ThreeUpOneDown,
}

impl Microcycle {
    pub fn key(&self) -> &'static str {
        match self {
            Microcycle::ThreeUpOneDown => "3-up-1-down",
        }
    }
}

/// Plan header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub split: String,
    pub microcycle: Microcycle,
    pub notes: Vec<AdvisoryNote>,
}

/// Complete generated program: summary, nutrition and four weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub summary: PlanSummary,
    pub nutrition: Nutrition,
    pub weeks: Vec<Week>,
}

/// Canonical Sunday-first short day key for a day index
pub fn day_key(index: u8) -> &'static str {
    const DAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];
    DAYS[usize::from(index % 7)]
}

#[cfg(test)]
pub(crate) fn sample_profile() -> Profile {
    use rust_decimal_macros::dec;

    Profile {
        age: Some(30),
        gender: Gender::Male,
        weight_kg: dec!(80),
        height_cm: dec!(180),
        goal: Goal::Cut,
        activity: ActivityLevel::Moderate,
        equipment: Equipment::Gym,
        experience: Experience::Intermediate,
        days_per_week: 4,
        session_length_min: 60,
        injuries: Injuries::none(),
        preferences: None,
    }
}
