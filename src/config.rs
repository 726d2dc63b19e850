use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::export::ExportFormat;
use crate::logging::LogConfig;
use crate::models::{ActivityLevel, BlockType, Experience, Goal, Profile};

/// Main application configuration (CLI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Output preferences
    pub output: OutputSettings,

    /// Logging setup
    pub logging: LogConfig,

    /// Planner rule tables
    pub planner: PlannerConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Output preferences for generated plans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Default export format
    pub format: ExportFormat,

    /// Localization catalog used for text output (built-in English when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

/// Every rule table the engine consults. Injected into the generator so
/// tests and deployments can override individual constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub metabolic: MetabolicConfig,
    pub periodization: PeriodizationConfig,
    pub session_caps: SessionCaps,
    pub splits: SplitTable,
}

/// Energy and macronutrient constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolicConfig {
    /// Age used when the profile has none
    pub default_age: u32,

    /// BMI at or above which bulking triggers a caution note
    pub high_bmi_bulk_threshold: Decimal,

    /// TDEE multipliers (McArdle et al.)
    pub activity_factors: ActivityFactors,

    /// Calorie target multipliers per goal
    pub goal_multipliers: GoalMultipliers,

    /// Protein and fat ranges in grams per kilogram of body weight
    pub macros: MacroRatios,

    /// Single-value estimate used by the profile summary
    pub estimate: EstimateConfig,
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactors {
    pub sedentary: Decimal,
    pub light: Decimal,
    pub moderate: Decimal,
    pub high: Decimal,
    pub very_high: Decimal,
}

impl ActivityFactors {
    pub fn factor(&self, level: ActivityLevel) -> Decimal {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::High => self.high,
            ActivityLevel::VeryHigh => self.very_high,
        }
    }
}

/// Calorie target multipliers applied to TDEE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalMultipliers {
    pub maintain: Decimal,
    pub cut: Decimal,
    pub bulk: Decimal,
    pub strength: Decimal,
}

impl GoalMultipliers {
    /// Same table with the smaller 7% bulking surplus
    pub fn conservative_bulk() -> Self {
        Self {
            bulk: dec!(1.07),
            ..Self::default()
        }
    }

    pub fn multiplier(&self, goal: Goal) -> Decimal {
        match goal {
            Goal::Maintain => self.maintain,
            Goal::Cut => self.cut,
            Goal::Bulk => self.bulk,
            Goal::Strength => self.strength,
        }
    }
}

/// Macronutrient ranges in g/kg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein_low: Decimal,
    pub protein_high: Decimal,
    pub fat_low: Decimal,
    pub fat_high: Decimal,
}

/// Constants of the quick profile estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Share of calories from fat
    pub fat_calorie_share: Decimal,
    /// Protein g/kg when cutting
    pub protein_cut: Decimal,
    /// Protein g/kg for strength
    pub protein_strength: Decimal,
    /// Protein g/kg otherwise
    pub protein_default: Decimal,
    pub goal_multipliers: GoalMultipliers,
}

impl EstimateConfig {
    pub fn protein_per_kg(&self, goal: Goal) -> Decimal {
        match goal {
            Goal::Cut => self.protein_cut,
            Goal::Strength => self.protein_strength,
            Goal::Maintain | Goal::Bulk => self.protein_default,
        }
    }
}

/// Heavy/moderate/light set counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSets {
    pub heavy: u32,
    pub moderate: u32,
    pub light: u32,
}

/// One week of the load/deload curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleWeek {
    pub multiplier: Decimal,
    pub rep_hint: String,
    #[serde(default)]
    pub deload: bool,
}

/// Periodization tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodizationConfig {
    pub floors: TierSets,
    pub beginner: TierSets,
    pub intermediate: TierSets,
    pub advanced: TierSets,
    /// Ordered weeks of the microcycle
    pub weeks: Vec<CycleWeek>,
}

impl PeriodizationConfig {
    pub const CYCLE_WEEKS: usize = 4;

    pub fn baseline(&self, experience: Experience) -> TierSets {
        match experience {
            Experience::Beginner => self.beginner,
            Experience::Intermediate => self.intermediate,
            Experience::Advanced => self.advanced,
        }
    }
}

/// Maximum exercises for sessions up to `max_minutes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCap {
    pub max_minutes: u32,
    pub max_items: usize,
}

/// Session-length caps for resistance blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCaps {
    /// Cap for sessions longer than every threshold
    pub longest: usize,
    /// Thresholds in ascending order of minutes
    pub thresholds: Vec<SessionCap>,
}

/// A named weekly block sequence for one training frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitEntry {
    pub days: u8,
    pub name: String,
    /// Alternative name for advanced athletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_name: Option<String>,
    pub blocks: [BlockType; 7],
}

impl SplitEntry {
    /// The 2-day sequence, also used as the fallback
    pub fn upper_lower_cardio() -> Self {
        use BlockType::*;
        Self {
            days: 2,
            name: "Upper/Lower + Cardio".to_string(),
            advanced_name: None,
            blocks: [Upper, Rest, Legs, Rest, CardioCore, Rest, Rest],
        }
    }
}

/// Split lookup table keyed by days per week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitTable {
    /// Day count whose entry is used when a count has no entry
    pub fallback_days: u8,
    pub entries: Vec<SplitEntry>,
}

impl SplitTable {
    pub fn entry(&self, days: u8) -> Option<&SplitEntry> {
        self.entries.iter().find(|entry| entry.days == days)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            output: OutputSettings::default(),
            logging: LogConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: ExportFormat::Text,
            catalog: None,
        }
    }
}

impl Default for MetabolicConfig {
    fn default() -> Self {
        MetabolicConfig {
            default_age: 28,
            high_bmi_bulk_threshold: dec!(27),
            activity_factors: ActivityFactors::default(),
            goal_multipliers: GoalMultipliers::default(),
            macros: MacroRatios::default(),
            estimate: EstimateConfig::default(),
        }
    }
}

impl Default for ActivityFactors {
    fn default() -> Self {
        ActivityFactors {
            sedentary: dec!(1.2),
            light: dec!(1.375),
            moderate: dec!(1.55),
            high: dec!(1.725),
            very_high: dec!(1.9),
        }
    }
}

impl Default for GoalMultipliers {
    fn default() -> Self {
        GoalMultipliers {
            maintain: dec!(1.0),
            cut: dec!(0.85),
            bulk: dec!(1.10),
            strength: dec!(1.03),
        }
    }
}

impl Default for MacroRatios {
    fn default() -> Self {
        MacroRatios {
            protein_low: dec!(1.6),
            protein_high: dec!(2.2),
            fat_low: dec!(0.7),
            fat_high: dec!(1.0),
        }
    }
}

impl Default for EstimateConfig {
    fn default() -> Self {
        EstimateConfig {
            fat_calorie_share: dec!(0.25),
            protein_cut: dec!(1.9),
            protein_strength: dec!(1.8),
            protein_default: dec!(1.6),
            goal_multipliers: GoalMultipliers::conservative_bulk(),
        }
    }
}

impl Default for PeriodizationConfig {
    fn default() -> Self {
        PeriodizationConfig {
            floors: TierSets { heavy: 2, moderate: 2, light: 1 },
            beginner: TierSets { heavy: 3, moderate: 3, light: 2 },
            intermediate: TierSets { heavy: 4, moderate: 3, light: 3 },
            advanced: TierSets { heavy: 5, moderate: 4, light: 3 },
            weeks: vec![
                CycleWeek { multiplier: dec!(0.9), rep_hint: "12–15".to_string(), deload: false },
                CycleWeek { multiplier: dec!(1.0), rep_hint: "8–12".to_string(), deload: false },
                CycleWeek { multiplier: dec!(1.1), rep_hint: "6–10".to_string(), deload: false },
                CycleWeek { multiplier: dec!(0.6), rep_hint: "10–12 (deload)".to_string(), deload: true },
            ],
        }
    }
}

impl Default for SessionCaps {
    fn default() -> Self {
        SessionCaps {
            longest: 7,
            thresholds: vec![
                SessionCap { max_minutes: 30, max_items: 4 },
                SessionCap { max_minutes: 45, max_items: 5 },
                SessionCap { max_minutes: 60, max_items: 6 },
            ],
        }
    }
}

impl Default for SplitTable {
    fn default() -> Self {
        use BlockType::*;

        let full_week = [Upper, Legs, Hiit, BackShoulders, CardioCore, ActiveRest, Rest];
        SplitTable {
            fallback_days: 2,
            entries: vec![
                SplitEntry::upper_lower_cardio(),
                SplitEntry {
                    days: 3,
                    name: "Upper / Lower / Pull-Shoulders".to_string(),
                    advanced_name: None,
                    blocks: [Upper, Legs, BackShoulders, Rest, CardioCore, Rest, Rest],
                },
                SplitEntry {
                    days: 4,
                    name: "Upper / Lower / Rest / Pull-Shoulders / Cardio".to_string(),
                    advanced_name: None,
                    blocks: [Upper, Legs, Rest, BackShoulders, CardioCore, Rest, ActiveRest],
                },
                SplitEntry {
                    days: 5,
                    name: "UL + Pull-Shoulders + Cardio".to_string(),
                    advanced_name: Some("PPL + Cardio".to_string()),
                    blocks: full_week,
                },
                SplitEntry {
                    days: 6,
                    name: "Hybrid PPL + Conditioning".to_string(),
                    advanced_name: None,
                    blocks: full_week,
                },
                SplitEntry {
                    days: 7,
                    name: "Hybrid PPL + Conditioning".to_string(),
                    advanced_name: None,
                    blocks: full_week,
                },
            ],
        }
    }
}

impl PlannerConfig {
    /// Parse planner tables from TOML and validate them
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        let config: PlannerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let metabolic = &self.metabolic;
        let factors = [
            ("activity_factors.sedentary", metabolic.activity_factors.sedentary),
            ("activity_factors.light", metabolic.activity_factors.light),
            ("activity_factors.moderate", metabolic.activity_factors.moderate),
            ("activity_factors.high", metabolic.activity_factors.high),
            ("activity_factors.very_high", metabolic.activity_factors.very_high),
            ("goal_multipliers.maintain", metabolic.goal_multipliers.maintain),
            ("goal_multipliers.cut", metabolic.goal_multipliers.cut),
            ("goal_multipliers.bulk", metabolic.goal_multipliers.bulk),
            ("goal_multipliers.strength", metabolic.goal_multipliers.strength),
        ];
        for (name, value) in factors {
            if value <= Decimal::ZERO {
                return Err(ConfigError::InvalidMultiplier {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }

        let weeks = &self.periodization.weeks;
        if weeks.len() != PeriodizationConfig::CYCLE_WEEKS {
            return Err(ConfigError::CycleLength {
                expected: PeriodizationConfig::CYCLE_WEEKS,
                found: weeks.len(),
            });
        }
        if let Some((index, week)) = weeks
            .iter()
            .enumerate()
            .find(|(_, week)| week.multiplier <= Decimal::ZERO)
        {
            return Err(ConfigError::InvalidMultiplier {
                name: format!("periodization.weeks[{}].multiplier", index),
                value: week.multiplier.to_string(),
            });
        }

        let caps = &self.session_caps.thresholds;
        if caps.windows(2).any(|pair| pair[0].max_minutes >= pair[1].max_minutes) {
            return Err(ConfigError::SessionCaps {
                reason: "thresholds must be sorted by ascending minutes".to_string(),
            });
        }
        if self.session_caps.longest == 0 || caps.iter().any(|cap| cap.max_items == 0) {
            return Err(ConfigError::SessionCaps {
                reason: "every cap must allow at least one exercise".to_string(),
            });
        }

        if self.splits.entry(self.splits.fallback_days).is_none() {
            return Err(ConfigError::MissingSplit {
                days: self.splits.fallback_days,
            });
        }

        Ok(())
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        config
            .planner
            .validate()
            .with_context(|| format!("Invalid planner tables in {}", path.as_ref().display()))?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fitplan")
            .join("config.toml")
    }

    /// Load the default config file, or defaults when no file exists.
    /// A file that exists but fails to parse or validate is an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(Self::default_config_path())
    }

    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }
}

/// Load a profile from a JSON or TOML file, chosen by extension
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<Profile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    let profile: Profile = if is_toml {
        toml::from_str(&content).with_context(|| format!("Failed to parse TOML profile: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON profile: {}", path.display()))?
    };

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.metadata.version, deserialized.metadata.version);
        assert_eq!(config.planner, deserialized.planner);
    }

    #[test]
    fn test_default_planner_config_is_valid() {
        assert!(PlannerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_goal_multiplier_alternatives() {
        assert_eq!(GoalMultipliers::default().multiplier(Goal::Bulk), dec!(1.10));
        assert_eq!(GoalMultipliers::conservative_bulk().multiplier(Goal::Bulk), dec!(1.07));
        assert_eq!(GoalMultipliers::conservative_bulk().multiplier(Goal::Cut), dec!(0.85));
    }

    #[test]
    fn test_validation_rejects_bad_tables() {
        let mut config = PlannerConfig::default();
        config.periodization.weeks.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CycleLength { expected: 4, found: 3 })
        ));

        let mut config = PlannerConfig::default();
        config.splits.entries.retain(|entry| entry.days != 2);
        assert!(matches!(config.validate(), Err(ConfigError::MissingSplit { days: 2 })));

        let mut config = PlannerConfig::default();
        config.metabolic.goal_multipliers.cut = dec!(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMultiplier { .. })));

        let mut config = PlannerConfig::default();
        config.session_caps.thresholds.reverse();
        assert!(matches!(config.validate(), Err(ConfigError::SessionCaps { .. })));
    }

    #[test]
    fn test_planner_config_from_toml_override() {
        let mut config = PlannerConfig::default();
        config.metabolic.goal_multipliers.bulk = dec!(1.07);
        let toml_str = toml::to_string(&config).unwrap();

        let parsed = PlannerConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed.metabolic.goal_multipliers.bulk, dec!(1.07));
        assert_eq!(parsed.splits.entries.len(), 6);
    }

    #[test]
    fn test_config_file_io() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut original_config = AppConfig::default();
        original_config.planner.metabolic.default_age = 35;

        original_config.save_to_file(&config_path).unwrap();
        let loaded_config = AppConfig::load_from_file(&config_path).unwrap();

        assert_eq!(loaded_config.planner.metabolic.default_age, 35);
    }

    #[test]
    fn test_load_or_default_only_falls_back_when_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AppConfig::load_or_default_from(&path).unwrap();
        assert_eq!(config.planner, PlannerConfig::default());

        let mut custom = AppConfig::default();
        custom.planner.metabolic.goal_multipliers.cut = dec!(0.80);
        custom.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_or_default_from(&path).unwrap();
        assert_eq!(loaded.planner.metabolic.goal_multipliers.cut, dec!(0.80));

        let content = fs::read_to_string(&path).unwrap();
        fs::write(&path, format!("{}\nbogus =\n", content)).unwrap();
        assert!(AppConfig::load_or_default_from(&path).is_err());

        custom.planner.metabolic.goal_multipliers.cut = dec!(0);
        custom.save_to_file(&path).unwrap();
        let err = AppConfig::load_or_default_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid planner tables"));
    }

    #[test]
    fn test_load_profile_json_and_toml() {
        let temp_dir = tempdir().unwrap();

        let json_path = temp_dir.path().join("profile.json");
        fs::write(
            &json_path,
            r#"{"gender":"male","weight_kg":80,"height_cm":180,"goal":"cut","activity":"moderate",
                "equipment":"gym","experience":"intermediate","days_per_week":4,"session_length_min":60}"#,
        )
        .unwrap();
        let profile = load_profile(&json_path).unwrap();
        assert_eq!(profile.days_per_week, 4);

        let toml_path = temp_dir.path().join("profile.toml");
        fs::write(
            &toml_path,
            r#"
gender = "female"
weight_kg = 61.5
height_cm = 165
goal = "bulk"
activity = "light"
equipment = "home"
experience = "beginner"
days_per_week = 3
session_length_min = 45

[injuries]
knees = true
"#,
        )
        .unwrap();
        let profile = load_profile(&toml_path).unwrap();
        assert_eq!(profile.weight_kg, dec!(61.5));
        assert!(profile.injuries.knees);
        assert!(!profile.injuries.back);
    }

    #[test]
    fn test_missing_profile_file_reports_path() {
        let err = load_profile("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
