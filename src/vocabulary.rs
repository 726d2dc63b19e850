//! Canonical vocabulary and localization catalogs
//!
//! Plans carry stable identifiers only. A [`Localizer`] maps namespaced keys
//! such as `exercise.row` or `block.backShoulders` to display strings and
//! falls back to the bare identifier when a key is unmapped.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::SplitTable;
use crate::error::ConfigError;
use crate::metabolic::BmiCategory;
use crate::models::{day_key, AdvisoryNote, BlockType, ExerciseKey, Microcycle, NoteKey, Rationale};

/// Key namespaces of the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Block,
    Exercise,
    Note,
    Rationale,
    Advisory,
    Microcycle,
    Day,
    Split,
    Bmi,
}

impl Namespace {
    pub fn prefix(&self) -> &'static str {
        match self {
            Namespace::Block => "block",
            Namespace::Exercise => "exercise",
            Namespace::Note => "note",
            Namespace::Rationale => "rationale",
            Namespace::Advisory => "advisory",
            Namespace::Microcycle => "microcycle",
            Namespace::Day => "day",
            Namespace::Split => "split",
            Namespace::Bmi => "bmi",
        }
    }
}

/// Fully qualified catalog key
pub fn qualified(namespace: Namespace, id: &str) -> String {
    format!("{}.{}", namespace.prefix(), id)
}

/// Maps canonical identifiers to display strings
pub trait Localizer {
    /// Display string for a qualified key, if mapped
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Display string, or the bare identifier when unmapped
    fn translate(&self, namespace: Namespace, id: &str) -> String {
        let key = qualified(namespace, id);
        match self.lookup(&key) {
            Some(text) => text.to_string(),
            None => {
                tracing::debug!(key = %key, "Unmapped vocabulary key");
                id.to_string()
            }
        }
    }

    fn exercise(&self, key: ExerciseKey) -> String {
        self.translate(Namespace::Exercise, key.key())
    }

    fn block(&self, block: BlockType) -> String {
        self.translate(Namespace::Block, block.key())
    }

    fn note(&self, note: NoteKey) -> String {
        self.translate(Namespace::Note, note.key())
    }

    fn day(&self, index: u8) -> String {
        self.translate(Namespace::Day, day_key(index))
    }
}

/// A locale's display strings keyed by qualified identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub locale: String,
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Localizer for Catalog {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, namespace: Namespace, id: &str, text: &str) {
        self.entries.insert(qualified(namespace, id), text.to_string());
    }

    /// Built-in English catalog covering the default vocabulary
    pub fn english() -> Self {
        let mut catalog = Catalog::new("en");

        for block in BlockType::ALL {
            catalog.insert(Namespace::Block, block.key(), english_block(block));
        }
        for key in ExerciseKey::ALL {
            catalog.insert(Namespace::Exercise, key.key(), english_exercise(key));
        }
        for note in NoteKey::ALL {
            let text = match note {
                NoteKey::PainFree => "pain-free",
                NoteKey::KneeFriendly => "knee-friendly",
                NoteKey::SleepHydration => "sleep, hydration",
            };
            catalog.insert(Namespace::Note, note.key(), text);
        }
        for rationale in Rationale::ALL {
            let text = match rationale {
                Rationale::DeficitPreserveLeanMass => "Caloric deficit ~15% with higher protein to preserve lean mass.",
                Rationale::SurplusHypertrophy => "Small surplus ~10% to support hypertrophy with manageable fat gain.",
                Rationale::SurplusStrength => "Slight surplus to push strength while controlling bodyweight.",
                Rationale::MaintenanceRecomposition => "Maintenance calories for recomposition/health.",
            };
            catalog.insert(Namespace::Rationale, rationale.key(), text);
        }

        catalog.insert(
            Namespace::Advisory,
            AdvisoryNote::HighBmiBeforeBulk.key(),
            "High BMI – consider short cut before bulking.",
        );
        catalog.insert(
            Namespace::Advisory,
            AdvisoryNote::InjuryAdaptation.key(),
            "Exercises adapted for injuries; keep pain-free range and consult a pro if needed.",
        );
        catalog.insert(Namespace::Advisory, AdvisoryNote::KEYS[2], "Preferences noted");

        catalog.insert(Namespace::Microcycle, Microcycle::ThreeUpOneDown.key(), "3-up-1-down");

        for (index, name) in ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].iter().enumerate() {
            catalog.insert(Namespace::Day, day_key(index as u8), name);
        }

        for entry in &SplitTable::default().entries {
            catalog.insert(Namespace::Split, &entry.name, &entry.name);
            if let Some(advanced) = &entry.advanced_name {
                catalog.insert(Namespace::Split, advanced, advanced);
            }
        }

        for (category, text) in [
            (BmiCategory::Underweight, "Underweight"),
            (BmiCategory::Normal, "Normal"),
            (BmiCategory::Overweight, "Overweight"),
            (BmiCategory::Obese, "Obese"),
        ] {
            catalog.insert(Namespace::Bmi, category.key(), text);
        }

        catalog
    }

    /// Parse a catalog from TOML
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a catalog from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.as_ref().display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse catalog: {}", path.as_ref().display()))
    }

    /// Keys from `keys` this catalog does not map
    pub fn missing_keys(&self, keys: &[String]) -> Vec<String> {
        keys.iter()
            .filter(|key| !self.entries.contains_key(key.as_str()))
            .cloned()
            .collect()
    }
}

/// Every qualified key engine output can contain, sorted
pub fn canonical_keys(splits: &SplitTable) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();

    keys.extend(BlockType::ALL.iter().map(|b| qualified(Namespace::Block, b.key())));
    keys.extend(ExerciseKey::ALL.iter().map(|e| qualified(Namespace::Exercise, e.key())));
    keys.extend(NoteKey::ALL.iter().map(|n| qualified(Namespace::Note, n.key())));
    keys.extend(Rationale::ALL.iter().map(|r| qualified(Namespace::Rationale, r.key())));
    keys.extend(AdvisoryNote::KEYS.iter().map(|k| qualified(Namespace::Advisory, k)));
    keys.push(qualified(Namespace::Microcycle, Microcycle::ThreeUpOneDown.key()));
    keys.extend((0..7).map(|i| qualified(Namespace::Day, day_key(i))));
    for entry in &splits.entries {
        keys.push(qualified(Namespace::Split, &entry.name));
        if let Some(advanced) = &entry.advanced_name {
            keys.push(qualified(Namespace::Split, advanced));
        }
    }
    keys.extend(
        [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Obese,
        ]
        .iter()
        .map(|c| qualified(Namespace::Bmi, c.key())),
    );

    keys.sort();
    keys.dedup();
    keys
}

fn english_block(block: BlockType) -> &'static str {
    match block {
        BlockType::Upper => "Upper",
        BlockType::Legs => "Legs",
        BlockType::BackShoulders => "Back & Shoulders",
        BlockType::CardioCore => "Cardio / Core",
        BlockType::Hiit => "HIIT",
        BlockType::ActiveRest => "Active rest",
        BlockType::Rest => "Rest",
    }
}

fn english_exercise(key: ExerciseKey) -> &'static str {
    match key {
        ExerciseKey::BarbellBenchPress => "Barbell bench press",
        ExerciseKey::DumbbellBenchPressOrPushUps => "Dumbbell bench press / Push-ups",
        ExerciseKey::PullUpsOrLatPulldown => "Pull-ups or Lat pulldown",
        ExerciseKey::OneArmDbRow => "One-arm DB row",
        ExerciseKey::ShoulderPress => "Shoulder press (DB/Machine)",
        ExerciseKey::LightFrontSideRaises => "Front/Side raises light",
        ExerciseKey::BicepsCurls => "Biceps curls",
        ExerciseKey::TricepsExtensions => "Triceps extensions/pushdown",
        ExerciseKey::BackHackSquat => "Back/Hack squat",
        ExerciseKey::GobletSquatOrLegPress => "Goblet squat / Leg press",
        ExerciseKey::HipHingeStepUps => "Hip hinge / Step-ups low",
        ExerciseKey::RomanianDeadlift => "Romanian deadlift",
        ExerciseKey::HipThrustGluteBridge => "Hip thrust / Glute bridge",
        ExerciseKey::LungesSplitSquat => "Lunges / Split squat",
        ExerciseKey::CalfRaises => "Calf raises",
        ExerciseKey::CorePlankAbs => "Core (plank/abs)",
        ExerciseKey::Row => "Row (cable/DB/T-bar)",
        ExerciseKey::FacePullsRearDelt => "Face pulls / Rear-delt raises",
        ExerciseKey::ScapDrillsYtwl => "Scap drills (YTWL)",
        ExerciseKey::LatFocusPull => "Lat focus (pulldown/pull-ups)",
        ExerciseKey::LateralRaises => "Lateral raises",
        ExerciseKey::ExternalRotationsBand => "External rotations (band)",
        ExerciseKey::BikeBriskWalk => "Bike / brisk walk",
        ExerciseKey::AbsCircuit => "Abs circuit",
        ExerciseKey::MobilityHipsShoulders => "Mobility (hips/shoulders)",
        ExerciseKey::Intervals3030 => "Intervals 30:30 (run/row/bike)",
        ExerciseKey::CoolDownMobility => "Cool-down + mobility",
        ExerciseKey::Walk => "Walk",
        ExerciseKey::StretchingFoamRoll => "Stretching & foam roll",
        ExerciseKey::RestRecovery => "Rest / Recovery",
    }
}
