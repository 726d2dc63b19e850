//! Exercise pools per training block
//!
//! Each block is an ordered list of slots. A slot holds (condition, template)
//! rules evaluated first-match, so exactly one exercise fills every slot and
//! the capability logic stays separate from set counts. Slots are listed in
//! priority order; the time trimmer drops from the end.

use serde::{Deserialize, Serialize};

use crate::constraints::{Capabilities, Capability};
use crate::models::{BlockType, Exercise, ExerciseKey, NoteKey};
use crate::periodization::{SetScheme, Tier};

/// When a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    All(&'static [Capability]),
}

impl Condition {
    pub fn matches(&self, capabilities: &Capabilities) -> bool {
        match self {
            Condition::Always => true,
            Condition::All(required) => capabilities.has_all(required),
        }
    }
}

/// Set count source of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volume {
    /// Taken from the week's set scheme
    Tier(Tier),
    /// Independent of periodization
    Fixed(u32),
}

/// Exercise prescription before set counts are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: ExerciseKey,
    pub volume: Volume,
    pub reps: &'static str,
    pub rest_sec: Option<u32>,
    pub note: Option<NoteKey>,
}

impl ExerciseTemplate {
    const fn tiered(name: ExerciseKey, tier: Tier, reps: &'static str, rest_sec: u32) -> Self {
        Self {
            name,
            volume: Volume::Tier(tier),
            reps,
            rest_sec: Some(rest_sec),
            note: None,
        }
    }

    const fn fixed(name: ExerciseKey, sets: u32, reps: &'static str) -> Self {
        Self {
            name,
            volume: Volume::Fixed(sets),
            reps,
            rest_sec: None,
            note: None,
        }
    }

    const fn noted(self, note: NoteKey) -> Self {
        Self {
            note: Some(note),
            ..self
        }
    }

    /// Resolve the set count against a week's scheme
    pub fn instantiate(&self, scheme: &SetScheme) -> Exercise {
        let sets = match self.volume {
            Volume::Tier(tier) => scheme.sets_for(tier),
            Volume::Fixed(sets) => sets,
        };

        Exercise {
            name: self.name,
            sets,
            reps: self.reps.to_string(),
            rest_sec: self.rest_sec,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub when: Condition,
    pub template: ExerciseTemplate,
}

/// One logical position in a block, filled by the first matching rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub rules: &'static [Rule],
}

impl Slot {
    pub fn select(&self, capabilities: &Capabilities) -> Option<&ExerciseTemplate> {
        self.rules
            .iter()
            .find(|rule| rule.when.matches(capabilities))
            .map(|rule| &rule.template)
    }
}

const fn when(required: &'static [Capability], template: ExerciseTemplate) -> Rule {
    Rule {
        when: Condition::All(required),
        template,
    }
}

const fn always(template: ExerciseTemplate) -> Rule {
    Rule {
        when: Condition::Always,
        template,
    }
}

use Capability::*;
use ExerciseKey as E;
use Tier::*;

static UPPER: &[Slot] = &[
    Slot { rules: &[
        when(&[Barbell, ShoulderSafe], ExerciseTemplate::tiered(E::BarbellBenchPress, Heavy, "4–6", 120)),
        always(ExerciseTemplate::tiered(E::DumbbellBenchPressOrPushUps, Heavy, "6–10", 90)),
    ] },
    Slot { rules: &[
        when(&[PullupBar], ExerciseTemplate::tiered(E::PullUpsOrLatPulldown, Moderate, "6–10", 90)),
        always(ExerciseTemplate::tiered(E::OneArmDbRow, Moderate, "8–12", 75)),
    ] },
    Slot { rules: &[
        when(&[ShoulderSafe], ExerciseTemplate::tiered(E::ShoulderPress, Moderate, "8–12", 75)),
        always(ExerciseTemplate::tiered(E::LightFrontSideRaises, Light, "12–15", 60).noted(NoteKey::PainFree)),
    ] },
    Slot { rules: &[always(ExerciseTemplate::tiered(E::BicepsCurls, Light, "10–15", 60))] },
    Slot { rules: &[always(ExerciseTemplate::tiered(E::TricepsExtensions, Light, "10–15", 60))] },
];

static LEGS: &[Slot] = &[
    Slot { rules: &[
        when(&[KneeSafe, Barbell], ExerciseTemplate::tiered(E::BackHackSquat, Heavy, "4–8", 120)),
        when(&[KneeSafe], ExerciseTemplate::tiered(E::GobletSquatOrLegPress, Heavy, "8–12", 90)),
        always(ExerciseTemplate::tiered(E::HipHingeStepUps, Moderate, "10–12", 75).noted(NoteKey::KneeFriendly)),
    ] },
    Slot { rules: &[
        when(&[BackSafe], ExerciseTemplate::tiered(E::RomanianDeadlift, Moderate, "6–10", 90)),
        always(ExerciseTemplate::tiered(E::HipThrustGluteBridge, Moderate, "8–12", 75)),
    ] },
    Slot { rules: &[always(ExerciseTemplate::tiered(E::LungesSplitSquat, Light, "10–12", 75))] },
    Slot { rules: &[always(ExerciseTemplate::tiered(E::CalfRaises, Light, "12–15", 60))] },
    Slot { rules: &[always(ExerciseTemplate::tiered(E::CorePlankAbs, Light, "60–90s / 12–15", 45))] },
];

static BACK_SHOULDERS: &[Slot] = &[
    Slot { rules: &[always(ExerciseTemplate::tiered(E::Row, Heavy, "6–10", 90))] },
    Slot { rules: &[
        when(&[ShoulderSafe], ExerciseTemplate::tiered(E::FacePullsRearDelt, Moderate, "12–15", 60)),
        always(ExerciseTemplate::tiered(E::ScapDrillsYtwl, Light, "12–15", 45)),
    ] },
    Slot { rules: &[always(ExerciseTemplate::tiered(E::LatFocusPull, Moderate, "6–10", 90))] },
    Slot { rules: &[
        when(&[ShoulderSafe], ExerciseTemplate::tiered(E::LateralRaises, Light, "12–15", 60)),
        always(ExerciseTemplate::tiered(E::ExternalRotationsBand, Light, "12–15", 45)),
    ] },
];

static CARDIO_CORE: &[Slot] = &[
    Slot { rules: &[always(ExerciseTemplate::fixed(E::BikeBriskWalk, 1, "25–35 min"))] },
    Slot { rules: &[always(ExerciseTemplate::fixed(E::AbsCircuit, 3, "12–15"))] },
    Slot { rules: &[always(ExerciseTemplate::fixed(E::MobilityHipsShoulders, 1, "8–10 min"))] },
];

static HIIT: &[Slot] = &[
    Slot { rules: &[always(ExerciseTemplate::fixed(E::Intervals3030, 1, "20–25 min"))] },
    Slot { rules: &[always(ExerciseTemplate::fixed(E::CoolDownMobility, 1, "10 min"))] },
];

static ACTIVE_REST: &[Slot] = &[
    Slot { rules: &[always(ExerciseTemplate::fixed(E::Walk, 1, "30–45 min"))] },
    Slot { rules: &[always(ExerciseTemplate::fixed(E::StretchingFoamRoll, 1, "10–15 min"))] },
];

static REST: &[Slot] = &[Slot { rules: &[always(
    ExerciseTemplate::fixed(E::RestRecovery, 0, "-").noted(NoteKey::SleepHydration),
)] }];

/// Slot table for a block, in priority order
pub fn slots(block: BlockType) -> &'static [Slot] {
    match block {
        BlockType::Upper => UPPER,
        BlockType::Legs => LEGS,
        BlockType::BackShoulders => BACK_SHOULDERS,
        BlockType::CardioCore => CARDIO_CORE,
        BlockType::Hiit => HIIT,
        BlockType::ActiveRest => ACTIVE_REST,
        BlockType::Rest => REST,
    }
}

/// Builds block exercise lists for one capability set and one week's scheme
#[derive(Debug, Clone, Copy)]
pub struct ExercisePoolBuilder<'a> {
    capabilities: Capabilities,
    scheme: &'a SetScheme,
}

impl<'a> ExercisePoolBuilder<'a> {
    pub fn new(capabilities: Capabilities, scheme: &'a SetScheme) -> Self {
        Self {
            capabilities,
            scheme,
        }
    }

    /// Untrimmed exercise list for a block
    pub fn build(&self, block: BlockType) -> Vec<Exercise> {
        slots(block)
            .iter()
            .filter_map(|slot| slot.select(&self.capabilities))
            .map(|template| template.instantiate(self.scheme))
            .collect()
    }
}
