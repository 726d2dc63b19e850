use serde::{Deserialize, Serialize};

use crate::models::{Equipment, Injuries};

/// A single capability an exercise rule can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Barbell,
    PullupBar,
    KneeSafe,
    BackSafe,
    ShoulderSafe,
}

/// What the athlete can safely train with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities {
    pub barbell: bool,
    pub pullup_bar: bool,
    pub knee_safe: bool,
    pub back_safe: bool,
    pub shoulder_safe: bool,
}

impl Capabilities {
    /// Resolve capabilities from equipment and injury flags.
    ///
    /// A pull-up bar is assumed available everywhere, home setups included.
    pub fn resolve(equipment: Equipment, injuries: &Injuries) -> Self {
        Self {
            barbell: equipment == Equipment::Gym,
            pullup_bar: true,
            knee_safe: !injuries.knees,
            back_safe: !injuries.back,
            shoulder_safe: !injuries.shoulders,
        }
    }

    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Barbell => self.barbell,
            Capability::PullupBar => self.pullup_bar,
            Capability::KneeSafe => self.knee_safe,
            Capability::BackSafe => self.back_safe,
            Capability::ShoulderSafe => self.shoulder_safe,
        }
    }

    pub fn has_all(&self, required: &[Capability]) -> bool {
        required.iter().all(|capability| self.has(*capability))
    }
}
