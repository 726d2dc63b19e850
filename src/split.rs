use serde::{Deserialize, Serialize};

use crate::config::{SplitEntry, SplitTable};
use crate::models::{BlockType, Experience};

/// Supported training days per week
pub const MIN_DAYS: u8 = 2;
pub const MAX_DAYS: u8 = 7;

/// Named weekly block sequence, Sunday-first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub name: String,
    pub blocks: [BlockType; 7],
}

impl Split {
    fn from_entry(entry: &SplitEntry, experience: Experience) -> Self {
        let name = match (&entry.advanced_name, experience) {
            (Some(advanced), Experience::Advanced) => advanced.clone(),
            _ => entry.name.clone(),
        };

        Self {
            name,
            blocks: entry.blocks,
        }
    }
}

/// Clamp a requested day count into the supported range
pub fn clamp_days(days: u8) -> u8 {
    days.clamp(MIN_DAYS, MAX_DAYS)
}

/// Split lookup over an injected table
#[derive(Debug, Clone, Copy)]
pub struct SplitSelector<'a> {
    table: &'a SplitTable,
}

impl<'a> SplitSelector<'a> {
    pub fn new(table: &'a SplitTable) -> Self {
        Self { table }
    }

    /// Pick the split for a requested day count. Out-of-range counts are
    /// clamped and counts missing from the table use the fallback entry.
    pub fn select(&self, days_per_week: u8, experience: Experience) -> Split {
        let days = clamp_days(days_per_week);
        if days != days_per_week {
            tracing::warn!(requested = days_per_week, clamped = days, "Days per week out of range");
        }

        if let Some(entry) = self.table.entry(days) {
            return Split::from_entry(entry, experience);
        }

        tracing::warn!(days, fallback = self.table.fallback_days, "No split for day count, using fallback");
        match self.table.entry(self.table.fallback_days) {
            Some(entry) => Split::from_entry(entry, experience),
            None => Split::from_entry(&SplitEntry::upper_lower_cardio(), experience),
        }
    }
}
