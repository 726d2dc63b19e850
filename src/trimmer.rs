use crate::config::SessionCaps;
use crate::models::{BlockType, Exercise};

/// Caps resistance sessions to the athlete's time budget
#[derive(Debug, Clone, Copy)]
pub struct TimeTrimmer<'a> {
    caps: &'a SessionCaps,
}

impl<'a> TimeTrimmer<'a> {
    pub fn new(caps: &'a SessionCaps) -> Self {
        Self { caps }
    }

    /// Maximum exercises for a session of `minutes`
    pub fn max_items(&self, minutes: u32) -> usize {
        self.caps
            .thresholds
            .iter()
            .find(|cap| minutes <= cap.max_minutes)
            .map(|cap| cap.max_items)
            .unwrap_or(self.caps.longest)
    }

    /// Drop the lowest-priority exercises of a resistance block until it fits.
    /// Other blocks pass through unchanged.
    pub fn trim(&self, block: BlockType, mut items: Vec<Exercise>, minutes: u32) -> Vec<Exercise> {
        if block.is_strength() {
            items.truncate(self.max_items(minutes));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseKey;

    fn items(count: usize) -> Vec<Exercise> {
        (0..count)
            .map(|_| Exercise {
                name: ExerciseKey::BicepsCurls,
                sets: 3,
                reps: "10–15".to_string(),
                rest_sec: Some(60),
                note: None,
            })
            .collect()
    }

    #[test]
    fn test_caps_by_session_length() {
        let caps = SessionCaps::default();
        let trimmer = TimeTrimmer::new(&caps);

        assert_eq!(trimmer.max_items(30), 4);
        assert_eq!(trimmer.max_items(45), 5);
        assert_eq!(trimmer.max_items(60), 6);
        assert_eq!(trimmer.max_items(75), 7);
        assert_eq!(trimmer.max_items(90), 7);
        assert_eq!(trimmer.max_items(20), 4);
    }

    #[test]
    fn test_trim_keeps_priority_order() {
        let caps = SessionCaps::default();
        let trimmer = TimeTrimmer::new(&caps);

        let mut list = items(5);
        list[0].name = ExerciseKey::BarbellBenchPress;
        list[4].name = ExerciseKey::TricepsExtensions;

        let trimmed = trimmer.trim(BlockType::Upper, list, 30);
        assert_eq!(trimmed.len(), 4);
        assert_eq!(trimmed[0].name, ExerciseKey::BarbellBenchPress);
        assert!(trimmed.iter().all(|e| e.name != ExerciseKey::TricepsExtensions));
    }

    #[test]
    fn test_non_strength_blocks_are_untouched() {
        let caps = SessionCaps::default();
        let trimmer = TimeTrimmer::new(&caps);

        assert_eq!(trimmer.trim(BlockType::CardioCore, items(6), 30).len(), 6);
        assert_eq!(trimmer.trim(BlockType::Hiit, items(5), 30).len(), 5);
    }

    #[test]
    fn test_short_lists_are_not_padded() {
        let caps = SessionCaps::default();
        let trimmer = TimeTrimmer::new(&caps);

        assert_eq!(trimmer.trim(BlockType::BackShoulders, items(4), 90).len(), 4);
    }
}
