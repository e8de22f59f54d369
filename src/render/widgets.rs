//! Auxiliary report-page widgets.
//!
//! Both hold purely local, non-persisted interactive state with no
//! contract beyond "reflect the last toggle".

use std::collections::{BTreeSet, HashMap};

/// Per-medication reminder bells.
#[derive(Debug, Default)]
pub struct ReminderLog {
    reminders: HashMap<usize, bool>,
}

impl ReminderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, medication_index: usize) {
        let entry = self.reminders.entry(medication_index).or_insert(false);
        *entry = !*entry;
    }

    pub fn is_set(&self, medication_index: usize) -> bool {
        self.reminders.get(&medication_index).copied().unwrap_or(false)
    }
}

/// Fixed feeling tags for the status log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Feeling {
    Itchiness,
    Stinging,
    Dryness,
    Burning,
    Sensitive,
    Normal,
}

impl Feeling {
    pub const ALL: [Feeling; 6] = [
        Feeling::Itchiness,
        Feeling::Stinging,
        Feeling::Dryness,
        Feeling::Burning,
        Feeling::Sensitive,
        Feeling::Normal,
    ];
}

/// Feeling/compliance log: selected tags plus daily check flags.
#[derive(Debug, Default)]
pub struct StatusLog {
    feelings: BTreeSet<Feeling>,
    pub took_pill: bool,
    pub applied_ointment: bool,
    pub on_period: bool,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_feeling(&mut self, feeling: Feeling) {
        if !self.feelings.remove(&feeling) {
            self.feelings.insert(feeling);
        }
    }

    pub fn has_feeling(&self, feeling: Feeling) -> bool {
        self.feelings.contains(&feeling)
    }

    pub fn selected_feelings(&self) -> Vec<Feeling> {
        self.feelings.iter().copied().collect()
    }

    pub fn toggle_pill(&mut self) {
        self.took_pill = !self.took_pill;
    }

    pub fn toggle_ointment(&mut self) {
        self.applied_ointment = !self.applied_ointment;
    }

    pub fn toggle_period(&mut self) {
        self.on_period = !self.on_period;
    }
}
