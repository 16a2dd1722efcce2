use crate::calendar::{date_key, is_date_key};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse completion record: habit id -> `YYYY-MM-DD` -> completed.
///
/// A missing entry means "not completed". Entries for ids that no longer
/// belong to a live habit are left alone until `delete_habit` removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressLedger {
    habits: BTreeMap<String, BTreeMap<String, bool>>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the entry for `(habit_id, date)` and returns the new value.
    pub fn toggle(&mut self, habit_id: &str, date: NaiveDate) -> bool {
        let entry = self
            .habits
            .entry(habit_id.to_string())
            .or_default()
            .entry(date_key(date))
            .or_default();
        *entry = !*entry;
        *entry
    }

    pub fn get(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.habits
            .get(habit_id)
            .and_then(|days| days.get(&date_key(date)))
            .copied()
            .unwrap_or(false)
    }

    pub fn delete_habit(&mut self, habit_id: &str) -> bool {
        self.habits.remove(habit_id).is_some()
    }

    pub fn contains_habit(&self, habit_id: &str) -> bool {
        self.habits.contains_key(habit_id)
    }

    /// Rejects records with empty habit ids or non-canonical date keys.
    pub fn validate(&self) -> Result<(), String> {
        for (habit_id, days) in &self.habits {
            if habit_id.is_empty() {
                return Err("empty habit id".to_string());
            }
            if let Some(key) = days.keys().find(|key| !is_date_key(key)) {
                return Err(format!("invalid date key `{key}` for habit `{habit_id}`"));
            }
        }
        Ok(())
    }
}
