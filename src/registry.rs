use crate::models::{Habit, HabitId};
use chrono::{DateTime, Utc};

/// Ordered habit definitions. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitRegistry {
    habits: Vec<Habit>,
}

impl HabitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_habits(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    /// Appends a habit. The caller has already validated it.
    pub fn add(
        &mut self,
        id: HabitId,
        name: &str,
        color: &str,
        created_at: DateTime<Utc>,
    ) -> &Habit {
        let index = self.habits.len();
        self.habits.push(Habit {
            id,
            name: name.to_string(),
            color: color.to_string(),
            created_at,
        });
        &self.habits[index]
    }

    /// Removes the habit with `habit_id`. Unknown ids are a no-op.
    pub fn remove(&mut self, habit_id: &str) -> Option<Habit> {
        let index = self.habits.iter().position(|habit| habit.id == habit_id)?;
        Some(self.habits.remove(index))
    }

    pub fn list(&self) -> &[Habit] {
        &self.habits
    }
}
