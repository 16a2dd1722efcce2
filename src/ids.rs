use crate::models::HabitId;
use uuid::Uuid;

/// Source of habit ids. Ids must never repeat within a data directory's
/// lifetime, otherwise a new habit could pick up a deleted habit's progress.
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> HabitId;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> HabitId {
        Uuid::new_v4().to_string()
    }
}
