use crate::calendar::MonthRef;
use crate::errors::InvalidHabit;
use crate::ids::IdGenerator;
use crate::ledger::ProgressLedger;
use crate::models::{Habit, MonthView};
use crate::presenter::CalendarPresenter;
use crate::registry::HabitRegistry;
use crate::storage::Persistence;
use chrono::{NaiveDate, SubsecRound, Utc};
use tracing::{info, warn};

/// The whole session: habits, progress, displayed month and where they
/// are persisted. Every mutation writes the aggregate it changed.
pub struct Tracker {
    registry: HabitRegistry,
    ledger: ProgressLedger,
    presenter: CalendarPresenter,
    persistence: Persistence,
    ids: Box<dyn IdGenerator>,
}

impl Tracker {
    pub fn open(
        persistence: Persistence,
        ids: impl IdGenerator + 'static,
        month: MonthRef,
    ) -> Self {
        let habits = persistence.load_habits();
        let ledger = persistence.load_progress();
        info!(habits = habits.len(), "loaded tracker state");
        Self {
            registry: HabitRegistry::from_habits(habits),
            ledger,
            presenter: CalendarPresenter::new(month),
            persistence,
            ids: Box::new(ids),
        }
    }

    pub fn habits(&self) -> &[Habit] {
        self.registry.list()
    }

    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    pub fn current_month(&self) -> MonthRef {
        self.presenter.current()
    }

    /// Adds a habit with a trimmed `name`. Blank names and colours other
    /// than `#RRGGBB` are rejected without touching any state.
    pub fn add_habit(&mut self, name: &str, color: &str) -> Result<Habit, InvalidHabit> {
        let candidate = Habit {
            id: self.ids.next_id(),
            name: name.trim().to_string(),
            color: color.to_string(),
            created_at: Utc::now().trunc_subsecs(3),
        };
        if let Err(err) = candidate.validate() {
            warn!("rejected habit: {err}");
            return Err(err);
        }

        let habit = self
            .registry
            .add(candidate.id, &candidate.name, &candidate.color, candidate.created_at)
            .clone();
        info!(habit_id = %habit.id, name = %habit.name, "added habit");
        self.persistence.save_habits(self.registry.list());
        Ok(habit)
    }

    /// Deletes a habit and all of its progress. Unknown ids change nothing.
    pub fn delete_habit(&mut self, habit_id: &str) -> bool {
        let removed = self.registry.remove(habit_id).is_some();
        let had_progress = self.ledger.delete_habit(habit_id);
        if removed {
            info!(habit_id, "deleted habit");
            self.persistence.save_habits(self.registry.list());
        }
        if had_progress {
            self.persistence.save_progress(&self.ledger);
        }
        removed
    }

    pub fn toggle(&mut self, habit_id: &str, date: NaiveDate) -> bool {
        let completed = self.ledger.toggle(habit_id, date);
        info!(habit_id, %date, completed, "toggled progress");
        self.persistence.save_progress(&self.ledger);
        completed
    }

    pub fn prev_month(&mut self) -> MonthRef {
        self.presenter.go_to_prev_month()
    }

    pub fn next_month(&mut self) -> MonthRef {
        self.presenter.go_to_next_month()
    }

    pub fn show_month(&mut self, month: MonthRef) {
        self.presenter.show(month);
    }

    pub fn month_view(&self, today: NaiveDate) -> MonthView {
        self.presenter.month_view(self.registry.list(), &self.ledger, today)
    }
}
