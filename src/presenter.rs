use crate::calendar::{MonthRef, WEEKDAYS, month_days};
use crate::ledger::ProgressLedger;
use crate::models::{CalendarDay, Habit, HabitStatus, MonthView};
use chrono::NaiveDate;
use tracing::debug;

/// Month navigation state plus the read-only calendar projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarPresenter {
    current: MonthRef,
}

impl CalendarPresenter {
    pub fn new(current: MonthRef) -> Self {
        Self { current }
    }

    pub fn current(&self) -> MonthRef {
        self.current
    }

    pub fn show(&mut self, month: MonthRef) {
        self.current = month;
    }

    pub fn go_to_prev_month(&mut self) -> MonthRef {
        self.current = self.current.prev();
        self.current
    }

    pub fn go_to_next_month(&mut self) -> MonthRef {
        self.current = self.current.next();
        self.current
    }

    pub fn month_view(
        &self,
        habits: &[Habit],
        ledger: &ProgressLedger,
        today: NaiveDate,
    ) -> MonthView {
        let days = view(self.current, habits, ledger, today);
        debug!(month = %self.current.title(), cells = days.len(), "built month view");
        MonthView {
            year: self.current.year(),
            month: self.current.month(),
            title: self.current.title(),
            weekdays: WEEKDAYS.iter().map(|day| day.to_string()).collect(),
            habits: habits.to_vec(),
            days,
        }
    }
}

pub fn view(
    month: MonthRef,
    habits: &[Habit],
    ledger: &ProgressLedger,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    month_days(month.year(), month.month() as i32)
        .into_iter()
        .map(|date| {
            let is_current_month = month.contains(date);
            let completed = completed_count(date, habits, ledger);
            CalendarDay {
                date,
                is_current_month,
                is_today: date == today,
                completed_count: completed,
                progress: progress_label(is_current_month, completed, habits.len()),
                habits: habits
                    .iter()
                    .map(|habit| HabitStatus {
                        habit_id: habit.id.clone(),
                        completed: ledger.get(&habit.id, date),
                    })
                    .collect(),
            }
        })
        .collect()
}

pub fn completed_count(date: NaiveDate, habits: &[Habit], ledger: &ProgressLedger) -> usize {
    habits
        .iter()
        .filter(|habit| ledger.get(&habit.id, date))
        .count()
}

/// `"completed/total"`, shown only on in-month days once a habit exists.
pub fn progress_label(is_current_month: bool, completed: usize, total: usize) -> Option<String> {
    (is_current_month && total > 0).then(|| format!("{completed}/{total}"))
}
