use crate::errors::InvalidHabit;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type HabitId = String;

pub const HABIT_COLORS: [&str; 8] = [
    "#3B82F6", "#EF4444", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#F97316", "#06B6D4",
];

pub const DEFAULT_COLOR: &str = HABIT_COLORS[0];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub color: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Checks the invariants a freshly added habit satisfies.
    pub fn validate(&self) -> Result<(), InvalidHabit> {
        if self.id.is_empty() {
            return Err(InvalidHabit::MissingId);
        }
        if self.name.trim().is_empty() {
            return Err(InvalidHabit::BlankName);
        }
        if !is_hex_color(&self.color) {
            return Err(InvalidHabit::BadColor(self.color.clone()));
        }
        Ok(())
    }
}

/// `#RRGGBB` only; colours end up in inline styles on the page.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub habit_id: HabitId,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub habit_id: HabitId,
    pub date: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatus {
    pub habit_id: HabitId,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub completed_count: usize,
    /// `"completed/total"` for in-month days once a habit exists.
    pub progress: Option<String>,
    pub habits: Vec<HabitStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub weekdays: Vec<String>,
    pub habits: Vec<Habit>,
    pub days: Vec<CalendarDay>,
}

/// ISO-8601 timestamps in UTC with millisecond precision.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(|err| D::Error::custom(format!("invalid timestamp `{raw}`: {err}")))
    }
}
