use chrono::{Datelike, Days, NaiveDate};

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month with a zero-based month index.
///
/// Construction normalizes the index, so `MonthRef::new(2026, -1)` is
/// December 2025 and `MonthRef::new(2026, 12)` is January 2027. Years are
/// bounded by chrono's `NaiveDate` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthRef {
    year: i32,
    month: u32,
}

impl MonthRef {
    /// Normalizes `(year, month)`, clamping to the first or last
    /// representable month when the result falls outside chrono's range.
    pub fn new(year: i32, month: i32) -> Self {
        let (min_year, max_year) = year_bounds();
        let normalized = i64::from(year) + i64::from(month.div_euclid(12));
        if normalized < i64::from(min_year) {
            return Self {
                year: min_year,
                month: 0,
            };
        }
        if normalized > i64::from(max_year) {
            return Self {
                year: max_year,
                month: 11,
            };
        }
        Self {
            year: normalized as i32,
            month: month.rem_euclid(12) as u32,
        }
    }

    /// Like `new`, but `None` when the normalized month is out of range.
    pub fn checked(year: i32, month: i32) -> Option<Self> {
        let (min_year, max_year) = year_bounds();
        let normalized = i64::from(year) + i64::from(month.div_euclid(12));
        if normalized < i64::from(min_year) || normalized > i64::from(max_year) {
            return None;
        }
        Some(Self::new(year, month))
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based, 0 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Stays put at the earliest representable month.
    pub fn prev(&self) -> Self {
        Self::checked(self.year, self.month as i32 - 1).unwrap_or(*self)
    }

    /// Stays put at the latest representable month.
    pub fn next(&self) -> Self {
        Self::checked(self.year, self.month as i32 + 1).unwrap_or(*self)
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        if self.month == 11 {
            return NaiveDate::from_ymd_opt(self.year, 12, 31);
        }
        NaiveDate::from_ymd_opt(self.year, self.month + 2, 1)?.pred_opt()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize]
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

fn year_bounds() -> (i32, i32) {
    (NaiveDate::MIN.year(), NaiveDate::MAX.year())
}

/// Builds the Sunday-to-Saturday grid of dates covering the month.
///
/// Leading days come from the preceding month and trailing days from the
/// following one, so the result length is always a multiple of 7. Months
/// outside chrono's representable range yield an empty grid.
pub fn month_days(year: i32, month: i32) -> Vec<NaiveDate> {
    let target = MonthRef::new(year, month);
    let (Some(first), Some(last)) = (target.first_day(), target.last_day()) else {
        return Vec::new();
    };

    let leading = u64::from(first.weekday().num_days_from_sunday());
    let trailing = 6 - u64::from(last.weekday().num_days_from_sunday());

    let (Some(start), Some(end)) = (
        first.checked_sub_days(Days::new(leading)),
        last.checked_add_days(Days::new(trailing)),
    ) else {
        return Vec::new();
    };

    let len = (end - start).num_days() as usize + 1;
    start.iter_days().take(len).collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// True only for keys already in canonical `YYYY-MM-DD` form.
pub fn is_date_key(value: &str) -> bool {
    parse_date_key(value).is_some_and(|date| date_key(date) == value)
}
