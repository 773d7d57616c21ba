use chrono::NaiveDate;

use crate::dates;
use crate::entries;
use crate::models::{Mood, MoodEntry};

/// One day of a month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub day: u32,
    pub date: NaiveDate,
    pub entry: Option<&'a MoodEntry>,
    pub is_today: bool,
}

/// Data behind a month calendar: blank cells before the 1st (Sunday-first
/// weeks), then one cell per day with that day's entry.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    pub year: i32,
    pub month0: u32,
    pub leading_blanks: u32,
    pub days: Vec<DayCell<'a>>,
}

impl<'a> MonthView<'a> {
    /// `month0` may overflow; it is folded into the right year first.
    /// Days outside chrono's supported range are left out.
    pub fn build(entries: &'a [MoodEntry], year: i32, month0: i32, today: NaiveDate) -> Self {
        let (year, month) = dates::normalize_month(year, month0);
        let month0 = month - 1;

        let days = (1..=dates::days_in_month(year, month0 as i32))
            .filter_map(|day| {
                let date = NaiveDate::from_ymd_opt(year, month, day)?;
                let key = dates::format_date(&date);
                Some(DayCell {
                    day,
                    date,
                    entry: entries.iter().find(|e| e.date.starts_with(&key)),
                    is_today: dates::is_same_day(&date, &today),
                })
            })
            .collect();

        Self {
            year,
            month0,
            leading_blanks: dates::first_weekday_of_month(year, month0 as i32),
            days,
        }
    }

    pub fn previous(&self) -> (i32, u32) {
        let (year, month) = dates::normalize_month(self.year, self.month0 as i32 - 1);
        (year, month - 1)
    }

    pub fn next(&self) -> (i32, u32) {
        let (year, month) = dates::normalize_month(self.year, self.month0 as i32 + 1);
        (year, month - 1)
    }

    pub fn day(&self, day: u32) -> Option<&DayCell<'a>> {
        self.days.iter().find(|cell| cell.day == day)
    }

    pub fn recorded_days(&self) -> usize {
        self.days.iter().filter(|cell| cell.entry.is_some()).count()
    }

    pub fn mood_counts(&self) -> [(Mood, usize); 3] {
        entries::mood_counts(self.days.iter().filter_map(|cell| cell.entry))
    }
}
