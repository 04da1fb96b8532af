//! Monday-first week numbering.
//!
//! Week keys include the year so that week 12 of one year never compares
//! equal to week 12 of the next.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Identifies one calendar week under a given [`WeekRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

impl std::fmt::Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Maps a date to the week it belongs to.
pub trait WeekRule {
    fn week_of(&self, date: NaiveDate) -> WeekKey;
}

/// Built-in week rules, selectable from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekNumbering {
    /// ISO-8601: weeks start Monday, week 1 holds the year's first Thursday.
    #[default]
    Iso,
    /// Week 1 starts on 1 January; every later week starts on a Monday.
    /// 31 December and 1 January always fall in different weeks.
    FirstDay,
}

impl WeekRule for WeekNumbering {
    fn week_of(&self, date: NaiveDate) -> WeekKey {
        match self {
            WeekNumbering::Iso => {
                let iso = date.iso_week();
                WeekKey {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            WeekNumbering::FirstDay => {
                let lead = NaiveDate::from_ymd_opt(date.year(), 1, 1)
                    .map(|jan1| jan1.weekday().num_days_from_monday())
                    .unwrap_or(0);
                WeekKey {
                    year: date.year(),
                    week: (date.ordinal0() + lead) / 7 + 1,
                }
            }
        }
    }
}
