//! Date label granularity: a year is only shown when the series crosses a
//! calendar year boundary.

use std::collections::BTreeSet;

use chrono::Datelike;
use serde::Serialize;

use crate::domain::observation::Observation;
use crate::domain::timestamp::to_datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelGranularity {
    /// Month and day only.
    Day,
    /// Month, day and year.
    YearQualified,
}

impl LabelGranularity {
    pub fn from_year_qualified(year_qualified: bool) -> Self {
        if year_qualified {
            LabelGranularity::YearQualified
        } else {
            LabelGranularity::Day
        }
    }

    pub fn is_year_qualified(self) -> bool {
        self == LabelGranularity::YearQualified
    }
}

/// True iff the valid timestamps fall in more than one UTC calendar year.
pub fn spans_multiple_years(observations: &[Observation]) -> bool {
    let years: BTreeSet<i32> = observations
        .iter()
        .filter_map(|o| to_datetime(o.timestamp))
        .map(|dt| dt.year())
        .collect();
    years.len() > 1
}
