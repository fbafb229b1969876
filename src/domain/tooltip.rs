//! Tooltip content for a single hovered point.

use serde::Serialize;

use crate::domain::format::{currency, date_label, group_thousands};
use crate::domain::label_policy::LabelGranularity;
use crate::domain::moving_average::SmoothedObservation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipLine {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub date_label: String,
    pub lines: Vec<TooltipLine>,
}

impl Tooltip {
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

impl std::fmt::Display for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.date_label)?;
        for line in &self.lines {
            writeln!(f, "{}: {}", line.label, line.value)?;
        }
        Ok(())
    }
}

/// Lines appear as Open, High, Low, Close, MA, Volume; absent fields are skipped.
pub fn format_tooltip(point: &SmoothedObservation, year_qualified: bool) -> Tooltip {
    let obs = &point.observation;
    let granularity = LabelGranularity::from_year_qualified(year_qualified);

    let prices = [
        ("Open", obs.open),
        ("High", obs.high),
        ("Low", obs.low),
        ("Close", Some(obs.close)),
        ("MA", point.moving_average),
    ];

    let mut lines: Vec<TooltipLine> = prices
        .into_iter()
        .filter_map(|(label, value)| value.map(|v| line(label, currency(v))))
        .collect();

    if let Some(volume) = obs.volume {
        lines.push(line("Volume", group_thousands(volume)));
    }

    Tooltip {
        date_label: date_label(obs.timestamp, granularity),
        lines,
    }
}

fn line(label: &str, value: String) -> TooltipLine {
    TooltipLine {
        label: label.to_string(),
        value,
    }
}
