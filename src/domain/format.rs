//! Display formatting for dates, prices and volumes (en-US conventions).

use crate::domain::label_policy::LabelGranularity;
use crate::domain::timestamp::to_datetime;

/// Shown wherever a value could not be computed.
pub const PLACEHOLDER: &str = "N/A";

/// `MM/DD` or `MM/DD/YYYY`, in UTC.
pub fn date_label(instant: f64, granularity: LabelGranularity) -> String {
    let Some(dt) = to_datetime(instant) else {
        return PLACEHOLDER.to_string();
    };
    match granularity {
        LabelGranularity::Day => dt.format("%m/%d").to_string(),
        LabelGranularity::YearQualified => dt.format("%m/%d/%Y").to_string(),
    }
}

/// `$123.45`, `-$1.50`.
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let digits = format!("{:.2}", value.abs());
    if value < 0.0 && digits != "0.00" {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Integer with `,` thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Price axis tick label.
pub fn price_axis_label(value: f64) -> String {
    currency(value)
}

/// Volume axis tick label in millions: `12.3M`.
pub fn volume_axis_label(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.1}M", value / 1e6)
}
