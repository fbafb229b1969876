//! Chart data preparation: pure functions over immutable input.

pub mod observation;
pub mod timestamp;
pub mod moving_average;
pub mod axis;
pub mod label_policy;
pub mod format;
pub mod tooltip;
pub mod downsample;
pub mod chart;
pub mod recent_searches;
pub mod config_validation;
pub mod error;
