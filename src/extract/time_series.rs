//! Time-indexed point recognizer.
//!
//! Every temporal family is scanned independently and every match becomes a
//! point, so one token can yield several points (`01/15/2024: 100` is both a
//! full date and a bare year). Collapsing by `date` happens when a series is
//! charted, not here.

use serde::{Deserialize, Serialize};

use super::numbers::parse_number;
use super::temporal;

/// A `(date label, value)` pair. `date` is a label as written in the text
/// (`Jan`, `Q1 2024`, `Week 3`, `2024-01-15`), not a parsed calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub value: f64,
    /// Name of the temporal family that produced the point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Collect points from all seven families, family by family.
pub fn extract_time_series(text: &str) -> Vec<TimeSeriesPoint> {
    let mut points = Vec::new();

    for (kind, re) in temporal::point_patterns() {
        for caps in re.captures_iter(text) {
            let Some(value) = parse_number(&caps["value"]) else {
                continue;
            };
            points.push(TimeSeriesPoint {
                date: caps["date"].trim().to_string(),
                value,
                label: Some(kind.as_str().to_string()),
            });
        }
    }

    points
}
