//! Global time-series rule.

use std::collections::HashSet;

use serde_json::Value;

use super::{ChartConfig, ChartSelector, ChartType, Emitter, Row};
use crate::extract::TimeSeriesPoint;

impl ChartSelector {
    pub(super) fn series_charts(&self, points: &[TimeSeriesPoint], out: &mut Emitter) {
        let unique = dedup_by_date(points);
        if unique.len() < self.settings.min_time_series_points.max(1) {
            return;
        }

        let data: Vec<Row> = unique.iter().map(|p| point_row(p)).collect();
        out.emit(
            ChartType::Area,
            "Time Series Overview".to_string(),
            data.clone(),
            ChartConfig::xy("date", "value", &self.palette.series_area),
        );
        out.emit(
            ChartType::Line,
            "Time Series Trend".to_string(),
            data,
            ChartConfig::xy("date", "value", &self.palette.series_line),
        );
    }
}

/// Keep the first point for each distinct `date` string, in encounter order.
pub fn dedup_by_date(points: &[TimeSeriesPoint]) -> Vec<&TimeSeriesPoint> {
    let mut seen = HashSet::new();
    points
        .iter()
        .filter(|p| seen.insert(p.date.as_str()))
        .collect()
}

fn point_row(point: &TimeSeriesPoint) -> Row {
    let mut row = Row::new();
    row.insert("date".to_string(), Value::from(point.date.clone()));
    row.insert("value".to_string(), Value::from(point.value));
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::VisualizationData;

    fn point(date: &str, value: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            date: date.to_string(),
            value,
            label: None,
        }
    }

    fn select(points: &[TimeSeriesPoint]) -> Vec<VisualizationData> {
        let mut out = Emitter::new();
        ChartSelector::new().series_charts(points, &mut out);
        out.finish()
    }

    #[test]
    fn first_occurrence_wins() {
        let points = vec![point("Jan", 1.0), point("Feb", 2.0), point("Jan", 3.0)];
        let unique = dedup_by_date(&points);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].value, 1.0);
        assert_eq!(unique[1].date, "Feb");
    }

    #[test]
    fn two_unique_points_chart_as_area_and_line() {
        let viz = select(&[point("Jan", 100.0), point("Feb", 120.0)]);
        assert_eq!(viz.len(), 2);
        assert_eq!(viz[0].chart_type, ChartType::Area);
        assert_eq!(viz[0].title, "Time Series Overview");
        assert_eq!(viz[1].chart_type, ChartType::Line);
        assert_eq!(viz[1].title, "Time Series Trend");
        assert_eq!(viz[1].data[1]["date"], "Feb");
        let cfg = viz[0].config.as_ref().unwrap();
        assert_eq!(cfg.x_key.as_deref(), Some("date"));
        assert_eq!(cfg.y_key.as_deref(), Some("value"));
    }

    #[test]
    fn duplicates_of_one_date_do_not_chart() {
        assert!(select(&[point("Jan", 1.0), point("Jan", 2.0)]).is_empty());
        assert!(select(&[]).is_empty());
    }
}
