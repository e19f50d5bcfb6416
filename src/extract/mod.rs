//! Extractor — scan a block of AI-generated text for structured signals.
//!
//! The extractor is a set of independent recognizers, each producing typed
//! candidate records:
//!
//! 1. **Metrics** — `Label: 12%`, `Label: $2.5M`, `Label: 40 customers`,
//!    plus per-entity call-outs inside list items.
//! 2. **Tables** — markdown pipe tables.
//! 3. **Lists** — contiguous bulleted or numbered runs.
//! 4. **Time series** — `<temporal token>: <number>` across seven families.
//!
//! Extraction is a pure function of the input string. All accumulation
//! happens in locals owned by a single call.

pub mod lists;
pub mod metrics;
pub mod numbers;
pub mod tables;
pub mod temporal;
pub mod time_series;

use serde::{Deserialize, Serialize};

pub use lists::ListGroup;
pub use metrics::{Metric, MetricValue, Trend};
pub use tables::Table;
pub use time_series::TimeSeriesPoint;

/// Everything one extraction pass found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedData {
    pub metrics: Vec<Metric>,
    pub tables: Vec<Table>,
    pub lists: Vec<ListGroup>,
    pub time_series: Vec<TimeSeriesPoint>,
}

impl ExtractedData {
    /// True if no recognizer found anything.
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
            && self.tables.is_empty()
            && self.lists.is_empty()
            && self.time_series.is_empty()
    }
}

/// Scan `text` and return every signal found. Never fails; text with no
/// recognizable structure yields empty collections.
pub fn extract_data_from_response(text: &str) -> ExtractedData {
    let mut collector = metrics::MetricCollector::new();
    metrics::collect_labeled_metrics(text, &mut collector);

    let lists = lists::extract_lists(text);
    for item in lists.iter().flat_map(|list| list.items.iter()) {
        collector.extend(metrics::entity_metrics(item));
    }

    ExtractedData {
        metrics: collector.into_metrics(),
        tables: tables::extract_tables(text),
        lists,
        time_series: time_series::extract_time_series(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_data() {
        let data = extract_data_from_response("");
        assert_eq!(data, ExtractedData::default());
        assert!(data.is_empty());
    }

    #[test]
    fn whitespace_only_input_yields_empty_data() {
        assert!(extract_data_from_response("   \n\t\n  ").is_empty());
    }

    #[test]
    fn extraction_is_deterministic() {
        let text = "Churn: 10%\n| A | B |\n|---|---|\n| Jan | 3 |\n- Acme (Risk: 80%)\nQ1: 5";
        assert_eq!(
            extract_data_from_response(text),
            extract_data_from_response(text)
        );
    }

    #[test]
    fn entity_metrics_follow_labeled_metrics() {
        let text = "Churn Rate: 12%\n\nAt-risk accounts:\n- Acme Corp (Churn Risk: 85%)\n";
        let data = extract_data_from_response(text);
        let labels: Vec<&str> = data.metrics.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels.first(), Some(&"Churn Rate"));
        assert!(labels.contains(&"Acme Corp"));
        assert_eq!(data.lists.len(), 1);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ExtractedData::default()).unwrap();
        assert!(json.get("timeSeries").is_some());
        assert!(json.get("metrics").is_some());
    }
}
