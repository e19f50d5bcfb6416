//! Chart selector — turn extracted signals into visualization descriptors.
//!
//! Selection rules run independently and append to one ordered output:
//!
//! 1. **Metrics** → one `metric` card group over the first few metrics.
//! 2. **Tables** → per table: `area` + `line` when the first column is
//!    time-ordered, otherwise `bar` (plus a `pie` when no category
//!    dominates), and always a raw `table` view.
//! 3. **Time series** → `area` + `line` over points deduplicated by date.
//! 4. **Lists** → per list: `bar` (plus a guarded `pie`) when a handful of
//!    items carry numbers.
//!
//! Selection is pure apart from the timestamp folded into each `id`.

pub mod list;
pub mod palette;
pub mod series;
pub mod table;
pub mod types;

use chrono::Utc;
use serde_json::Value;

use crate::config::schema::{PaletteConfig, SelectorConfig};
use crate::extract::{ExtractedData, Metric, MetricValue};

pub use types::{ChartConfig, ChartType, Row, VisualizationData};

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Chart selection rules with their thresholds and palettes.
#[derive(Debug, Clone, Default)]
pub struct ChartSelector {
    settings: SelectorConfig,
    palette: PaletteConfig,
}

impl ChartSelector {
    /// Selector with built-in thresholds and palettes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a `ChartSelector` from the configuration.
    pub fn from_config(settings: &SelectorConfig, palette: &PaletteConfig) -> Self {
        Self {
            settings: settings.clone(),
            palette: palette.clone(),
        }
    }

    /// Run every selection rule over `extracted`.
    ///
    /// `_context` is the conversation context; it is accepted so callers can
    /// pass it through, but no rule consults it.
    pub fn select(&self, extracted: &ExtractedData, _context: &str) -> Vec<VisualizationData> {
        let mut out = Emitter::new();

        self.metric_cards(&extracted.metrics, &mut out);
        for tbl in &extracted.tables {
            self.table_charts(tbl, &mut out);
        }
        self.series_charts(&extracted.time_series, &mut out);
        for group in &extracted.lists {
            self.list_charts(group, &mut out);
        }

        out.finish()
    }

    fn metric_cards(&self, metrics: &[Metric], out: &mut Emitter) {
        if metrics.is_empty() {
            return;
        }

        let data = metrics
            .iter()
            .take(self.settings.max_metrics)
            .map(metric_row)
            .collect();

        out.emit(
            ChartType::Metric,
            "Key Metrics".to_string(),
            data,
            ChartConfig::colors(&self.palette.metric),
        );
    }
}

/// Run the chart selector with built-in settings.
pub fn generate_visualizations(
    extracted: &ExtractedData,
    conversation_context: &str,
) -> Vec<VisualizationData> {
    ChartSelector::new().select(extracted, conversation_context)
}

// ---------------------------------------------------------------------------
// Output accumulator
// ---------------------------------------------------------------------------

/// Per-pass output list that stamps each descriptor with a unique id.
struct Emitter {
    stamp: i64,
    visualizations: Vec<VisualizationData>,
}

impl Emitter {
    fn new() -> Self {
        Self {
            stamp: Utc::now().timestamp_millis(),
            visualizations: Vec::new(),
        }
    }

    fn emit(&mut self, chart_type: ChartType, title: String, data: Vec<Row>, config: ChartConfig) {
        let id = format!("{chart_type}-{}-{}", self.visualizations.len(), self.stamp);
        self.visualizations.push(VisualizationData {
            id,
            chart_type,
            title,
            data,
            config: Some(config),
        });
    }

    fn finish(self) -> Vec<VisualizationData> {
        self.visualizations
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Pie guard: no single value may account for `threshold` (e.g. 80%) or
/// more of the total. Empty or non-positive totals never get a pie.
pub fn allows_pie(values: &[f64], threshold: f64) -> bool {
    let sum: f64 = values.iter().sum();
    if values.is_empty() || sum <= 0.0 || !sum.is_finite() {
        return false;
    }
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    max / sum < threshold
}

fn metric_row(metric: &Metric) -> Row {
    let mut row = Row::new();
    row.insert("label".to_string(), Value::from(metric.label.clone()));
    let value = match &metric.value {
        MetricValue::Number(n) => Value::from(*n),
        MetricValue::Text(s) => Value::from(s.clone()),
    };
    row.insert("value".to_string(), value);
    if let Some(trend) = metric.trend
        && let Ok(trend) = serde_json::to_value(trend)
    {
        row.insert("trend".to_string(), trend);
    }
    row
}
