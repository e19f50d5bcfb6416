/// Configuration schema and defaults for vizsift.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[selector]`, `[palette]`, `[server]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override.
use serde::{Deserialize, Serialize};

use crate::charts::palette;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level vizsift configuration.
///
/// Maps directly to the `~/.vizsift/config.toml` and `.vizsift.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VizsiftConfig {
    pub selector: SelectorConfig,
    pub palette: PaletteConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [selector]
// ---------------------------------------------------------------------------

/// Chart selection thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Metrics shown in the "Key Metrics" card group.
    pub max_metrics: usize,
    /// Tables with more rows than this never get a pie chart.
    pub pie_max_rows: usize,
    /// A pie is only drawn when the largest value is below this share of
    /// the total (0.0–1.0).
    pub pie_dominance_threshold: f64,
    /// Lists are charted only when they carry strictly fewer numeric items
    /// than this.
    pub list_max_items: usize,
    /// Unique dates needed before the global time series is charted.
    pub min_time_series_points: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            max_metrics: 6,
            pie_max_rows: 8,
            pie_dominance_threshold: 0.8,
            list_max_items: 10,
            min_time_series_points: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// [palette]
// ---------------------------------------------------------------------------

/// Ordered color tokens, one list per chart call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub metric: Vec<String>,
    pub table_area: Vec<String>,
    pub table_line: Vec<String>,
    pub table_bar: Vec<String>,
    pub table_pie: Vec<String>,
    pub table: Vec<String>,
    pub series_area: Vec<String>,
    pub series_line: Vec<String>,
    pub list_bar: Vec<String>,
    pub list_pie: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            metric: palette::owned(palette::METRIC),
            table_area: palette::owned(palette::TABLE_AREA),
            table_line: palette::owned(palette::TABLE_LINE),
            table_bar: palette::owned(palette::TABLE_BAR),
            table_pie: palette::owned(palette::TABLE_PIE),
            table: palette::owned(palette::TABLE),
            series_area: palette::owned(palette::SERIES_AREA),
            series_line: palette::owned(palette::SERIES_LINE),
            list_bar: palette::owned(palette::LIST_BAR),
            list_pie: palette::owned(palette::LIST_PIE),
        }
    }
}

// ---------------------------------------------------------------------------
// [server]
// ---------------------------------------------------------------------------

/// Local HTTP endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for `vizsift serve`.
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Pipeline run log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether pipeline runs are appended to the JSONL log.
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

// ---------------------------------------------------------------------------
// Annotated default file
// ---------------------------------------------------------------------------

impl VizsiftConfig {
    /// The annotated default config written by `vizsift config init`.
    pub fn default_toml() -> String {
        r##"# vizsift configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (VIZSIFT_*)
#   2. Project config (.vizsift.toml in current directory)
#   3. User global config (~/.vizsift/config.toml)
#   4. Built-in defaults

[selector]
max_metrics = 6                  # Cards in the "Key Metrics" group
pie_max_rows = 8                 # Tables above this row count never get a pie
pie_dominance_threshold = 0.8    # Skip pies where one slice is >= 80% of the total
list_max_items = 10              # Lists need fewer numeric items than this to chart
min_time_series_points = 2       # Unique dates needed for the global series

[palette]
metric = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4"]
table_area = ["#3b82f6", "#93c5fd", "#1d4ed8"]
table_line = ["#10b981", "#6ee7b7", "#047857"]
table_bar = ["#6366f1", "#8b5cf6", "#a855f7", "#d946ef"]
table_pie = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899"]
table = ["#64748b", "#94a3b8", "#cbd5e1"]
series_area = ["#0ea5e9", "#7dd3fc", "#0369a1"]
series_line = ["#f97316", "#fdba74", "#c2410c"]
list_bar = ["#14b8a6", "#2dd4bf", "#5eead4", "#99f6e4"]
list_pie = ["#f43f5e", "#fb923c", "#facc15", "#4ade80", "#22d3ee", "#a78bfa"]

[server]
addr = "127.0.0.1:9747"

[logging]
enabled = true                   # Set false or VIZSIFT_LOG=0 to stop writing ~/.vizsift/pipeline-log.jsonl
"##
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
