//! Visualization descriptors handed to the rendering layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of chart data: an ordered mapping from column name to value.
/// Column names for table-derived charts are only known at parse time.
pub type Row = Map<String, Value>;

/// Chart kinds the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Metric,
    Bar,
    Line,
    Area,
    Pie,
    Table,
}

impl ChartType {
    pub const ALL: [ChartType; 6] = [
        Self::Metric,
        Self::Bar,
        Self::Line,
        Self::Area,
        Self::Pie,
        Self::Table,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Pie => "pie",
            Self::Table => "table",
        }
    }

    /// Parse a lowercase chart type name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering hints. Absent keys fall back to `name` / `value` in the
/// renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ChartConfig {
    /// XY chart keyed on `(x, y)`.
    pub fn xy(x: &str, y: &str, colors: &[String]) -> Self {
        Self {
            x_key: Some(x.to_string()),
            y_key: Some(y.to_string()),
            colors: Some(colors.to_vec()),
            ..Self::default()
        }
    }

    /// Pie chart sized by `data_key`, wedges named by `name_key`.
    pub fn pie(name_key: &str, data_key: &str, colors: &[String]) -> Self {
        Self {
            x_key: Some(name_key.to_string()),
            data_key: Some(data_key.to_string()),
            colors: Some(colors.to_vec()),
            ..Self::default()
        }
    }

    /// Palette only.
    pub fn colors(colors: &[String]) -> Self {
        Self {
            colors: Some(colors.to_vec()),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: Option<&str>) -> Self {
        self.format = format.map(str::to_string);
        self
    }
}

/// A fully configured chart descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationData {
    /// Unique within one selection pass.
    pub id: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub data: Vec<Row>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ChartConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_renderer_contract() {
        let viz = VisualizationData {
            id: "bar-0-1".into(),
            chart_type: ChartType::Bar,
            title: "Customers by Region (Bar Chart)".into(),
            data: Vec::new(),
            config: Some(ChartConfig::xy("Region", "Customers", &["#3b82f6".into()])),
        };
        let json = serde_json::to_value(&viz).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["config"]["xKey"], "Region");
        assert_eq!(json["config"]["yKey"], "Customers");
        assert!(json["config"].get("dataKey").is_none());
    }

    #[test]
    fn chart_type_parse_round_trips_names() {
        for chart_type in ChartType::ALL {
            assert_eq!(ChartType::parse(chart_type.as_str()), Some(chart_type));
        }
        assert_eq!(ChartType::parse("scatter"), None);
    }
}
