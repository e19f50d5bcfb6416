//! Analytics reporter: aggregation over the JSONL pipeline log.
//!
//! Feeds `vizsift stats` and `GET /api/stats`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::logger::{self, PipelineLogEntry};

// ---------------------------------------------------------------------------
// Aggregated stats
// ---------------------------------------------------------------------------

/// Summary statistics for `vizsift stats`.
#[derive(Debug, Default, Serialize)]
pub struct Stats {
    pub total_runs: usize,
    pub total_visualizations: usize,
    pub avg_visualizations_per_run: f64,
    /// Share of runs that produced no visualization at all.
    pub empty_run_pct: f64,
    pub total_input_bytes: usize,
    pub avg_duration_ms: f64,
    pub extraction: ExtractionTotals,
    pub chart_types: Vec<ChartTypeStat>,
    pub sources: Vec<SourceStat>,
}

/// Items found by the extractor, summed over all runs.
#[derive(Debug, Default, Serialize)]
pub struct ExtractionTotals {
    pub metrics: usize,
    pub tables: usize,
    pub lists: usize,
    pub time_series_points: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartTypeStat {
    pub chart_type: String,
    pub count: usize,
    /// Share of all emitted visualizations.
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceStat {
    pub source: String,
    pub runs: usize,
}

// ---------------------------------------------------------------------------
// Stats computation
// ---------------------------------------------------------------------------

/// Compute aggregate stats from all log entries, optionally filtered to
/// the last `days` days.
pub fn compute_stats(days: Option<u32>) -> Stats {
    let entries = logger::read_entries_since_days(days);
    build_stats(&entries)
}

pub fn build_stats(entries: &[PipelineLogEntry]) -> Stats {
    if entries.is_empty() {
        return Stats::default();
    }

    let total_runs = entries.len();
    let total_visualizations: usize = entries.iter().map(|e| e.visualizations).sum();
    let empty_runs = entries.iter().filter(|e| e.visualizations == 0).count();

    let timed: Vec<u64> = entries.iter().filter_map(|e| e.duration_ms).collect();
    let avg_duration_ms = if timed.is_empty() {
        0.0
    } else {
        timed.iter().sum::<u64>() as f64 / timed.len() as f64
    };

    Stats {
        total_runs,
        total_visualizations,
        avg_visualizations_per_run: total_visualizations as f64 / total_runs as f64,
        empty_run_pct: pct(empty_runs, total_runs),
        total_input_bytes: entries.iter().map(|e| e.input_bytes).sum(),
        avg_duration_ms,
        extraction: ExtractionTotals {
            metrics: entries.iter().map(|e| e.metrics).sum(),
            tables: entries.iter().map(|e| e.tables).sum(),
            lists: entries.iter().map(|e| e.lists).sum(),
            time_series_points: entries.iter().map(|e| e.time_series_points).sum(),
        },
        chart_types: compute_chart_type_stats(entries),
        sources: compute_source_stats(entries),
    }
}

/// Count emitted chart types. Sorted by count (descending), then name.
fn compute_chart_type_stats(entries: &[PipelineLogEntry]) -> Vec<ChartTypeStat> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        for chart_type in &entry.chart_types {
            *counts.entry(chart_type.as_str()).or_default() += 1;
        }
    }

    let total: usize = counts.values().sum();
    let mut stats: Vec<ChartTypeStat> = counts
        .into_iter()
        .map(|(chart_type, count)| ChartTypeStat {
            chart_type: chart_type.to_string(),
            count,
            pct: pct(count, total),
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

fn compute_source_stats(entries: &[PipelineLogEntry]) -> Vec<SourceStat> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.source.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(source, runs)| SourceStat {
            source: source.to_string(),
            runs,
        })
        .collect()
}

fn pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(source: &str, chart_types: &[&str], duration_ms: Option<u64>) -> PipelineLogEntry {
        PipelineLogEntry {
            timestamp: "2026-01-15T10:00:00+00:00".to_string(),
            source: source.to_string(),
            input_bytes: 100,
            metrics: 2,
            tables: 1,
            lists: 0,
            time_series_points: 0,
            visualizations: chart_types.len(),
            chart_types: chart_types.iter().map(|t| t.to_string()).collect(),
            duration_ms,
        }
    }

    fn sample_entries() -> Vec<PipelineLogEntry> {
        vec![
            entry("cli", &["metric", "bar", "pie", "table"], Some(2)),
            entry("web", &["metric", "bar", "table"], Some(4)),
            entry("web", &[], None),
            entry("stream", &["area", "line"], Some(3)),
        ]
    }

    #[test]
    fn test_build_stats_totals() {
        let stats = build_stats(&sample_entries());

        assert_eq!(stats.total_runs, 4);
        assert_eq!(stats.total_visualizations, 9);
        assert!((stats.avg_visualizations_per_run - 2.25).abs() < 1e-9);
        assert!((stats.empty_run_pct - 25.0).abs() < 1e-9);
        assert_eq!(stats.total_input_bytes, 400);
        assert!((stats.avg_duration_ms - 3.0).abs() < 1e-9);
        assert_eq!(stats.extraction.metrics, 8);
        assert_eq!(stats.extraction.tables, 4);
    }

    #[test]
    fn test_chart_type_distribution() {
        let stats = build_stats(&sample_entries());

        assert_eq!(stats.chart_types.len(), 6);
        let top: Vec<&str> = stats.chart_types[..3]
            .iter()
            .map(|s| s.chart_type.as_str())
            .collect();
        // Ties keep alphabetical order from the BTreeMap.
        assert_eq!(top, vec!["bar", "metric", "table"]);
        assert_eq!(stats.chart_types[0].count, 2);

        let pie = stats.chart_types.iter().find(|s| s.chart_type == "pie").unwrap();
        assert_eq!(pie.count, 1);
        assert!((pie.pct - 100.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_source_counts() {
        let stats = build_stats(&sample_entries());
        let web = stats.sources.iter().find(|s| s.source == "web").unwrap();
        assert_eq!(web.runs, 2);
        assert_eq!(stats.sources.len(), 3);
    }

    #[test]
    fn test_empty_entries() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_runs, 0);
        assert_eq!(stats.empty_run_pct, 0.0);
        assert!(stats.chart_types.is_empty());
    }
}
