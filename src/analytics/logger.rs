use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::pipeline::PipelineRun;

// ---------------------------------------------------------------------------
// Pipeline log entry (JSONL analytics)
// ---------------------------------------------------------------------------

/// A single entry in the pipeline log (`~/.vizsift/pipeline-log.jsonl`).
///
/// Each entry records what one pipeline run found and emitted. Used by the
/// reporter for `vizsift stats` and `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineLogEntry {
    pub timestamp: String,
    /// Where the run came from: `"cli"`, `"stream"` or `"web"`.
    pub source: String,
    pub input_bytes: usize,
    #[serde(default)]
    pub metrics: usize,
    #[serde(default)]
    pub tables: usize,
    #[serde(default)]
    pub lists: usize,
    #[serde(default)]
    pub time_series_points: usize,
    pub visualizations: usize,
    /// Chart type of every emitted visualization, in output order.
    #[serde(default)]
    pub chart_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration_ms: Option<u64>,
}

impl PipelineLogEntry {
    pub fn from_run(source: &str, run: &PipelineRun) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            source: source.to_string(),
            input_bytes: run.input_bytes,
            metrics: run.extracted.metrics.len(),
            tables: run.extracted.tables.len(),
            lists: run.extracted.lists.len(),
            time_series_points: run.extracted.time_series.len(),
            visualizations: run.visualizations.len(),
            chart_types: run
                .visualizations
                .iter()
                .map(|v| v.chart_type.to_string())
                .collect(),
            duration_ms: Some(run.duration_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Logging functions
// ---------------------------------------------------------------------------

/// Record a pipeline run. Best-effort: failures are silently ignored, and
/// nothing is written when logging is disabled.
pub fn log_pipeline_run(source: &str, run: &PipelineRun, enabled: bool) {
    if !enabled {
        return;
    }
    let entry = PipelineLogEntry::from_run(source, run);
    let _ = append_log_entry(&entry);
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all entries from the pipeline log.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries() -> Vec<PipelineLogEntry> {
    let Some(path) = pipeline_log_path() else {
        return Vec::new();
    };

    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    parse_entries(BufReader::new(file))
}

/// Read log entries filtered to a time window (last N days).
///
/// If `days` is `None`, returns all entries.
pub fn read_entries_since_days(days: Option<u32>) -> Vec<PipelineLogEntry> {
    filter_since_days(read_all_entries(), days)
}

fn parse_entries(reader: impl BufRead) -> Vec<PipelineLogEntry> {
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<PipelineLogEntry>(&line).ok())
        .collect()
}

fn filter_since_days(entries: Vec<PipelineLogEntry>, days: Option<u32>) -> Vec<PipelineLogEntry> {
    let Some(days) = days else {
        return entries;
    };

    let cutoff = Utc::now() - chrono::Duration::days(i64::from(days));
    let cutoff_str = cutoff.to_rfc3339();

    entries
        .into_iter()
        .filter(|e| e.timestamp >= cutoff_str)
        .collect()
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

fn append_log_entry(entry: &PipelineLogEntry) -> Result<()> {
    let Some(path) = pipeline_log_path() else {
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

/// Return the path to the pipeline log file.
pub fn pipeline_log_path() -> Option<PathBuf> {
    config::data_dir().map(|dir| dir.join("pipeline-log.jsonl"))
}
