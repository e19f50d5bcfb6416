//! CLI command implementations for vizsift.
//!
//! Provides subcommand handlers for:
//! - `vizsift extract [FILE]` — print the extracted data as JSON
//! - `vizsift visualize [FILE]` — run the pipeline and print the charts
//! - `vizsift stream` — assemble stdin lines as fragments, chart at EOF
//! - `vizsift stats` — pipeline run summary, chart type distribution
//! - `vizsift config show|init|path` — configuration management

use std::fs;
use std::io::{self, BufRead, Read};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::logger;
use crate::analytics::reporter::{self, Stats};
use crate::charts::{ChartType, VisualizationData};
use crate::config;
use crate::extract::extract_data_from_response;
use crate::pipeline::{Pipeline, PipelineRun, ResponseAssembler};

/// Output format for commands that print results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Read the whole response from `path`, or from stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

// ---------------------------------------------------------------------------
// vizsift extract
// ---------------------------------------------------------------------------

/// Print the extracted data for a response as pretty JSON.
pub fn run_extract(path: Option<&Path>) -> Result<()> {
    let text = read_input(path)?;
    let extracted = extract_data_from_response(&text);
    println!("{}", serde_json::to_string_pretty(&extracted)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// vizsift visualize
// ---------------------------------------------------------------------------

/// Run the full pipeline over a response and print the visualizations.
pub fn run_visualize(path: Option<&Path>, context: &str, format: OutputFormat) -> Result<()> {
    let text = read_input(path)?;
    let config = config::load();
    let run = Pipeline::from_config(&config).run(&text, context);
    logger::log_pipeline_run("cli", &run, config.logging.enabled);

    print_run(&run, format)
}

// ---------------------------------------------------------------------------
// vizsift stream
// ---------------------------------------------------------------------------

/// Treat each stdin line as one streamed fragment. Charts are only produced
/// once stdin closes.
pub fn run_stream(context: &str, format: OutputFormat) -> Result<()> {
    let assembler = assemble_lines(io::stdin().lock())?;
    let fragments = assembler.fragment_count();
    let text = assembler.into_text();

    let config = config::load();
    let run = Pipeline::from_config(&config).run(&text, context);
    logger::log_pipeline_run("stream", &run, config.logging.enabled);

    if format == OutputFormat::Table {
        println!(
            "{}",
            format!("Assembled {fragments} fragments ({} bytes)", run.input_bytes).dimmed()
        );
    }
    print_run(&run, format)
}

/// One fragment per input line, newline restored.
fn assemble_lines(reader: impl BufRead) -> Result<ResponseAssembler> {
    let mut assembler = ResponseAssembler::new();
    for line in reader.lines() {
        let line = line.context("failed to read stdin")?;
        assembler.push(&format!("{line}\n"));
    }
    Ok(assembler)
}

fn print_run(run: &PipelineRun, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&run.visualizations)?);
        }
        OutputFormat::Csv => print_visualizations_csv(&run.visualizations),
        OutputFormat::Table => print_visualizations_table(run),
    }
    Ok(())
}

fn print_visualizations_table(run: &PipelineRun) {
    if run.visualizations.is_empty() {
        println!(
            "{}",
            "No chartable data found in the response.".yellow()
        );
        return;
    }

    let extracted = &run.extracted;
    println!("{}", "vizsift Visualizations".bold().cyan());
    println!("{}", "=".repeat(60));
    println!(
        "  {} {} metrics, {} tables, {} lists, {} time points",
        "Extracted:".bold(),
        extracted.metrics.len(),
        extracted.tables.len(),
        extracted.lists.len(),
        extracted.time_series.len(),
    );
    println!();
    println!("  {:<8} {:<40} {:>6}", "Type", "Title", "Rows");
    println!("  {}", "-".repeat(58));

    for (i, viz) in run.visualizations.iter().enumerate() {
        let line = format!(
            "  {:<8} {:<40} {:>6}",
            colorize_chart_type(viz.chart_type),
            truncate(&viz.title, 40),
            viz.data.len(),
        );

        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_visualizations_csv(visualizations: &[VisualizationData]) {
    println!("id,type,title,rows");
    for viz in visualizations {
        println!(
            "{},{},\"{}\",{}",
            viz.id,
            viz.chart_type,
            viz.title.replace('"', "\"\""),
            viz.data.len(),
        );
    }
}

// ---------------------------------------------------------------------------
// vizsift stats
// ---------------------------------------------------------------------------

/// Show pipeline run statistics.
pub fn run_stats(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let stats = reporter::compute_stats(days);

    if stats.total_runs == 0 {
        println!(
            "{}",
            "No data yet. Run some responses through vizsift to see stats.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Csv => print_stats_csv(&stats),
        OutputFormat::Table => print_stats_table(&stats),
    }

    Ok(())
}

fn print_stats_table(stats: &Stats) {
    println!("{}", "vizsift Pipeline Report".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();

    println!("  {} {}", "Total runs:          ".bold(), stats.total_runs);
    println!(
        "  {} {}",
        "Visualizations:      ".bold(),
        format_number(stats.total_visualizations)
    );
    println!(
        "  {} {:.2}",
        "Avg per run:         ".bold(),
        stats.avg_visualizations_per_run
    );
    println!(
        "  {} {:.1}%",
        "Runs with no charts: ".bold(),
        stats.empty_run_pct
    );
    println!(
        "  {} {}",
        "Input processed:     ".bold(),
        format!("{} bytes", format_number(stats.total_input_bytes))
    );
    println!(
        "  {} {:.1}ms",
        "Avg duration:        ".bold(),
        stats.avg_duration_ms
    );
    println!();

    let ex = &stats.extraction;
    println!("{}", "Extracted".bold().cyan());
    println!(
        "  Metrics: {}  Tables: {}  Lists: {}  Time points: {}",
        ex.metrics, ex.tables, ex.lists, ex.time_series_points,
    );
    println!();

    if !stats.chart_types.is_empty() {
        println!("{}", "Chart Types".bold().cyan());
        println!("  {:<10} {:>8} {:>8}", "Type", "Count", "Share");
        println!("  {}", "-".repeat(28));
        for stat in &stats.chart_types {
            let label = match ChartType::parse(&stat.chart_type) {
                Some(t) => colorize_chart_type(t).to_string(),
                None => stat.chart_type.clone(),
            };
            println!("  {:<10} {:>8} {:>7.1}%", label, stat.count, stat.pct);
        }
        println!();
    }

    if !stats.sources.is_empty() {
        let sources: Vec<String> = stats
            .sources
            .iter()
            .map(|s| format!("{}: {}", s.source, s.runs))
            .collect();
        println!("{}", "Sources".bold().cyan());
        println!("  {}", sources.join("  "));
    }
}

fn print_stats_csv(stats: &Stats) {
    println!("chart_type,count,pct");
    for stat in &stats.chart_types {
        println!("{},{},{:.1}", stat.chart_type, stat.count, stat.pct);
    }
}

// ---------------------------------------------------------------------------
// vizsift config
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective vizsift Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.vizsift/config.toml", global_exists);
    print_source(".vizsift.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "VIZSIFT_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.vizsift/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!(
        "  {}",
        "Edit the file to tune chart selection and palettes.".dimmed()
    );
    Ok(())
}

/// Print the config file locations.
pub fn run_config_path() -> Result<()> {
    let global = config::global_config_file().context("could not determine home directory")?;
    println!("{} {}", "global: ".bold(), global.display());
    if let Some(project) = config::project_config_file() {
        println!("{} {}", "project:".bold(), project.display());
    }
    if let Some(log) = logger::pipeline_log_path() {
        println!("{} {}", "log:    ".bold(), log.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

fn colorize_chart_type(chart_type: ChartType) -> colored::ColoredString {
    let name = chart_type.as_str();
    match chart_type {
        ChartType::Metric => name.cyan(),
        ChartType::Bar => name.magenta(),
        ChartType::Line => name.green(),
        ChartType::Area => name.blue(),
        ChartType::Pie => name.yellow(),
        ChartType::Table => name.normal(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Key Metrics", 20), "Key Metrics");
        assert_eq!(truncate("Time Series Overview", 5), "Time…");
        assert_eq!(truncate("€€€€", 3), "€€…");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(
            OutputFormat::from_str_opt(Some("unknown")),
            OutputFormat::Table
        );
    }

    #[test]
    fn test_assemble_lines_counts_one_fragment_per_line() {
        let assembler = assemble_lines("Jan: 100\nFeb: 120\n".as_bytes()).unwrap();
        assert_eq!(assembler.fragment_count(), 2);
        assert_eq!(assembler.partial_text(), "Jan: 100\nFeb: 120\n");
    }

    #[test]
    fn test_read_input_from_missing_file_errors() {
        let err = read_input(Some(Path::new("/nonexistent/response.md"))).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
