use vizsift::config::VizsiftConfig;
use vizsift::{
    ChartType, ExtractedData, Pipeline, VisualizationData, extract_data_from_response,
    generate_visualizations, parse_response_for_visualizations, visualize_fragments,
};

fn types(viz: &[VisualizationData]) -> Vec<ChartType> {
    viz.iter().map(|v| v.chart_type).collect()
}

const REGIONS: &str = "\
| Region | Customers |
|---|---|
| East | 10 |
| West | 20 |
";

// ---------------------------------------------------------------------------
// Table rule
// ---------------------------------------------------------------------------

#[test]
fn region_table_yields_bar_pie_and_table() {
    let viz = parse_response_for_visualizations(REGIONS, "");

    assert_eq!(
        types(&viz),
        vec![ChartType::Bar, ChartType::Pie, ChartType::Table]
    );
    assert_eq!(viz[0].title, "Customers by Region (Bar Chart)");

    let bar = serde_json::to_value(&viz[0]).unwrap();
    assert_eq!(bar["type"], "bar");
    assert_eq!(bar["config"]["xKey"], "Region");
    assert_eq!(bar["config"]["yKey"], "Customers");
    assert_eq!(bar["data"][0]["Region"], "East");
    assert_eq!(bar["data"][1]["Customers"], 20.0);

    let table = serde_json::to_value(&viz[2]).unwrap();
    assert_eq!(table["title"], "Detailed Data");
    assert_eq!(table["data"][1]["Customers"], "20");
}

#[test]
fn dominated_table_gets_no_pie() {
    let text = "| Region | Customers |\n|---|---|\n| East | 95 |\n| West | 5 |\n";
    let viz = parse_response_for_visualizations(text, "");
    assert_eq!(types(&viz), vec![ChartType::Bar, ChartType::Table]);
}

#[test]
fn percent_columns_carry_a_format_hint() {
    let text = "| Segment | Churn |\n|---|---|\n| SMB | 12% |\n| Enterprise | 4% |\n";
    let viz = parse_response_for_visualizations(text, "");
    let bar = viz.iter().find(|v| v.chart_type == ChartType::Bar).unwrap();
    let config = bar.config.as_ref().unwrap();
    assert_eq!(config.format.as_deref(), Some("percent"));
    assert_eq!(bar.data[0]["Churn"], 12.0);
}

#[test]
fn long_tables_skip_the_pie() {
    let mut text = String::from("| Team | Tickets |\n|---|---|\n");
    for i in 1..=9 {
        text.push_str(&format!("| Team {i} | {} |\n", 10 + i));
    }
    let viz = parse_response_for_visualizations(&text, "");
    assert_eq!(types(&viz), vec![ChartType::Bar, ChartType::Table]);
}

#[test]
fn text_only_table_gets_just_the_grid() {
    let text = "| Owner | Task |\n|---|---|\n| Ana | Call Acme |\n";
    let viz = parse_response_for_visualizations(text, "");
    assert_eq!(types(&viz), vec![ChartType::Table]);
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

#[test]
fn monthly_table_and_inline_points_give_four_time_charts() {
    let text = "\
| Month | Signups |
|---|---|
| Jan | 100 |
| Feb | 120 |

Jan: 100
Feb: 120
";
    let viz = parse_response_for_visualizations(text, "");

    assert_eq!(
        types(&viz),
        vec![
            ChartType::Area,
            ChartType::Line,
            ChartType::Table,
            ChartType::Area,
            ChartType::Line,
        ]
    );
    assert_eq!(viz[0].title, "Signups Over Time (Area Chart)");
    assert_eq!(viz[3].title, "Time Series Overview");
    assert_eq!(viz[4].title, "Time Series Trend");
}

#[test]
fn lowercase_month_column_is_time_ordered() {
    let text = "| month | signups |\n|---|---|\n| jan | 100 |\n| feb | 120 |\n";
    let viz = parse_response_for_visualizations(text, "");
    assert_eq!(
        types(&viz),
        vec![ChartType::Area, ChartType::Line, ChartType::Table]
    );
}

#[test]
fn a_single_point_is_not_a_series() {
    let viz = parse_response_for_visualizations("Jan: 100", "");
    assert!(viz.is_empty());
}

#[test]
fn repeated_dates_collapse_to_the_first_value() {
    let viz = parse_response_for_visualizations("Jan: 100\nFeb: 120\nJan: 999", "");
    assert_eq!(viz[0].data.len(), 2);
    assert_eq!(viz[0].data[0]["value"], 100.0);
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

fn numeric_list(n: usize) -> String {
    (1..=n)
        .map(|i| format!("- Region {i}: {}\n", i * 10))
        .collect()
}

#[test]
fn nine_item_list_is_charted() {
    let viz = parse_response_for_visualizations(&numeric_list(9), "");
    assert_eq!(viz[0].chart_type, ChartType::Bar);
    assert_eq!(viz[0].data.len(), 9);
}

#[test]
fn eleven_item_list_is_not_charted() {
    let viz = parse_response_for_visualizations(&numeric_list(11), "");
    assert!(viz.is_empty());
}

#[test]
fn list_values_written_against_units_are_charted() {
    let viz = parse_response_for_visualizations("- Response time 120ms\n- Resolution 45ms", "");
    assert_eq!(viz[0].chart_type, ChartType::Bar);
    assert_eq!(viz[0].data.len(), 2);
}

#[test]
fn hyphenated_list_labels_stay_whole() {
    let viz = parse_response_for_visualizations("- Top-3 accounts: 50\n- Long-tail accounts: 30\n", "");
    assert_eq!(viz[0].data[0]["name"], "Top-3 accounts");
    assert_eq!(viz[0].data[0]["value"], 50.0);
}

#[test]
fn dominated_list_gets_bar_only() {
    let viz = parse_response_for_visualizations("- Email: 95\n- Chat: 5\n", "");
    assert_eq!(types(&viz), vec![ChartType::Bar]);
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[test]
fn metric_cards_are_capped() {
    let text = (1..=8)
        .map(|i| format!("Metric {i}: {i}%"))
        .collect::<Vec<_>>()
        .join("\n");
    let viz = parse_response_for_visualizations(&text, "");

    assert_eq!(types(&viz), vec![ChartType::Metric]);
    assert_eq!(viz[0].title, "Key Metrics");
    assert_eq!(viz[0].data.len(), 6);
}

#[test]
fn max_metrics_comes_from_config() {
    let mut config = VizsiftConfig::default();
    config.selector.max_metrics = 2;
    let viz = Pipeline::from_config(&config).visualize("A1x: 1%\nB2x: 2%\nC3x: 3%", "");
    assert_eq!(viz[0].data.len(), 2);
}

// ---------------------------------------------------------------------------
// Whole-pipeline properties
// ---------------------------------------------------------------------------

#[test]
fn empty_input_yields_no_visualizations() {
    assert!(generate_visualizations(&ExtractedData::default(), "").is_empty());
    assert!(parse_response_for_visualizations("", "").is_empty());
}

#[test]
fn ids_are_unique_within_a_pass() {
    let text = format!("Churn: 10%\n\n{REGIONS}\nJan: 1\nFeb: 2\n\n- Email: 40\n- Chat: 35\n");
    let viz = parse_response_for_visualizations(&text, "");
    let mut ids: Vec<&str> = viz.iter().map(|v| v.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert!(total >= 7);
}

#[test]
fn rule_order_is_metrics_tables_series_lists() {
    let text = format!("- Email: 40\n- Chat: 35\n\nJan: 1\nFeb: 2\n\n{REGIONS}\nChurn: 10%\n");
    let viz = parse_response_for_visualizations(&text, "");
    assert_eq!(
        types(&viz),
        vec![
            ChartType::Metric,
            ChartType::Bar,
            ChartType::Pie,
            ChartType::Table,
            ChartType::Area,
            ChartType::Line,
            ChartType::Bar,
            ChartType::Pie,
        ]
    );
}

#[test]
fn selection_ignores_context() {
    let extracted = extract_data_from_response(REGIONS);
    let a = generate_visualizations(&extracted, "");
    let b = generate_visualizations(&extracted, "we were talking about churn");
    assert_eq!(types(&a), types(&b));
}

#[test]
fn streamed_fragments_match_the_whole_response() {
    let fragments: Vec<String> = REGIONS.chars().map(String::from).collect();
    let streamed = visualize_fragments(&fragments, "");
    assert_eq!(types(&streamed), types(&parse_response_for_visualizations(REGIONS, "")));
}
