//! Scalar metric recognizers.
//!
//! Three labeled-value patterns run over the whole text in a fixed order
//! (percentage, currency, labeled count). A fourth pattern runs inside list
//! items and picks up per-entity call-outs such as
//! `Acme Corp (Churn Risk: 85%)`. Everything funnels through a
//! [`MetricCollector`], which drops repeated `label:value` pairs.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::numbers::{NUMBER, parse_number, parse_scaled};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Direction a metric is moving, when the surrounding sentence says so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// A metric value. Recognizers only produce numbers; the textual variant
/// exists for callers that hand-build metrics for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One scalar fact pulled from text, e.g. `Churn Rate: 12.5%`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

// ---------------------------------------------------------------------------
// Compiled regexes
// ---------------------------------------------------------------------------

/// Label: a word boundary, then 3–30 word/space characters on one line.
const LABEL: &str = r"\b(?P<label>[A-Za-z][\w \t]{2,29})";

/// Colon separator, tolerating markdown emphasis on either side
/// (`**Churn Rate**: 12%`, `Churn Rate: **12%**`).
const SEP: &str = r"\*{0,2}[ \t]*:[ \t]*\*{0,2}[ \t]*";

static PERCENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = [LABEL, SEP, "(?P<value>", NUMBER, r")[ \t]*%"].concat();
    Regex::new(&pattern).expect("percent metric regex must compile")
});

static CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = [
        LABEL,
        SEP,
        r"\$[ \t]*(?P<value>",
        NUMBER,
        r")(?P<suffix>[KMBkmb])?",
    ]
    .concat();
    Regex::new(&pattern).expect("currency metric regex must compile")
});

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = [
        LABEL,
        SEP,
        "(?P<value>",
        NUMBER,
        r")[ \t]+(?P<unit>[A-Za-z]+)\b",
    ]
    .concat();
    Regex::new(&pattern).expect("count metric regex must compile")
});

/// `EntityName (… Churn|Risk|Score|Value …: Number)` inside a list item.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = [
        r"(?P<name>[A-Za-z][\w .&'-]{0,40}?)\**[ \t]*\([ \t]*(?i:[\w ]*?(?:churn|risk|score|value)[\w ]*?)[ \t]*:[ \t]*\$?(?P<value>",
        NUMBER,
        r")[ \t]*[KMBkmb]?[ \t]*%?[ \t]*\)",
    ]
    .concat();
    Regex::new(&pattern).expect("entity metric regex must compile")
});

static UP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:up|increas\w*|grew|grow(?:th|ing)|rose|rising|improv\w*)\b|↑")
        .expect("trend regex must compile")
});

static DOWN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:down|decreas\w*|declin\w*|dropp?(?:ed|ing)?|fell|falling)\b|↓")
        .expect("trend regex must compile")
});

static STABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:stable|flat|unchanged|steady)\b").expect("trend regex must compile")
});

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Per-pass metric accumulator with `label:value` deduplication.
#[derive(Debug, Default)]
pub struct MetricCollector {
    metrics: Vec<Metric>,
    seen: HashSet<String>,
}

impl MetricCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric unless an identical `label:value` pair is already held.
    /// Returns whether it was kept.
    pub fn push(&mut self, metric: Metric) -> bool {
        let key = format!("{}:{}", metric.label, metric.value);
        if !self.seen.insert(key) {
            return false;
        }
        self.metrics.push(metric);
        true
    }

    pub fn extend(&mut self, metrics: impl IntoIterator<Item = Metric>) {
        for metric in metrics {
            self.push(metric);
        }
    }

    pub fn into_metrics(self) -> Vec<Metric> {
        self.metrics
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the three whole-text metric patterns over `text`.
pub fn collect_labeled_metrics(text: &str, collector: &mut MetricCollector) {
    for caps in PERCENT_RE.captures_iter(text) {
        if let Some(label) = clean_label(&caps)
            && let Some(value) = parse_number(&caps["value"])
        {
            collector.push(build_metric(text, &caps, label, value));
        }
    }

    for caps in CURRENCY_RE.captures_iter(text) {
        let suffix = caps.name("suffix").map(|m| m.as_str());
        if let Some(label) = clean_label(&caps)
            && let Some(value) = parse_scaled(&caps["value"], suffix)
        {
            collector.push(build_metric(text, &caps, label, value));
        }
    }

    for caps in COUNT_RE.captures_iter(text) {
        if let Some(label) = clean_label(&caps)
            && let Some(value) = parse_number(&caps["value"])
        {
            let label = format!("{label} ({})", &caps["unit"]);
            collector.push(build_metric(text, &caps, label, value));
        }
    }
}

/// Per-entity call-outs inside a single list item.
pub fn entity_metrics(item: &str) -> Vec<Metric> {
    ENTITY_RE
        .captures_iter(item)
        .filter_map(|caps| {
            let name = caps["name"].trim().trim_matches('*').trim();
            if name.is_empty() {
                return None;
            }
            let value = parse_number(&caps["value"])?;
            Some(Metric {
                label: name.to_string(),
                value: MetricValue::Number(value),
                trend: None,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn clean_label(caps: &Captures<'_>) -> Option<String> {
    let label = caps["label"].trim();
    let len = label.chars().count();
    if (3..=30).contains(&len) {
        Some(label.to_string())
    } else {
        None
    }
}

fn build_metric(text: &str, caps: &Captures<'_>, label: String, value: f64) -> Metric {
    let end = caps.get(0).map_or(text.len(), |m| m.end());
    Metric {
        label,
        value: MetricValue::Number(value),
        trend: infer_trend(rest_of_line(text, end)),
    }
}

fn rest_of_line(text: &str, from: usize) -> &str {
    let tail = &text[from..];
    tail.split('\n').next().unwrap_or(tail)
}

/// Pick the direction word that appears first in `context`.
fn infer_trend(context: &str) -> Option<Trend> {
    [
        (Trend::Up, &*UP_RE),
        (Trend::Down, &*DOWN_RE),
        (Trend::Stable, &*STABLE_RE),
    ]
    .into_iter()
    .filter_map(|(trend, re)| re.find(context).map(|m| (m.start(), trend)))
    .min_by_key(|(pos, _)| *pos)
    .map(|(_, trend)| trend)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Metric> {
        let mut collector = MetricCollector::new();
        collect_labeled_metrics(text, &mut collector);
        collector.into_metrics()
    }

    fn number(metric: &Metric) -> f64 {
        match metric.value {
            MetricValue::Number(n) => n,
            MetricValue::Text(_) => panic!("expected numeric metric"),
        }
    }

    #[test]
    fn percentage_metric() {
        let metrics = collect("Churn Rate: 12.5%");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "Churn Rate");
        assert_eq!(number(&metrics[0]), 12.5);
    }

    #[test]
    fn duplicate_pairs_collapse() {
        let metrics = collect("Churn: 10%\nChurn: 10%");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "Churn");
        assert_eq!(number(&metrics[0]), 10.0);
    }

    #[test]
    fn currency_suffix_attached_to_a_word_still_scales() {
        let metrics = collect("Revenue: $2.5Million");
        assert_eq!(metrics.len(), 1);
        assert_eq!(number(&metrics[0]), 2_500_000.0);
    }

    #[test]
    fn same_label_different_value_is_kept() {
        let metrics = collect("Churn: 10%\nChurn: 12%");
        assert_eq!(metrics.len(), 2);
    }

    #[test]
    fn currency_suffixes_normalize() {
        let metrics = collect("Revenue: $2.5K\nPipeline: $1.2M\nARR: $3B\nRefunds: $1,250");
        let values: Vec<f64> = metrics.iter().map(number).collect();
        assert_eq!(values, vec![2500.0, 1_200_000.0, 3_000_000_000.0, 1250.0]);
    }

    #[test]
    fn count_metric_rewrites_label_with_unit() {
        let metrics = collect("Active: 1,200 customers");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "Active (customers)");
        assert_eq!(number(&metrics[0]), 1200.0);
    }

    #[test]
    fn short_labels_do_not_match() {
        assert!(collect("NP: 40%").is_empty());
    }

    #[test]
    fn labels_do_not_span_lines() {
        let metrics = collect("Revenue: $2.5K\nChurn: 10%");
        assert!(metrics.iter().all(|m| !m.label.contains('\n')));
        assert!(metrics.iter().any(|m| m.label == "Churn"));
    }

    #[test]
    fn markdown_bold_labels_match() {
        let metrics = collect("**Net Retention**: 104%");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "Net Retention");
    }

    #[test]
    fn trend_is_inferred_from_the_same_line() {
        let metrics = collect("Churn Rate: 8% down from last quarter\nNPS Score: 42% steady");
        assert_eq!(metrics[0].trend, Some(Trend::Down));
        assert_eq!(metrics[1].trend, Some(Trend::Stable));
    }

    #[test]
    fn trend_absent_without_direction_words() {
        let metrics = collect("Churn Rate: 8%\nRevenue went up");
        assert_eq!(metrics[0].trend, None);
    }

    #[test]
    fn entity_call_outs_in_list_items() {
        let metrics = entity_metrics("**Acme Corp** (Churn Risk: 85%) - renewal due");
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].label, "Acme Corp");
        assert_eq!(number(&metrics[0]), 85.0);

        let metrics = entity_metrics("Globex (Health Score: 42)");
        assert_eq!(metrics[0].label, "Globex");
        assert_eq!(number(&metrics[0]), 42.0);
    }

    #[test]
    fn entity_pattern_requires_keyword() {
        assert!(entity_metrics("Initech (seats: 40)").is_empty());
    }

    #[test]
    fn metric_value_display_matches_dedup_key() {
        assert_eq!(MetricValue::Number(10.0).to_string(), "10");
        assert_eq!(MetricValue::Number(2.5).to_string(), "2.5");
        assert_eq!(MetricValue::Text("n/a".into()).to_string(), "n/a");
    }
}
