//! List rule: chart short lists whose items carry numbers.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{ChartConfig, ChartSelector, ChartType, Emitter, Row, allows_pie};
use crate::extract::ListGroup;
use crate::extract::numbers::{NUMBER, parse_scaled};

/// A `(name, value)` pair read from one list item.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValue {
    pub name: String,
    pub value: f64,
}

const MAX_LABEL_CHARS: usize = 30;

/// `Label: Number` or `Label - Number` at the start of the item. The dash
/// needs whitespace on both sides so hyphenated labels stay whole.
static LEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = [
        r"^(?P<label>[^:()\n]+?)[ \t]*\**(?:[ \t]*:|[ \t]+-[ \t])[ \t]*\**[ \t]*\$?(?P<value>",
        NUMBER,
        r")(?:(?P<suffix>[KMBkmb])\b)?",
    ]
    .concat();
    Regex::new(&pattern).expect("leading list value regex must compile")
});

/// `Label (Number)` or `Label (Field: Number)` anywhere in the item.
static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = [
        r"(?P<label>[^()\n]+?)[ \t]*\((?:[^():\n]*:)?[ \t]*\$?(?P<value>",
        NUMBER,
        r")(?P<suffix>[KMBkmb])?[ \t]*%?[ \t]*\)",
    ]
    .concat();
    Regex::new(&pattern).expect("parenthesized list value regex must compile")
});

/// First number anywhere in the item, including one glued to a unit
/// (`120ms`). A K/M/B suffix only scales when it ends the word.
static BARE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\$|\b)(?P<value>\d[\d,]*(?:\.\d+)?)(?:(?P<suffix>[KMBkmb])\b)?%?")
        .expect("bare list value regex must compile")
});

static SPACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("whitespace regex must compile"));

impl ChartSelector {
    pub(super) fn list_charts(&self, group: &ListGroup, out: &mut Emitter) {
        let values = list_values(group);
        if values.is_empty() || values.len() >= self.settings.list_max_items {
            return;
        }

        let data: Vec<Row> = values.iter().map(value_row).collect();
        out.emit(
            ChartType::Bar,
            "Data Breakdown (Bar Chart)".to_string(),
            data.clone(),
            ChartConfig::xy("name", "value", &self.palette.list_bar),
        );

        let numbers: Vec<f64> = values.iter().map(|v| v.value).collect();
        if allows_pie(&numbers, self.settings.pie_dominance_threshold) {
            out.emit(
                ChartType::Pie,
                "Data Distribution (Pie Chart)".to_string(),
                data,
                ChartConfig::pie("name", "value", &self.palette.list_pie),
            );
        }
    }
}

/// Read a `(name, value)` pair from every item that has a number.
pub fn list_values(group: &ListGroup) -> Vec<ListValue> {
    group
        .items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| parse_item(item, index))
        .collect()
}

fn parse_item(item: &str, index: usize) -> Option<ListValue> {
    if let Some(caps) = LEADING_RE.captures(item)
        && let Some(value) = scaled(&caps)
    {
        let name = clean_label(&caps["label"]);
        if !name.is_empty() {
            return Some(ListValue { name, value });
        }
    }

    if let Some(caps) = PAREN_RE.captures(item)
        && let Some(value) = scaled(&caps)
    {
        let name = clean_label(&caps["label"]);
        if !name.is_empty() {
            return Some(ListValue { name, value });
        }
    }

    let caps = BARE_RE.captures(item)?;
    let value = scaled(&caps)?;
    let whole = caps.get(0)?;
    let remainder = format!("{}{}", &item[..whole.start()], &item[whole.end()..]);
    let remainder = clean_label(&SPACES_RE.replace_all(&remainder, " "));

    let name = if remainder.is_empty() {
        format!("Item {}", index + 1)
    } else {
        truncate_label(&remainder)
    };
    Some(ListValue { name, value })
}

fn scaled(caps: &regex::Captures<'_>) -> Option<f64> {
    let suffix = caps.name("suffix").map(|m| m.as_str());
    parse_scaled(&caps["value"], suffix)
}

fn clean_label(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| c == '*' || c == '_' || c == '`')
        .trim()
        .to_string()
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let head: String = label.chars().take(MAX_LABEL_CHARS).collect();
    format!("{head}...")
}

fn value_row(value: &ListValue) -> Row {
    let mut row = Row::new();
    row.insert("name".to_string(), Value::from(value.name.clone()));
    row.insert("value".to_string(), Value::from(value.value));
    row
}
