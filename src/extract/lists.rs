//! Bulleted / numbered list recognizer.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One contiguous run of list lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGroup {
    pub items: Vec<String>,
    /// The nearest non-blank, non-list line above the run (usually a heading
    /// or lead-in sentence). Empty when the list opens the text.
    pub context: String,
}

/// `-`, `•`, `*` or `N.` followed by whitespace and some content.
static LIST_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-•*]|\d+\.)\s+(?P<item>.*\S)\s*$").expect("list line regex must compile")
});

/// Find every contiguous list run in `text`.
pub fn extract_lists(text: &str) -> Vec<ListGroup> {
    let mut groups = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_context = String::new();
    let mut last_prose = String::new();

    for line in text.lines() {
        if let Some(caps) = LIST_LINE_RE.captures(line) {
            if current.is_empty() {
                current_context = last_prose.clone();
            }
            let item = caps["item"].trim();
            if !item.is_empty() {
                current.push(item.to_string());
            }
            continue;
        }

        flush(&mut groups, &mut current, &current_context);

        if !line.trim().is_empty() {
            last_prose = clean_context(line);
        }
    }
    flush(&mut groups, &mut current, &current_context);

    groups
}

fn flush(groups: &mut Vec<ListGroup>, current: &mut Vec<String>, context: &str) {
    if current.is_empty() {
        return;
    }
    groups.push(ListGroup {
        items: std::mem::take(current),
        context: context.to_string(),
    });
}

/// Strip markdown heading and emphasis decoration from a lead-in line.
fn clean_context(line: &str) -> String {
    line.trim()
        .trim_start_matches('#')
        .trim()
        .trim_matches('*')
        .trim()
        .trim_end_matches(':')
        .trim_end_matches('*')
        .trim()
        .to_string()
}
