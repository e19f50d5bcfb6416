//! Markdown pipe-table recognizer.
//!
//! A table is a header row, a separator row made only of `-`, `:`,
//! whitespace and pipes, then one or more data rows. Rows are normalized to
//! the header width: extra cells are dropped and short rows are padded with
//! empty strings.

use serde::{Deserialize, Serialize};

/// A pipe-delimited table found in text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Find every pipe table in `text`, in document order.
pub fn extract_tables(text: &str) -> Vec<Table> {
    let lines: Vec<&str> = text.lines().collect();
    let mut tables = Vec::new();

    let mut i = 0;
    while i + 1 < lines.len() {
        if !is_pipe_row(lines[i]) || !is_separator_row(lines[i + 1]) {
            i += 1;
            continue;
        }

        let headers = split_row(lines[i]);
        let mut rows = Vec::new();
        let mut j = i + 2;
        while j < lines.len() && is_pipe_row(lines[j]) && !is_separator_row(lines[j]) {
            rows.push(fit_to_width(split_row(lines[j]), headers.len()));
            j += 1;
        }

        if headers.is_empty() || rows.is_empty() {
            i += 1;
            continue;
        }

        tables.push(Table { headers, rows });
        i = j;
    }

    tables
}

fn is_pipe_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

fn is_separator_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('|')
        && trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '-' | ':' | '|') || c.is_whitespace())
}

/// Split on `|`, trim each cell, drop the empty fragments produced by the
/// leading and trailing pipes.
fn split_row(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line
        .trim()
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect();

    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn fit_to_width(mut cells: Vec<String>, width: usize) -> Vec<String> {
    cells.resize(width, String::new());
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGIONS: &str = "\
| Region | Customers |
|---|---|
| East | 10 |
| West | 20 |
";

    #[test]
    fn parses_simple_table() {
        let tables = extract_tables(REGIONS);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].headers, vec!["Region", "Customers"]);
        assert_eq!(
            tables[0].rows,
            vec![vec!["East", "10"], vec!["West", "20"]]
        );
    }

    #[test]
    fn captures_multiple_tables_in_order() {
        let text = format!(
            "Intro text\n{REGIONS}\nSome prose.\n\n| Tier | MRR |\n| :--- | ---: |\n| Gold | $5K |\n"
        );
        let tables = extract_tables(&text);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].headers[0], "Region");
        assert_eq!(tables[1].headers, vec!["Tier", "MRR"]);
        assert_eq!(tables[1].rows, vec![vec!["Gold", "$5K"]]);
    }

    #[test]
    fn table_ends_at_first_non_pipe_line() {
        let text = "| A | B |\n|---|---|\n| x | 1 |\nnot a row\n| y | 2 |\n";
        let tables = extract_tables(text);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 1);
    }

    #[test]
    fn ragged_rows_are_clamped_and_padded() {
        let text = "| A | B |\n|---|---|\n| x | 1 | extra |\n| y |\n";
        let tables = extract_tables(text);
        assert_eq!(tables[0].rows[0], vec!["x", "1"]);
        assert_eq!(tables[0].rows[1], vec!["y", ""]);
    }

    #[test]
    fn header_without_separator_is_not_a_table() {
        let text = "| A | B |\n| x | 1 |\n";
        assert!(extract_tables(text).is_empty());
    }

    #[test]
    fn header_and_separator_without_rows_is_not_a_table() {
        let text = "| A | B |\n|---|---|\n";
        assert!(extract_tables(text).is_empty());
    }

    #[test]
    fn interior_empty_cells_are_kept() {
        let text = "| A | B | C |\n|---|---|---|\n| x |  | 3 |\n";
        let tables = extract_tables(text);
        assert_eq!(tables[0].rows[0], vec!["x", "", "3"]);
    }
}
