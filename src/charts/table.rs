//! Table rule: chart numeric tables, always offer the raw grid.

use serde_json::Value;

use super::{ChartConfig, ChartSelector, ChartType, Emitter, Row, allows_pie};
use crate::extract::numbers::parse_cell;
use crate::extract::Table;
use crate::extract::temporal::contains_temporal_token;

impl ChartSelector {
    pub(super) fn table_charts(&self, tbl: &Table, out: &mut Emitter) {
        if tbl.rows.is_empty() {
            return;
        }

        if is_numeric(tbl) && tbl.headers.len() >= 2 {
            self.numeric_table_charts(tbl, out);
        }

        let data = tbl.rows.iter().map(|r| text_row(&tbl.headers, r)).collect();
        out.emit(
            ChartType::Table,
            "Detailed Data".to_string(),
            data,
            ChartConfig::colors(&self.palette.table),
        );
    }

    fn numeric_table_charts(&self, tbl: &Table, out: &mut Emitter) {
        let x = tbl.headers[0].as_str();
        let y = tbl.headers[1].as_str();
        let data: Vec<Row> = tbl.rows.iter().map(|r| typed_row(&tbl.headers, r)).collect();
        let format = value_format(tbl);

        if is_time_ordered(tbl) {
            out.emit(
                ChartType::Area,
                format!("{y} Over Time (Area Chart)"),
                data.clone(),
                ChartConfig::xy(x, y, &self.palette.table_area).with_format(format),
            );
            out.emit(
                ChartType::Line,
                format!("{y} Over Time (Line Chart)"),
                data,
                ChartConfig::xy(x, y, &self.palette.table_line).with_format(format),
            );
            return;
        }

        out.emit(
            ChartType::Bar,
            format!("{y} by {x} (Bar Chart)"),
            data.clone(),
            ChartConfig::xy(x, y, &self.palette.table_bar).with_format(format),
        );

        if tbl.rows.len() <= self.settings.pie_max_rows {
            let values: Vec<f64> = tbl
                .rows
                .iter()
                .filter_map(|r| r.get(1).and_then(|cell| parse_cell(cell)))
                .collect();
            if allows_pie(&values, self.settings.pie_dominance_threshold) {
                out.emit(
                    ChartType::Pie,
                    format!("{y} Distribution (Pie Chart)"),
                    data,
                    ChartConfig::pie(x, y, &self.palette.table_pie).with_format(format),
                );
            }
        }
    }
}

/// True if any cell anywhere parses as a finite number.
fn is_numeric(tbl: &Table) -> bool {
    tbl.rows.iter().flatten().any(|cell| parse_cell(cell).is_some())
}

/// True if the first column, read as one string, contains a temporal token.
fn is_time_ordered(tbl: &Table) -> bool {
    let first_column = tbl
        .rows
        .iter()
        .map(|r| r.first().map_or("", String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    contains_temporal_token(&first_column)
}

/// `"percent"` / `"currency"` when the value column is written that way.
fn value_format(tbl: &Table) -> Option<&'static str> {
    let cells = || tbl.rows.iter().filter_map(|r| r.get(1));
    if cells().any(|c| c.contains('%')) {
        Some("percent")
    } else if cells().any(|c| c.contains('$')) {
        Some("currency")
    } else {
        None
    }
}

/// Header-keyed row with numeric cells converted to numbers. Cells without a
/// header are ignored; headers without a cell are left out of the row.
fn typed_row(headers: &[String], cells: &[String]) -> Row {
    headers
        .iter()
        .zip(cells)
        .map(|(header, cell)| {
            let value = parse_cell(cell).map_or_else(|| Value::from(cell.clone()), Value::from);
            (header.clone(), value)
        })
        .collect()
}

fn text_row(headers: &[String], cells: &[String]) -> Row {
    headers
        .iter()
        .zip(cells)
        .map(|(header, cell)| (header.clone(), Value::from(cell.clone())))
        .collect()
}
