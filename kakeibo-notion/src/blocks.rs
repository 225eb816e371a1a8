//! Rich-text payload builders for the dashboard's fixed display blocks:
//! the gauge heading, the bulleted status lines, and the planned table.

use serde_json::{json, Value};

use kakeibo_core::gauge::GaugeState;

fn cell(content: &str) -> Value {
    json!({
        "type": "text",
        "text": {"content": content},
        "annotations": {"color": "default"},
    })
}

/// Heading payload for the gauge block: the bar colored by tier, the raw
/// percentage in default color beside it.
pub fn gauge_heading(state: &GaugeState) -> Value {
    json!({
        "heading_1": {
            "rich_text": [
                {
                    "text": {"content": state.bar()},
                    "annotations": {"color": state.color().as_str()},
                },
                {
                    "text": {"content": format!(" {}%", state.percent_remaining)},
                },
            ]
        }
    })
}

/// Bulleted-list payload for the single-line status blocks.
pub fn bulleted_line(content: &str) -> Value {
    json!({
        "bulleted_list_item": {
            "rich_text": [{"text": {"content": content}}]
        }
    })
}

/// The planned-entries table block: 3 columns (date, item, amount), header
/// row first, one row per entry in the state's (already sorted) order.
pub fn planned_table(state: &GaugeState) -> Value {
    let header = json!({
        "type": "table_row",
        "table_row": {
            "cells": [[cell("日付")], [cell("項目")], [cell("金額")]]
        }
    });

    let mut rows = vec![header];
    for entry in &state.planned {
        rows.push(json!({
            "type": "table_row",
            "table_row": {
                "cells": [
                    [cell(&entry.date_label())],
                    [cell(&entry.item)],
                    [cell(&format!("{}", entry.amount.round() as i64))],
                ]
            }
        }));
    }

    json!([{
        "type": "table",
        "table": {
            "table_width": 3,
            "has_column_header": true,
            "has_row_header": false,
            "children": rows,
        }
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kakeibo_core::gauge::PlannedEntry;

    fn state() -> GaugeState {
        GaugeState {
            percent_remaining: 50,
            days_remaining: 12,
            income: 1_000.0,
            expense: -500.0,
            planned: vec![
                PlannedEntry {
                    date: NaiveDate::from_ymd_opt(2026, 7, 20),
                    item: "電気代".to_string(),
                    amount: -8_000.0,
                },
                PlannedEntry {
                    date: None,
                    item: "日付未定".to_string(),
                    amount: -1_000.0,
                },
            ],
            planned_total: -9_000.0,
        }
    }

    #[test]
    fn test_gauge_heading_spans() {
        let payload = gauge_heading(&state());
        let spans = payload["heading_1"]["rich_text"].as_array().unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0]["annotations"]["color"], "yellow");
        assert_eq!(spans[1]["text"]["content"], " 50%");
    }

    #[test]
    fn test_bulleted_line() {
        let payload = bulleted_line("残り 12 日!");
        assert_eq!(
            payload["bulleted_list_item"]["rich_text"][0]["text"]["content"],
            "残り 12 日!"
        );
    }

    #[test]
    fn test_planned_table_shape() {
        let payload = planned_table(&state());
        let table = &payload[0]["table"];
        assert_eq!(table["table_width"], 3);
        assert_eq!(table["has_column_header"], true);

        let rows = table["children"].as_array().unwrap();
        assert_eq!(rows.len(), 3); // header + 2 entries
        assert_eq!(
            rows[1]["table_row"]["cells"][0][0]["text"]["content"],
            "2026-07-20"
        );
        assert_eq!(rows[1]["table_row"]["cells"][2][0]["text"]["content"], "-8000");
        // Missing dates degrade to the placeholder, never panic.
        assert_eq!(rows[2]["table_row"]["cells"][0][0]["text"]["content"], "不明");
    }
}
