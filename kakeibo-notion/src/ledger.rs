//! Ledger-specific decode and payload builders: pages → typed records,
//! query filters, fixed-cost copies, and summary rows.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use kakeibo_core::compare::PriorMetric;
use kakeibo_core::record::{LedgerRecord, RecordStatus, UNKNOWN_LABEL};

use crate::client::Page;
use crate::property::LedgerField;

/// Property names of the ledger and its satellite databases.
pub mod props {
    pub const ITEM: &str = "項目名";
    pub const AMOUNT: &str = "収支";
    pub const INPUT_AMOUNT: &str = "入力金額";
    pub const PAYMENT: &str = "決済方法";
    pub const DATE: &str = "実行年月日";
    pub const CATEGORY: &str = "分類";
    pub const FIXED: &str = "固定費";
    pub const FIXED_DATE: &str = "固定費実行年月日";
    pub const DIRECTION: &str = "出口・入口";
    pub const STATUS: &str = "ステータス";
    pub const TAX: &str = "消費税率";
    pub const INCOME_FLAG: &str = "収入";

    // fixed-cost master
    pub const ENDED: &str = "終了";
    pub const RUN_MONTHS: &str = "実行月";
    pub const RUN_DAY: &str = "実行日";
    pub const EVERY_MONTH: &str = "毎月";

    // summary database
    pub const PERIOD: &str = "年月";
    pub const METRIC: &str = "集計項目";
    pub const PRIOR_MONTH_RATE: &str = "前月比";
    pub const PRIOR_YEAR_RATE: &str = "前年同月比";
}

/// Status formula string marking a not-yet-executed entry.
pub const STATUS_PENDING: &str = "未実行";

fn field(page: &Page, name: &str) -> Option<LedgerField> {
    page.properties.get(name).and_then(LedgerField::from_value)
}

fn text_of(page: &Page, name: &str) -> Option<String> {
    field(page, name).and_then(|f| f.text().map(String::from))
}

fn number_of(page: &Page, name: &str) -> f64 {
    field(page, name).and_then(|f| f.number()).unwrap_or(0.0)
}

fn checkbox_of(page: &Page, name: &str) -> bool {
    field(page, name).map(|f| f.checkbox()).unwrap_or(false)
}

/// Decode one ledger page into a fully-defaulted record. Missing optional
/// sub-fields become placeholders here, so core logic never sees them.
pub fn decode_record(page: &Page) -> LedgerRecord {
    let status = match text_of(page, props::STATUS).as_deref() {
        Some(STATUS_PENDING) => RecordStatus::Pending,
        _ => RecordStatus::Executed,
    };
    LedgerRecord {
        item_name: text_of(page, props::ITEM).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        amount: number_of(page, props::AMOUNT),
        fixed_cost: checkbox_of(page, props::FIXED),
        category: text_of(page, props::CATEGORY),
        execution_date: field(page, props::DATE).and_then(|f| f.date()),
        status,
        payment_method: text_of(page, props::PAYMENT).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        direction: text_of(page, props::DIRECTION).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
    }
}

/// Filter: execution date within a calendar month (inclusive both ends).
pub fn month_filter(start: NaiveDate, end: NaiveDate) -> Value {
    json!({
        "and": [
            {"property": props::DATE, "date": {"on_or_after": start.format("%Y-%m-%d").to_string()}},
            {"property": props::DATE, "date": {"on_or_before": end.format("%Y-%m-%d").to_string()}},
        ]
    })
}

/// Filter: execution date within [start, end) using UTC day-start instants,
/// as the gauge's 10th-to-10th cycle requires a half-open range.
pub fn cycle_filter(start: NaiveDate, end: NaiveDate) -> Value {
    let instant = |d: NaiveDate| format!("{}T00:00:00Z", d.format("%Y-%m-%d"));
    json!({
        "and": [
            {"property": props::DATE, "date": {"on_or_after": instant(start)}},
            {"property": props::DATE, "date": {"before": instant(end)}},
        ]
    })
}

/// Sort: ascending execution date (the report's row order).
pub fn date_ascending_sort() -> Value {
    json!([{"property": props::DATE, "direction": "ascending"}])
}

/// Filter for the fixed-cost master: not ended, and scheduled for every
/// month or for the given month label ("7月").
pub fn fixed_cost_filter(month_label: &str) -> Value {
    json!({
        "and": [
            {"property": props::ENDED, "checkbox": {"equals": false}},
            {"or": [
                {"property": props::RUN_MONTHS, "rich_text": {"contains": props::EVERY_MONTH}},
                {"property": props::RUN_MONTHS, "rich_text": {"contains": month_label}},
            ]},
        ]
    })
}

/// Sort for the fixed-cost master: ascending run day.
pub fn run_day_ascending_sort() -> Value {
    json!([{"property": props::RUN_DAY, "direction": "ascending"}])
}

/// One row of the fixed-cost master, decoded with the same defaulting rules
/// as ledger records.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCostRow {
    pub item_name: String,
    /// Signed master amount; the ledger copy stores its absolute value plus
    /// an income flag
    pub amount: f64,
    /// Day-of-month the cost executes, parsed from the "15日" run-day text
    pub run_day: Option<u32>,
    pub category: Option<String>,
    pub payment_method: Option<String>,
    pub direction: Option<String>,
}

pub fn decode_fixed_cost(page: &Page) -> FixedCostRow {
    let run_day = text_of(page, props::RUN_DAY)
        .and_then(|s| s.trim().trim_end_matches('日').parse::<u32>().ok());
    FixedCostRow {
        item_name: text_of(page, props::ITEM).unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        amount: number_of(page, props::AMOUNT),
        run_day,
        category: text_of(page, props::CATEGORY),
        payment_method: text_of(page, props::PAYMENT),
        direction: text_of(page, props::DIRECTION),
    }
}

impl FixedCostRow {
    /// Settlement date in the target month; `None` when the run-day text was
    /// unparseable or out of range for that month.
    pub fn settlement_date(&self, year: i32, month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, self.run_day?)
    }
}

fn select_or_unknown(value: &Option<String>) -> Value {
    json!({"select": {"name": value.as_deref().unwrap_or(UNKNOWN_LABEL)}})
}

/// Page properties for copying one fixed cost into the ledger on the given
/// settlement date.
pub fn fixed_cost_page(row: &FixedCostRow, settlement_date: NaiveDate) -> Value {
    json!({
        (props::ITEM): {"title": [{"text": {"content": row.item_name}}]},
        (props::INPUT_AMOUNT): {"number": row.amount.abs()},
        (props::FIXED_DATE): {"date": {"start": settlement_date.format("%Y-%m-%d").to_string()}},
        (props::CATEGORY): select_or_unknown(&row.category),
        (props::FIXED): {"checkbox": true},
        (props::TAX): {"select": {"name": "税込"}},
        (props::INCOME_FLAG): {"checkbox": row.amount > 0.0},
        (props::PAYMENT): select_or_unknown(&row.payment_method),
        (props::DIRECTION): select_or_unknown(&row.direction),
    })
}

/// Page properties for one summary row (period title, metric select, amount).
pub fn summary_row(period_label: &str, metric_label: &str, amount: f64) -> Value {
    json!({
        (props::PERIOD): {"title": [{"text": {"content": period_label}}]},
        (props::METRIC): {"select": {"name": metric_label}},
        (props::AMOUNT): {"number": amount},
    })
}

/// Filter selecting a persisted period's summary rows by their title label.
pub fn summary_period_filter(period_label: &str) -> Value {
    json!({"property": props::PERIOD, "title": {"equals": period_label}})
}

/// Decode one persisted summary row into (metric label, value + stored
/// rate). `rate_prop` picks which of the row's formula fields supplies the
/// stored rate (前月比 for prior-month joins, 前年同月比 for prior-year).
/// Rows without a metric select yield `None`.
pub fn decode_summary_row(page: &Page, rate_prop: &str) -> Option<(String, PriorMetric)> {
    let metric = text_of(page, props::METRIC)?;
    Some((
        metric,
        PriorMetric {
            value: number_of(page, props::AMOUNT),
            stored_rate_pct: number_of(page, rate_prop),
        },
    ))
}

/// Decode a period's summary rows into the metric-label map the comparative
/// builder consumes.
pub fn decode_summary_rows(pages: &[Page], rate_prop: &str) -> HashMap<String, PriorMetric> {
    pages
        .iter()
        .filter_map(|p| decode_summary_row(p, rate_prop))
        .collect()
}

/// Period title label as persisted in the summary database ("2026年07月").
pub fn period_label(date: NaiveDate) -> String {
    format!("{}年{:02}月", date.year(), date.month())
}

/// Human-readable period label for reports and messages ("2026年7月").
pub fn display_label(date: NaiveDate) -> String {
    format!("{}年{}月", date.year(), date.month())
}

/// Month label as written in the master's run-months text ("7月").
pub fn month_label(date: NaiveDate) -> String {
    format!("{}月", date.month())
}
