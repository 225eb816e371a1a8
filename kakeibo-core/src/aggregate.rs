//! Period aggregation: one pass over a month's ledger records producing
//! income/fixed/variable totals, per-category totals, and the detail table
//! rows for the monthly report.

use serde::{Deserialize, Serialize};

use crate::record::{classify, LedgerRecord, RecordClass, UNKNOWN_LABEL};

/// Column headers of the detail report, in output order.
pub const DETAIL_COLUMNS: [&str; 7] = [
    "項目名",
    "収支",
    "決済方法",
    "実行年月日",
    "分類",
    "固定費",
    "出口・入口",
];

/// One formatted detail row, cells in [`DETAIL_COLUMNS`] order.
pub type DetailRow = Vec<String>;

/// Category-label → signed total map that preserves insertion order.
///
/// The schema-defined category order is meaningful in the report output, and
/// category sets are small, so this is a plain vector with linear lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    /// Build a map with every given key present at 0, in the given order.
    pub fn seeded(keys: &[String]) -> Self {
        Self {
            entries: keys.iter().map(|k| (k.clone(), 0.0)).collect(),
        }
    }

    /// Add `amount` to `label`'s total, appending the label at the end if it
    /// was not seeded (this is how the unknown bucket appears).
    pub fn add(&mut self, label: &str, amount: f64) {
        match self.entries.iter_mut().find(|(k, _)| k == label) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((label.to_string(), amount)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Aggregated totals for one period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Sum of positive amounts (>= 0)
    pub income: f64,
    /// Sum of fixed-cost expense amounts (<= 0)
    pub fixed_cost: f64,
    /// Sum of variable expense amounts (<= 0)
    pub variable_cost: f64,
    /// Per-category signed totals, schema order then unknown bucket
    pub category_totals: CategoryTotals,
}

impl PeriodSummary {
    /// Total expense (fixed + variable, <= 0).
    pub fn expense(&self) -> f64 {
        self.fixed_cost + self.variable_cost
    }

    /// Net balance for the period.
    pub fn net(&self) -> f64 {
        self.income + self.fixed_cost + self.variable_cost
    }
}

/// Run every record through the classifier, accumulating the period summary
/// and building one detail row per record in input order.
///
/// `category_keys` is the schema-defined category list; every key is present
/// in the result at 0 even when no record matched it. Records without a
/// category land in the unknown bucket, which is only created on demand.
pub fn aggregate(
    records: &[LedgerRecord],
    category_keys: &[String],
) -> (PeriodSummary, Vec<DetailRow>) {
    let mut summary = PeriodSummary {
        category_totals: CategoryTotals::seeded(category_keys),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        match classify(record) {
            RecordClass::Income => summary.income += record.amount,
            RecordClass::FixedExpense => summary.fixed_cost += record.amount,
            RecordClass::VariableExpense => summary.variable_cost += record.amount,
        }
        summary
            .category_totals
            .add(record.category_label(), record.amount);
        rows.push(detail_row(record));
    }

    (summary, rows)
}

/// Project a record into the fixed 7-column report schema.
fn detail_row(record: &LedgerRecord) -> DetailRow {
    vec![
        record.item_name.clone(),
        format!("{}", record.amount.round() as i64),
        record.payment_method.clone(),
        record
            .execution_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        record.category_label().to_string(),
        if record.fixed_cost { "はい" } else { "いいえ" }.to_string(),
        record.direction.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordStatus;
    use chrono::NaiveDate;

    fn record(amount: f64, fixed_cost: bool, category: Option<&str>) -> LedgerRecord {
        LedgerRecord {
            item_name: "テスト項目".to_string(),
            amount,
            fixed_cost,
            category: category.map(String::from),
            execution_date: NaiveDate::from_ymd_opt(2026, 7, 15),
            status: RecordStatus::Executed,
            payment_method: "クレカ".to_string(),
            direction: "財布".to_string(),
        }
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_totals_reproduce_signed_sum() {
        let records = vec![
            record(300_000.0, false, Some("給与")),
            record(-98_000.0, true, Some("住居")),
            record(-4_500.0, false, Some("食費")),
            record(-1_200.0, false, None),
        ];
        let (summary, _) = aggregate(&records, &keys(&["給与", "住居", "食費"]));

        let signed_sum: f64 = records.iter().map(|r| r.amount).sum();
        assert_eq!(summary.net(), signed_sum);
        assert_eq!(summary.income, 300_000.0);
        assert_eq!(summary.fixed_cost, -98_000.0);
        assert_eq!(summary.variable_cost, -5_700.0);
    }

    #[test]
    fn test_category_seeding_and_unknown_bucket() {
        // Categories [A, A, B] with amounts [-100, -50, +200] against keys
        // {A, B, C} — C stays at 0, no unknown bucket.
        let records = vec![
            record(-100.0, false, Some("A")),
            record(-50.0, false, Some("A")),
            record(200.0, false, Some("B")),
        ];
        let (summary, _) = aggregate(&records, &keys(&["A", "B", "C"]));

        assert_eq!(summary.category_totals.len(), 3);
        assert_eq!(summary.category_totals.get("A"), Some(-150.0));
        assert_eq!(summary.category_totals.get("B"), Some(200.0));
        assert_eq!(summary.category_totals.get("C"), Some(0.0));
        assert_eq!(summary.category_totals.get(UNKNOWN_LABEL), None);
    }

    #[test]
    fn test_uncategorized_record_lands_in_unknown_bucket() {
        let records = vec![record(-100.0, false, Some("A")), record(-30.0, false, None)];
        let (summary, _) = aggregate(&records, &keys(&["A", "B"]));

        // Unknown appears only because a record actually landed there,
        // appended after the seeded keys.
        assert_eq!(summary.category_totals.len(), 3);
        assert_eq!(summary.category_totals.get(UNKNOWN_LABEL), Some(-30.0));
        let labels: Vec<&str> = summary.category_totals.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["A", "B", UNKNOWN_LABEL]);
    }

    #[test]
    fn test_empty_category_keys_is_not_an_error() {
        let records = vec![record(-100.0, false, Some("A")), record(-30.0, false, None)];
        let (summary, _) = aggregate(&records, &[]);
        assert_eq!(summary.category_totals.len(), 2);
        assert_eq!(summary.category_totals.get("A"), Some(-100.0));
        assert_eq!(summary.category_totals.get(UNKNOWN_LABEL), Some(-30.0));
    }

    #[test]
    fn test_aggregate_is_idempotent_over_immutable_input() {
        let records = vec![
            record(1_000.0, false, Some("A")),
            record(-400.0, true, Some("B")),
        ];
        let cats = keys(&["A", "B"]);
        let first = aggregate(&records, &cats);
        let second = aggregate(&records, &cats);
        assert_eq!(first, second);
    }

    #[test]
    fn test_detail_row_shape_and_placeholders() {
        let mut r = record(-2_980.0, true, None);
        r.execution_date = None;
        let (_, rows) = aggregate(&[r], &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), DETAIL_COLUMNS.len());
        assert_eq!(rows[0][1], "-2980");
        assert_eq!(rows[0][3], UNKNOWN_LABEL); // missing date
        assert_eq!(rows[0][4], UNKNOWN_LABEL); // missing category
        assert_eq!(rows[0][5], "はい");
    }

    #[test]
    fn test_rows_follow_input_order() {
        let mut a = record(-100.0, false, Some("A"));
        a.item_name = "一つ目".to_string();
        let mut b = record(-200.0, false, Some("A"));
        b.item_name = "二つ目".to_string();
        let (_, rows) = aggregate(&[a, b], &keys(&["A"]));
        assert_eq!(rows[0][0], "一つ目");
        assert_eq!(rows[1][0], "二つ目");
    }
}
