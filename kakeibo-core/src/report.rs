//! Report formatting: the tabular payload handed to the document sink, and
//! the multi-section text message pushed to the chat group.

use serde::{Deserialize, Serialize};

use crate::aggregate::{DetailRow, PeriodSummary, DETAIL_COLUMNS};
use crate::compare::{ComparativePoint, Metric};

/// Whole-yen display: integer amount plus the currency suffix, sign kept.
pub fn yen(amount: f64) -> String {
    format!("{} 円", amount.round() as i64)
}

/// Columns-and-rows payload for a generic table-rendering sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularReport {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Wrap detail rows with the fixed 7-column header. Headers are present even
/// for an empty period.
pub fn tabular_report(rows: &[DetailRow]) -> TabularReport {
    TabularReport {
        columns: DETAIL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: rows.to_vec(),
    }
}

fn rate_suffix(comparatives: &[(Metric, ComparativePoint)], metric: Metric) -> String {
    match comparatives.iter().find(|(m, _)| *m == metric) {
        Some((_, p)) => format!(
            "（前月比 {:+.1}%／前年同月比 {:+.1}%）",
            p.prior_month_rate_pct, p.prior_year_rate_pct
        ),
        None => String::new(),
    }
}

/// Render the monthly chat message.
///
/// `period_label` is the human-readable month ("2026年7月"). When
/// `comparatives` is given, income and expense lines carry the
/// period-over-period percentages.
pub fn balance_message(
    period_label: &str,
    summary: &PeriodSummary,
    comparatives: Option<&[(Metric, ComparativePoint)]>,
) -> String {
    let net = summary.net();
    let net_remark = if net >= 0.0 {
        "黒字です！よく頑張りました🎉"
    } else {
        "赤字です…来月は引き締めよう😢"
    };

    let empty: &[(Metric, ComparativePoint)] = &[];
    let comparatives = comparatives.unwrap_or(empty);

    let mut lines = Vec::new();
    lines.push(format!("【{period_label}の収支】"));
    lines.push(format!("収支：{} {}", yen(net), net_remark));
    lines.push(String::new());
    lines.push(format!(
        "収入：{}{}",
        yen(summary.income),
        rate_suffix(comparatives, Metric::Income)
    ));
    lines.push(format!(
        "支出：{}{}",
        yen(summary.expense()),
        rate_suffix(comparatives, Metric::Expense)
    ));
    lines.push(format!("　固定費：{}", yen(summary.fixed_cost)));
    lines.push(format!("　変動費：{}", yen(summary.variable_cost)));
    lines.push(String::new());
    lines.push("◆分類別".to_string());
    for (label, total) in summary.category_totals.iter() {
        lines.push(format!("・{label}：{}", yen(total)));
    }

    lines.join("\n")
}
