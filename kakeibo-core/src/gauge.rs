//! Budget-remaining gauge: executed vs planned split, percentage left,
//! display tiers, and the battery-style bar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cycle::BudgetCycle;
use crate::record::{LedgerRecord, RecordStatus};
use crate::report::yen;

const BAR_SEGMENTS: i64 = 20;

/// A not-yet-executed entry shown in the dashboard's planned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedEntry {
    pub date: Option<NaiveDate>,
    pub item: String,
    pub amount: f64,
}

impl PlannedEntry {
    /// Date cell for the planned table; missing dates degrade to "不明".
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| crate::record::UNKNOWN_LABEL.to_string())
    }
}

/// Daily gauge snapshot. Recomputed from scratch on every run and written
/// over fixed dashboard blocks; it has no persisted identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeState {
    /// Percent of income still unspent. Unclamped: it exceeds 100 when the
    /// cycle is in surplus beyond income and goes negative when overspent.
    pub percent_remaining: i64,
    /// Whole days until the cycle end (negative once the cycle has passed)
    pub days_remaining: i64,
    pub income: f64,
    pub expense: f64,
    pub planned: Vec<PlannedEntry>,
    pub planned_total: f64,
}

/// Dashboard color tier for the gauge bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeColor {
    Green,
    Yellow,
    Red,
}

impl GaugeColor {
    pub fn for_percent(percent: i64) -> Self {
        if percent >= 70 {
            GaugeColor::Green
        } else if percent >= 30 {
            GaugeColor::Yellow
        } else {
            GaugeColor::Red
        }
    }

    /// Color name understood by the dashboard's rich-text annotations.
    pub fn as_str(self) -> &'static str {
        match self {
            GaugeColor::Green => "green",
            GaugeColor::Yellow => "yellow",
            GaugeColor::Red => "red",
        }
    }
}

/// Compute the gauge for one budget cycle from an already-fetched record set.
///
/// Executed records accumulate into income/expense by amount sign; pending
/// records are collected into the planned table instead and never touch the
/// totals. Planned entries come out sorted ascending by date, ties keeping
/// query order.
pub fn compute_gauge(
    records: &[LedgerRecord],
    cycle: &BudgetCycle,
    today: NaiveDate,
) -> GaugeState {
    let mut income = 0.0;
    let mut expense = 0.0;
    let mut planned = Vec::new();
    let mut planned_total = 0.0;

    for record in records {
        match record.status {
            RecordStatus::Pending => {
                planned.push(PlannedEntry {
                    date: record.execution_date,
                    item: record.item_name.clone(),
                    amount: record.amount,
                });
                planned_total += record.amount;
            }
            RecordStatus::Executed => {
                if record.amount > 0.0 {
                    income += record.amount;
                } else {
                    expense += record.amount;
                }
            }
        }
    }

    // sort_by_key is stable, so same-day entries keep query order
    planned.sort_by_key(|e| e.date);

    let percent_remaining = if income > 0.0 {
        ((income + expense) * 100.0 / income).round() as i64
    } else {
        0
    };

    GaugeState {
        percent_remaining,
        days_remaining: cycle.days_remaining(today),
        income,
        expense,
        planned,
        planned_total,
    }
}

impl GaugeState {
    /// Amount of income still unspent.
    pub fn remaining_amount(&self) -> f64 {
        self.income + self.expense
    }

    pub fn color(&self) -> GaugeColor {
        GaugeColor::for_percent(self.percent_remaining)
    }

    /// Battery-style bar, one segment per 5%. The segment count is clamped
    /// into [0, 20] so the string stays well-formed; the raw percentage is
    /// shown alongside it unclamped.
    pub fn bar(&self) -> String {
        let filled = ((self.percent_remaining as f64 / 5.0).round() as i64).clamp(0, BAR_SEGMENTS);
        format!(
            "   [{}{}]",
            "|".repeat(filled as usize),
            " ".repeat((BAR_SEGMENTS - filled) as usize)
        )
    }

    /// Days-remaining dashboard line with the urgency remark.
    pub fn days_line(&self) -> String {
        let comment = if self.days_remaining > 20 {
            "計画的にいきましょう🤓"
        } else if self.days_remaining > 10 {
            "大きな支出に注意しよう🧐"
        } else {
            "もうちょっとだ！頑張れ！🔥"
        };
        format!("残り {} 日! {}", self.days_remaining, comment)
    }

    /// Remaining-amount dashboard line with the budget-health remark.
    pub fn amount_line(&self) -> String {
        let percent = self.percent_remaining;
        let comment = if percent >= 70 {
            "まだまだ余裕はある！無駄遣いはせず 🤩"
        } else if percent >= 30 {
            "支出オーバーしないか確認してね 🙂"
        } else if percent > 0 {
            "もうすぐ無くなりそうだよ🥶"
        } else {
            "なくなったー😵 原因を話し合って、次回から気をつけよう"
        };
        format!("残り {}! {}", yen(self.remaining_amount()), comment)
    }

    /// Planned-total dashboard line.
    pub fn planned_total_line(&self) -> String {
        format!("収支予定合計：{}", yen(self.planned_total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(amount: f64, fixed_cost: bool, status: RecordStatus, day: u32) -> LedgerRecord {
        LedgerRecord {
            item_name: format!("項目{day}"),
            amount,
            fixed_cost,
            category: None,
            execution_date: Some(date(2026, 7, day)),
            status,
            payment_method: "クレカ".to_string(),
            direction: "財布".to_string(),
        }
    }

    fn cycle() -> BudgetCycle {
        BudgetCycle::containing(date(2026, 7, 15))
    }

    #[test]
    fn test_executed_and_pending_split() {
        let records = vec![
            record(1_000.0, false, RecordStatus::Executed, 11),
            record(-400.0, true, RecordStatus::Executed, 12),
            record(-100.0, false, RecordStatus::Executed, 13),
            record(-200.0, false, RecordStatus::Pending, 20),
        ];
        let state = compute_gauge(&records, &cycle(), date(2026, 7, 15));

        assert_eq!(state.income, 1_000.0);
        assert_eq!(state.expense, -500.0);
        assert_eq!(state.percent_remaining, 50);
        assert_eq!(state.planned_total, -200.0);
        assert_eq!(state.planned.len(), 1);
        assert_eq!(state.remaining_amount(), 500.0);
    }

    #[test]
    fn test_zero_income_yields_zero_percent() {
        let records = vec![record(-500.0, false, RecordStatus::Executed, 11)];
        let state = compute_gauge(&records, &cycle(), date(2026, 7, 15));
        assert_eq!(state.percent_remaining, 0);
    }

    #[test]
    fn test_percent_is_unclamped() {
        // Overspent: remaining is negative, so is the percentage.
        let records = vec![
            record(1_000.0, false, RecordStatus::Executed, 11),
            record(-1_500.0, false, RecordStatus::Executed, 12),
        ];
        let state = compute_gauge(&records, &cycle(), date(2026, 7, 15));
        assert_eq!(state.percent_remaining, -50);
        // The bar stays well-formed regardless.
        assert_eq!(state.bar(), format!("   [{}]", " ".repeat(20)));
    }

    #[test]
    fn test_planned_sorted_ascending_stable() {
        let mut early = record(-100.0, false, RecordStatus::Pending, 12);
        early.item_name = "早い".to_string();
        let mut late = record(-200.0, false, RecordStatus::Pending, 25);
        late.item_name = "遅い".to_string();
        let mut tie_first = record(-10.0, false, RecordStatus::Pending, 25);
        tie_first.item_name = "同日一".to_string();

        let state = compute_gauge(
            &[late.clone(), early, tie_first],
            &cycle(),
            date(2026, 7, 15),
        );
        let items: Vec<&str> = state.planned.iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["早い", "遅い", "同日一"]);
    }

    #[test]
    fn test_bar_segments() {
        let mk = |percent: i64| GaugeState {
            percent_remaining: percent,
            days_remaining: 10,
            income: 0.0,
            expense: 0.0,
            planned: vec![],
            planned_total: 0.0,
        };
        assert_eq!(mk(100).bar(), format!("   [{}]", "|".repeat(20)));
        assert_eq!(mk(50).bar(), format!("   [{}{}]", "|".repeat(10), " ".repeat(10)));
        // Over 100% clamps the segments, not the number.
        assert_eq!(mk(130).bar(), format!("   [{}]", "|".repeat(20)));
    }

    #[test]
    fn test_color_tiers() {
        assert_eq!(GaugeColor::for_percent(70), GaugeColor::Green);
        assert_eq!(GaugeColor::for_percent(69), GaugeColor::Yellow);
        assert_eq!(GaugeColor::for_percent(30), GaugeColor::Yellow);
        assert_eq!(GaugeColor::for_percent(29), GaugeColor::Red);
        assert_eq!(GaugeColor::for_percent(-10), GaugeColor::Red);
    }

    #[test]
    fn test_days_line_tiers() {
        let mk = |days: i64| GaugeState {
            percent_remaining: 50,
            days_remaining: days,
            income: 0.0,
            expense: 0.0,
            planned: vec![],
            planned_total: 0.0,
        };
        assert!(mk(21).days_line().contains("計画的に"));
        assert!(mk(15).days_line().contains("大きな支出"));
        assert!(mk(3).days_line().contains("頑張れ"));
    }
}
