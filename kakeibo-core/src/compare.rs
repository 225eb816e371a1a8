//! Period-over-period comparison: joins the current month's totals against
//! previously persisted prior-month and prior-year summary rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::PeriodSummary;

/// The four metrics tracked across periods, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Income,
    Expense,
    FixedCost,
    VariableCost,
}

pub const METRICS: [Metric; 4] = [
    Metric::Income,
    Metric::Expense,
    Metric::FixedCost,
    Metric::VariableCost,
];

impl Metric {
    /// Label used by the summary database's 集計項目 select.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Income => "収入",
            Metric::Expense => "支出",
            Metric::FixedCost => "固定費",
            Metric::VariableCost => "変動費",
        }
    }

    /// The metric's value in a period summary.
    pub fn value_of(self, summary: &PeriodSummary) -> f64 {
        match self {
            Metric::Income => summary.income,
            Metric::Expense => summary.expense(),
            Metric::FixedCost => summary.fixed_cost,
            Metric::VariableCost => summary.variable_cost,
        }
    }
}

/// A prior-period value together with the store's precomputed rate field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriorMetric {
    pub value: f64,
    /// Rate already computed by the store's formula property, in percent
    pub stored_rate_pct: f64,
}

/// Where the period-over-period rates come from. One invocation must use a
/// single source; recomputed and stored rates never mix within a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// current / prior - 1, in percent; falls back to the stored rate when
    /// the prior value is 0 (the quotient is undefined there)
    Recomputed,
    /// The store's formula field, used as-is
    Stored,
}

/// One metric's comparison against the two reference periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparativePoint {
    pub current: f64,
    pub prior_month: f64,
    pub prior_year: f64,
    pub prior_month_rate_pct: f64,
    pub prior_year_rate_pct: f64,
}

fn rate(current: f64, prior: &PriorMetric, source: RateSource) -> f64 {
    match source {
        RateSource::Recomputed => {
            if prior.value != 0.0 {
                (current / prior.value - 1.0) * 100.0
            } else {
                prior.stored_rate_pct
            }
        }
        RateSource::Stored => prior.stored_rate_pct,
    }
}

/// Join the current summary against prior-period rows keyed by metric label.
/// Missing prior data defaults to 0; this never fails.
pub fn build_comparative(
    current: &PeriodSummary,
    prior_month: &HashMap<String, PriorMetric>,
    prior_year: &HashMap<String, PriorMetric>,
    source: RateSource,
) -> Vec<(Metric, ComparativePoint)> {
    METRICS
        .iter()
        .map(|&metric| {
            let value = metric.value_of(current);
            let pm = prior_month
                .get(metric.label())
                .copied()
                .unwrap_or_default();
            let py = prior_year.get(metric.label()).copied().unwrap_or_default();
            (
                metric,
                ComparativePoint {
                    current: value,
                    prior_month: pm.value,
                    prior_year: py.value,
                    prior_month_rate_pct: rate(value, &pm, source),
                    prior_year_rate_pct: rate(value, &py, source),
                },
            )
        })
        .collect()
}
