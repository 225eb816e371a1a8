//! kakeibo-core: pure aggregation and gauge logic for the household ledger.
//!
//! Everything in this crate is synchronous and I/O-free. Records arrive
//! already decoded and defaulted from the store boundary (kakeibo-notion),
//! so nothing here needs to guard against missing wire fields.

pub mod aggregate;
pub mod compare;
pub mod cycle;
pub mod gauge;
pub mod record;
pub mod report;

pub use aggregate::{aggregate, CategoryTotals, DetailRow, PeriodSummary, DETAIL_COLUMNS};
pub use compare::{build_comparative, ComparativePoint, Metric, PriorMetric, RateSource};
pub use cycle::{calendar_month, BudgetCycle};
pub use gauge::{compute_gauge, GaugeColor, GaugeState, PlannedEntry};
pub use record::{classify, LedgerRecord, RecordClass, RecordStatus, UNKNOWN_LABEL};
pub use report::{balance_message, tabular_report, yen, TabularReport};
