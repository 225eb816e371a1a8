//! Monthly summary: aggregate the calendar month, upload the rendered detail
//! report, and persist one summary row per category and per metric.

use anyhow::Result;
use chrono::NaiveDate;

use kakeibo_core::compare::METRICS;
use kakeibo_core::{aggregate, calendar_month, tabular_report};
use kakeibo_notion::ledger::{
    date_ascending_sort, decode_record, display_label, month_filter, period_label, props,
    summary_row,
};
use kakeibo_notion::NotionClient;

use crate::config::Config;
use crate::{storage, table};

pub async fn run(cfg: &Config, target: NaiveDate) -> Result<()> {
    let client = NotionClient::new(cfg.notion_token()?);
    let balance_db = cfg.balance_db()?;
    let summary_db = cfg.summary_db()?;
    let (bucket, storage_token) = cfg.storage()?;

    let (start, end) = calendar_month(target);
    let categories = client.select_options(balance_db, props::CATEGORY).await?;
    let pages = client
        .query_database(
            balance_db,
            Some(month_filter(start, end)),
            Some(date_ascending_sort()),
        )
        .await?;
    let records: Vec<_> = pages.iter().map(decode_record).collect();
    println!("aggregating {} records across {} categories", records.len(), categories.len());

    let (summary, rows) = aggregate(&records, &categories);

    // Detail report to the document sink.
    let rendered = table::render(
        &format!("{}の収支", display_label(target)),
        &tabular_report(&rows),
    );
    let object = format!("reports/report-{}.txt", target.format("%Y%m"));
    let url = storage::upload(
        storage_token,
        bucket,
        &object,
        rendered.into_bytes(),
        "text/plain; charset=utf-8",
    )
    .await?;
    println!("uploaded detail report: {url}");

    // Summary rows: every category total first, then the four metrics, in
    // the same order the report lists them.
    let period = period_label(target);
    for (label, total) in summary.category_totals.iter() {
        client
            .create_page(summary_db, summary_row(&period, label, total))
            .await?;
    }
    for metric in METRICS {
        client
            .create_page(
                summary_db,
                summary_row(&period, metric.label(), metric.value_of(&summary)),
            )
            .await?;
    }

    println!(
        "summary for {} persisted (net {})",
        period,
        kakeibo_core::yen(summary.net())
    );
    Ok(())
}
