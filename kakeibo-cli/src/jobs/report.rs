//! Monthly balance report: aggregate the month, join it against the
//! persisted prior-month and prior-year summaries, and push the formatted
//! message to the chat group.

use anyhow::Result;
use chrono::{Months, NaiveDate};

use kakeibo_core::compare::{build_comparative, RateSource};
use kakeibo_core::{aggregate, balance_message, calendar_month};
use kakeibo_notion::ledger::{
    date_ascending_sort, decode_record, decode_summary_rows, display_label, month_filter,
    period_label, props, summary_period_filter,
};
use kakeibo_notion::NotionClient;

use crate::config::Config;
use crate::line;

pub async fn run(cfg: &Config, target: NaiveDate) -> Result<()> {
    let client = NotionClient::new(cfg.notion_token()?);
    let balance_db = cfg.balance_db()?;
    let summary_db = cfg.summary_db()?;
    let (chat_token, chat_to) = cfg.chat()?;

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
    let (summary, _) = aggregate(&records, &categories);

    // Reference periods come from the summary database, keyed by the same
    // period labels make-summary writes.
    let prior_month_date = target.checked_sub_months(Months::new(1)).unwrap();
    let prior_year_date = target.checked_sub_months(Months::new(12)).unwrap();

    let prior_month_rows = client
        .query_database(
            summary_db,
            Some(summary_period_filter(&period_label(prior_month_date))),
            None,
        )
        .await?;
    let prior_year_rows = client
        .query_database(
            summary_db,
            Some(summary_period_filter(&period_label(prior_year_date))),
            None,
        )
        .await?;
    let prior_month = decode_summary_rows(&prior_month_rows, props::PRIOR_MONTH_RATE);
    let prior_year = decode_summary_rows(&prior_year_rows, props::PRIOR_YEAR_RATE);
    println!(
        "prior references: {} metrics (month), {} metrics (year)",
        prior_month.len(),
        prior_year.len()
    );

    let points = build_comparative(&summary, &prior_month, &prior_year, RateSource::Recomputed);
    let message = balance_message(&display_label(target), &summary, Some(&points));

    line::push_text(chat_token, chat_to, &message).await?;
    println!("balance report for {} pushed to chat", display_label(target));
    Ok(())
}
