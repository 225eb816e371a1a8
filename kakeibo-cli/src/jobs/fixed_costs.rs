//! Monthly fixed-costs copy: query the fixed-cost master for entries active
//! in the coming month and insert one ledger page per entry.

use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};

use kakeibo_notion::ledger::{
    decode_fixed_cost, fixed_cost_filter, fixed_cost_page, month_label, run_day_ascending_sort,
};
use kakeibo_notion::NotionClient;

use crate::config::Config;

pub async fn run(cfg: &Config, today: NaiveDate) -> Result<()> {
    let client = NotionClient::new(cfg.notion_token()?);
    let balance_db = cfg.balance_db()?;
    let fixed_cost_db = cfg.fixed_cost_db()?;

    // The copy runs ahead of the month it fills.
    let target = today.checked_add_months(Months::new(1)).unwrap();
    let month = month_label(target);

    let masters = client
        .query_database(
            fixed_cost_db,
            Some(fixed_cost_filter(&month)),
            Some(run_day_ascending_sort()),
        )
        .await?;
    println!("{} fixed costs scheduled for {}", masters.len(), month);

    let mut copied = 0;
    for page in &masters {
        let row = decode_fixed_cost(page);
        let Some(date) = row.settlement_date(target.year(), target.month()) else {
            println!("skipping {}: run day not parseable", row.item_name);
            continue;
        };
        // One write per entry; the store offers no idempotency key, so
        // sequential inserts are the safe shape.
        client
            .create_page(balance_db, fixed_cost_page(&row, date))
            .await?;
        copied += 1;
    }

    println!("copied {copied} fixed costs into the ledger");
    Ok(())
}
