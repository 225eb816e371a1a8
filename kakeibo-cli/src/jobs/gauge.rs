//! Daily gauge refresh: recompute the budget cycle from scratch and redraw
//! the five dashboard blocks.

use anyhow::Result;
use chrono::NaiveDate;

use kakeibo_core::{compute_gauge, BudgetCycle};
use kakeibo_notion::blocks;
use kakeibo_notion::ledger::{cycle_filter, decode_record};
use kakeibo_notion::NotionClient;

use crate::config::Config;

pub async fn run(cfg: &Config, today: NaiveDate) -> Result<()> {
    let client = NotionClient::new(cfg.notion_token()?);
    let balance_db = cfg.balance_db()?;
    let dash = cfg.dashboard()?;

    let cycle = BudgetCycle::containing(today);
    let pages = client
        .query_database(
            balance_db,
            Some(cycle_filter(cycle.start, cycle.end)),
            None,
        )
        .await?;
    let records: Vec<_> = pages.iter().map(decode_record).collect();

    let state = compute_gauge(&records, &cycle, today);
    println!(
        "cycle {} to {}: {}% remaining, {} planned entries",
        cycle.start, cycle.end, state.percent_remaining, state.planned.len()
    );

    client
        .update_block(&dash.gauge_block_id, blocks::gauge_heading(&state))
        .await?;
    client
        .update_block(&dash.days_block_id, blocks::bulleted_line(&state.days_line()))
        .await?;
    client
        .update_block(
            &dash.amount_block_id,
            blocks::bulleted_line(&state.amount_line()),
        )
        .await?;
    client
        .update_block(
            &dash.planned_total_block_id,
            blocks::bulleted_line(&state.planned_total_line()),
        )
        .await?;

    // The planned table is replaced wholesale: drop the previous table child
    // if one exists, then append the fresh one.
    let children = client.list_children(&dash.planned_table_block_id).await?;
    if let Some(old_table) = children.iter().find(|c| c["type"] == "table") {
        if let Some(id) = old_table["id"].as_str() {
            client.delete_block(id).await?;
        }
    }
    client
        .append_children(&dash.planned_table_block_id, blocks::planned_table(&state))
        .await?;

    println!("dashboard gauge updated");
    Ok(())
}
