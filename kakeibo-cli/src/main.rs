use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod jobs;
mod line;
mod storage;
mod table;

#[derive(Parser, Debug)]
#[command(name = "kakeibo", version, about = "Household ledger automation jobs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config template to ~/.kakeibo/config.toml
    Init,

    /// Copy next month's fixed costs from the master into the ledger
    CopyFixedCosts {
        /// Override "today" (YYYY-MM-DD); defaults to now in the configured timezone
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Aggregate a calendar month, upload the detail report, persist summary rows
    MakeSummary {
        /// Target month (YYYY-MM); defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },

    /// Push the monthly balance message to the chat group
    ReportBalance {
        /// Target month (YYYY-MM); defaults to the previous month
        #[arg(long)]
        month: Option<String>,
    },

    /// Recompute and redraw the dashboard budget gauge
    UpdateGauge {
        /// Override "today" (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Print group ids found in a captured chat webhook payload
    GroupIds {
        /// Payload file; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

/// Parse a "YYYY-MM" month argument into its first day.
fn parse_month(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .with_context(|| format!("invalid month '{s}' (expected YYYY-MM)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            config::init_config()?;
        }

        Command::CopyFixedCosts { today } => {
            let cfg = config::load_config()?;
            let today = match today {
                Some(d) => d,
                None => cfg.today()?,
            };
            jobs::fixed_costs::run(&cfg, today).await?;
        }

        Command::MakeSummary { month } => {
            let cfg = config::load_config()?;
            let target = match month {
                Some(m) => parse_month(&m)?,
                None => cfg.today()?,
            };
            jobs::summary::run(&cfg, target).await?;
        }

        Command::ReportBalance { month } => {
            let cfg = config::load_config()?;
            let target = match month {
                Some(m) => parse_month(&m)?,
                None => cfg
                    .today()?
                    .checked_sub_months(chrono::Months::new(1))
                    .unwrap(),
            };
            jobs::report::run(&cfg, target).await?;
        }

        Command::UpdateGauge { today } => {
            let cfg = config::load_config()?;
            let today = match today {
                Some(d) => d,
                None => cfg.today()?,
            };
            jobs::gauge::run(&cfg, today).await?;
        }

        Command::GroupIds { file } => {
            let payload = match file {
                Some(p) => std::fs::read_to_string(&p)
                    .with_context(|| format!("read {}", p.display()))?,
                None => {
                    use std::io::Read;
                    let mut s = String::new();
                    std::io::stdin().read_to_string(&mut s).context("read stdin")?;
                    s
                }
            };
            let ids = line::group_ids(&payload)?;
            if ids.is_empty() {
                println!("no group-sourced events in payload");
            }
            for id in ids {
                println!("{id}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month("2026-07").unwrap(),
            NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
        );
        assert!(parse_month("2026/07").is_err());
        assert!(parse_month("July").is_err());
    }
}
