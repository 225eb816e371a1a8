//! Job configuration: every external identifier and credential lives in
//! `~/.kakeibo/config.toml` and is passed into the job at call time. Missing
//! required fields fail the invocation before any store call happens.

use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub fn kakeibo_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".kakeibo"))
}

pub fn ensure_kakeibo_home() -> Result<PathBuf> {
    let dir = kakeibo_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_kakeibo_home()?.join("config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone the jobs' "today" is taken in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub notion: NotionSection,
    #[serde(default)]
    pub dashboard: DashboardSection,
    #[serde(default)]
    pub chat: ChatSection,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotionSection {
    /// Integration token; the NOTION_API_KEY env var overrides it
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub balance_db_id: String,
    #[serde(default)]
    pub fixed_cost_db_id: String,
    #[serde(default)]
    pub summary_db_id: String,
}

/// Fixed block ids of the dashboard's display elements. Each id is found in
/// the dashboard page via "Copy link to block".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardSection {
    #[serde(default)]
    pub gauge_block_id: String,
    #[serde(default)]
    pub days_block_id: String,
    #[serde(default)]
    pub amount_block_id: String,
    #[serde(default)]
    pub planned_total_block_id: String,
    #[serde(default)]
    pub planned_table_block_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSection {
    /// Push-API channel token
    #[serde(default)]
    pub token: String,
    /// Recipient group id
    #[serde(default)]
    pub to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    #[serde(default)]
    pub bucket: String,
    /// OAuth bearer token for the upload API
    #[serde(default)]
    pub token: String,
}

fn default_timezone() -> String {
    "Asia/Tokyo".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            notion: NotionSection::default(),
            dashboard: DashboardSection::default(),
            chat: ChatSection::default(),
            storage: StorageSection::default(),
        }
    }
}

fn require<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    if value.is_empty() {
        bail!("missing required config value: {name} (edit ~/.kakeibo/config.toml)");
    }
    Ok(value)
}

impl Config {
    pub fn notion_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var("NOTION_API_KEY") {
            if !token.is_empty() {
                return Ok(token);
            }
        }
        require(&self.notion.token, "notion.token").map(String::from)
    }

    pub fn balance_db(&self) -> Result<&str> {
        require(&self.notion.balance_db_id, "notion.balance_db_id")
    }

    pub fn fixed_cost_db(&self) -> Result<&str> {
        require(&self.notion.fixed_cost_db_id, "notion.fixed_cost_db_id")
    }

    pub fn summary_db(&self) -> Result<&str> {
        require(&self.notion.summary_db_id, "notion.summary_db_id")
    }

    pub fn chat(&self) -> Result<(&str, &str)> {
        Ok((
            require(&self.chat.token, "chat.token")?,
            require(&self.chat.to, "chat.to")?,
        ))
    }

    pub fn storage(&self) -> Result<(&str, &str)> {
        Ok((
            require(&self.storage.bucket, "storage.bucket")?,
            require(&self.storage.token, "storage.token")?,
        ))
    }

    /// All five dashboard block ids, validated together.
    pub fn dashboard(&self) -> Result<&DashboardSection> {
        let d = &self.dashboard;
        require(&d.gauge_block_id, "dashboard.gauge_block_id")?;
        require(&d.days_block_id, "dashboard.days_block_id")?;
        require(&d.amount_block_id, "dashboard.amount_block_id")?;
        require(&d.planned_total_block_id, "dashboard.planned_total_block_id")?;
        require(&d.planned_table_block_id, "dashboard.planned_table_block_id")?;
        Ok(d)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid timezone: {}", self.timezone))
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Result<chrono::NaiveDate> {
        Ok(chrono::Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        bail!("no config at {} (run: kakeibo init)", p.display());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}. Fill in the ids before running jobs", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_fail_fast() {
        let cfg = Config::default();
        assert!(cfg.balance_db().is_err());
        assert!(cfg.chat().is_err());
        assert!(cfg.dashboard().is_err());
    }

    #[test]
    fn test_parse_minimal_config() {
        let cfg: Config = toml::from_str(
            r#"
            [notion]
            token = "secret"
            balance_db_id = "db-balance"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.timezone, "Asia/Tokyo");
        assert_eq!(cfg.balance_db().unwrap(), "db-balance");
        assert!(cfg.summary_db().is_err());
        assert!(cfg.tz().is_ok());
    }
}
