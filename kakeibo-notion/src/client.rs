//! Async client for the document store's REST API: database queries with
//! cursor pagination, page creation, and dashboard block updates.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

const API_BASE: &str = "https://api.notion.com/v1";
const API_VERSION: &str = "2022-06-28";

/// One page returned by a database query.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    has_more: bool,
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    results: Vec<Value>,
}

pub struct NotionClient {
    http: reqwest::Client,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{API_BASE}{path}"))
            .bearer_auth(&self.token)
            .header("Notion-Version", API_VERSION)
    }

    async fn send(&self, req: reqwest::RequestBuilder, what: &str) -> Result<Value> {
        let resp = req.send().await.with_context(|| format!("{what} request"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("store error during {what}: {status} {body}");
        }
        resp.json()
            .await
            .with_context(|| format!("parse {what} response"))
    }

    /// Query a database, following pagination until exhausted. Order within
    /// and across pages follows the given sorts.
    pub async fn query_database(
        &self,
        database_id: &str,
        filter: Option<Value>,
        sorts: Option<Value>,
    ) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({});
            if let Some(f) = &filter {
                body["filter"] = f.clone();
            }
            if let Some(s) = &sorts {
                body["sorts"] = s.clone();
            }
            if let Some(c) = &cursor {
                body["start_cursor"] = json!(c);
            }

            let raw = self
                .send(
                    self.request(
                        reqwest::Method::POST,
                        &format!("/databases/{database_id}/query"),
                    )
                    .json(&body),
                    "database query",
                )
                .await?;
            let resp: QueryResponse =
                serde_json::from_value(raw).context("decode database query response")?;

            pages.extend(resp.results);
            if !resp.has_more {
                break;
            }
            cursor = resp.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(pages)
    }

    /// Retrieve a database's schema.
    pub async fn retrieve_database(&self, database_id: &str) -> Result<Value> {
        self.send(
            self.request(reqwest::Method::GET, &format!("/databases/{database_id}")),
            "database retrieve",
        )
        .await
    }

    /// The select options of one schema property, in schema order. This is
    /// how the aggregator learns the full category key list.
    pub async fn select_options(&self, database_id: &str, property: &str) -> Result<Vec<String>> {
        let schema = self.retrieve_database(database_id).await?;
        let options = schema["properties"][property]["select"]["options"]
            .as_array()
            .cloned()
            .unwrap_or_default();
        Ok(options
            .iter()
            .filter_map(|o| o["name"].as_str().map(String::from))
            .collect())
    }

    /// Insert one page into a database.
    pub async fn create_page(&self, database_id: &str, properties: Value) -> Result<()> {
        self.send(
            self.request(reqwest::Method::POST, "/pages").json(&json!({
                "parent": {"database_id": database_id},
                "properties": properties,
            })),
            "page create",
        )
        .await?;
        Ok(())
    }

    /// Overwrite a display block's content. Last write wins; the dashboard
    /// blocks have no versioning.
    pub async fn update_block(&self, block_id: &str, payload: Value) -> Result<()> {
        self.send(
            self.request(reqwest::Method::PATCH, &format!("/blocks/{block_id}"))
                .json(&payload),
            "block update",
        )
        .await?;
        Ok(())
    }

    /// List a block's children (first 50; the planned-entries container
    /// never grows past that).
    pub async fn list_children(&self, block_id: &str) -> Result<Vec<Value>> {
        let raw = self
            .send(
                self.request(
                    reqwest::Method::GET,
                    &format!("/blocks/{block_id}/children?page_size=50"),
                ),
                "children list",
            )
            .await?;
        let resp: ChildrenResponse =
            serde_json::from_value(raw).context("decode children response")?;
        Ok(resp.results)
    }

    /// Append child blocks to a container block.
    pub async fn append_children(&self, block_id: &str, children: Value) -> Result<()> {
        self.send(
            self.request(
                reqwest::Method::PATCH,
                &format!("/blocks/{block_id}/children"),
            )
            .json(&json!({"children": children})),
            "children append",
        )
        .await?;
        Ok(())
    }

    /// Delete (archive) a block.
    pub async fn delete_block(&self, block_id: &str) -> Result<()> {
        self.send(
            self.request(reqwest::Method::DELETE, &format!("/blocks/{block_id}")),
            "block delete",
        )
        .await?;
        Ok(())
    }
}
