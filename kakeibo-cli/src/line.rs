//! Chat sink: LINE push delivery, plus the offline helper for pulling group
//! ids out of a captured webhook payload.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;

const PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

/// Push one text message to the configured group.
pub async fn push_text(token: &str, to: &str, text: &str) -> Result<()> {
    let body = json!({
        "to": to,
        "messages": [{"type": "text", "text": text}],
    });

    let client = reqwest::Client::new();
    let resp = client
        .post(PUSH_URL)
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .context("chat push request")?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("chat push failed: {status} {body}");
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    source: Option<EventSource>,
}

#[derive(Debug, Deserialize)]
struct EventSource {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "groupId")]
    group_id: Option<String>,
}

/// Group ids of all group-sourced events in a webhook payload. Used once per
/// group to learn the push recipient id; verification of the webhook itself
/// stays outside this tool.
pub fn group_ids(payload: &str) -> Result<Vec<String>> {
    let payload: WebhookPayload =
        serde_json::from_str(payload).context("parse webhook payload")?;
    Ok(payload
        .events
        .into_iter()
        .filter_map(|e| e.source)
        .filter(|s| s.kind == "group")
        .filter_map(|s| s.group_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_ids_from_payload() {
        let payload = r#"{
            "events": [
                {"type": "message", "source": {"type": "group", "groupId": "C1234"}},
                {"type": "message", "source": {"type": "user", "userId": "U9999"}},
                {"type": "join", "source": {"type": "group", "groupId": "C5678"}}
            ]
        }"#;
        assert_eq!(group_ids(payload).unwrap(), vec!["C1234", "C5678"]);
    }

    #[test]
    fn test_empty_payload() {
        assert!(group_ids("{}").unwrap().is_empty());
        assert!(group_ids("not json").is_err());
    }
}
