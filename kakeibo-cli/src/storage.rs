//! Object-storage sink: media upload of the rendered monthly report and its
//! public URL. Bucket provisioning and ACLs are managed outside the jobs.

use anyhow::{bail, Context, Result};

const UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1/b";

/// Upload `bytes` as `object_name` and return the object's public URL.
pub async fn upload(
    token: &str,
    bucket: &str,
    object_name: &str,
    bytes: Vec<u8>,
    content_type: &str,
) -> Result<String> {
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{UPLOAD_BASE}/{bucket}/o"))
        .query(&[("uploadType", "media"), ("name", object_name)])
        .bearer_auth(token)
        .header(reqwest::header::CONTENT_TYPE, content_type)
        .body(bytes)
        .send()
        .await
        .context("storage upload request")?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        bail!("storage upload failed: {status} {body}");
    }
    Ok(public_url(bucket, object_name))
}

pub fn public_url(bucket: &str, object_name: &str) -> String {
    format!("https://storage.googleapis.com/{bucket}/{object_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        assert_eq!(
            public_url("household-reports", "reports/report-202607.txt"),
            "https://storage.googleapis.com/household-reports/reports/report-202607.txt"
        );
    }
}
