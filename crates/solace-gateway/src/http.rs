//! HTTP implementation of the gateway contract.
//!
//! Create is `POST {base}/{collection}`; update is
//! `PATCH {base}/{collection}/{id}`. Any non-2xx status is a failure, with
//! the body's `error` string surfaced when present. Timeouts are left to the
//! transport layer.

use serde_json::Value;
use tracing::{info, warn};

use crate::error::GatewayError;
use crate::{DraftGateway, SaveBody};

pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl DraftGateway for HttpGateway {
    async fn create(
        &self,
        collection: &str,
        record_key: &str,
        body: &SaveBody,
    ) -> Result<String, GatewayError> {
        let url = format!("{}/{}", self.base_url, collection);
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            warn!(collection, status = status.as_u16(), "create rejected");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let id = extract_record_id(&text, record_key).ok_or_else(|| {
            GatewayError::MalformedResponse(format!(
                "create response for '{collection}' has no id (looked at 'id' and '{record_key}.id')"
            ))
        })?;
        info!(collection, id = %id, is_draft = body.is_draft, "record created");
        Ok(id)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        body: &SaveBody,
    ) -> Result<(), GatewayError> {
        let url = format!("{}/{}/{}", self.base_url, collection, id);
        let resp = self.client.patch(&url).json(body).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await?;
            warn!(collection, id, status = status.as_u16(), "update rejected");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        info!(collection, id, is_draft = body.is_draft, "record updated");
        Ok(())
    }
}

/// Pull the `error` string out of a failure body, if it is JSON and has one.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Pull the created record's id out of a success body: a top-level `id`, or
/// `{ record_key: { id } }`. String and integer ids are both accepted.
pub fn extract_record_id(body: &str, record_key: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let id = value
        .get("id")
        .or_else(|| value.get(record_key)?.get("id"))?;
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
