use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::api::{ForgedResponse, SubmitRequest};
use crate::blockchain::Block;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("non-json response ({status}): {body}")]
    NonJson { status: StatusCode, body: String },
    #[error("unexpected response ({status}): {reason}")]
    Unexpected { status: StatusCode, reason: String },
}

/// Result of a proof submission the node understood.
#[derive(Debug)]
pub enum SubmitOutcome {
    Forged(ForgedResponse),
    Rejected(String),
}

/// HTTP client for a coordinating node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    base_url: String,
    http: reqwest::Client,
}

impl NodeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Read the response body and decode it as JSON, keeping the raw text on failure.
    async fn read_json(resp: reqwest::Response) -> Result<(StatusCode, Value), TransportError> {
        let status = resp.status();
        let body = resp.text().await?;
        match serde_json::from_str(&body) {
            Ok(value) => Ok((status, value)),
            Err(_) => Err(TransportError::NonJson { status, body }),
        }
    }

    pub async fn last_block(&self) -> Result<Block, TransportError> {
        let url = format!("{}/last_block", self.base_url);
        let resp = self.http.get(&url).send().await?;
        let (status, value) = Self::read_json(resp).await?;
        serde_json::from_value(value).map_err(|e| TransportError::Unexpected {
            status,
            reason: e.to_string(),
        })
    }

    pub async fn submit(&self, proof: u64, id: &str) -> Result<SubmitOutcome, TransportError> {
        let url = format!("{}/mine", self.base_url);
        let body = SubmitRequest {
            proof: Some(proof),
            id: Some(id.to_string()),
        };
        let resp = self.http.post(&url).json(&body).send().await?;
        let (status, value) = Self::read_json(resp).await?;

        let message = value.get("message").and_then(Value::as_str).map(str::to_string);
        match message {
            Some(m) if m == ForgedResponse::MESSAGE => serde_json::from_value(value)
                .map(SubmitOutcome::Forged)
                .map_err(|e| TransportError::Unexpected {
                    status,
                    reason: e.to_string(),
                }),
            Some(m) => Ok(SubmitOutcome::Rejected(m)),
            None => Err(TransportError::Unexpected {
                status,
                reason: format!("missing message in {value}"),
            }),
        }
    }
}
