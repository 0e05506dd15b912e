//! HTTP client for a running boardroom server.

use futures::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ErrorResponse, SyncDebateResponse};
use crate::debate::DebateRequest;

use super::demux::{Segment, StreamDemuxer};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },
}

/// Public profile of a board member, as served by `GET /api/agents`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub company: String,
    pub color: String,
}

#[derive(Serialize)]
struct DebateCall<'a> {
    #[serde(flatten)]
    request: &'a DebateRequest,
    stream: bool,
}

pub struct BoardClient {
    client: reqwest::Client,
    base_url: String,
}

impl BoardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn agents(&self) -> Result<Vec<AgentProfile>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/agents", self.base_url))
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Run a streaming debate call, reporting segments after every chunk.
    ///
    /// Returns the final segments once the body ends.
    pub async fn debate_stream<F>(
        &self,
        request: &DebateRequest,
        mut on_update: F,
    ) -> Result<Vec<Segment>, ClientError>
    where
        F: FnMut(&[Segment]),
    {
        let response = self.post_debate(request, true).await?;
        let mut demux = StreamDemuxer::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let segments = demux.push(&chunk?);
            on_update(&segments);
        }
        let segments = demux.finish();
        on_update(&segments);
        Ok(segments)
    }

    /// Run a debate call and wait for the JSON answer.
    pub async fn debate_sync(
        &self,
        request: &DebateRequest,
    ) -> Result<SyncDebateResponse, ClientError> {
        Ok(self.post_debate(request, false).await?.json().await?)
    }

    async fn post_debate(
        &self,
        request: &DebateRequest,
        stream: bool,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/debate", self.base_url))
            .json(&DebateCall { request, stream })
            .send()
            .await?;
        check(response).await
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}
