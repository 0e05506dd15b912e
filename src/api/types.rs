//! API request and response types.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::{Deserialize, Serialize};

use crate::debate::{AgentReply, DebateRequest, TranscriptMessage};

/// Body of `POST /api/debate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateBody {
    /// The dilemma under discussion (the first user message of the session)
    #[serde(default)]
    pub dilemma: Option<String>,

    /// In-session transcript so far
    #[serde(default)]
    pub history: Vec<TranscriptMessage>,

    /// Ask a single board member instead of the whole board
    #[serde(default)]
    pub target_agent_id: Option<String>,

    /// Stream marker-delimited text (default) or answer with JSON
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_stream() -> bool {
    true
}

impl DebateBody {
    pub fn into_parts(self) -> (DebateRequest, bool) {
        (
            DebateRequest {
                dilemma: self.dilemma.unwrap_or_default(),
                history: self.history,
                // An empty id addresses the whole board.
                target_agent_id: self.target_agent_id.filter(|id| !id.is_empty()),
            },
            self.stream,
        )
    }
}

/// Response of a non-streaming debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncDebateResponse {
    /// Content of the last reply (the only one for targeted turns)
    pub content: Option<String>,
    pub messages: Vec<AgentReply>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models: Vec<String>,
    pub started_at: String,
}

/// Error body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}
