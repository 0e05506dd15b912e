//! Debate request, transcript, and event types.

use serde::{Deserialize, Serialize};

/// Speaker role of a transcript entry as sent by clients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    System,
    User,
    Assistant,
    /// Any unrecognised role; treated as user input
    #[serde(other)]
    Other,
}

/// One entry of the in-session transcript the client passes back on every call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranscriptMessage {
    pub role: TranscriptRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
}

impl TranscriptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TranscriptRole::User,
            name: Some("User".to_string()),
            content: content.into(),
        }
    }

    pub fn agent(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: TranscriptRole::Assistant,
            name: Some(name.into()),
            content: content.into(),
        }
    }
}

/// A request to run one board turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateRequest {
    #[serde(default)]
    pub dilemma: String,
    #[serde(default)]
    pub history: Vec<TranscriptMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_agent_id: Option<String>,
}

/// Progress of a debate, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebateEvent {
    AgentStart {
        agent_id: &'static str,
    },
    Delta {
        agent_id: &'static str,
        text: String,
    },
    AgentDone {
        agent_id: &'static str,
        content: String,
        model: String,
    },
    /// A full-board turn that failed; the board moves on
    AgentFailed {
        agent_id: &'static str,
        message: String,
    },
}

/// A completed agent turn, as returned by synchronous debates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    pub agent_id: String,
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
