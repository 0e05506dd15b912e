//! Wire format of the debate text stream.
//!
//! Every agent's text is preceded by a sentinel line naming the agent:
//!
//! ```text
//! __START_AGENT__:safra\n
//! Como isso se paga em 6 meses?...
//! __START_AGENT__:steve\n
//! ...
//! ```
//!
//! Everything between two sentinels belongs to the first one's agent.

use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::agents::find_agent;

use super::{DebateEvent, DebateStream};

pub const MARKER_PREFIX: &str = "__START_AGENT__:";

/// Sentinel announcing that `agent_id` speaks next.
pub fn marker(agent_id: &str) -> String {
    format!("{}{}\n", MARKER_PREFIX, agent_id)
}

/// Inline text shown in place of a reply that could not be generated.
pub fn system_error_text(agent_id: &str) -> String {
    let name = find_agent(agent_id).map(|a| a.name).unwrap_or(agent_id);
    format!("[System Error: Failed to generate response for {}]", name)
}

/// Encode one event for the wire, or `None` if it carries no bytes.
pub fn encode_event(event: &DebateEvent) -> Option<Bytes> {
    match event {
        DebateEvent::AgentStart { agent_id } => Some(Bytes::from(marker(agent_id))),
        DebateEvent::Delta { text, .. } => Some(Bytes::from(text.clone())),
        DebateEvent::AgentFailed { agent_id, .. } => {
            Some(Bytes::from(system_error_text(agent_id)))
        }
        DebateEvent::AgentDone { .. } => None,
    }
}

/// Turn a debate into a response body stream.
///
/// A debate error ends the body with an I/O error so the client sees an
/// aborted response rather than a clean end.
pub fn encode_stream(
    events: DebateStream,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    events.filter_map(|event| async move {
        match event {
            Ok(event) => encode_event(&event).map(Ok),
            Err(e) => Some(Err(std::io::Error::other(e.to_string()))),
        }
    })
}
