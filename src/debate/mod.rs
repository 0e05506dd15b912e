//! Board debates: who speaks, in what order, on which model.

mod error;
mod fallback;
mod orchestrator;
pub mod protocol;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use error::DebateError;
pub use fallback::ModelChain;
pub use orchestrator::{DebateStream, Orchestrator, TurnPlan};
pub use types::{
    AgentReply, DebateEvent, DebateRequest, TranscriptMessage, TranscriptRole,
};
