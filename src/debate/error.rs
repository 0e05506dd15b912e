use thiserror::Error;

use crate::llm::LlmError;

#[derive(Debug, Error)]
pub enum DebateError {
    #[error("Dilemma is required")]
    MissingDilemma,

    #[error("Agent not found: {0}")]
    UnknownAgent(String),

    #[error("All models failed to generate response.")]
    AllModelsFailed,

    #[error("Response stream for {agent} failed: {source}")]
    Stream {
        agent: &'static str,
        #[source]
        source: LlmError,
    },
}
