//! Linear model fallback.
//!
//! Each turn walks the configured model chain in order and uses the first
//! model that accepts the request. Only failures before any content arrives
//! move on to the next model; a stream that breaks midway fails the turn.

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::llm::{ChatMessage, ChatOptions, ChatStream, LlmClient};

use super::DebateError;

/// An ordered list of models sharing one client.
#[derive(Clone)]
pub struct ModelChain {
    client: Arc<dyn LlmClient>,
    models: Vec<String>,
    generation: GenerationConfig,
}

impl ModelChain {
    pub fn new(client: Arc<dyn LlmClient>, models: Vec<String>, generation: GenerationConfig) -> Self {
        Self {
            client,
            models,
            generation,
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn options(&self) -> ChatOptions {
        ChatOptions {
            temperature: Some(self.generation.temperature),
            max_tokens: Some(self.generation.max_tokens),
        }
    }

    /// Open a turn on the first model that accepts it.
    ///
    /// With `streaming` off the whole completion is fetched up front and
    /// replayed as a single-delta stream, so callers handle both modes alike.
    /// Returns the model used and its content stream.
    pub async fn open(
        &self,
        messages: &[ChatMessage],
        streaming: bool,
    ) -> Result<(String, ChatStream), DebateError> {
        for model in &self.models {
            tracing::info!(model = %model, streaming, "Trying model");
            let attempt = if streaming {
                self.client
                    .chat_completion_stream(model, messages, self.options())
                    .await
            } else {
                self.client
                    .chat_completion(model, messages, self.options())
                    .await
                    .map(|response| {
                        tracing::debug!(
                            model = %model,
                            finish_reason = ?response.finish_reason,
                            "Completion received"
                        );
                        let content = response.content.filter(|c| !c.is_empty());
                        let stream: ChatStream =
                            Box::pin(futures::stream::iter(content.into_iter().map(Ok)));
                        stream
                    })
            };

            match attempt {
                Ok(stream) => return Ok((model.clone(), stream)),
                Err(e) => {
                    tracing::warn!(
                        model = %model,
                        kind = %e.kind,
                        transient = e.is_transient(),
                        error = %e,
                        "Model failed, trying next"
                    );
                }
            }
        }

        tracing::error!(models = self.models.len(), "All models failed to generate response");
        Err(DebateError::AllModelsFailed)
    }
}
