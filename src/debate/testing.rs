//! Scripted in-memory `LlmClient` for tests.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{
    ChatMessage, ChatOptions, ChatResponse, ChatStream, LlmClient, LlmError, LlmErrorKind,
};

/// What the next accepted call does.
#[derive(Debug, Clone)]
pub enum Script {
    /// Stream these deltas and finish
    Chunks(Vec<String>),
    /// Reject the request before streaming
    Reject,
    /// Stream these deltas, then fail
    Break(Vec<String>),
}

impl Script {
    pub fn chunks(parts: &[&str]) -> Self {
        Script::Chunks(parts.iter().map(|p| p.to_string()).collect())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub options: ChatOptions,
}

/// Answers calls from a queue of scripts; `failing_model`s always reject.
#[derive(Default)]
pub struct ScriptedLlm {
    failing: HashSet<String>,
    scripts: Mutex<VecDeque<Script>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_model(mut self, model: &str) -> Self {
        self.failing.insert(model.to_string());
        self
    }

    pub fn with_script(self, script: Script) -> Self {
        self.scripts.lock().unwrap().push_back(script);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn models_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.model).collect()
    }

    pub fn last_options(&self) -> Option<ChatOptions> {
        self.calls().pop().map(|c| c.options)
    }

    fn next(&self, model: &str, messages: &[ChatMessage], options: ChatOptions) -> Script {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            messages: messages.to_vec(),
            options,
        });
        if self.failing.contains(model) {
            return Script::Reject;
        }
        self.scripts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Script::chunks(&["ok"]))
    }
}

fn rejected(model: &str) -> LlmError {
    LlmError::from_status(404, format!("model {} unavailable", model))
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        match self.next(model, messages, options) {
            Script::Chunks(parts) => Ok(ChatResponse {
                content: Some(parts.concat()),
                finish_reason: Some("stop".to_string()),
                model: Some(model.to_string()),
            }),
            Script::Reject | Script::Break(_) => Err(rejected(model)),
        }
    }

    async fn chat_completion_stream(
        &self,
        model: &str,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<ChatStream, LlmError> {
        let items: Vec<Result<String, LlmError>> = match self.next(model, messages, options) {
            Script::Chunks(parts) => parts.into_iter().map(Ok).collect(),
            Script::Reject => return Err(rejected(model)),
            Script::Break(parts) => parts
                .into_iter()
                .map(Ok)
                .chain(std::iter::once(Err(LlmError {
                    kind: LlmErrorKind::NetworkError,
                    status_code: None,
                    message: "connection reset".to_string(),
                })))
                .collect(),
        };
        Ok(Box::pin(futures::stream::iter(items)))
    }
}
