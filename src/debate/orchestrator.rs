//! Turn orchestration.
//!
//! A board turn is either targeted (one named agent answers) or a full board
//! meeting (every agent in roster order). Agents run strictly one after
//! another; in a full meeting each successful reply joins the session
//! transcript so later speakers can respond to it.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use uuid::Uuid;

use crate::agents::{build_messages, find_agent, Agent, BOARD};

use super::fallback::ModelChain;
use super::{AgentReply, DebateError, DebateEvent, DebateRequest, TranscriptMessage};

pub type DebateStream = Pin<Box<dyn Stream<Item = Result<DebateEvent, DebateError>> + Send>>;

/// Which agents speak, in order.
#[derive(Debug, Clone)]
pub enum TurnPlan {
    Targeted(&'static Agent),
    FullBoard,
}

impl TurnPlan {
    /// Validate a request and decide who answers it.
    pub fn resolve(request: &DebateRequest) -> Result<Self, DebateError> {
        if request.dilemma.trim().is_empty() {
            return Err(DebateError::MissingDilemma);
        }
        match request.target_agent_id.as_deref() {
            Some(id) => find_agent(id)
                .map(TurnPlan::Targeted)
                .ok_or_else(|| DebateError::UnknownAgent(id.to_string())),
            None => Ok(TurnPlan::FullBoard),
        }
    }

    pub fn agents(&self) -> Vec<&'static Agent> {
        match self {
            TurnPlan::Targeted(agent) => vec![*agent],
            TurnPlan::FullBoard => BOARD.iter().collect(),
        }
    }

    pub fn is_full_board(&self) -> bool {
        matches!(self, TurnPlan::FullBoard)
    }
}

/// Runs board turns against a model chain.
#[derive(Clone)]
pub struct Orchestrator {
    chain: ModelChain,
}

impl Orchestrator {
    pub fn new(chain: ModelChain) -> Self {
        Self { chain }
    }

    pub fn chain(&self) -> &ModelChain {
        &self.chain
    }

    /// Run a debate, yielding events as the models produce text.
    ///
    /// In a full board meeting a failed agent turn becomes an
    /// `AgentFailed` event and the next agent speaks. A targeted turn that
    /// fails ends the stream with the error.
    pub fn run(&self, debate_id: Uuid, plan: TurnPlan, request: DebateRequest) -> DebateStream {
        self.run_with(debate_id, plan, request, true)
    }

    /// Run a debate on non-streaming completions and collect the replies.
    pub async fn run_to_completion(
        &self,
        debate_id: Uuid,
        plan: TurnPlan,
        request: DebateRequest,
    ) -> Result<Vec<AgentReply>, DebateError> {
        let mut events = self.run_with(debate_id, plan, request, false);
        let mut replies = Vec::new();
        while let Some(event) = events.next().await {
            if let DebateEvent::AgentDone {
                agent_id,
                content,
                model,
            } = event?
            {
                if content.is_empty() {
                    continue;
                }
                let name = find_agent(agent_id).map(|a| a.name).unwrap_or(agent_id);
                replies.push(AgentReply {
                    agent_id: agent_id.to_string(),
                    name: name.to_string(),
                    content,
                    model: Some(model),
                });
            }
        }
        Ok(replies)
    }

    fn run_with(
        &self,
        debate_id: Uuid,
        plan: TurnPlan,
        request: DebateRequest,
        streaming: bool,
    ) -> DebateStream {
        let chain = self.chain.clone();
        let stream = async_stream::stream! {
            let full_board = plan.is_full_board();
            let dilemma = request.dilemma;
            let mut session: Vec<TranscriptMessage> = request.history;

            for agent in plan.agents() {
                yield Ok(DebateEvent::AgentStart { agent_id: agent.id });

                let messages = build_messages(agent, &dilemma, &session);
                let (model, mut deltas) = match chain.open(&messages, streaming).await {
                    Ok(opened) => opened,
                    Err(e) => {
                        tracing::error!(%debate_id, agent = agent.id, error = %e, "Agent turn failed");
                        if full_board {
                            yield Ok(failed(agent, &e));
                            continue;
                        }
                        yield Err(e);
                        return;
                    }
                };

                let mut content = String::new();
                let mut broken = None;
                while let Some(delta) = deltas.next().await {
                    match delta {
                        Ok(text) => {
                            content.push_str(&text);
                            yield Ok(DebateEvent::Delta { agent_id: agent.id, text });
                        }
                        Err(source) => {
                            broken = Some(DebateError::Stream { agent: agent.id, source });
                            break;
                        }
                    }
                }

                if let Some(e) = broken {
                    tracing::error!(%debate_id, agent = agent.id, model = %model, error = %e, "Agent stream broke");
                    if full_board {
                        yield Ok(failed(agent, &e));
                        continue;
                    }
                    yield Err(e);
                    return;
                }

                tracing::debug!(%debate_id, agent = agent.id, model = %model, chars = content.len(), "Agent turn complete");
                if full_board && !content.is_empty() {
                    session.push(TranscriptMessage::agent(agent.name, content.clone()));
                }
                yield Ok(DebateEvent::AgentDone { agent_id: agent.id, content, model });
            }
        };
        Box::pin(stream)
    }
}

fn failed(agent: &'static Agent, error: &DebateError) -> DebateEvent {
    DebateEvent::AgentFailed {
        agent_id: agent.id,
        message: error.to_string(),
    }
}
