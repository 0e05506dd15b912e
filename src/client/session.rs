//! Client-side conversation state.
//!
//! A session holds the transcript the client sends back on every call, the
//! board member currently addressed (if any), and whether a round is running.

use crate::agents::{find_agent, Agent, BOARD};
use crate::debate::{DebateRequest, TranscriptMessage, TranscriptRole};

/// The calls to make for one round, in order.
#[derive(Debug, Clone)]
pub struct RoundPlan {
    /// Dilemma sent with every call of the round
    pub dilemma: String,
    pub agents: Vec<&'static Agent>,
}

#[derive(Debug, Default)]
pub struct DebateSession {
    history: Vec<TranscriptMessage>,
    selected_target: Option<&'static Agent>,
    debating: bool,
}

impl DebateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[TranscriptMessage] {
        &self.history
    }

    pub fn selected_target(&self) -> Option<&'static Agent> {
        self.selected_target
    }

    pub fn is_debating(&self) -> bool {
        self.debating
    }

    /// Address one board member (`Some(id)`) or the whole board (`None`).
    ///
    /// Returns `false` and leaves the selection alone for unknown ids.
    pub fn select_target(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selected_target = None;
                true
            }
            Some(id) => match find_agent(id) {
                Some(agent) => {
                    self.selected_target = Some(agent);
                    true
                }
                None => false,
            },
        }
    }

    /// Start a round for `input`.
    ///
    /// Returns `None` when a round is already running, or when there is
    /// nothing to discuss (blank input on an empty transcript). A non-blank
    /// input joins the transcript as the user's message.
    pub fn begin(&mut self, input: &str) -> Option<RoundPlan> {
        let input = input.trim();
        if self.debating || (input.is_empty() && self.history.is_empty()) {
            return None;
        }
        self.debating = true;

        // The dilemma stays the session's opening question once one exists.
        let dilemma = match self.history.first() {
            Some(first) if first.role == TranscriptRole::User => first.content.clone(),
            _ => input.to_string(),
        };

        if !input.is_empty() {
            self.history.push(TranscriptMessage::user(input));
        }

        let agents = match self.selected_target {
            Some(agent) => vec![agent],
            None => BOARD.iter().collect(),
        };
        Some(RoundPlan { dilemma, agents })
    }

    /// Build the request for `agent`'s call within the running round.
    pub fn request_for(&self, plan: &RoundPlan, agent: &Agent) -> DebateRequest {
        DebateRequest {
            dilemma: plan.dilemma.clone(),
            history: self.history.clone(),
            target_agent_id: Some(agent.id.to_string()),
        }
    }

    /// Record `agent`'s reply so the next speaker sees it.
    pub fn record_reply(&mut self, agent: &Agent, content: &str) {
        if content.is_empty() {
            return;
        }
        self.history
            .push(TranscriptMessage::agent(agent.name, content));
    }

    /// End the running round; the addressed member resets to the whole board.
    pub fn finish(&mut self) {
        self.debating = false;
        self.selected_target = None;
    }

    /// Start a new debate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_discuss_on_blank_first_input() {
        let mut session = DebateSession::new();
        assert!(session.begin("   ").is_none());
        assert!(!session.is_debating());
        assert!(session.history().is_empty());
    }

    #[test]
    fn first_round_addresses_the_whole_board() {
        let mut session = DebateSession::new();
        let plan = session.begin("Devo vender a empresa?").unwrap();
        assert_eq!(plan.dilemma, "Devo vender a empresa?");
        assert_eq!(
            plan.agents.iter().map(|a| a.id).collect::<Vec<_>>(),
            vec!["safra", "steve", "mira", "satya"]
        );
        assert_eq!(session.history(), &[TranscriptMessage::user("Devo vender a empresa?")]);
        assert!(session.is_debating());
        assert!(session.begin("outra").is_none());
    }

    #[test]
    fn replies_accumulate_between_calls() {
        let mut session = DebateSession::new();
        let plan = session.begin("Devo vender a empresa?").unwrap();
        let safra = plan.agents[0];
        let steve = plan.agents[1];

        session.record_reply(safra, "Só com múltiplo de 10x.");
        session.record_reply(steve, "");
        let request = session.request_for(&plan, plan.agents[2]);
        assert_eq!(request.target_agent_id.as_deref(), Some("mira"));
        assert_eq!(request.history.len(), 2);
        assert_eq!(request.history[1], TranscriptMessage::agent("Safra Catz", "Só com múltiplo de 10x."));
    }

    #[test]
    fn follow_up_keeps_the_opening_dilemma_and_target() {
        let mut session = DebateSession::new();
        session.begin("Devo vender a empresa?").unwrap();
        session.finish();

        assert!(session.select_target(Some("steve")));
        assert!(!session.select_target(Some("elon")));
        assert_eq!(session.selected_target().map(|a| a.id), Some("steve"));

        let plan = session.begin("E se for só uma parte?").unwrap();
        assert_eq!(plan.dilemma, "Devo vender a empresa?");
        assert_eq!(plan.agents.iter().map(|a| a.id).collect::<Vec<_>>(), vec!["steve"]);
        assert_eq!(session.history().len(), 2);

        session.finish();
        assert!(session.selected_target().is_none());

        // Blank input on an existing transcript re-runs the board.
        let plan = session.begin("").unwrap();
        assert_eq!(plan.agents.len(), 4);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = DebateSession::new();
        session.select_target(Some("mira"));
        session.begin("x").unwrap();
        session.reset();
        assert!(session.history().is_empty());
        assert!(session.selected_target().is_none());
        assert!(!session.is_debating());
    }
}
