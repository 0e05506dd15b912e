//! Prompt assembly for a single agent turn.

use crate::debate::{TranscriptMessage, TranscriptRole};
use crate::llm::{ChatMessage, Role};

use super::Agent;

/// Board instructions appended to every persona prompt.
fn board_instructions(dilemma: &str) -> String {
    format!(
        "Você está participando de um conselho virtual debatendo o seguinte dilema: \"{dilemma}\".

IMPORTANTE:
- Se outros agentes já falaram, referencie os pontos deles. Concorde, discorde ou ofereça um ângulo diferente.
- Seja conciso (máximo 3-4 frases).
- Permaneça estritamente no personagem.
- Responda SEMPRE em Português do Brasil."
    )
}

/// Map a transcript entry onto the completion API's message format.
///
/// Named assistant entries are prefixed with `[Name]: ` so the next speaker
/// can tell board members apart.
fn to_chat_message(message: &TranscriptMessage) -> ChatMessage {
    match (message.role, message.name.as_deref()) {
        (TranscriptRole::Assistant, Some(name)) if !name.is_empty() => {
            ChatMessage::assistant(format!("[{}]: {}", name, message.content))
        }
        (TranscriptRole::Assistant, _) => ChatMessage::assistant(message.content.clone()),
        (TranscriptRole::System, _) => ChatMessage::new(Role::System, message.content.clone()),
        (TranscriptRole::User | TranscriptRole::Other, _) => {
            ChatMessage::user(message.content.clone())
        }
    }
}

/// Build the full message list for `agent`'s turn.
pub fn build_messages(
    agent: &Agent,
    dilemma: &str,
    history: &[TranscriptMessage],
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(format!(
        "{}\n\n{}",
        agent.system_prompt,
        board_instructions(dilemma)
    )));
    messages.extend(history.iter().map(to_chat_message));
    messages.push(ChatMessage::user(format!(
        "The dilemma is: {}. What is your view?",
        dilemma
    )));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::find_agent;

    #[test]
    fn system_prompt_combines_persona_and_dilemma() {
        let agent = find_agent("safra").unwrap();
        let messages = build_messages(agent, "Comprar a concorrente?", &[]);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.starts_with("Você é Safra Catz"));
        assert!(messages[0].content.contains("\"Comprar a concorrente?\""));
        assert!(messages[0].content.contains("Português do Brasil"));
        assert_eq!(
            messages[1],
            ChatMessage::user("The dilemma is: Comprar a concorrente?. What is your view?")
        );
    }

    #[test]
    fn history_is_mapped_with_speaker_prefixes() {
        let agent = find_agent("steve").unwrap();
        let history = vec![
            TranscriptMessage::user("Comprar a concorrente?"),
            TranscriptMessage::agent("Safra Catz", "Só se pagar em 6 meses."),
            TranscriptMessage {
                role: TranscriptRole::Assistant,
                name: None,
                content: "anônimo".to_string(),
            },
            TranscriptMessage {
                role: TranscriptRole::System,
                name: None,
                content: "nota".to_string(),
            },
            TranscriptMessage {
                role: TranscriptRole::Other,
                name: Some("tool".to_string()),
                content: "saída".to_string(),
            },
        ];
        let messages = build_messages(agent, "Comprar a concorrente?", &history);
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[1], ChatMessage::user("Comprar a concorrente?"));
        assert_eq!(
            messages[2],
            ChatMessage::assistant("[Safra Catz]: Só se pagar em 6 meses.")
        );
        assert_eq!(messages[3], ChatMessage::assistant("anônimo"));
        assert_eq!(messages[4], ChatMessage::system("nota"));
        assert_eq!(messages[5], ChatMessage::user("saída"));
        assert_eq!(messages[6].role, Role::User);
    }

    #[test]
    fn empty_speaker_name_gets_no_prefix() {
        let agent = find_agent("mira").unwrap();
        let history = vec![TranscriptMessage {
            role: TranscriptRole::Assistant,
            name: Some(String::new()),
            content: "sem nome".to_string(),
        }];
        let messages = build_messages(agent, "d", &history);
        assert_eq!(messages[1], ChatMessage::assistant("sem nome"));
    }
}
