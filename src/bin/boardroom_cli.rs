//! Terminal client for the boardroom server.
//!
//! Usage: `boardroom-cli [BASE_URL]` (defaults to `$BOARDROOM_URL`, then
//! `http://127.0.0.1:3000`).
//!
//! Each round calls the server once per board member, passing the growing
//! transcript along, and prints replies as they stream in. Commands:
//! `/to <id>` addresses one member, `/all` the whole board, `/new` starts a
//! new debate, `/quit` exits.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boardroom::client::{BoardClient, DebateSession, TranscriptRenderer};
use boardroom::debate::protocol::system_error_text;

const DEFAULT_URL: &str = "http://127.0.0.1:3000";

enum Command<'a> {
    Quit,
    New,
    All,
    To(&'a str),
    Help,
    Say(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some(("/to", id)) => Command::To(id.trim()),
        _ => match trimmed {
            "/quit" | "/exit" => Command::Quit,
            "/new" => Command::New,
            "/all" => Command::All,
            "/help" | "/to" => Command::Help,
            other => Command::Say(other),
        },
    }
}

fn prompt(session: &DebateSession) -> String {
    if session.history().is_empty() {
        "Descreva seu dilema de negócio aqui...".to_string()
    } else if let Some(agent) = session.selected_target() {
        format!("Perguntar para {}...", agent.name)
    } else {
        "Responda ou desafie o conselho...".to_string()
    }
}

async fn run_round(client: &BoardClient, session: &mut DebateSession, input: &str) {
    let Some(plan) = session.begin(input) else {
        println!("Descreva seu dilema para iniciar a reunião.");
        return;
    };

    for agent in plan.agents.clone() {
        let request = session.request_for(&plan, agent);
        let mut renderer = TranscriptRenderer::new();
        let mut stdout = std::io::stdout();
        let result = client
            .debate_stream(&request, |segments| {
                if let Err(e) = renderer.render(segments, &mut stdout) {
                    tracing::warn!("Failed to write to terminal: {}", e);
                }
            })
            .await;
        println!();

        match result {
            Ok(segments) => {
                let content: String = segments
                    .iter()
                    .filter(|s| s.agent_id == agent.id)
                    .map(|s| s.content.as_str())
                    .collect();
                session.record_reply(agent, &content);
            }
            Err(e) => {
                tracing::error!(agent = agent.id, error = %e, "Debate call failed");
                println!("{}", system_error_text(agent.id));
            }
        }
    }
    session.finish();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boardroom=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let base_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BOARDROOM_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let client = BoardClient::new(base_url.clone());

    let agents = client.agents().await?;
    println!("Board Virtual ({})", base_url);
    for agent in &agents {
        println!("  {:<6} {} ({}, {})", agent.id, agent.name, agent.role, agent.company);
    }

    let mut session = DebateSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        println!("\n{}", prompt(&session));
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Command::Quit => break,
            Command::New => {
                session.reset();
                println!("Novo debate.");
            }
            Command::All => {
                session.select_target(None);
            }
            Command::To(id) => {
                if !session.select_target(Some(id)) {
                    println!("Membro desconhecido: {}", id);
                }
            }
            Command::Help => {
                println!("/to <id>  |  /all  |  /new  |  /quit");
            }
            Command::Say(text) => run_round(&client, &mut session, text).await,
        }
    }

    Ok(())
}
