//! Board personas and per-turn prompt assembly.

mod prompt;
mod roster;

pub use prompt::build_messages;
pub use roster::{find_agent, Agent, BOARD};
