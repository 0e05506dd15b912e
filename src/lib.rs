//! # Boardroom
//!
//! A virtual boardroom: the user poses a business dilemma and a fixed panel
//! of four persona agents answers in turn, each building on what the others
//! said.
//!
//! ## Architecture
//!
//! ```text
//!   client ──POST /api/debate──▶ Orchestrator ──▶ ModelChain ──▶ LLM API
//!      ▲                             │ (one agent at a time,     (fallback
//!      │                             │  transcript grows)         per turn)
//!      └── __START_AGENT__:{id}\n ◀──┘
//!          text... (one body)
//! ```
//!
//! ## Modules
//! - `agents`: the persona roster and prompt assembly
//! - `debate`: turn planning, orchestration, model fallback, wire format
//! - `llm`: OpenAI-compatible completion client
//! - `api`: axum HTTP surface
//! - `client`: stream demultiplexer, session state, HTTP client

pub mod agents;
pub mod api;
pub mod client;
pub mod config;
pub mod debate;
pub mod llm;

pub use config::Config;
