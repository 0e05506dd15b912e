//! HTTP API for the boardroom.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/agents` - The board, in speaking order
//! - `POST /api/debate` - Run a board turn (marker-delimited stream or JSON)

mod debate;
mod routes;
pub mod types;

pub use routes::{router, serve, AppState};
pub use types::*;
