//! Client side of the boardroom: stream demultiplexing, conversation state,
//! and an HTTP client for the debate API.

mod demux;
mod http;
mod render;
mod session;

pub use demux::{split_segments, Segment, StreamDemuxer};
pub use http::{AgentProfile, BoardClient, ClientError};
pub use render::TranscriptRenderer;
pub use session::{DebateSession, RoundPlan};
