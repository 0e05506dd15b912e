//! Incremental terminal rendering of demultiplexed segments.

use std::io::Write;

use super::demux::Segment;

/// Prints only what changed since the previous update.
///
/// Segment content only ever grows between updates, so the renderer keeps
/// the number of segments seen and the bytes already printed for the last one.
#[derive(Debug, Default)]
pub struct TranscriptRenderer {
    segments_seen: usize,
    printed: usize,
}

impl TranscriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, segments: &[Segment], out: &mut impl Write) -> std::io::Result<()> {
        if segments.is_empty() {
            return Ok(());
        }
        // Finish the segment that was being printed.
        let mut index = self.segments_seen.saturating_sub(1);
        while index < segments.len() {
            if index + 1 > self.segments_seen {
                self.segments_seen = index + 1;
                self.printed = 0;
                if index > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}", header(&segments[index]))?;
            }
            let content = &segments[index].content;
            if let Some(fresh) = content.get(self.printed..) {
                out.write_all(fresh.as_bytes())?;
                self.printed = content.len();
            }
            index += 1;
        }
        out.flush()
    }
}

fn header(segment: &Segment) -> String {
    match segment.agent() {
        Some(agent) => format!("── {} ({}, {}) ──", agent.name, agent.role, agent.company),
        None => format!("── {} ──", segment.agent_id),
    }
}
