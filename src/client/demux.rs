//! Incremental demultiplexing of the debate text stream.
//!
//! The server concatenates every agent's reply into one body, each preceded
//! by a `__START_AGENT__:{id}\n` sentinel. The demuxer accumulates the decoded
//! body and, after every chunk, re-splits the whole text into per-agent
//! segments. Re-splitting is quadratic in body length; bodies are a few KB.

use std::sync::OnceLock;

use regex::Regex;

use crate::agents::{find_agent, Agent};
use crate::debate::protocol::MARKER_PREFIX;

/// One agent's (possibly still growing) reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub agent_id: String,
    pub content: String,
}

impl Segment {
    pub fn agent(&self) -> Option<&'static Agent> {
        find_agent(&self.agent_id)
    }
}

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(&format!(r"{}([\w-]+)\n", regex::escape(MARKER_PREFIX)))
            .unwrap_or_else(|e| unreachable!("marker pattern is valid: {}", e))
    })
}

/// Accumulates body chunks and reconstructs per-agent segments.
#[derive(Debug, Default)]
pub struct StreamDemuxer {
    /// Bytes of an incomplete UTF-8 sequence awaiting the next chunk
    pending: Vec<u8>,
    text: String,
}

impl StreamDemuxer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next body chunk and return the segments so far.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Segment> {
        self.pending.extend_from_slice(chunk);
        self.decode_pending();
        split_segments(&self.text, true)
    }

    /// Flush held bytes at end of body and return the final segments.
    pub fn finish(&mut self) -> Vec<Segment> {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.text.push_str(&String::from_utf8_lossy(&rest));
        }
        split_segments(&self.text, false)
    }

    fn decode_pending(&mut self) {
        let mut consumed = 0;
        loop {
            match std::str::from_utf8(&self.pending[consumed..]) {
                Ok(valid) => {
                    self.text.push_str(valid);
                    consumed = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_up_to = consumed + e.valid_up_to();
                    // The prefix up to `valid_up_to` was just validated.
                    if let Ok(valid) = std::str::from_utf8(&self.pending[consumed..valid_up_to]) {
                        self.text.push_str(valid);
                    }
                    match e.error_len() {
                        Some(len) => {
                            self.text.push(char::REPLACEMENT_CHARACTER);
                            consumed = valid_up_to + len;
                        }
                        None => {
                            consumed = valid_up_to;
                            break;
                        }
                    }
                }
            }
        }
        self.pending.drain(..consumed);
    }
}

/// Split decoded text into segments.
///
/// Text before the first sentinel belongs to no agent and is dropped. With
/// `hold_partial`, a trailing fragment that may still grow into a sentinel
/// is withheld from the last segment.
pub fn split_segments(text: &str, hold_partial: bool) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut last_end = 0;

    for caps in marker_regex().captures_iter(text) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if let Some(previous) = segments.last_mut() {
            previous.content = text[last_end..whole.start()].to_string();
        }
        segments.push(Segment {
            agent_id: id.as_str().to_string(),
            content: String::new(),
        });
        last_end = whole.end();
    }

    if let Some(last) = segments.last_mut() {
        let tail = &text[last_end..];
        let keep = if hold_partial {
            partial_marker_start(tail).unwrap_or(tail.len())
        } else {
            tail.len()
        };
        last.content = tail[..keep].to_string();
    }
    segments
}

/// Byte offset where a possibly-incomplete sentinel begins at the end of `s`.
fn partial_marker_start(s: &str) -> Option<usize> {
    if let Some(pos) = s.rfind(MARKER_PREFIX) {
        let id = &s[pos + MARKER_PREFIX.len()..];
        if id.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Some(pos);
        }
    }
    (1..MARKER_PREFIX.len())
        .rev()
        .find(|&k| s.ends_with(&MARKER_PREFIX[..k]))
        .map(|k| s.len() - k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(id: &str, content: &str) -> Segment {
        Segment {
            agent_id: id.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn splits_complete_body_into_ordered_segments() {
        let text = "__START_AGENT__:safra\nCaixa primeiro.__START_AGENT__:steve\nSimplifique.";
        assert_eq!(
            split_segments(text, false),
            vec![seg("safra", "Caixa primeiro."), seg("steve", "Simplifique.")]
        );
    }

    #[test]
    fn text_before_first_marker_is_dropped() {
        assert!(split_segments("stray", false).is_empty());
        assert_eq!(
            split_segments("stray__START_AGENT__:mira\nOi", false),
            vec![seg("mira", "Oi")]
        );
    }

    #[test]
    fn empty_segments_are_kept() {
        let text = "__START_AGENT__:safra\n__START_AGENT__:steve\nOi";
        assert_eq!(
            split_segments(text, false),
            vec![seg("safra", ""), seg("steve", "Oi")]
        );
    }

    #[test]
    fn segments_grow_chunk_by_chunk() {
        let mut demux = StreamDemuxer::new();
        assert!(demux.push(b"__START_AGENT").is_empty());
        assert_eq!(demux.push(b"__:safra\nComo "), vec![seg("safra", "Como ")]);
        assert_eq!(
            demux.push(b"isso se paga?"),
            vec![seg("safra", "Como isso se paga?")]
        );
        assert_eq!(
            demux.push(b"__START_AGENT__:steve\nPor qu"),
            vec![seg("safra", "Como isso se paga?"), seg("steve", "Por qu")]
        );
        assert_eq!(
            demux.finish(),
            vec![seg("safra", "Como isso se paga?"), seg("steve", "Por qu")]
        );
    }

    #[test]
    fn partial_marker_is_withheld_until_resolved() {
        let mut demux = StreamDemuxer::new();
        assert_eq!(demux.push(b"__START_AGENT__:safra\nFim.__STA"), vec![seg("safra", "Fim.")]);
        assert_eq!(
            demux.push(b"RT_AGENT__:mi"),
            vec![seg("safra", "Fim.")]
        );
        assert_eq!(
            demux.push(b"ra\nOi"),
            vec![seg("safra", "Fim."), seg("mira", "Oi")]
        );

        // A fragment that turns out not to be a sentinel is released.
        let mut demux = StreamDemuxer::new();
        assert_eq!(demux.push(b"__START_AGENT__:safra\nsnake_"), vec![seg("safra", "snake")]);
        assert_eq!(demux.push(b"case"), vec![seg("safra", "snake_case")]);
        assert_eq!(demux.push(b" _"), vec![seg("safra", "snake_case ")]);
        assert_eq!(demux.finish(), vec![seg("safra", "snake_case _")]);
    }

    #[test]
    fn multibyte_characters_split_across_chunks() {
        let body = "__START_AGENT__:satya\nAção é cultura.".as_bytes();
        // Split inside the two-byte 'ç'
        let cut = body.iter().position(|&b| b == 0xC3).unwrap() + 1;
        let mut demux = StreamDemuxer::new();
        assert_eq!(demux.push(&body[..cut]), vec![seg("satya", "A")]);
        assert_eq!(demux.push(&body[cut..]), vec![seg("satya", "Ação é cultura.")]);
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let mut demux = StreamDemuxer::new();
        let segments = demux.push(b"__START_AGENT__:mira\nA\xFFB");
        assert_eq!(segments, vec![seg("mira", "A\u{FFFD}B")]);

        let mut demux = StreamDemuxer::new();
        demux.push(b"__START_AGENT__:mira\nA\xC3");
        assert_eq!(demux.finish(), vec![seg("mira", "A\u{FFFD}")]);
    }

    #[test]
    fn segment_resolves_known_agents() {
        assert_eq!(seg("steve", "").agent().map(|a| a.name), Some("Steve Jobs"));
        assert!(seg("ghost", "").agent().is_none());
    }
}
