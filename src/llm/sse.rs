//! Line-buffered Server-Sent Events decoding for completion streams.

use bytes::Bytes;
use futures::{Stream, StreamExt};

use super::error::LlmError;

/// A decoded SSE frame carrying a `data:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// Raw payload of a `data:` line (usually a JSON chunk)
    Data(String),
    /// `data: [DONE]` terminator
    Done,
}

/// Decode a byte stream into SSE data frames.
///
/// Chunks may split lines anywhere; bytes are buffered until a newline is
/// seen. Comment, `event:` and blank lines are skipped. The stream ends after
/// `[DONE]`, after an upstream error, or when the body ends (a final line
/// without a trailing newline is still decoded).
pub fn decode_sse<S, E>(
    inner: S,
) -> impl Stream<Item = Result<SseFrame, LlmError>> + Send + 'static
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    futures::stream::unfold(
        Some((Box::pin(inner), Vec::<u8>::new())),
        |state| async move {
            let (mut stream, mut buf) = match state {
                Some(state) => state,
                None => return None,
            };
            loop {
                if let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line = buf.drain(..=pos).collect::<Vec<u8>>();
                    match parse_line(&line) {
                        Some(SseFrame::Done) => return Some((Ok(SseFrame::Done), None)),
                        Some(frame) => return Some((Ok(frame), Some((stream, buf)))),
                        None => continue,
                    }
                }

                match stream.next().await {
                    Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
                    Some(Err(e)) => {
                        let err = LlmError::network_error(format!("Stream interrupted: {}", e));
                        return Some((Err(err), None));
                    }
                    None => {
                        if buf.is_empty() {
                            return None;
                        }
                        let remaining = std::mem::take(&mut buf);
                        return parse_line(&remaining).map(|frame| (Ok(frame), None));
                    }
                }
            }
        },
    )
}

fn parse_line(line: &[u8]) -> Option<SseFrame> {
    let trimmed = line
        .strip_suffix(b"\r\n")
        .or_else(|| line.strip_suffix(b"\n"))
        .unwrap_or(line);
    let payload = trimmed.strip_prefix(b"data:")?;
    let payload = payload.strip_prefix(b" ").unwrap_or(payload);
    let payload = String::from_utf8_lossy(payload);

    if payload.trim() == "[DONE]" {
        return Some(SseFrame::Done);
    }
    Some(SseFrame::Data(payload.into_owned()))
}
