//! Incremental decoder for the streamed chat response.
//!
//! The completion endpoint answers with a chunked body where each logical
//! line is `data: <json-or-sentinel>`, a `:` keepalive comment, or blank.
//! Transport chunks split those lines at arbitrary byte boundaries, so the
//! decoder keeps one growing text buffer carrying whatever partial line the
//! previous chunk left behind and only acts on complete lines.

use serde::Deserialize;

/// Literal prefix of a content-bearing frame, including the space.
const DATA_PREFIX: &str = "data: ";

/// Payload marking intentional end-of-stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Payload shape of a content frame. Only the first choice's incremental
/// delta text matters; everything else in the object is ignored.
#[derive(Debug, Deserialize)]
struct CompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Stateful frame decoder: raw chunks in, content fragments out.
///
/// Once the `[DONE]` sentinel is seen the decoder is finished and further
/// input is discarded, including anything left in the same chunk.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: String,
    /// Incomplete trailing UTF-8 sequence left by the previous chunk.
    pending: Vec<u8>,
    finished: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sentinel has been observed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Feed one raw transport chunk as bytes.
    ///
    /// Chunk boundaries can fall inside a multi-byte UTF-8 sequence; the
    /// incomplete tail is held back and prepended to the next chunk rather
    /// than decoded to replacement characters.
    pub fn feed_bytes(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.finished {
            return Vec::new();
        }

        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let valid_to = match std::str::from_utf8(&bytes) {
            Ok(_) => bytes.len(),
            // error_len() of None means the data ends mid-sequence: keep
            // the tail for the next chunk.
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            // Hard-invalid bytes are not part of the wire contract;
            // decode them lossily rather than stalling.
            Err(_) => bytes.len(),
        };
        self.pending = bytes.split_off(valid_to);

        let text = String::from_utf8_lossy(&bytes);
        self.feed(&text)
    }

    /// Feed one raw transport chunk, returning the content fragments its
    /// complete lines produced. A trailing partial line stays buffered for
    /// the next call. Never fails: malformed frames are re-buffered or
    /// skipped, not surfaced.
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        let mut fragments = Vec::new();
        if self.finished {
            return fragments;
        }

        self.buffer.push_str(chunk);

        while let Some(newline_idx) = self.buffer.find('\n') {
            let mut line: String = self.buffer.drain(..=newline_idx).collect();
            line.pop(); // the '\n'
            if line.ends_with('\r') {
                line.pop();
            }

            if line.trim().is_empty() || line.starts_with(':') {
                continue;
            }
            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                continue;
            };
            let payload = payload.trim();

            if payload == DONE_SENTINEL {
                self.finished = true;
                self.buffer.clear();
                break;
            }

            match serde_json::from_str::<CompletionChunk>(payload) {
                Ok(parsed) => {
                    let content = parsed
                        .choices
                        .into_iter()
                        .next()
                        .and_then(|choice| choice.delta.content);
                    if let Some(text) = content {
                        if !text.is_empty() {
                            fragments.push(text);
                        }
                    }
                }
                Err(_) => {
                    // The line was cut by a chunk boundary in a way the
                    // newline scan did not catch. Push it back, re-terminated,
                    // and wait for more data before scanning again.
                    self.buffer.insert(0, '\n');
                    self.buffer.insert_str(0, &line);
                    break;
                }
            }
        }

        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all_bytes(decoder: &mut FrameDecoder, chunks: &[&[u8]]) -> String {
        let mut out = String::new();
        for chunk in chunks {
            for fragment in decoder.feed_bytes(chunk) {
                out.push_str(&fragment);
            }
            if decoder.is_finished() {
                break;
            }
        }
        out
    }

    fn content_frame(text: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n",
            text
        )
    }

    #[test]
    fn single_chunk_single_frame() {
        let mut decoder = FrameDecoder::new();
        let fragments = decoder.feed(&content_frame("Hello"));
        assert_eq!(fragments, vec!["Hello"]);
        assert!(!decoder.is_finished());
    }

    #[test]
    fn mid_json_chunk_boundary() {
        // The exact scenario from the wire: a frame split inside a JSON
        // string, completed by the next chunk.
        let mut decoder = FrameDecoder::new();
        assert!(decoder
            .feed("data: {\"choices\":[{\"delta\":{\"content\":\"Hel")
            .is_empty());
        assert_eq!(decoder.feed("lo\"}}]}\n"), vec!["Hello"]);
        assert!(decoder.feed("data: [DONE]\n").is_empty());
        assert!(decoder.is_finished());
    }

    #[test]
    fn arbitrary_splits_equal_single_chunk_decode() {
        // Multi-byte content so splits can land inside a UTF-8 sequence.
        let body = format!(
            "{}{}{}data: [DONE]\n",
            content_frame("Héllo, "),
            ": keepalive\n\n",
            content_frame("wörld! ☺")
        );

        let mut whole = FrameDecoder::new();
        let expected: String = whole.feed_bytes(body.as_bytes()).concat();
        assert_eq!(expected, "Héllo, wörld! ☺");

        // Split at every byte position, including mid-line, mid-token and
        // mid-character.
        let bytes = body.as_bytes();
        for split in 0..bytes.len() {
            let mut decoder = FrameDecoder::new();
            let got = feed_all_bytes(&mut decoder, &[&bytes[..split], &bytes[split..]]);
            assert_eq!(got, expected, "split at byte {}", split);
            assert!(decoder.is_finished());
        }
    }

    #[test]
    fn multibyte_char_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        let frame = content_frame("héllo");
        let bytes = frame.as_bytes();
        // One byte into the two-byte 'é'.
        let split = frame.find('é').expect("frame contains é") + 1;
        assert!(decoder.feed_bytes(&bytes[..split]).is_empty());
        assert_eq!(decoder.feed_bytes(&bytes[split..]), vec!["héllo"]);
    }

    #[test]
    fn one_byte_chunks() {
        let body = format!("{}data: [DONE]\n", content_frame("añc"));
        let mut decoder = FrameDecoder::new();
        let mut out = String::new();
        for byte in body.as_bytes() {
            out.push_str(&decoder.feed_bytes(std::slice::from_ref(byte)).concat());
        }
        assert_eq!(out, "añc");
        assert!(decoder.is_finished());
    }

    #[test]
    fn comments_and_blank_lines_emit_nothing() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed(": keepalive\n").is_empty());
        assert!(decoder.feed(":\n").is_empty());
        assert!(decoder.feed("\n").is_empty());
        assert!(decoder.feed("   \n").is_empty());
        assert!(decoder.feed("event: something\n").is_empty());
        assert!(!decoder.is_finished());
    }

    #[test]
    fn crlf_lines() {
        let mut decoder = FrameDecoder::new();
        let fragments =
            decoder.feed("data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\r\n");
        assert_eq!(fragments, vec!["Hi"]);
    }

    #[test]
    fn sentinel_stops_processing_rest_of_chunk() {
        let mut decoder = FrameDecoder::new();
        let chunk = format!("data: [DONE]\n{}", content_frame("ignored"));
        assert!(decoder.feed(&chunk).is_empty());
        assert!(decoder.is_finished());
        // Later chunks are discarded too.
        assert!(decoder.feed(&content_frame("still ignored")).is_empty());
    }

    #[test]
    fn sentinel_mid_chunk_after_content() {
        let mut decoder = FrameDecoder::new();
        let chunk = format!("{}data: [DONE]\n{}", content_frame("keep"), content_frame("drop"));
        assert_eq!(decoder.feed(&chunk), vec!["keep"]);
        assert!(decoder.is_finished());
    }

    #[test]
    fn empty_delta_emits_no_fragment() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder
            .feed("data: {\"choices\":[{\"delta\":{\"content\":\"\"}}]}\n")
            .is_empty());
        assert!(decoder
            .feed("data: {\"choices\":[{\"delta\":{}}]}\n")
            .is_empty());
        assert!(decoder.feed("data: {\"choices\":[]}\n").is_empty());
    }

    #[test]
    fn malformed_line_is_rebuffered_not_raised() {
        let mut decoder = FrameDecoder::new();
        // A newline-terminated line whose JSON is incomplete: pushed back
        // and retried on the next scan, never surfaced as an error.
        assert!(decoder.feed("data: {\"choices\":[{\"del\n").is_empty());
        // The decoder stops emitting (it is waiting for the bad line to
        // become parseable) but keeps accepting input without panicking.
        assert!(decoder.feed("data: [DONE]\n").is_empty());
        assert!(!decoder.is_finished());
    }

    #[test]
    fn fragments_before_malformed_line_are_kept() {
        let mut decoder = FrameDecoder::new();
        let chunk = format!("{}data: {{broken\n", content_frame("ok"));
        assert_eq!(decoder.feed(&chunk), vec!["ok"]);
    }

    #[test]
    fn partial_trailing_line_stays_buffered() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed("data: {\"choices\"").is_empty());
        // Transport closed here: the remainder is simply never processed.
        assert!(!decoder.is_finished());
    }

    #[test]
    fn whitespace_around_payload_is_trimmed() {
        let mut decoder = FrameDecoder::new();
        assert!(decoder.feed("data:  [DONE] \n").is_empty());
        assert!(decoder.is_finished());
    }
}
