//! Frame decoding logic.
//!
//! [`decode_frames`] is the pure form: given the full text received so far it returns
//! every complete frame and how many bytes were consumed. [`FrameDecoder`] is the
//! incremental form used by the stream reader; it keeps only the unconsumed suffix
//! between calls, so each byte is scanned once.

use serde_json::Value;
use tracing::debug;

use crate::error::ErrorCategory;
use crate::sse::events::{AnalysisEvent, Frame};
use crate::sse::payloads::classify_payload;

/// Literal tag every event frame starts with.
pub const FRAME_PREFIX: &str = "data: ";

/// Blank line separating frames.
pub const FRAME_DELIMITER: &str = "\n\n";

/// Result of a pure decode over a cumulative buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Complete frames in arrival order
    pub frames: Vec<Frame>,
    /// Byte offset just past the last consumed delimiter
    pub consumed: usize,
}

impl Decoded {
    /// Text after the last complete frame, to be retried once more data arrives.
    pub fn leftover<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.consumed..]
    }

    /// Flatten all frames into their events, dropping malformed and ignored frames.
    pub fn into_events(self) -> Vec<AnalysisEvent> {
        self.frames.into_iter().flat_map(Frame::into_events).collect()
    }
}

/// Decode every complete frame in `buffer`.
///
/// A frame is complete once its terminating blank line has arrived. The unterminated
/// tail is left unconsumed.
pub fn decode_frames(buffer: &str) -> Decoded {
    let mut frames = Vec::new();
    let mut consumed = 0;

    while let Some(pos) = buffer[consumed..].find(FRAME_DELIMITER) {
        frames.push(decode_frame(&buffer[consumed..consumed + pos]));
        consumed += pos + FRAME_DELIMITER.len();
    }

    Decoded { frames, consumed }
}

/// Decode a single frame (without its delimiter).
pub fn decode_frame(frame: &str) -> Frame {
    let Some(payload) = frame.strip_prefix(FRAME_PREFIX) else {
        return Frame::Ignored;
    };

    let parsed = match serde_json::from_str::<Value>(payload) {
        Ok(value) => classify_payload(&value),
        Err(e) => Err(e.to_string()),
    };

    match parsed {
        Ok(events) => Frame::Events(events),
        Err(reason) => Frame::Malformed {
            raw: frame.to_string(),
            reason,
        },
    }
}

/// Incremental frame decoder.
///
/// Feed it raw chunks as they arrive with [`push_bytes`](Self::push_bytes) (or text with
/// [`push`](Self::push)) and call [`finish`](Self::finish) once the body ends. The
/// decoder emits the same frames in the same order as [`decode_frames`] over the
/// concatenated input, however the input is chunked.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Unconsumed text, always starting at a frame boundary
    pending: String,
    /// Bytes of `pending` already searched for a delimiter
    scanned: usize,
    /// Trailing bytes of an incomplete UTF-8 sequence
    utf8_carry: Vec<u8>,
    malformed: u64,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text and return the frames it completed.
    pub fn push(&mut self, text: &str) -> Vec<Frame> {
        self.pending.push_str(text);
        self.drain_complete()
    }

    /// Append raw body bytes and return the frames they completed.
    ///
    /// A multi-byte character split across chunks is held back until its remaining
    /// bytes arrive. Invalid sequences are replaced with U+FFFD.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<Frame> {
        let mut carry = std::mem::take(&mut self.utf8_carry);
        carry.extend_from_slice(bytes);

        let mut text = String::with_capacity(carry.len());
        let mut rest: &[u8] = &carry;
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }
        self.utf8_carry = rest.to_vec();

        self.push(&text)
    }

    /// Flush at end of body: complete frames first, then the unterminated tail as one
    /// final frame.
    pub fn finish(&mut self) -> Vec<Frame> {
        if !self.utf8_carry.is_empty() {
            let carry = std::mem::take(&mut self.utf8_carry);
            self.pending.push_str(&String::from_utf8_lossy(&carry));
        }

        let mut frames = self.drain_complete();
        if !self.pending.is_empty() {
            let tail = std::mem::take(&mut self.pending);
            let frame = decode_frame(&tail);
            frames.push(self.record(frame));
        }
        self.scanned = 0;
        frames
    }

    /// Text received but not yet part of a complete frame.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of malformed frames dropped so far.
    pub fn malformed_count(&self) -> u64 {
        self.malformed
    }

    fn drain_complete(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut start = 0;
        // Back up one byte when the delimiter may straddle the previous push
        let mut search_from = if self.scanned > 0 && self.pending.as_bytes()[self.scanned - 1] == b'\n'
        {
            self.scanned - 1
        } else {
            self.scanned
        };

        while let Some(pos) = self.pending[search_from..].find(FRAME_DELIMITER) {
            let end = search_from + pos;
            let frame = decode_frame(&self.pending[start..end]);
            frames.push(self.record(frame));
            start = end + FRAME_DELIMITER.len();
            search_from = start;
        }

        self.pending.drain(..start);
        self.scanned = self.pending.len();
        frames
    }

    fn record(&mut self, frame: Frame) -> Frame {
        if let Frame::Malformed { raw, reason } = &frame {
            self.malformed += 1;
            debug!(
                category = %ErrorCategory::MalformedFrame,
                reason = %reason,
                bytes = raw.len(),
                "dropping malformed frame"
            );
        }
        frame
    }
}
