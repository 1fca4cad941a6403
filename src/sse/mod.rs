//! Progress-stream frame decoding.
//!
//! The analysis service answers an upload with a single growing response body made of
//! frames separated by a blank line:
//!
//! ```text
//! data: {"progress": 10, "stage": "Parsing file..."}
//!
//! data: {"progress": 100, "stage": "Done", "result": {"summary": "...", "investment_score": 80, "sources": []}}
//!
//! ```
//!
//! # Module structure
//! - `events` - decoded event types (`AnalysisEvent`, `Frame`)
//! - `payloads` - JSON classification of a frame payload
//! - `parser` - pure `decode_frames` and the incremental `FrameDecoder`

mod events;
mod parser;
mod payloads;

pub use events::{AnalysisEvent, Frame};
pub use parser::{decode_frame, decode_frames, Decoded, FrameDecoder, FRAME_DELIMITER, FRAME_PREFIX};
