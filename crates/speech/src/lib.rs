//! Speech synthesis stage.
//!
//! Renders a narration script to a single MP3 file through the Edge
//! read-aloud WebSocket service, then reads the decoded duration back
//! from the file. One synthesis call per run, no concurrency with
//! other stages, no retry.

pub mod edge;
pub mod protocol;
pub mod synthesizer;

pub use edge::EdgeSpeechClient;
pub use synthesizer::{SpeechSynthesizer, SynthesisError};
