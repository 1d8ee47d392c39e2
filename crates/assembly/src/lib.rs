//! Video assembly stage.
//!
//! Splits the narration duration evenly across the scene images,
//! renders each as a static clip with a 0.5s crossfade at its leading
//! edge, concatenates with overlap, attaches the narration as the
//! soundtrack, and encodes one output file.

pub mod assembler;
pub mod filter;

pub use assembler::{AssemblyError, FfmpegAssembler, VideoAssembler};
