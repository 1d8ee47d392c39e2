//! Shared foundation for the topic-to-video pipeline.
//!
//! Provides the run/artifact data model, per-scene timing math,
//! run-scoped media storage paths, pipeline configuration, and the
//! ffmpeg/ffprobe command utilities used by the synthesis and
//! assembly stages.

pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod storage;
pub mod timing;
pub mod types;
