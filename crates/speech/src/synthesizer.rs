//! Synthesizer seam trait and error type.

use std::path::Path;

use reelforge_core::ffmpeg::FfmpegError;
use reelforge_core::types::AudioTrack;

/// Errors from the speech synthesis stage. Fatal to the run, never
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// WebSocket connect/send/receive failure.
    #[error("Speech service error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The service closed the turn without sending any audio.
    #[error("Speech service returned no audio data")]
    EmptyAudio,

    /// Writing the audio file failed.
    #[error("Audio file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Reading the duration back from the synthesized file failed.
    #[error("Audio duration probe failed: {0}")]
    Probe(#[from] FfmpegError),
}

/// Stage seam: anything that can render a script to an audio file.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `script` to `output_path` and return the written
    /// track with its decoded duration.
    ///
    /// Suspends until synthesis completes; the file is fully
    /// materialized on disk before this returns.
    async fn synthesize(
        &self,
        script: &str,
        output_path: &Path,
    ) -> Result<AudioTrack, SynthesisError>;
}
