//! Assembler seam trait, error type, and the ffmpeg implementation.

use std::path::Path;

use reelforge_core::error::CoreError;
use reelforge_core::ffmpeg::{run_ffmpeg, FfmpegError};
use reelforge_core::timing::{per_scene_duration, total_visual_duration};
use reelforge_core::types::{AudioTrack, SceneImage, VideoArtifact};

use crate::filter::build_encode_args;

/// Errors from the video assembly stage. Encoding is never retried;
/// a partially written output file is not cleaned up here.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// No scene images were supplied; there is nothing to assemble.
    #[error("Cannot assemble a video from zero scene images")]
    NoScenes,

    /// Scene timing could not be derived from the inputs.
    #[error("Invalid assembly timing: {0}")]
    Timing(#[from] CoreError),

    /// The encode itself failed.
    #[error("Video encode failed: {0}")]
    Encode(#[from] FfmpegError),
}

/// Stage seam: anything that can mux scenes and narration into a
/// video file.
#[async_trait::async_trait]
pub trait VideoAssembler: Send + Sync {
    /// Encode `scenes` (index order) timed against `audio` into
    /// `output_path`.
    async fn assemble(
        &self,
        audio: &AudioTrack,
        scenes: &[SceneImage],
        output_path: &Path,
    ) -> Result<VideoArtifact, AssemblyError>;
}

/// Real assembler driving the external ffmpeg binary.
#[derive(Debug, Default)]
pub struct FfmpegAssembler;

#[async_trait::async_trait]
impl VideoAssembler for FfmpegAssembler {
    async fn assemble(
        &self,
        audio: &AudioTrack,
        scenes: &[SceneImage],
        output_path: &Path,
    ) -> Result<VideoArtifact, AssemblyError> {
        if scenes.is_empty() {
            return Err(AssemblyError::NoScenes);
        }

        let per_scene = per_scene_duration(audio.duration_secs, scenes.len())?;
        let images: Vec<&Path> = scenes.iter().map(|s| s.path.as_path()).collect();
        let args = build_encode_args(&images, &audio.path, per_scene, output_path);

        tracing::info!(
            scenes = scenes.len(),
            per_scene_secs = per_scene,
            visual_secs = total_visual_duration(per_scene, scenes.len()),
            audio_secs = audio.duration_secs,
            output = %output_path.display(),
            "Encoding video"
        );

        run_ffmpeg(&args).await?;

        Ok(VideoArtifact {
            path: output_path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::path::PathBuf;

    #[tokio::test]
    async fn assemble_rejects_empty_scene_set() {
        let audio = AudioTrack {
            path: PathBuf::from("n.mp3"),
            duration_secs: 9.0,
        };
        let err = FfmpegAssembler
            .assemble(&audio, &[], Path::new("out.mp4"))
            .await
            .unwrap_err();
        assert_matches!(err, AssemblyError::NoScenes);
    }

    #[tokio::test]
    async fn assemble_rejects_non_positive_audio_duration() {
        let audio = AudioTrack {
            path: PathBuf::from("n.mp3"),
            duration_secs: 0.0,
        };
        let scenes = vec![SceneImage {
            index: 0,
            path: PathBuf::from("a.jpg"),
        }];
        let err = FfmpegAssembler
            .assemble(&audio, &scenes, Path::new("out.mp4"))
            .await
            .unwrap_err();
        assert_matches!(err, AssemblyError::Timing(_));
    }
}
