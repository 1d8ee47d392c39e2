//! Run-scoped media storage.
//!
//! [`MediaDirs`] owns the three artifact directories and derives every
//! per-run file path from a [`RunId`], so concurrent runs are isolated
//! purely by token uniqueness. Transient artifacts (narration audio,
//! scene images) are deleted at the end of a run; the final video is
//! the only file that survives.

use std::path::{Path, PathBuf};

use crate::types::RunId;

/// The audio/images/videos directories under the media root.
#[derive(Debug, Clone)]
pub struct MediaDirs {
    audio: PathBuf,
    images: PathBuf,
    videos: PathBuf,
}

impl MediaDirs {
    /// Lay out the standard subdirectories under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            audio: root.join("audio"),
            images: root.join("images"),
            videos: root.join("videos"),
        }
    }

    /// Create all three directories if they do not exist yet.
    pub async fn ensure(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.audio).await?;
        tokio::fs::create_dir_all(&self.images).await?;
        tokio::fs::create_dir_all(&self.videos).await?;
        Ok(())
    }

    /// Narration audio path for a run: `{audio}/{run}.mp3`.
    pub fn audio_path(&self, run: &RunId) -> PathBuf {
        self.audio.join(format!("{run}.mp3"))
    }

    /// Scene image path for a run and 0-based scene index:
    /// `{images}/{run}_{index}.jpg`.
    pub fn image_path(&self, run: &RunId, index: usize) -> PathBuf {
        self.images.join(format!("{run}_{index}.jpg"))
    }

    /// Final video path for a run: `{videos}/video_{run}.mp4`.
    pub fn video_path(&self, run: &RunId) -> PathBuf {
        self.videos.join(format!("video_{run}.mp4"))
    }

    /// Delete a run's transient artifacts: the audio file and up to
    /// `image_count` scene images.
    ///
    /// Missing files are skipped silently (a run that failed during
    /// planning never created any), other IO errors are logged and do
    /// not stop the sweep. Returns the number of files removed. The
    /// video artifact is deliberately not touched.
    pub async fn cleanup_run(&self, run: &RunId, image_count: usize) -> usize {
        let mut paths = vec![self.audio_path(run)];
        paths.extend((0..image_count).map(|i| self.image_path(run, i)));

        let mut removed = 0;
        for path in paths {
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(run = %run, path = %path.display(), error = %e,
                        "Failed to remove transient artifact");
                }
            }
        }
        removed
    }
}
